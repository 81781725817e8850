use serde::Serialize;

use crate::core::probe::Probe;
use crate::core::types::Orientation;
use crate::matching::engine::MatchRecord;

/// Hit counts for one input probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeHits {
    pub name: String,
    pub forward: usize,
    pub reverse_complement: usize,
}

impl ProbeHits {
    #[must_use]
    pub fn total(&self) -> usize {
        self.forward + self.reverse_complement
    }
}

/// Aggregate view of a search, one entry per input probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub probe_count: usize,
    pub target_length: usize,
    pub total_matches: usize,
    pub forward_matches: usize,
    pub reverse_complement_matches: usize,
    pub per_probe: Vec<ProbeHits>,
}

impl MatchSummary {
    /// Tally `matches` against the probe list they were produced from
    #[must_use]
    pub fn new(probes: &[Probe], target_length: usize, matches: &[MatchRecord]) -> Self {
        let mut per_probe: Vec<ProbeHits> = probes
            .iter()
            .map(|p| ProbeHits {
                name: p.name.clone(),
                forward: 0,
                reverse_complement: 0,
            })
            .collect();

        for m in matches {
            if let Some(hits) = per_probe.get_mut(m.probe_index) {
                match m.orientation {
                    Orientation::Forward => hits.forward += 1,
                    Orientation::ReverseComplement => hits.reverse_complement += 1,
                }
            }
        }

        let forward_matches = per_probe.iter().map(|h| h.forward).sum();
        let reverse_complement_matches = per_probe.iter().map(|h| h.reverse_complement).sum();

        Self {
            probe_count: probes.len(),
            target_length,
            total_matches: matches.len(),
            forward_matches,
            reverse_complement_matches,
            per_probe,
        }
    }

    /// Names of probes with no match in either orientation
    #[must_use]
    pub fn unmatched(&self) -> Vec<&str> {
        self.per_probe
            .iter()
            .filter(|h| h.total() == 0)
            .map(|h| h.name.as_str())
            .collect()
    }

    /// Number of probes with at least one match
    #[must_use]
    pub fn matched_probe_count(&self) -> usize {
        self.per_probe.iter().filter(|h| h.total() > 0).count()
    }
}
