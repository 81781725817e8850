use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::core::probe::{Probe, Target};
use crate::core::sequence::{self, SequenceError};
use crate::core::types::{Orientation, StrandSelection};

/// A single exact occurrence of a probe (or its reverse complement) in the target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// Name of the probe that matched
    pub probe_name: String,

    /// Index of the probe in the input list
    #[serde(skip)]
    pub probe_index: usize,

    /// Whether the probe or its reverse complement matched
    pub orientation: Orientation,

    /// 1-based inclusive start position in the target
    pub start: usize,

    /// 1-based inclusive end position in the target
    pub end: usize,

    /// Target text at `start..=end`, in the target's original case
    pub matched_sequence: String,
}

/// Errors from a bounded search
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error(transparent)]
    InvalidSequence(#[from] SequenceError),

    #[error("Too many matches: more than {0} found")]
    TooManyMatches(usize),
}

/// Configuration for the matching engine
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingConfig {
    /// Orientations to report
    pub strands: StrandSelection,
}

/// Scans a target for every probe in a fixed probe list
pub struct MatchingEngine<'a> {
    probes: &'a [Probe],
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine reporting both orientations
    pub fn new(probes: &'a [Probe]) -> Self {
        Self {
            probes,
            config: MatchingConfig::default(),
        }
    }

    /// Create a new matching engine with custom configuration
    pub fn with_config(probes: &'a [Probe], config: MatchingConfig) -> Self {
        Self { probes, config }
    }

    /// Number of full passes over the target this search will make
    #[must_use]
    pub fn scan_count(&self) -> usize {
        let per_probe = match self.config.strands {
            StrandSelection::Both => 2,
            StrandSelection::Forward | StrandSelection::ReverseComplement => 1,
        };
        self.probes.len() * per_probe
    }

    /// Find all matches of all probes in `target`.
    ///
    /// Records are grouped by probe in input order, forward before reverse
    /// complement, and by ascending start within each orientation. Overlapping
    /// occurrences are all reported. A palindromic probe (equal to its own
    /// reverse complement) is reported once, as forward, when both
    /// orientations are requested.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::InvalidBase` if a probe's sequence is not a
    /// valid DNA sequence.
    pub fn find_matches(&self, target: &Target) -> Result<Vec<MatchRecord>, SequenceError> {
        let mut records = Vec::new();
        self.visit(target, |record| {
            records.push(record);
            Ok::<(), SequenceError>(())
        })?;
        Ok(records)
    }

    /// Like [`find_matches`](Self::find_matches), but stops scanning once
    /// more than `max_matches` records have been found.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::TooManyMatches` when the limit is passed, or
    /// `MatchError::InvalidSequence` for an invalid probe sequence.
    pub fn find_matches_limited(
        &self,
        target: &Target,
        max_matches: usize,
    ) -> Result<Vec<MatchRecord>, MatchError> {
        let mut records = Vec::new();
        self.visit(target, |record| {
            if records.len() >= max_matches {
                return Err(MatchError::TooManyMatches(max_matches));
            }
            records.push(record);
            Ok(())
        })?;
        Ok(records)
    }

    /// Hand every match to `emit` in report order, stopping at its first error
    fn visit<E, F>(&self, target: &Target, mut emit: F) -> Result<(), E>
    where
        E: From<SequenceError>,
        F: FnMut(MatchRecord) -> Result<(), E>,
    {
        for (index, probe) in self.probes.iter().enumerate() {
            let forward = sequence::normalize(&probe.sequence)?;
            if forward.is_empty() {
                debug!("Skipping probe '{}' with empty sequence", probe.name);
                continue;
            }
            let reverse = sequence::reverse_complement(&forward)?;
            let palindromic = reverse == forward;

            let mut found = 0;

            if self.config.strands.includes(Orientation::Forward) {
                found += scan(target, probe, index, &forward, Orientation::Forward, &mut emit)?;
            }

            // Palindromes were already covered by the forward scan
            let skip_reverse = palindromic && self.config.strands == StrandSelection::Both;
            if self.config.strands.includes(Orientation::ReverseComplement) && !skip_reverse {
                found += scan(
                    target,
                    probe,
                    index,
                    &reverse,
                    Orientation::ReverseComplement,
                    &mut emit,
                )?;
            }

            debug!(
                "Probe '{}' ({} bp{}): {} match(es)",
                probe.name,
                forward.len(),
                if palindromic { ", palindromic" } else { "" },
                found
            );
        }

        Ok(())
    }
}

/// Find all matches using the default configuration.
///
/// # Errors
///
/// Returns `SequenceError::InvalidBase` if a probe's sequence is not a valid
/// DNA sequence.
///
/// # Examples
///
/// ```
/// use probe_matcher::{find_matches, Orientation, Probe, Target};
///
/// let probes = vec![Probe::new("p", "GCGT").unwrap()];
/// let target = Target::new("ATGCGT").unwrap();
/// let matches = find_matches(&probes, &target).unwrap();
///
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].orientation, Orientation::Forward);
/// assert_eq!((matches[0].start, matches[0].end), (3, 6));
/// ```
pub fn find_matches(probes: &[Probe], target: &Target) -> Result<Vec<MatchRecord>, SequenceError> {
    MatchingEngine::new(probes).find_matches(target)
}

/// 0-based start offsets of every occurrence of `needle` in `haystack`,
/// advancing one position at a time so overlaps are included.
fn occurrences<'h>(haystack: &'h [u8], needle: &'h [u8]) -> impl Iterator<Item = usize> + 'h {
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(move |(_, window)| *window == needle)
        .map(|(i, _)| i)
}

fn scan<E, F>(
    target: &Target,
    probe: &Probe,
    probe_index: usize,
    pattern: &str,
    orientation: Orientation,
    emit: &mut F,
) -> Result<usize, E>
where
    F: FnMut(MatchRecord) -> Result<(), E>,
{
    let len = pattern.len();
    let mut found = 0;
    for i in occurrences(target.normalized().as_bytes(), pattern.as_bytes()) {
        emit(MatchRecord {
            probe_name: probe.name.clone(),
            probe_index,
            orientation,
            start: i + 1,
            end: i + len,
            matched_sequence: target.original()[i..i + len].to_string(),
        })?;
        found += 1;
    }
    Ok(found)
}
