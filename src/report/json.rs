use serde::Serialize;

use crate::core::types::StrandSelection;
use crate::matching::engine::MatchRecord;
use crate::matching::summary::{MatchSummary, ProbeHits};
use crate::parsing::probes::RowError;

/// JSON document describing a finished search
#[derive(Debug, Serialize)]
pub struct SearchReport<'a> {
    pub summary: SummaryView<'a>,
    pub matches: Vec<MatchRow<'a>>,
    pub per_probe: &'a [ProbeHits],
    pub rejected_rows: Vec<RejectedRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_info: Option<ProcessingInfo>,
}

#[derive(Debug, Serialize)]
pub struct SummaryView<'a> {
    pub probe_count: usize,
    pub target_length: usize,
    pub total_matches: usize,
    pub forward_matches: usize,
    pub reverse_complement_matches: usize,
    pub matched_probes: usize,
    pub unmatched_probes: Vec<&'a str>,
}

/// A match record plus its result-file `Match_Type` label
#[derive(Debug, Serialize)]
pub struct MatchRow<'a> {
    #[serde(flatten)]
    pub record: &'a MatchRecord,
    pub match_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RejectedRow {
    pub line: u64,
    pub error: String,
}

/// Request details added by the web server
#[derive(Debug, Serialize)]
pub struct ProcessingInfo {
    pub processing_time_ms: u64,
    pub strands: StrandSelection,
    pub probe_source: Option<String>,
}

/// Assemble the JSON report for a finished search
#[must_use]
pub fn search_report<'a>(
    summary: &'a MatchSummary,
    matches: &'a [MatchRecord],
    rejected: &[RowError],
) -> SearchReport<'a> {
    SearchReport {
        summary: SummaryView {
            probe_count: summary.probe_count,
            target_length: summary.target_length,
            total_matches: summary.total_matches,
            forward_matches: summary.forward_matches,
            reverse_complement_matches: summary.reverse_complement_matches,
            matched_probes: summary.matched_probe_count(),
            unmatched_probes: summary.unmatched(),
        },
        matches: matches
            .iter()
            .map(|record| MatchRow {
                record,
                match_type: record.orientation.label(),
            })
            .collect(),
        per_probe: &summary.per_probe,
        rejected_rows: rejected
            .iter()
            .map(|r| RejectedRow {
                line: r.line(),
                error: r.to_string(),
            })
            .collect(),
        processing_info: None,
    }
}
