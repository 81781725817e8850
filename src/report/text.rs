use std::io::{self, Write};

use crate::matching::engine::MatchRecord;
use crate::matching::summary::MatchSummary;
use crate::parsing::probes::RowError;

/// Write a human-readable results table and summary
///
/// # Errors
///
/// Returns an IO error if writing fails.
pub fn write_text<W: Write>(
    out: &mut W,
    summary: &MatchSummary,
    matches: &[MatchRecord],
    rejected: &[RowError],
) -> io::Result<()> {
    writeln!(out, "Probe Matches")?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(
        out,
        "Target: {} bp, {} probe(s)",
        summary.target_length, summary.probe_count
    )?;

    if !rejected.is_empty() {
        writeln!(out, "\nSkipped {} probe row(s):", rejected.len())?;
        for r in rejected.iter().take(5) {
            writeln!(out, "  - {r}")?;
        }
        if rejected.len() > 5 {
            writeln!(out, "  ... and {} more", rejected.len() - 5)?;
        }
    }

    if matches.is_empty() {
        writeln!(out, "\nNo matches found")?;
        return Ok(());
    }

    let name_width = matches
        .iter()
        .map(|m| m.probe_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Probe Name".len());

    writeln!(out)?;
    writeln!(
        out,
        "{:<name_width$}  {:<10}  {:>8}  {:>8}  Matched Sequence",
        "Probe Name", "Match Type", "Start", "End"
    )?;
    writeln!(out, "{}", "─".repeat(name_width + 44))?;
    for m in matches {
        writeln!(
            out,
            "{:<name_width$}  {:<10}  {:>8}  {:>8}  {}",
            m.probe_name,
            m.orientation.label(),
            m.start,
            m.end,
            m.matched_sequence
        )?;
    }

    writeln!(
        out,
        "\nFound {} match(es): {} forward, {} reverse complement",
        summary.total_matches, summary.forward_matches, summary.reverse_complement_matches
    )?;
    writeln!(
        out,
        "Probes with matches: {}/{}",
        summary.matched_probe_count(),
        summary.probe_count
    )?;

    let unmatched = summary.unmatched();
    if !unmatched.is_empty() {
        writeln!(out, "No matches for: {}", unmatched.join(", "))?;
    }

    Ok(())
}
