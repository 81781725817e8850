use std::io::Write;
use std::path::Path;

use crate::matching::engine::MatchRecord;

/// Column names of the result file
pub const RESULT_COLUMNS: [&str; 5] = [
    "Probe_Name",
    "Match_Type",
    "Start_Position",
    "End_Position",
    "Matched_Sequence",
];

/// Default file name offered for saved results
pub const DEFAULT_RESULT_FILE: &str = "probe_matches.csv";

/// Write matches as a delimited table with a header row.
///
/// Names containing the delimiter or quotes are quoted.
///
/// # Errors
///
/// Returns `csv::Error` if writing fails.
pub fn write_table<W: Write>(
    writer: W,
    matches: &[MatchRecord],
    delimiter: u8,
) -> Result<(), csv::Error> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    out.write_record(RESULT_COLUMNS)?;
    for m in matches {
        let start = m.start.to_string();
        let end = m.end.to_string();
        out.write_record([
            m.probe_name.as_str(),
            m.orientation.label(),
            start.as_str(),
            end.as_str(),
            m.matched_sequence.as_str(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Write matches as CSV
///
/// # Errors
///
/// Returns `csv::Error` if writing fails.
pub fn write_csv<W: Write>(writer: W, matches: &[MatchRecord]) -> Result<(), csv::Error> {
    write_table(writer, matches, b',')
}

/// Write matches as TSV
///
/// # Errors
///
/// Returns `csv::Error` if writing fails.
pub fn write_tsv<W: Write>(writer: W, matches: &[MatchRecord]) -> Result<(), csv::Error> {
    write_table(writer, matches, b'\t')
}

/// Save matches to a CSV file, replacing any existing file
///
/// # Errors
///
/// Returns `csv::Error` if the file cannot be created or written.
pub fn write_csv_file(path: &Path, matches: &[MatchRecord]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_csv(std::io::BufWriter::new(file), matches)
}
