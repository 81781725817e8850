use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::probe::Probe;
use crate::core::sequence::{self, SequenceError};
use crate::utils::validation::{check_probe_limit, MAX_PROBES};

/// Words that mark the first row of a probe file as a header
const HEADER_KEYWORDS: [&str; 5] = ["probe", "name", "sequence", "id", "label"];

/// A problem with a single probe row
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("Line {line}: missing {field}")]
    MissingField { line: u64, field: &'static str },

    #[error("Line {line}: probe '{name}' has an invalid sequence: {source}")]
    InvalidSequence {
        line: u64,
        name: String,
        source: SequenceError,
    },
}

impl RowError {
    #[must_use]
    pub fn line(&self) -> u64 {
        match self {
            Self::MissingField { line, .. } | Self::InvalidSequence { line, .. } => *line,
        }
    }
}

#[derive(Error, Debug)]
pub enum ProbeParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid probe table: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Row(#[from] RowError),

    #[error("No probe data found")]
    NoProbes,

    #[error("Too many probes: more than {0} rows, maximum allowed is {MAX_PROBES}")]
    TooManyProbes(usize),
}

/// Options for reading a probe table
#[derive(Debug, Clone, Copy)]
pub struct ProbeParseOptions {
    /// Field delimiter, `,` for CSV and tab for TSV
    pub delimiter: u8,
    /// Fail on the first bad row instead of collecting it
    pub strict: bool,
}

impl Default for ProbeParseOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            strict: false,
        }
    }
}

/// Probes read from a table, plus the rows that were skipped
#[derive(Debug, Clone, Default)]
pub struct ProbeSet {
    pub probes: Vec<Probe>,
    pub rejected: Vec<RowError>,
}

/// Pick a delimiter from a file extension: tab for `.tsv`/`.tab`/`.txt`, comma otherwise
#[must_use]
pub fn delimiter_for_path(path: &Path) -> u8 {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("tsv" | "tab" | "txt") => b'\t',
        _ => b',',
    }
}

/// Parse a probe file with columns: name, sequence
///
/// # Errors
///
/// Returns `ProbeParseError::Io` if the file cannot be read, or other parse
/// errors if the content is invalid.
pub fn parse_probe_file(path: &Path, options: ProbeParseOptions) -> Result<ProbeSet, ProbeParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_probe_text(&content, options)
}

/// Parse probe table text with columns: name, sequence
///
/// Blank lines and comment lines are ignored. A comment is a row whose
/// first field is `#` alone, `#` followed by whitespace, or starts with `##`,
/// so a probe named like `#12` is still read. The first row is treated as a
/// header when its sequence column is not DNA and it mentions one of
/// probe/name/sequence/id/label. Extra columns are ignored.
///
/// # Errors
///
/// Returns `ProbeParseError::Row` for the first bad row in strict mode, or
/// when every row was bad. Returns `ProbeParseError::NoProbes` if the table
/// has no data rows, `ProbeParseError::TooManyProbes` if the limit is
/// exceeded, and `ProbeParseError::Csv` for malformed quoting.
pub fn parse_probe_text(text: &str, options: ProbeParseOptions) -> Result<ProbeSet, ProbeParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(options.delimiter)
        .from_reader(text.as_bytes());

    let mut set = ProbeSet::default();
    let mut first_row = true;

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let line = record.position().map_or(i as u64 + 1, csv::Position::line);

        let name = record.get(0).unwrap_or_default();
        let seq = record.get(1).unwrap_or_default();

        if is_comment(name) {
            debug!("Skipping comment on line {line}");
            continue;
        }

        if first_row {
            first_row = false;
            if is_header_row(name, seq) {
                debug!("Treating line {line} as a header row");
                continue;
            }
        }

        if let Some(err) = check_probe_limit(set.probes.len()) {
            debug!("{err}");
            return Err(ProbeParseError::TooManyProbes(set.probes.len()));
        }

        match parse_row(line, name, seq) {
            Ok(probe) => set.probes.push(probe),
            Err(err) if options.strict => return Err(err.into()),
            Err(err) => {
                warn!("Skipping probe row: {err}");
                set.rejected.push(err);
            }
        }
    }

    if set.probes.is_empty() {
        return match set.rejected.first() {
            Some(err) => Err(err.clone().into()),
            None => Err(ProbeParseError::NoProbes),
        };
    }

    debug!(
        "Parsed {} probe(s), rejected {} row(s)",
        set.probes.len(),
        set.rejected.len()
    );

    Ok(set)
}

fn parse_row(line: u64, name: &str, seq: &str) -> Result<Probe, RowError> {
    if name.is_empty() {
        return Err(RowError::MissingField {
            line,
            field: "probe name",
        });
    }
    if seq.is_empty() {
        return Err(RowError::MissingField {
            line,
            field: "sequence",
        });
    }

    Probe::new(name, seq).map_err(|source| RowError::InvalidSequence {
        line,
        name: name.to_string(),
        source,
    })
}

fn is_comment(first_field: &str) -> bool {
    match first_field.strip_prefix('#') {
        Some(rest) => rest.is_empty() || rest.starts_with('#') || rest.starts_with(char::is_whitespace),
        None => false,
    }
}

fn is_header_row(name: &str, seq: &str) -> bool {
    if !seq.is_empty() && sequence::validate(seq).is_ok() {
        return false;
    }
    let name = name.to_lowercase();
    let seq = seq.to_lowercase();
    HEADER_KEYWORDS
        .iter()
        .any(|k| name.contains(k) || seq.contains(k))
}
