use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;
use tracing::debug;

use crate::core::probe::Target;
use crate::core::sequence::SequenceError;
use crate::utils::validation::{check_target_length, MAX_TARGET_LENGTH};

#[derive(Error, Debug)]
pub enum TargetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Expected a single target sequence but found {0} FASTA records")]
    MultipleRecords(usize),

    #[error("Target sequence of {0} bases exceeds maximum allowed ({MAX_TARGET_LENGTH})")]
    TooLong(usize),

    #[error("Invalid target sequence: {0}")]
    InvalidSequence(#[from] SequenceError),
}

/// Parse a target sequence from raw text.
///
/// All whitespace is removed, including line breaks inside the sequence.
/// FASTA input is accepted when it holds exactly one record; its header line
/// is dropped. Positions in validation errors refer to the cleaned sequence.
///
/// # Errors
///
/// Returns `TargetError::MultipleRecords` for multi-record FASTA,
/// `TargetError::TooLong` past the length limit, and
/// `TargetError::InvalidSequence` for characters outside A, T, G, C.
pub fn parse_target_text(text: &str) -> Result<Target, TargetError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut records = 0usize;
    let mut cleaned = String::with_capacity(text.len());

    for line in text.lines() {
        let line = line.trim();
        if line.starts_with('>') {
            records += 1;
            if records > 1 {
                return Err(TargetError::MultipleRecords(
                    text.lines().filter(|l| l.trim_start().starts_with('>')).count(),
                ));
            }
            debug!("Reading target from FASTA record '{}'", &line[1..]);
            continue;
        }
        cleaned.extend(line.chars().filter(|c| !c.is_whitespace()));

        if check_target_length(cleaned.len()).is_some() {
            return Err(TargetError::TooLong(cleaned.len()));
        }
    }

    Ok(Target::new(&cleaned)?)
}

/// Read and parse a target from any reader, gunzipping when `gzipped` is set.
///
/// # Errors
///
/// Returns `TargetError::Io` if reading or decompression fails, or any error
/// from [`parse_target_text`].
pub fn read_target<R: Read>(reader: R, gzipped: bool) -> Result<Target, TargetError> {
    let mut text = String::new();
    if gzipped {
        MultiGzDecoder::new(BufReader::new(reader)).read_to_string(&mut text)?;
    } else {
        BufReader::new(reader).read_to_string(&mut text)?;
    }
    parse_target_text(&text)
}

/// Parse a target from a file, `-` for stdin. Files ending in `.gz` are
/// decompressed.
///
/// # Errors
///
/// Returns `TargetError::Io` if the file cannot be read, or any error from
/// [`parse_target_text`].
pub fn parse_target_file(path: &Path) -> Result<Target, TargetError> {
    if path.as_os_str() == "-" {
        return read_target(std::io::stdin().lock(), false);
    }

    let gzipped = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    let file = std::fs::File::open(path)?;
    read_target(file, gzipped)
}
