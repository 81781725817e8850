//! Input limits and upload validation.

/// Maximum number of probes accepted from a single table (DOS protection)
pub const MAX_PROBES: usize = 100_000;

/// Maximum target length in bases (DOS protection)
pub const MAX_TARGET_LENGTH: usize = 250_000_000;

/// Maximum number of matches returned by a single web search (DOS protection)
pub const MAX_MATCHES: usize = 100_000;

/// Maximum bases compared by a single web search: target length times
/// the number of probe/orientation scans (DOS protection)
pub const MAX_SEARCH_WORK: u64 = 1_000_000_000;

/// Security-related constants for input validation
pub const MAX_FILENAME_LENGTH: usize = 255;
pub const MIN_FILE_CONTENT_SIZE: usize = 1;

/// Check if adding another probe would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new probe.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_probe_limit(count: usize) -> Option<String> {
    if count >= MAX_PROBES {
        Some(format!(
            "Too many probes: adding another would exceed maximum of {MAX_PROBES}"
        ))
    } else {
        None
    }
}

/// Check a target length against the maximum allowed.
///
/// Returns an error message if `length` exceeds the limit, None otherwise.
#[must_use]
pub fn check_target_length(length: usize) -> Option<String> {
    if length > MAX_TARGET_LENGTH {
        Some(format!(
            "Target too long: {length} bases exceeds maximum of {MAX_TARGET_LENGTH}"
        ))
    } else {
        None
    }
}

/// Check the size of a search before running it.
///
/// `scans` is the number of passes over the target (probes times orientations).
/// Returns an error message if the search would exceed [`MAX_SEARCH_WORK`].
#[must_use]
pub fn check_search_work(scans: usize, target_length: usize) -> Option<String> {
    let work = (scans as u64).saturating_mul(target_length as u64);
    if work > MAX_SEARCH_WORK {
        Some(format!(
            "Search too large: {scans} scan(s) over {target_length} bases exceeds maximum of {MAX_SEARCH_WORK} bases compared"
        ))
    } else {
        None
    }
}

/// Security validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Filename too long: exceeds {MAX_FILENAME_LENGTH} characters")]
    FilenameTooLong,
    #[error("Invalid filename: contains path traversal or invalid characters")]
    InvalidFilename,
    #[error("Empty filename provided")]
    EmptyFilename,
    #[error("File content appears malformed or invalid")]
    InvalidFileContent,
}

/// Secure filename validation to prevent directory traversal and other attacks
///
/// Validates and sanitizes filenames by:
/// - Checking length limits
/// - Preventing directory traversal (../, ..\\)
/// - Removing potentially dangerous characters
///
/// # Errors
///
/// Returns `ValidationError::EmptyFilename` if the filename is empty,
/// `ValidationError::FilenameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidFilename` if it contains invalid characters.
pub fn validate_filename(filename: &str) -> Result<String, ValidationError> {
    if filename.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong);
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ValidationError::InvalidFilename);
    }

    if filename.contains('\0') || filename.chars().any(|c| ('\x01'..='\x1F').contains(&c)) {
        return Err(ValidationError::InvalidFilename);
    }

    let sanitized = filename
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-' || *c == '_' || *c == ' ')
        .collect::<String>();

    if sanitized.trim().is_empty() {
        return Err(ValidationError::InvalidFilename);
    }

    // Hidden files only with a probe/sequence extension
    if sanitized.starts_with('.') && !has_known_extension(&sanitized) {
        return Err(ValidationError::InvalidFilename);
    }

    Ok(sanitized)
}

fn has_known_extension(filename: &str) -> bool {
    let safe_extensions = [".csv", ".tsv", ".tab", ".txt", ".fa", ".fasta", ".fna"];

    safe_extensions
        .iter()
        .any(|ext| filename.to_lowercase().ends_with(ext))
}

/// Validate that uploaded content is non-empty UTF-8 text
///
/// # Errors
///
/// Returns `ValidationError::InvalidFileContent` if the content is empty,
/// has too many control bytes, or is not UTF-8.
pub fn validate_text_content(content: &[u8]) -> Result<(), ValidationError> {
    if content.len() < MIN_FILE_CONTENT_SIZE {
        return Err(ValidationError::InvalidFileContent);
    }

    let control_count = content
        .iter()
        .filter(|&&b| b < 9 || (b > 13 && b < 32) || b == 127)
        .count();

    // Allow up to 5% control bytes
    if content.len() > 100 && control_count > content.len() / 20 {
        return Err(ValidationError::InvalidFileContent);
    }

    if std::str::from_utf8(content).is_err() {
        return Err(ValidationError::InvalidFileContent);
    }

    Ok(())
}

/// Filename and content checks for an uploaded probe table
///
/// # Errors
///
/// Returns a `ValidationError` if filename validation or content validation fails.
pub fn validate_upload(
    filename: Option<&str>,
    content: &[u8],
) -> Result<Option<String>, ValidationError> {
    let validated_filename = filename.map(validate_filename).transpose()?;
    validate_text_content(content)?;
    Ok(validated_filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_probe_limit() {
        assert!(check_probe_limit(100).is_none());
        assert!(check_probe_limit(MAX_PROBES - 1).is_none());
        assert!(check_probe_limit(MAX_PROBES).is_some());
    }

    #[test]
    fn test_check_target_length() {
        assert!(check_target_length(0).is_none());
        assert!(check_target_length(MAX_TARGET_LENGTH).is_none());
        assert!(check_target_length(MAX_TARGET_LENGTH + 1).is_some());
    }

    #[test]
    fn test_check_search_work() {
        assert!(check_search_work(0, MAX_TARGET_LENGTH).is_none());
        assert!(check_search_work(2, 1_000).is_none());
        assert!(check_search_work(1, 1_000_000_000).is_none());
        assert!(check_search_work(2, 1_000_000_000).is_some());
        assert!(check_search_work(2 * MAX_PROBES, 64 * 1024 * 1024).is_some());
        assert!(check_search_work(usize::MAX, usize::MAX).is_some());
    }

    #[test]
    fn test_validate_filename_safe() {
        assert!(validate_filename("probes.csv").is_ok());
        assert!(validate_filename("my-probes_v2.tsv").is_ok());
        assert!(validate_filename("probe set 1.txt").is_ok());
    }

    #[test]
    fn test_validate_filename_dangerous() {
        assert!(validate_filename("../etc/passwd").is_err());
        assert!(validate_filename("..\\windows\\system32").is_err());
        assert!(validate_filename("test\0.csv").is_err());
        assert!(validate_filename("test\x01.csv").is_err());
        assert!(validate_filename(&"a".repeat(300)).is_err());
        assert!(validate_filename("   ").is_err());
        assert!(validate_filename(".hidden").is_err());
        assert!(validate_filename(".probes.csv").is_ok());
    }

    #[test]
    fn test_validate_filename_sanitization() {
        assert_eq!(validate_filename("probe@#$%s.csv").unwrap(), "probes.csv");
    }

    #[test]
    fn test_validate_text_content() {
        assert!(validate_text_content(b"Probe_Name,Sequence\nP1,ACGT\n").is_ok());
        assert!(validate_text_content(b"").is_err());
        assert!(validate_text_content(&[0u8; 1000]).is_err());
        assert!(validate_text_content(&[0xff, 0xfe, b'A']).is_err());
    }

    #[test]
    fn test_validate_upload() {
        let content = b"P1,ACGT\n";
        assert_eq!(
            validate_upload(Some("probes.csv"), content).unwrap(),
            Some("probes.csv".to_string())
        );
        assert_eq!(validate_upload(None, content).unwrap(), None);
        assert!(validate_upload(Some("../probes.csv"), content).is_err());
    }
}
