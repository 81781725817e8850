use serde::Serialize;

use crate::core::sequence::{self, SequenceError};

/// A named probe with a normalized (uppercase, validated) sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Probe {
    /// Probe name as supplied; not required to be unique
    pub name: String,

    /// Uppercase sequence over {A, T, G, C}; may be empty
    pub sequence: String,
}

impl Probe {
    /// Create a probe, normalizing the raw sequence.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::InvalidBase` if the sequence contains anything
    /// other than A, T, G, C (case-insensitive) after trimming.
    pub fn new(name: impl Into<String>, raw_sequence: &str) -> Result<Self, SequenceError> {
        Ok(Self {
            name: name.into(),
            sequence: sequence::normalize(raw_sequence)?,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// The sequence being scanned.
///
/// Keeps the caller's text (trimmed) alongside its uppercase form so matches
/// can be reported in the original case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    original: String,
    normalized: String,
}

impl Target {
    /// Validate a raw target string.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::InvalidBase` if the trimmed text contains
    /// anything other than A, T, G, C (case-insensitive).
    pub fn new(raw: &str) -> Result<Self, SequenceError> {
        let normalized = sequence::normalize(raw)?;
        Ok(Self {
            original: raw.trim().to_string(),
            normalized,
        })
    }

    /// Target text in its original case
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Uppercase target text
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_new_normalizes() {
        let probe = Probe::new("p1", " gcgt ").unwrap();
        assert_eq!(probe.name, "p1");
        assert_eq!(probe.sequence, "GCGT");
        assert_eq!(probe.len(), 4);
    }

    #[test]
    fn test_probe_empty_sequence_allowed() {
        let probe = Probe::new("blank", "").unwrap();
        assert!(probe.is_empty());
    }

    #[test]
    fn test_probe_invalid_sequence() {
        assert!(Probe::new("bad", "ACGX").is_err());
    }

    #[test]
    fn test_target_keeps_original_case() {
        let target = Target::new("\natgCGT  ").unwrap();
        assert_eq!(target.original(), "atgCGT");
        assert_eq!(target.normalized(), "ATGCGT");
        assert_eq!(target.len(), 6);
    }

    #[test]
    fn test_target_empty() {
        let target = Target::new("").unwrap();
        assert!(target.is_empty());
    }

    #[test]
    fn test_target_invalid() {
        let err = Target::new("ACGTU").unwrap_err();
        assert_eq!(
            err,
            SequenceError::InvalidBase {
                base: 'U',
                position: 5
            }
        );
    }
}
