use thiserror::Error;

/// Bases accepted in probes and targets
pub const DNA_BASES: [u8; 4] = [b'A', b'T', b'G', b'C'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// A character outside {A, T, G, C} (case-insensitive).
    /// `position` is 1-based within the whitespace-stripped input.
    #[error("Invalid base '{base}' at position {position}: only A, T, G, C are allowed")]
    InvalidBase { base: char, position: usize },
}

/// Returns true if `base` is one of A, T, G, C in either case.
#[inline]
#[must_use]
pub fn is_dna_base(base: u8) -> bool {
    DNA_BASES.contains(&base.to_ascii_uppercase())
}

/// Check every character of `seq` against the DNA alphabet, case-insensitively.
///
/// # Errors
///
/// Returns `SequenceError::InvalidBase` for the first character that is not
/// A, T, G or C.
pub fn validate(seq: &str) -> Result<(), SequenceError> {
    match seq
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii() || !is_dna_base(*c as u8))
    {
        Some((i, base)) => Err(SequenceError::InvalidBase {
            base,
            position: i + 1,
        }),
        None => Ok(()),
    }
}

/// Strip surrounding whitespace, uppercase and validate a raw sequence.
///
/// The empty string is valid and normalizes to itself.
///
/// # Errors
///
/// Returns `SequenceError::InvalidBase` if any remaining character is not
/// A, T, G or C.
///
/// # Examples
///
/// ```
/// use probe_matcher::core::sequence::normalize;
///
/// assert_eq!(normalize("  gcgT\n").unwrap(), "GCGT");
/// assert!(normalize("ACGN").is_err());
/// ```
pub fn normalize(raw: &str) -> Result<String, SequenceError> {
    let trimmed = raw.trim();
    validate(trimmed)?;
    Ok(trimmed.to_ascii_uppercase())
}

/// Complement of a single uppercase base, or `None` outside {A, T, G, C}.
#[inline]
#[must_use]
pub fn complement(base: u8) -> Option<u8> {
    match base {
        b'A' => Some(b'T'),
        b'T' => Some(b'A'),
        b'G' => Some(b'C'),
        b'C' => Some(b'G'),
        _ => None,
    }
}

/// Reverse complement of an uppercase DNA sequence.
///
/// # Errors
///
/// Returns `SequenceError::InvalidBase` if `seq` contains anything other than
/// uppercase A, T, G or C. The reported position refers to `seq` as given.
///
/// # Examples
///
/// ```
/// use probe_matcher::core::sequence::reverse_complement;
///
/// assert_eq!(reverse_complement("GCGT").unwrap(), "ACGC");
/// ```
pub fn reverse_complement(seq: &str) -> Result<String, SequenceError> {
    let mut out = Vec::with_capacity(seq.len());

    for (i, c) in seq.chars().enumerate() {
        let base = if c.is_ascii() { complement(c as u8) } else { None };
        match base {
            Some(b) => out.push(b),
            None => {
                return Err(SequenceError::InvalidBase {
                    base: c,
                    position: i + 1,
                })
            }
        }
    }

    out.reverse();
    Ok(out.into_iter().map(char::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_uppercases_and_trims() {
        assert_eq!(normalize("  atgcGT \t\n").unwrap(), "ATGCGT");
    }

    #[test]
    fn test_normalize_empty_is_valid() {
        assert_eq!(normalize("").unwrap(), "");
        assert_eq!(normalize("   ").unwrap(), "");
    }

    #[test]
    fn test_normalize_reports_offending_base() {
        let err = normalize(" ACGNT").unwrap_err();
        assert_eq!(
            err,
            SequenceError::InvalidBase {
                base: 'N',
                position: 4
            }
        );
    }

    #[test]
    fn test_normalize_rejects_interior_whitespace() {
        assert!(matches!(
            normalize("AC GT"),
            Err(SequenceError::InvalidBase { base: ' ', position: 3 })
        ));
    }

    #[test]
    fn test_normalize_rejects_rna_and_iupac() {
        assert!(normalize("ACGU").is_err());
        assert!(normalize("ACGR").is_err());
        assert!(normalize("acgé").is_err());
    }

    #[test]
    fn test_reverse_complement_example() {
        assert_eq!(reverse_complement("GCGT").unwrap(), "ACGC");
        assert_eq!(reverse_complement("ATGC").unwrap(), "GCAT");
        assert_eq!(reverse_complement("").unwrap(), "");
    }

    #[test]
    fn test_reverse_complement_palindrome() {
        // EcoRI site
        assert_eq!(reverse_complement("GAATTC").unwrap(), "GAATTC");
        assert_eq!(reverse_complement("ACGT").unwrap(), "ACGT");
    }

    #[test]
    fn test_reverse_complement_is_involution() {
        for s in ["A", "AAATTTGGGCCC", "GATTACA", "CCGGTTAA"] {
            let rc = reverse_complement(s).unwrap();
            assert_eq!(reverse_complement(&rc).unwrap(), s);
        }
    }

    #[test]
    fn test_reverse_complement_rejects_invalid() {
        assert_eq!(
            reverse_complement("ATXGC").unwrap_err(),
            SequenceError::InvalidBase {
                base: 'X',
                position: 3
            }
        );
        // Lowercase is not part of the normalized alphabet
        assert!(reverse_complement("acgt").is_err());
        assert!(reverse_complement("ACGN").is_err());
    }

    #[test]
    fn test_reverse_complement_non_ascii_position() {
        let err = reverse_complement("AéC").unwrap_err();
        assert_eq!(
            err,
            SequenceError::InvalidBase {
                base: 'é',
                position: 2
            }
        );
    }
}
