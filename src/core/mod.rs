//! Core data types for probe matching.
//!
//! - [`sequence`]: Normalization, validation and reverse complement of DNA text
//! - [`Probe`]: A named probe with a normalized sequence
//! - [`Target`]: The sequence being scanned, kept in both original and uppercase form
//! - [`Orientation`], [`StrandSelection`]: Which strand a match lies on
//!
//! ## Alphabet
//!
//! Only the four unambiguous bases are accepted, in either case:
//!
//! | Base | Complement |
//! |------|------------|
//! | A    | T          |
//! | T    | A          |
//! | G    | C          |
//! | C    | G          |
//!
//! IUPAC ambiguity codes (N, R, Y, ...) and RNA (U) are rejected.

pub mod probe;
pub mod sequence;
pub mod types;

pub use probe::{Probe, Target};
pub use types::{Orientation, StrandSelection};
