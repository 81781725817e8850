//! Readers for probe tables and target sequences.
//!
//! - **Probe tables**: CSV or TSV rows of `Probe_Name,Sequence`, with an
//!   optional header row, comment lines (`# ...`, `##...`) and blank lines
//! - **Targets**: raw sequence text (whitespace anywhere is ignored), single-record
//!   FASTA, gzip-compressed files, or stdin
//!
//! ## Example
//!
//! ```rust
//! use probe_matcher::parsing::probes::{parse_probe_text, ProbeParseOptions};
//! use probe_matcher::parsing::target::parse_target_text;
//!
//! let set = parse_probe_text("Probe_Name,Sequence\nP1,GCGT\n", ProbeParseOptions::default()).unwrap();
//! let target = parse_target_text(">demo\nATGC\nGT\n").unwrap();
//!
//! assert_eq!(set.probes.len(), 1);
//! assert_eq!(target.len(), 6);
//! ```
//!
//! ## Probe Rows
//!
//! | Problem | Lenient (default) | Strict |
//! |---------|-------------------|--------|
//! | Missing name or sequence | Row skipped with a warning | Error |
//! | Base outside A, T, G, C | Row skipped with a warning | Error |
//! | More than 100,000 probes | Error | Error |

pub mod probes;
pub mod target;
