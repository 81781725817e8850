//! # probe-matcher
//!
//! A library for finding exact occurrences of short DNA probes in a target sequence.
//!
//! Each probe is searched for as given (5'→3') and as its reverse complement
//! (3'→5'), so a single scan of the target finds binding sites on both strands.
//!
//! ## Features
//!
//! - **Exact matching**: Every occurrence is reported, including overlapping ones
//! - **Both strands**: Reverse complement matches, with palindromic probes reported once
//! - **Case-insensitive**: Matched sequences are reported in the target's original case
//! - **Strict alphabet**: Only A, T, G and C are accepted; errors name the offending base
//! - **Probe tables**: CSV/TSV ingestion with header detection and per-row error reporting
//! - **Result files**: CSV output with `Probe_Name,Match_Type,Start_Position,End_Position,Matched_Sequence`
//!
//! ## Example
//!
//! ```rust
//! use probe_matcher::{find_matches, Orientation, Probe, Target};
//!
//! let probes = vec![
//!     Probe::new("Probe_5to3", "GCGT").unwrap(),
//!     Probe::new("Probe_3to5", "ACGC").unwrap(),
//!     Probe::new("Probe_NoMatch", "TTTT").unwrap(),
//! ];
//! let target = Target::new("ATGCGT").unwrap();
//!
//! let matches = find_matches(&probes, &target).unwrap();
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches[1].orientation, Orientation::ReverseComplement);
//!
//! for m in &matches {
//!     println!("{}\t{}\t{}-{}\t{}", m.probe_name, m.orientation, m.start, m.end, m.matched_sequence);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Sequence normalization, reverse complement, probe and target types
//! - [`matching`]: Matching engine and result summaries
//! - [`parsing`]: Probe table and target sequence readers
//! - [`report`]: CSV/TSV, JSON and text output
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server for browser-based searches

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod report;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use crate::core::probe::{Probe, Target};
pub use crate::core::sequence::{normalize, reverse_complement, SequenceError};
pub use crate::core::types::*;
pub use matching::engine::{
    find_matches, MatchError, MatchRecord, MatchingConfig, MatchingEngine,
};
pub use matching::summary::MatchSummary;
