//! Probe matching engine.
//!
//! - [`MatchingEngine`]: Scans a target for every probe in a list
//! - [`MatchRecord`]: One exact occurrence, with 1-based inclusive coordinates
//! - [`MatchSummary`]: Per-probe hit counts for a finished search
//!
//! ## Matching Algorithm
//!
//! For each probe, in input order:
//!
//! 1. **Forward scan**: every offset where the probe occurs in the target,
//!    advancing one base at a time so overlapping hits are all reported
//! 2. **Reverse complement scan**: the same scan for the probe's reverse
//!    complement, skipped when the probe is its own reverse complement
//!
//! Comparison is case-insensitive; the reported matched sequence keeps the
//! target's original case.
//!
//! ## Example
//!
//! ```rust
//! use probe_matcher::{MatchingEngine, Probe, Target};
//!
//! let probes = vec![
//!     Probe::new("Probe_5to3", "GCGT").unwrap(),
//!     Probe::new("Probe_3to5", "ACGC").unwrap(),
//! ];
//! let target = Target::new("ATGCGT").unwrap();
//!
//! let engine = MatchingEngine::new(&probes);
//! for m in engine.find_matches(&target).unwrap() {
//!     println!("{} {} {}-{}", m.probe_name, m.orientation, m.start, m.end);
//! }
//! ```

pub mod engine;
pub mod summary;

pub use engine::{find_matches, MatchError, MatchRecord, MatchingConfig, MatchingEngine};
pub use summary::{MatchSummary, ProbeHits};
