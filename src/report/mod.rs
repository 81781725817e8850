//! Output formats for match results.
//!
//! - [`table`]: The result file, CSV (or TSV) with columns
//!   `Probe_Name,Match_Type,Start_Position,End_Position,Matched_Sequence`
//! - [`json`]: Matches, per-probe counts and skipped rows as one JSON document
//! - [`text`]: Aligned table and summary for the terminal
//!
//! `Match_Type` is `5'→3'` for forward matches and `3'→5'` for reverse
//! complement matches.

pub mod json;
pub mod table;
pub mod text;
