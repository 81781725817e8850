//! Command-line interface for probe-matcher.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **search**: Find probe matches in a target sequence
//! - **revcomp**: Print the reverse complement of sequences
//! - **serve**: Start the web interface
//!
//! ## Usage
//!
//! ```text
//! # Search a target file for every probe in a CSV
//! probe-matcher search probes.csv --target target.fa
//!
//! # Inline target, results saved to a CSV file
//! probe-matcher search probes.csv --sequence ATGCGT --output probe_matches.csv
//!
//! # Target from stdin, JSON output
//! zcat genome.fa.gz | probe-matcher search probes.csv --target - --format json
//!
//! # Reverse complement
//! probe-matcher revcomp GCGT
//!
//! # Start web UI
//! probe-matcher serve --port 8080 --open
//! ```

use clap::{Parser, Subcommand};

pub mod revcomp;
pub mod search;

#[derive(Parser)]
#[command(name = "probe-matcher")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Find exact probe matches in a target DNA sequence")]
#[command(
    long_about = "probe-matcher finds every exact occurrence of a set of named DNA probes in a target sequence.\n\nEach probe is searched as given (5'→3') and as its reverse complement (3'→5'). Matching is case-insensitive, overlapping hits are all reported, and positions are 1-based and inclusive."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find probe matches in a target sequence
    Search(search::SearchArgs),

    /// Print the reverse complement of one or more sequences
    Revcomp(revcomp::RevcompArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
    Csv,
}
