use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::OutputFormat;
use crate::core::probe::Target;
use crate::core::types::StrandSelection;
use crate::matching::engine::{MatchingConfig, MatchingEngine};
use crate::matching::summary::MatchSummary;
use crate::parsing::probes::{delimiter_for_path, parse_probe_file, ProbeParseOptions};
use crate::parsing::target::{parse_target_file, parse_target_text};
use crate::report;
use crate::report::table::DEFAULT_RESULT_FILE;

#[derive(Args)]
#[command(group(
    clap::ArgGroup::new("target_input")
        .required(true)
        .args(["target", "sequence"])
))]
pub struct SearchArgs {
    /// Probe table (CSV or TSV) with columns: name, sequence
    #[arg(required = true)]
    pub probes: PathBuf,

    /// Target sequence file (plain text or FASTA, optionally .gz).
    /// Use '-' for stdin
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Target sequence given directly on the command line
    #[arg(short, long)]
    pub sequence: Option<String>,

    /// Field delimiter of the probe table (default: tab for .tsv/.txt, comma otherwise)
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Fail on the first invalid probe row instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Orientations to report
    #[arg(long, value_enum, default_value = "both")]
    pub strands: StrandSelection,

    /// Also save results as CSV to this file (default name when given without a value)
    #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_RESULT_FILE)]
    pub output: Option<PathBuf>,
}

/// Execute search subcommand
///
/// # Errors
///
/// Returns an error if the probes or target cannot be read or are invalid,
/// or if results cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SearchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let delimiter = match args.delimiter {
        Some(c) if c.is_ascii() => c as u8,
        Some(c) => anyhow::bail!("Delimiter must be a single ASCII character, got '{c}'"),
        None => delimiter_for_path(&args.probes),
    };

    let options = ProbeParseOptions {
        delimiter,
        strict: args.strict,
    };
    let probe_set = parse_probe_file(&args.probes, options)
        .with_context(|| format!("Failed to read probes from '{}'", args.probes.display()))?;

    if !probe_set.rejected.is_empty() {
        eprintln!(
            "Warning: skipped {} probe row(s) with missing fields or invalid sequences",
            probe_set.rejected.len()
        );
    }

    let target = load_target(&args)?;

    if verbose {
        eprintln!(
            "Loaded {} probe(s) and a {} bp target",
            probe_set.probes.len(),
            target.len()
        );
    }

    if target.is_empty() {
        eprintln!("Warning: target sequence is empty, no matches are possible.");
    }

    let config = MatchingConfig {
        strands: args.strands,
    };
    let engine = MatchingEngine::with_config(&probe_set.probes, config);
    let matches = engine.find_matches(&target)?;
    let summary = MatchSummary::new(&probe_set.probes, target.len(), &matches);

    info!(
        "Found {} match(es) for {} of {} probe(s)",
        summary.total_matches,
        summary.matched_probe_count(),
        summary.probe_count
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => {
            report::text::write_text(&mut out, &summary, &matches, &probe_set.rejected)?;
        }
        OutputFormat::Json => {
            let json = report::json::search_report(&summary, &matches, &probe_set.rejected);
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        OutputFormat::Tsv => report::table::write_tsv(&mut out, &matches)?,
        OutputFormat::Csv => report::table::write_csv(&mut out, &matches)?,
    }

    if let Some(path) = &args.output {
        report::table::write_csv_file(path, &matches)
            .with_context(|| format!("Failed to save results to '{}'", path.display()))?;
        if verbose {
            eprintln!("Saved {} match(es) to {}", matches.len(), path.display());
        }
    }

    Ok(())
}

fn load_target(args: &SearchArgs) -> anyhow::Result<Target> {
    if let Some(seq) = &args.sequence {
        return Ok(parse_target_text(seq)?);
    }

    let path = args
        .target
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Either --target or --sequence is required"))?;

    parse_target_file(path)
        .with_context(|| format!("Failed to read target from '{}'", path.display()))
}
