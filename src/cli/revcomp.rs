use clap::Args;

use crate::cli::OutputFormat;
use crate::core::sequence::{normalize, reverse_complement};

#[derive(Args)]
pub struct RevcompArgs {
    /// Sequences to reverse complement (A, T, G, C; case-insensitive)
    #[arg(required = true)]
    pub sequences: Vec<String>,
}

/// Execute revcomp subcommand
///
/// # Errors
///
/// Returns an error if any sequence contains a base outside A, T, G, C.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RevcompArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut pairs = Vec::with_capacity(args.sequences.len());
    for raw in &args.sequences {
        let seq = normalize(raw).map_err(|e| anyhow::anyhow!("'{raw}': {e}"))?;
        let rc = reverse_complement(&seq)?;
        pairs.push((seq, rc));
    }

    match format {
        OutputFormat::Text => {
            for (_, rc) in &pairs {
                println!("{rc}");
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = pairs
                .iter()
                .map(|(seq, rc)| {
                    serde_json::json!({
                        "sequence": seq,
                        "reverse_complement": rc,
                        "palindromic": seq == rc,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv | OutputFormat::Csv => {
            let sep = if matches!(format, OutputFormat::Tsv) { '\t' } else { ',' };
            println!("sequence{sep}reverse_complement");
            for (seq, rc) in &pairs {
                println!("{seq}{sep}{rc}");
            }
        }
    }

    Ok(())
}
