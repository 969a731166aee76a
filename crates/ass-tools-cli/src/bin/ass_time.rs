//! Apply `t' = scale * t + offset` to every event of an ASS script

use anyhow::Result;
use ass_tools_cli::{init_logging, load_input, scale_and_output, write_outputs};
use ass_tools_core::{rewrite::EventRewriter, AffineShift, FormatConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ass_time",
    version,
    about = "Apply a linear transformation to ASS subtitles events (as t' = scale*t + offset).",
    allow_negative_numbers = true
)]
struct Cli {
    /// Input script
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Offset in seconds, may be negative
    #[arg(value_name = "OFFSET")]
    offset: f64,

    /// Optional scale factor followed by the output path
    #[arg(value_name = "[SCALE] OUTPUT", num_args = 1..=2, required = true)]
    rest: Vec<String>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (scale, output) = scale_and_output(&cli.rest)?;
    let mut policy = AffineShift::from_seconds(cli.offset, scale)?;
    let document = load_input(&cli.input)?;

    let config = FormatConfig::standard();
    let outcome = EventRewriter::new(&config).rewrite(&document, &mut policy)?;

    let outputs = outcome
        .documents
        .iter()
        .map(|document| (output.as_path(), document))
        .collect::<Vec<_>>();
    write_outputs(&outputs)
}
