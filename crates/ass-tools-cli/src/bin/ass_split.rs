//! Split an ASS script in two at a given time

use anyhow::Result;
use ass_tools_cli::{init_logging, load_input, split_destinations, write_outputs};
use ass_tools_core::{rewrite::EventRewriter, FormatConfig, SplitAtCut};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ass_split", version, about = "Split ASS subtitles.")]
#[command(long_about = "Split ASS subtitles at SECONDS.

Events starting before the cut go to the first part unchanged. Events
starting at or after it go to the second part, moved back by the cut.

With a single output the first part is written, or the second part with
--second-only. With two outputs both parts are written.")]
struct Cli {
    /// Input script
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Cut time in seconds
    #[arg(value_name = "SECONDS")]
    seconds: f64,

    /// First output (or the only output)
    #[arg(value_name = "OUT1")]
    out1: PathBuf,

    /// Second output
    #[arg(value_name = "OUT2")]
    out2: Option<PathBuf>,

    /// Output only the second part in single output mode
    #[arg(long, alias = "second_only")]
    second_only: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let destinations = split_destinations(cli.out1, cli.out2, cli.second_only)?;
    let mut policy = SplitAtCut::from_seconds(cli.seconds)?;
    let document = load_input(&cli.input)?;

    let config = FormatConfig::standard();
    let outcome = EventRewriter::new(&config).rewrite(&document, &mut policy)?;
    log::debug!("split produced {} diagnostic(s)", outcome.diagnostics.len());

    let outputs = destinations
        .iter()
        .filter_map(|(index, path)| Some((path.as_path(), outcome.document(*index)?)))
        .collect::<Vec<_>>();
    write_outputs(&outputs)
}
