//! Shared plumbing for the `ass_split` and `ass_time` binaries
//!
//! Argument interpretation, logger setup and file handling live here so the
//! binaries stay a thin layer over [`ass_tools_core`].

use anyhow::{bail, Context, Result};
use ass_tools_core::{Document, LineBreak};
use log::LevelFilter;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Build tag written into generated scripts
pub const BUILD_INFO: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Project line written below the build tag
pub const PROJECT_LINE: &str = concat!("; ", env!("CARGO_PKG_REPOSITORY"));

/// Header comment placed after `[Script Info]` in generated scripts
#[must_use]
pub fn header_comment(line_break: LineBreak) -> String {
    format!(
        "; Script generated by ASSTools ({BUILD_INFO}){}{PROJECT_LINE}",
        line_break.as_str()
    )
}

/// Log filter for a `-v` count
#[must_use]
pub const fn verbosity_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install `env_logger`
///
/// Without `-v` the filter comes from `RUST_LOG`, falling back to `warn`.
/// Any `-v` overrides `RUST_LOG`.
pub fn init_logging(verbose: u8) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if verbose > 0 {
        builder.filter_level(verbosity_filter(verbose));
    }
    builder.format_timestamp(None).format_target(false).init();
}

/// Read and parse `path`, then stamp the generated-by header comment
///
/// # Errors
///
/// Fails when the file is missing, unreadable or not a valid script.
pub fn load_input(path: &Path) -> Result<Document> {
    let mut document = Document::from_path(path)
        .with_context(|| format!("can't load input file {}", path.display()))?;
    let comment = header_comment(document.line_break());
    document.set_header_comment(comment);
    Ok(document)
}

/// Serialize every document, then write them in order
///
/// Nothing is written unless all documents serialize.
///
/// # Errors
///
/// Fails on the first serialization or write error.
pub fn write_outputs(outputs: &[(&Path, &Document)]) -> Result<()> {
    let rendered = outputs
        .iter()
        .map(|(path, document)| {
            document
                .serialize()
                .with_context(|| format!("can't render {}", path.display()))
                .map(|text| (*path, text))
        })
        .collect::<Result<Vec<_>>>()?;

    for (path, text) in rendered {
        fs::write(path, text)
            .with_context(|| format!("can't write output file {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

/// Which split outputs are written, as `(output index, path)` pairs
///
/// One path writes the first part, or the second part with `second_only`.
/// Two paths write both parts.
///
/// # Errors
///
/// `second_only` together with two paths is a usage error.
pub fn split_destinations(
    out1: PathBuf,
    out2: Option<PathBuf>,
    second_only: bool,
) -> Result<Vec<(usize, PathBuf)>> {
    match (out2, second_only) {
        (Some(_), true) => bail!("--second-only can only be used with a single output"),
        (Some(out2), false) => Ok(vec![(0, out1), (1, out2)]),
        (None, true) => Ok(vec![(1, out1)]),
        (None, false) => Ok(vec![(0, out1)]),
    }
}

/// Split `[SCALE] OUTPUT` into its parts, scale defaulting to 1
///
/// # Errors
///
/// Fails on a wrong argument count or an unparsable scale.
pub fn scale_and_output(rest: &[String]) -> Result<(f64, PathBuf)> {
    match rest {
        [output] => Ok((1.0, PathBuf::from(output))),
        [scale, output] => {
            let scale = scale
                .parse::<f64>()
                .with_context(|| format!("invalid scale '{scale}'"))?;
            Ok((scale, PathBuf::from(output)))
        }
        _ => bail!("expected [SCALE] OUTPUT, got {} argument(s)", rest.len()),
    }
}
