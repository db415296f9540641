//! `seqr-track`: render a feature track to SVG and replay clicks as a viewer
//! script.
//!
//! ```text
//! seqr-track <records.json> [--options FILE] [--svg FILE] [--click KEY]...
//! ```
//!
//! Every `--click` is applied in order (glyph keys such as
//! `"gnomAD missense-3"` or lane labels such as `"gnomAD LoF"`); the
//! resulting viewer commands are written to stdout, one per line.

use std::path::PathBuf;

use clap::Parser;

use seqr_track::error::TrackError;
use seqr_track::feature::parse_records;
use seqr_track::options::{self, Options};
use seqr_track::selection::SelectionKey;
use seqr_track::session::{TrackCommand, TrackSession};
use seqr_track::viewer::ScriptWriter;

#[derive(Debug, Parser)]
#[command(
    name = "seqr-track",
    about = "Render a feature track to SVG and replay clicks as a viewer script"
)]
struct Args {
    /// Records JSON: a list of `{"type": ..., "data": [...]}` objects
    records: PathBuf,

    /// Options TOML (defaults apply when omitted)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Write the rendered track to this SVG file
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Glyph key or lane label to click; repeatable, applied in order
    #[arg(long = "click", value_name = "KEY")]
    clicks: Vec<String>,
}

fn run(args: Args) -> Result<(), TrackError> {
    if let Some(path) = &args.options {
        options::install(Options::load(path)?)?;
    }
    let options = options::global();

    let json = std::fs::read_to_string(&args.records)?;
    let raw = parse_records(&json)?;
    let mut session = TrackSession::mount_raw(
        &raw,
        options,
        ScriptWriter::new(std::io::stdout().lock()),
    );
    for (idx, reason) in session.track().rejected() {
        log::warn!("record {idx} skipped: {reason}");
    }

    for key in args.clicks {
        if !session.execute(TrackCommand::ClickGlyph {
            key: SelectionKey::from(key.as_str()),
        })? {
            log::warn!("click on '{key}' had no effect");
        }
    }

    if let Some(path) = &args.svg {
        std::fs::write(path, session.render_svg())?;
        log::info!("wrote {}", path.display());
    }

    let failed = session.viewer().failed();
    let _ = session.unmount();
    if failed > 0 {
        return Err(TrackError::Viewer(format!(
            "{failed} command(s) could not be written"
        )));
    }
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicks_repeat_in_order() {
        let args = Args::try_parse_from([
            "seqr-track",
            "records.json",
            "--click",
            "gnomAD missense-3",
            "--svg",
            "out.svg",
            "--click",
            "gnomAD LoF",
        ])
        .unwrap();
        assert_eq!(args.records, PathBuf::from("records.json"));
        assert_eq!(args.svg, Some(PathBuf::from("out.svg")));
        assert_eq!(args.options, None);
        assert_eq!(args.clicks, vec!["gnomAD missense-3", "gnomAD LoF"]);
    }

    #[test]
    fn records_path_is_required() {
        assert!(Args::try_parse_from(["seqr-track", "--svg", "out.svg"]).is_err());
        assert!(Args::try_parse_from(["seqr-track", "r.json", "--bogus"]).is_err());
    }
}
