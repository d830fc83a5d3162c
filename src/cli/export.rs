//! Export command implementation.
//!
//! Composes the flower, runs the export pipeline and reports the outcome.

use std::path::PathBuf;

use clap::Args;

use crate::config::Config;
use crate::error::{PetalError, Result};
use crate::export::{
    CommandShare, DeliveryRoute, DirectoryDownload, ExportReport, Exporter, NoShare,
    SharePlatform,
};
use crate::output::{display_path, plural, Printer};
use crate::render::MAX_SCALE;
use crate::types::ShapeKind;

use super::DesignArgs;

/// Render the flower to PNG and share or download it
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub design: DesignArgs,

    /// Message attached to the share
    #[arg(long, short, default_value = "")]
    pub message: String,

    /// Directory for downloads (overrides config)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Integer upscale factor (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE as i64))]
    pub scale: Option<u32>,

    /// Skip the share command and download directly
    #[arg(long)]
    pub no_share: bool,

    /// Print a JSON summary to stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ExportArgs, config: &Config, printer: &Printer) -> Result<()> {
    let shape = &args.design.shape;
    if ShapeKind::lookup(shape).is_none() {
        printer.warning(
            "Unknown",
            &format!("shape '{}', exporting an empty scene", shape),
        );
    }

    let design = args.design.design(&args.message);
    let scene = args.design.scene_for(design.as_ref(), config.stem_colour()?);
    let markup = scene.to_markup();
    // Unknown shapes have no design snapshot; the message still travels.
    let caption = design
        .as_ref()
        .map_or(args.message.as_str(), |d| d.caption.as_str());

    let command: Option<CommandShare> = match &config.share {
        Some(cmd) if !args.no_share => Some(cmd.platform()),
        _ => None,
    };
    let share: &dyn SharePlatform = match &command {
        Some(cmd) => cmd,
        None => &NoShare,
    };

    let output = args.output.clone().unwrap_or_else(|| config.output.clone());
    let download = DirectoryDownload::new(output);

    let mut options = config.export_options();
    if let Some(scale) = args.scale {
        options.scale = scale;
    }

    printer.status("Exporting", &format!("{} ({})", shape, args.design.colour));

    let exporter = Exporter::new(share, &download, printer).with_options(options);
    let report = exporter.run(&markup, caption);

    if args.json {
        let json =
            serde_json::to_string_pretty(&report.summary()).map_err(|e| PetalError::Output {
                message: format!("Failed to serialize report: {}", e),
            })?;
        println!("{}", json);
    }

    finish(report, printer)
}

/// Print the outcome; a failed export becomes the command's error.
fn finish(report: ExportReport, printer: &Printer) -> Result<()> {
    if let Some(err) = report.error {
        printer.error("Failed", &err.to_string());
        return Err(err);
    }

    let size = report
        .size
        .map(|(w, h)| format!("{}x{}, {}", w, h, plural(report.bytes, "byte", "bytes")))
        .unwrap_or_default();

    match report.route {
        Some(DeliveryRoute::Shared) => printer.status("Shared", &size),
        Some(DeliveryRoute::Cancelled) => printer.info("Cancelled", "share dismissed"),
        Some(DeliveryRoute::Downloaded { path }) => printer.status(
            "Downloaded",
            &format!("{} {}", display_path(&path), printer.dim(&format!("({})", size))),
        ),
        None => printer.info("Skipped", "another export is already running"),
    }

    Ok(())
}
