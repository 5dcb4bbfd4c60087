//! inkcurve CLI - Convert images to scanline curve sketches

use clap::Parser;
use inkcurve::{Converter, InkcurveError, Settings};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "inkcurve", about = "Convert images to hand-drawn style curve sketches")]
struct Args {
    /// Input image file
    input: PathBuf,
    /// Output image file (format from extension, JPEG if unknown)
    output: PathBuf,
    /// Band spacing, sampling window and curve bulge in pixels
    #[arg(short, long)]
    offset: Option<u32>,
    /// Accumulated ink needed to place a control point
    #[arg(short, long)]
    threshold: Option<u64>,
    /// JSON settings preset; explicit flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Trace bands in parallel
    #[arg(short, long)]
    parallel: bool,
    /// Write every band's control points and curves as JSON
    #[arg(long)]
    dump_curves: Option<PathBuf>,
}

fn main() -> Result<(), InkcurveError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inkcurve=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::from_json_file(path)?,
        None => Settings::default(),
    };
    if let Some(offset) = args.offset {
        settings.offset = offset;
    }
    if let Some(threshold) = args.threshold {
        settings.threshold = threshold;
    }

    let converter = Converter::new(settings)?.with_parallel(args.parallel);
    let sketch = converter.convert_file(&args.input, &args.output)?;

    if let Some(path) = &args.dump_curves {
        std::fs::write(path, serde_json::to_string_pretty(&sketch.bands)?)?;
        tracing::info!(path = %path.display(), "Wrote curve dump");
    }
    Ok(())
}
