use anyhow::Context;
use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;

use segment_highlight::config::Settings;
use segment_highlight::{DetectionAdapter, HighlightPipeline, LabelTable, PrecomputedModel};

#[derive(Parser)]
#[command(name = "segment-highlight")]
#[command(about = "Highlight segmented regions whose class label matches a keyword")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Class label filter (case-insensitive substring)
    #[arg(short, long, default_value = "")]
    keyword: String,

    /// Segmentation output exported as JSON
    #[arg(short, long, value_name = "FILE")]
    predictions: PathBuf,

    /// Class names, one per line (defaults to COCO)
    #[arg(long, value_name = "FILE")]
    labels: Option<PathBuf>,

    /// Where to write the highlighted image (PNG)
    #[arg(short, long, value_name = "FILE", default_value = "highlighted.png")]
    output: PathBuf,

    /// TOML settings file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(level: tracing::Level) {
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let settings = Settings::load(args.config.as_deref())?;

    init_logging(if args.verbose {
        tracing::Level::DEBUG
    } else {
        settings.log_level()
    });

    tracing::debug!("Loading image: {:?}", args.image_path);
    let img = ImageReader::open(&args.image_path)
        .with_context(|| format!("Failed to open image {}", args.image_path.display()))?
        .with_guessed_format()?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    tracing::debug!("Image loaded: {}x{}", img.width(), img.height());

    let labels = match args.labels.or(settings.labels) {
        Some(path) => LabelTable::from_file(&path)?,
        None => LabelTable::coco(),
    };
    let model = PrecomputedModel::from_file(&args.predictions)?;
    let pipeline = HighlightPipeline::new(DetectionAdapter::new(Box::new(model), labels));

    let result = pipeline.process(Some(&img), &args.keyword)?;

    result
        .image
        .save_with_format(&args.output, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("\n=== Highlight Results ===");
    println!("Detections: {}", result.summary.detected);
    println!("Matched '{}': {}", args.keyword.trim(), result.summary.matched);
    if result.summary.dropped > 0 {
        println!("Dropped (malformed): {}", result.summary.dropped);
    }
    println!("Output: {}", args.output.display());

    Ok(())
}
