use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use shelfscan_ocr::{CropRegion, OcrBackend, PageSegMode, ScanPipeline};

mod config;
mod report;

use config::ScanConfig;
use report::{write_report, OutputFormat};

/// Read a barcode label off an image and suggest where to store the item.
#[derive(Debug, Parser)]
#[command(name = "shelfscan", version, about)]
struct Args {
    /// Image of the label to scan.
    #[arg(default_value = "barcode.png")]
    image: PathBuf,

    /// TOML file with engine settings and extra catalog entries.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tesseract language data directory.
    #[arg(long, env = "TESSDATA_PREFIX")]
    tessdata: Option<String>,

    /// OCR language.
    #[arg(long)]
    lang: Option<String>,

    /// Tesseract page segmentation mode (0-13).
    #[arg(long)]
    psm: Option<PageSegMode>,

    /// Only read this region of the image.
    #[arg(long, value_name = "X,Y,W,H")]
    crop: Option<CropRegion>,

    /// Save the (cropped) image that gets read to this file.
    #[arg(long, value_name = "FILE")]
    save_crop: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[cfg(feature = "tesseract")]
fn ocr_backend(data_path: Option<String>) -> Box<dyn OcrBackend> {
    Box::new(shelfscan_ocr::TesseractRecognizer::new(data_path))
}

#[cfg(not(feature = "tesseract"))]
fn ocr_backend(_data_path: Option<String>) -> Box<dyn OcrBackend> {
    Box::new(shelfscan_ocr::UnavailableRecognizer)
}

fn main() -> anyhow::Result<()> {
    // stdout carries the report; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    };
    if let Some(dir) = args.tessdata {
        config.engine.data_path = Some(dir);
    }
    if let Some(lang) = args.lang {
        config.engine.lang = lang;
    }
    if let Some(psm) = args.psm {
        config.engine.page_segmentation = psm;
    }

    let catalog = config.catalog();
    tracing::debug!("Catalog has {} entries", catalog.len());

    let mut pipeline = ScanPipeline::new(
        ocr_backend(config.engine.data_path.clone()),
        config.engine.ocr_config(),
        catalog,
    );
    if let Some(region) = args.crop {
        pipeline = pipeline.with_crop(region);
    }
    if let Some(path) = args.save_crop {
        pipeline = pipeline.with_crop_output(path);
    }

    let result = pipeline
        .scan_file(&args.image)
        .with_context(|| format!("Scanning {} failed", args.image.display()))?;

    let stdout = std::io::stdout();
    write_report(&mut stdout.lock(), &result, args.format).context("Failed to write report")?;
    Ok(())
}
