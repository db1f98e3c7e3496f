use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

use shelfscan_core::{Catalog, Code};

use crate::preprocess::{self, CropError, CropRegion, LoadError};
use crate::recognizer::{OcrBackend, OcrConfig, OcrError};
use crate::types::ScanReport;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(#[from] OcrError),
    #[error("No barcode detected in the image.")]
    NoBarcodeDetected,
    #[error(transparent)]
    Crop(#[from] CropError),
    #[error("Failed to save cropped image to {}: {source}", path.display())]
    SaveCrop {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Orchestrates: load → crop → binarize → OCR → normalize → classify → place.
pub struct ScanPipeline<R: OcrBackend> {
    recognizer: R,
    config: OcrConfig,
    catalog: Catalog,
    crop: Option<CropRegion>,
    /// Where to keep a copy of the cropped image, if anywhere.
    crop_output: Option<PathBuf>,
}

impl<R: OcrBackend> ScanPipeline<R> {
    pub fn new(recognizer: R, config: OcrConfig, catalog: Catalog) -> Self {
        Self {
            recognizer,
            config,
            catalog,
            crop: None,
            crop_output: None,
        }
    }

    /// Only read the given region of each image.
    pub fn with_crop(mut self, region: CropRegion) -> Self {
        self.crop = Some(region);
        self
    }

    /// Save the cropped image to `path` before recognition.
    pub fn with_crop_output(mut self, path: PathBuf) -> Self {
        self.crop_output = Some(path);
        self
    }

    /// Process an image file on disk.
    pub fn scan_file(&self, path: &Path) -> Result<ScanReport, ScanError> {
        let img = preprocess::load_image(path)?;
        let img = self.crop(img)?;
        self.scan_image(img)
    }

    /// Apply the configured crop region and save the result when asked to.
    pub fn crop(&self, img: DynamicImage) -> Result<DynamicImage, ScanError> {
        let img = match &self.crop {
            Some(region) => {
                tracing::debug!("Cropping to {region}");
                region.apply(&img)?
            }
            None => img,
        };
        if let Some(path) = &self.crop_output {
            img.save(path).map_err(|source| ScanError::SaveCrop {
                path: path.clone(),
                source,
            })?;
            tracing::info!("Cropped image saved to {}", path.display());
        }
        Ok(img)
    }

    /// Process an already-decoded image. The decoded buffer is dropped once
    /// the binarized copy exists.
    pub fn scan_image(&self, img: DynamicImage) -> Result<ScanReport, ScanError> {
        let thresholded = preprocess::binarize(&img);
        drop(img);

        let text = self.recognizer.recognize(&thresholded, &self.config)?;
        tracing::debug!("OCR returned {} bytes", text.len());

        let code = Code::normalize(&text).ok_or(ScanError::NoBarcodeDetected)?;
        let (category, location) = self.catalog.place(&code);
        tracing::info!("Code {code} classified as {category}, placing in {location}");

        Ok(ScanReport { code, category, location })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
