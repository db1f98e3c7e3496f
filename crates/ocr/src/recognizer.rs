use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::preprocess::ThresholdedImage;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Failed to hand image to OCR engine: {0}")]
    ImageEncode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available — build with `tesseract` feature")]
    NotAvailable,
}

/// Tesseract `--oem` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineMode {
    LegacyOnly,
    LstmOnly,
    LegacyAndLstm,
    /// Whatever the engine considers most accurate.
    #[default]
    Default,
}

impl EngineMode {
    pub fn as_oem(self) -> u8 {
        match self {
            EngineMode::LegacyOnly => 0,
            EngineMode::LstmOnly => 1,
            EngineMode::LegacyAndLstm => 2,
            EngineMode::Default => 3,
        }
    }
}

/// Tesseract `--psm` value. Valid range is 0..=13.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PageSegMode(u8);

impl PageSegMode {
    /// One uniform block of text.
    pub const SINGLE_BLOCK: PageSegMode = PageSegMode(6);
    /// As much text as possible, in no particular order.
    pub const SPARSE_TEXT: PageSegMode = PageSegMode(11);

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for PageSegMode {
    fn default() -> Self {
        PageSegMode::SINGLE_BLOCK
    }
}

impl TryFrom<u8> for PageSegMode {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        if v <= 13 {
            Ok(PageSegMode(v))
        } else {
            Err(format!("Invalid page segmentation mode {v} (expected 0-13)"))
        }
    }
}

impl From<PageSegMode> for u8 {
    fn from(m: PageSegMode) -> u8 {
        m.0
    }
}

impl std::str::FromStr for PageSegMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("Invalid page segmentation mode '{s}'"))?;
        PageSegMode::try_from(v)
    }
}

/// What the engine is told about the image it's reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrConfig {
    pub engine_mode: EngineMode,
    pub page_segmentation: PageSegMode,
    pub lang: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine_mode: EngineMode::Default,
            page_segmentation: PageSegMode::SINGLE_BLOCK,
            lang: "eng".to_string(),
        }
    }
}

/// Abstraction over an OCR backend.
/// Implementations receive the binarized image and return the recognized text.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image: &ThresholdedImage, config: &OcrConfig) -> Result<String, OcrError>;
}

impl<T: OcrBackend + ?Sized> OcrBackend for Box<T> {
    fn recognize(&self, image: &ThresholdedImage, config: &OcrConfig) -> Result<String, OcrError> {
        (**self).recognize(image, config)
    }
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set string — useful for unit testing the pipeline
/// without requiring Tesseract to be installed.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image: &ThresholdedImage, _config: &OcrConfig) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

/// Stand-in used when no engine was compiled in.
pub struct UnavailableRecognizer;

impl OcrBackend for UnavailableRecognizer {
    fn recognize(&self, _image: &ThresholdedImage, _config: &OcrConfig) -> Result<String, OcrError> {
        Err(OcrError::NotAvailable)
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{EngineMode, OcrBackend, OcrConfig, OcrError};
    use crate::preprocess::ThresholdedImage;
    use leptess::{LepTess, Variable};

    pub struct TesseractRecognizer {
        data_path: Option<String>,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>) -> Self {
            Self { data_path }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(
            &self,
            image: &ThresholdedImage,
            config: &OcrConfig,
        ) -> Result<String, OcrError> {
            if config.engine_mode != EngineMode::Default {
                // leptess always initialises with the default engine mode.
                tracing::warn!(
                    "Ignoring engine mode {:?}; leptess only supports the default",
                    config.engine_mode
                );
            }

            let mut lt = LepTess::new(self.data_path.as_deref(), &config.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_variable(
                Variable::TesseditPagesegMode,
                &config.page_segmentation.value().to_string(),
            )
            .map_err(|e| OcrError::Engine(e.to_string()))?;

            let png = image
                .to_png()
                .map_err(|e| OcrError::ImageEncode(e.to_string()))?;
            lt.set_image_from_mem(&png)
                .map_err(|e| OcrError::ImageEncode(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }
    }
}
