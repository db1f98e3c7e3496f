pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod types;

pub use pipeline::{ScanError, ScanPipeline};
pub use preprocess::{binarize, load_image, CropError, CropRegion, LoadError, ThresholdedImage};
pub use recognizer::{
    EngineMode, MockRecognizer, OcrBackend, OcrConfig, OcrError, PageSegMode,
    UnavailableRecognizer,
};
pub use types::ScanReport;

#[cfg(feature = "tesseract")]
pub use recognizer::tesseract_backend::TesseractRecognizer;
