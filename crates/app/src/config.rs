use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use shelfscan_core::{Catalog, Code, ItemCategory};
use shelfscan_ocr::{EngineMode, OcrConfig, PageSegMode};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Catalog code must not be blank")]
    BlankCode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Directory holding the Tesseract language data.
    pub data_path: Option<String>,
    pub lang: String,
    pub engine_mode: EngineMode,
    pub page_segmentation: PageSegMode,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let ocr = OcrConfig::default();
        Self {
            data_path: None,
            lang: ocr.lang,
            engine_mode: ocr.engine_mode,
            page_segmentation: ocr.page_segmentation,
        }
    }
}

impl EngineSettings {
    pub fn ocr_config(&self) -> OcrConfig {
        OcrConfig {
            engine_mode: self.engine_mode,
            page_segmentation: self.page_segmentation,
            lang: self.lang.clone(),
        }
    }
}

/// Contents of the optional `--config` TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub engine: EngineSettings,
    /// Extra `"code" = "Category Label"` entries layered over the built-in table.
    pub catalog: HashMap<String, ItemCategory>,
}

impl ScanConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Catalog keys are normalized the same way scanned text is, so
    /// `" 5550001111 "` matches a scan of `5550001111`.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: ScanConfig = toml::from_str(content)?;
        config.catalog = config
            .catalog
            .into_iter()
            .map(|(k, v)| {
                Code::normalize(&k)
                    .map(|code| (code.as_str().to_string(), v))
                    .ok_or(ConfigError::BlankCode)
            })
            .collect::<Result<_, _>>()?;
        Ok(config)
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::reference().merged(self.catalog.iter().map(|(k, v)| (k.clone(), *v)))
    }
}
