//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the contrex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrexConfig {
    /// PDF text-layer acquisition configuration.
    pub pdf: PdfConfig,

    /// OCR fallback configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// PDF text-layer acquisition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum stripped text length (in characters) for the embedded text
    /// layer to be accepted without falling back to OCR.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 100,
        }
    }
}

/// OCR fallback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Maximum number of pages submitted to OCR. Lower than the text-layer
    /// bound since recognition dominates latency.
    pub max_pages: u32,

    /// Minimum stripped text length (in characters) for an OCR result to be
    /// accepted instead of reporting acquisition failure.
    pub min_text_length: usize,

    /// Tesseract language model (Portuguese).
    pub language: String,

    /// Tesseract page segmentation mode. 6 assumes a single uniform block of
    /// text, which fits contract pages.
    pub page_segmentation: u8,

    /// Name or path of the tesseract binary.
    pub binary: String,

    /// Maximum image dimension (longer side) before recognition; larger page
    /// scans are downscaled to this bound.
    pub max_image_size: u32,

    /// Per-document time budget for the OCR pass, in seconds. Checked between
    /// pages; pages not started before the budget expires are skipped.
    pub time_budget_secs: u64,

    /// Probe for the OCR engine at startup and fail fast when it is missing.
    /// When disabled, a missing engine degrades to an OCR acquisition failure.
    pub require_engine: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            max_pages: 3,
            min_text_length: 50,
            language: "por".to_string(),
            page_segmentation: 6,
            binary: "tesseract".to_string(),
            max_image_size: 2048,
            time_budget_secs: 120,
            require_engine: false,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lower plausibility bound for the contract value, in BRL.
    pub valor_min: f64,

    /// Upper plausibility bound for the contract value, in BRL.
    pub valor_max: f64,

    /// Maximum length of the `objeto` field; longer matches are truncated
    /// with an ellipsis marker.
    pub objeto_max_chars: usize,

    /// Maximum length of the remaining length-bounded text fields
    /// (contratante, contratado, previsão legal).
    pub campo_max_chars: usize,

    /// Length of the normalized-text prefix retained for audit in
    /// `texto_extraido`.
    pub texto_extraido_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            valor_min: 100.0,
            valor_max: 100_000_000.0,
            objeto_max_chars: 500,
            campo_max_chars: 200,
            texto_extraido_chars: 5000,
        }
    }
}

impl ContrexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
