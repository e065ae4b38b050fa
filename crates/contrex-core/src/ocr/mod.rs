//! Optical character recognition via the Tesseract CLI.
//!
//! The engine is treated as a black box: a page raster goes in, recognized
//! text comes out. Recognition runs with the Portuguese language model and a
//! single-column page segmentation hint; when a language-specific run fails,
//! one retry without the language hint is attempted.

use std::path::Path;
use std::process::Command;

use image::DynamicImage;
use tracing::{debug, warn};

use crate::error::OcrError;

/// Result type for OCR operations.
pub type Result<T> = std::result::Result<T, OcrError>;

/// Tesseract-backed OCR engine.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: String,
    language: String,
    page_segmentation: u8,
}

impl TesseractEngine {
    /// Create an engine from the OCR configuration.
    pub fn from_config(config: &crate::config::OcrConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            language: config.language.clone(),
            page_segmentation: config.page_segmentation,
        }
    }

    /// Probe whether the tesseract binary can be executed.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Recognize text in a page raster.
    pub fn recognize(&self, image: &DynamicImage) -> Result<String> {
        let dir = tempfile::tempdir()
            .map_err(|e| OcrError::Preprocessing(format!("temp dir: {e}")))?;
        let input = dir.path().join("page.png");
        image
            .save(&input)
            .map_err(|e| OcrError::Preprocessing(format!("write page image: {e}")))?;

        match self.run(&input, true) {
            Ok(text) => Ok(text),
            Err(OcrError::Recognition(reason)) => {
                warn!("recognition with language '{}' failed ({reason}), retrying without language hint", self.language);
                self.run(&input, false)
            }
            Err(other) => Err(other),
        }
    }

    fn run(&self, input: &Path, with_language: bool) -> Result<String> {
        let mut command = Command::new(&self.binary);
        command.arg(input).arg("stdout");
        if with_language {
            command.args(["-l", &self.language]);
        }
        command.args(["--psm", &self.page_segmentation.to_string()]);

        let output = command.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                OcrError::EngineMissing(self.binary.clone())
            } else {
                OcrError::Recognition(e.to_string())
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Recognition(format!(
                "tesseract exited with {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("recognized {} characters", text.trim().len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OcrConfig;

    #[test]
    fn test_missing_binary_is_engine_missing() {
        let engine = TesseractEngine {
            binary: "tesseract-does-not-exist".to_string(),
            language: "por".to_string(),
            page_segmentation: 6,
        };
        assert!(!engine.is_available());

        let image = DynamicImage::new_luma8(64, 32);
        assert!(matches!(
            engine.recognize(&image),
            Err(OcrError::EngineMissing(_))
        ));
    }

    // Exercises the real binary when present; skipped gracefully otherwise.
    #[test]
    fn test_recognize_blank_page() {
        let engine = TesseractEngine::from_config(&OcrConfig::default());
        if !engine.is_available() {
            return;
        }
        let blank = DynamicImage::new_luma8(320, 120);
        let text = engine.recognize(&blank).unwrap();
        assert!(text.trim().is_empty());
    }
}
