//! Text acquisition: embedded text layer first, OCR fallback second.

use std::path::Path;
use std::time::{Duration, Instant};

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::{debug, info, warn};

use crate::config::ContrexConfig;
use crate::contract::AcquisitionMethod;
use crate::error::Result;
use crate::ocr::TesseractEngine;
use crate::pdf::PdfDocument;

/// Outcome of the text acquisition step.
///
/// A tagged three-state result so the serializer can never emit a method tag
/// that disagrees with what actually happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Acquisition {
    /// The embedded text layer was long enough to accept.
    Direct(String),
    /// The text layer was missing or too short; OCR recovered the text.
    OcrRecovered(String),
    /// Neither path yielded usable text.
    Failed,
}

impl Acquisition {
    /// The method tag reported in the output record.
    pub fn method(&self) -> AcquisitionMethod {
        match self {
            Acquisition::Direct(_) => AcquisitionMethod::PdfDireto,
            Acquisition::OcrRecovered(_) => AcquisitionMethod::Ocr,
            Acquisition::Failed => AcquisitionMethod::FalhaOcr,
        }
    }

    /// Recovered text, when acquisition succeeded.
    pub fn text(&self) -> Option<&str> {
        match self {
            Acquisition::Direct(text) | Acquisition::OcrRecovered(text) => Some(text),
            Acquisition::Failed => None,
        }
    }
}

/// Acquire raw text from a PDF document.
///
/// Never returns an error: corrupt files, engine faults and empty documents
/// all degrade to [`Acquisition::Failed`] so the caller can still produce a
/// well-formed record flagged for manual review.
pub fn acquire_text(path: &Path, config: &ContrexConfig) -> Acquisition {
    match try_acquire(path, config) {
        Ok(acquisition) => acquisition,
        Err(e) => {
            warn!("acquisition failed for {}: {e}", path.display());
            Acquisition::Failed
        }
    }
}

fn try_acquire(path: &Path, config: &ContrexConfig) -> Result<Acquisition> {
    let document = PdfDocument::open(path)?;

    match document.extract_text() {
        Ok(text) if stripped_len(&text) >= config.pdf.min_text_length => {
            debug!("text layer accepted ({} pages)", document.page_count());
            return Ok(Acquisition::Direct(text));
        }
        Ok(text) => {
            debug!(
                "text layer too short ({} chars, minimum {}), trying OCR",
                stripped_len(&text),
                config.pdf.min_text_length
            );
        }
        Err(e) => {
            debug!("text layer extraction failed ({e}), trying OCR");
        }
    }

    Ok(ocr_pages(&document, config))
}

/// Run OCR over a bounded number of pages within a coarse time budget.
fn ocr_pages(document: &PdfDocument, config: &ContrexConfig) -> Acquisition {
    let engine = TesseractEngine::from_config(&config.ocr);
    if !engine.is_available() {
        warn!(
            "OCR engine '{}' is not available, cannot recover scanned text",
            config.ocr.binary
        );
        return Acquisition::Failed;
    }

    let deadline = Instant::now() + Duration::from_secs(config.ocr.time_budget_secs);
    let pages = document.page_count().min(config.ocr.max_pages);
    let mut recovered = String::new();

    for page in 1..=pages {
        if Instant::now() >= deadline {
            warn!("OCR time budget exhausted before page {page}, stopping");
            break;
        }

        let image = match document.page_image(page) {
            Ok(Some(image)) => bound_image(image, config.ocr.max_image_size),
            Ok(None) => {
                debug!("page {page} has no scanned image");
                continue;
            }
            Err(e) => {
                warn!("could not read page {page} image: {e}");
                continue;
            }
        };

        match engine.recognize(&image) {
            Ok(text) if !text.trim().is_empty() => {
                if !recovered.is_empty() {
                    recovered.push('\n');
                }
                recovered.push_str(&text);
            }
            Ok(_) => debug!("no text recognized on page {page}"),
            Err(e) => warn!("OCR failed on page {page}: {e}"),
        }
    }

    if stripped_len(&recovered) >= config.ocr.min_text_length {
        info!("OCR recovered {} characters", stripped_len(&recovered));
        Acquisition::OcrRecovered(recovered)
    } else {
        Acquisition::Failed
    }
}

/// Downscale an image so its longer side does not exceed `max_size`.
/// Trades recognition accuracy for latency on oversized page scans.
fn bound_image(image: DynamicImage, max_size: u32) -> DynamicImage {
    if image.width().max(image.height()) <= max_size {
        return image;
    }
    image.resize(max_size, max_size, FilterType::Triangle)
}

fn stripped_len(text: &str) -> usize {
    text.trim().chars().count()
}
