//! Core library for extracting structured contract metadata from Brazilian
//! procurement PDFs.
//!
//! This crate provides:
//! - PDF processing (embedded text layer and page image extraction)
//! - OCR fallback via the Tesseract CLI with a Portuguese language model
//! - Contract field extraction (número, partes, valor, datas, previsão legal)
//! - A single-pass pipeline producing one [`ContractRecord`] per document

pub mod acquire;
pub mod config;
pub mod contract;
pub mod error;
pub mod ocr;
pub mod pdf;
pub mod pipeline;

pub use acquire::{Acquisition, acquire_text};
pub use config::{ContrexConfig, ExtractionConfig, OcrConfig, PdfConfig};
pub use contract::{AcquisitionMethod, ContractParser, ContractRecord};
pub use error::{ContrexError, Result};
pub use ocr::TesseractEngine;
pub use pdf::PdfDocument;
pub use pipeline::process_document;
