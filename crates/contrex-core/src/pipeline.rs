//! Single-document processing pipeline: acquire text, then extract fields.

use std::path::Path;

use tracing::info;

use crate::acquire::{Acquisition, acquire_text};
use crate::config::ContrexConfig;
use crate::contract::{ContractParser, ContractRecord};

/// Process one PDF document into a contract record.
///
/// Infallible by contract: when no usable text can be recovered the degraded
/// record is returned, flagged for manual review, instead of an error.
pub fn process_document(path: &Path, config: &ContrexConfig) -> ContractRecord {
    let acquisition = acquire_text(path, config);
    let metodo = acquisition.method();

    match acquisition {
        Acquisition::Direct(text) | Acquisition::OcrRecovered(text) => {
            info!("processing {} via {:?}", path.display(), metodo);
            let parser = ContractParser::with_config(config.extraction.clone());
            parser.parse(&text, metodo)
        }
        Acquisition::Failed => {
            info!("no usable text in {}, emitting degraded record", path.display());
            ContractRecord::degraded()
        }
    }
}
