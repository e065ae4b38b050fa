//! Contract field extraction module.

mod parser;
mod record;
pub mod rules;

pub use parser::{ContractParser, normalize_text};
pub use record::{AcquisitionMethod, ContractRecord, DEFAULT_CONTRATANTE, REVIEW_NOTE};
