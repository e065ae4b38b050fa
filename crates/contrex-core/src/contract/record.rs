//! Output record produced once per document.

use serde::{Deserialize, Serialize};

/// Institutional fallback when no contracting party is found in the text.
pub const DEFAULT_CONTRATANTE: &str = "Companhia de Desenvolvimento de Maricá - CODEMAR";

/// Note attached to records that need human review.
pub const REVIEW_NOTE: &str = "PDF escaneado - requer revisão manual";

/// Which acquisition path produced the text behind a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcquisitionMethod {
    /// Embedded text layer.
    #[serde(rename = "PDF_DIRETO")]
    PdfDireto,
    /// Optical character recognition.
    #[serde(rename = "OCR")]
    Ocr,
    /// Neither path recovered usable text.
    #[serde(rename = "FALHA_OCR")]
    FalhaOcr,
}

/// Structured contract metadata extracted from one document.
///
/// Absent fields serialize as `null` so the consuming application can tell
/// "not found" from "found empty". Created fresh per invocation, serialized
/// once, then discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    /// Contract identifier, free form (e.g. "015/2024").
    pub numero_contrato: Option<String>,

    /// Contract object/scope, truncated with an ellipsis marker.
    pub objeto: Option<String>,

    /// Contracting institution. Never null: falls back to
    /// [`DEFAULT_CONTRATANTE`].
    pub contratante: String,

    /// Contracted party, with any trailing CNPJ suffix stripped.
    pub contratado: Option<String>,

    /// Contracted party tax id, canonical `NN.NNN.NNN/NNNN-NN` punctuation.
    /// Only populated when exactly 14 digits were found.
    pub cnpj_contratado: Option<String>,

    /// Contract value in BRL, plausibility-bounded.
    pub valor: Option<f64>,

    /// Start date, ISO-8601.
    pub data_inicio: Option<String>,

    /// End date, ISO-8601.
    pub data_fim: Option<String>,

    /// Procurement modality, from a fixed vocabulary.
    pub modalidade: Option<String>,

    /// Record status; always "vigente", not derived from the document.
    pub status: String,

    /// Contract type inferred from keyword co-occurrence.
    pub tipo_contrato: Option<String>,

    /// Requesting department.
    pub secretaria: Option<String>,

    /// Funding source.
    pub fonte_recurso: Option<String>,

    /// Legal basis, truncated with an ellipsis marker.
    pub previsao_legal: Option<String>,

    /// Signature date at the end of the document, ISO-8601.
    pub data_final_documento: Option<String>,

    /// Review notes; set on degraded records.
    pub observacoes: Option<String>,

    /// Bounded prefix of the normalized source text, kept for audit.
    pub texto_extraido: Option<String>,

    /// Acquisition path that produced the text.
    pub metodo: AcquisitionMethod,
}

impl ContractRecord {
    /// An empty record with the fixed defaults applied.
    pub fn empty(metodo: AcquisitionMethod) -> Self {
        Self {
            numero_contrato: None,
            objeto: None,
            contratante: DEFAULT_CONTRATANTE.to_string(),
            contratado: None,
            cnpj_contratado: None,
            valor: None,
            data_inicio: None,
            data_fim: None,
            modalidade: None,
            status: "vigente".to_string(),
            tipo_contrato: None,
            secretaria: None,
            fonte_recurso: None,
            previsao_legal: None,
            data_final_documento: None,
            observacoes: None,
            texto_extraido: None,
            metodo,
        }
    }

    /// The degraded record emitted when no usable text was recovered.
    /// Content fields stay null and the record is flagged for manual review.
    pub fn degraded() -> Self {
        let mut record = Self::empty(AcquisitionMethod::FalhaOcr);
        record.observacoes = Some(REVIEW_NOTE.to_string());
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_tags_serialize_as_wire_names() {
        assert_eq!(
            serde_json::to_string(&AcquisitionMethod::PdfDireto).unwrap(),
            "\"PDF_DIRETO\""
        );
        assert_eq!(serde_json::to_string(&AcquisitionMethod::Ocr).unwrap(), "\"OCR\"");
        assert_eq!(
            serde_json::to_string(&AcquisitionMethod::FalhaOcr).unwrap(),
            "\"FALHA_OCR\""
        );
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let record = ContractRecord::empty(AcquisitionMethod::PdfDireto);
        let value: serde_json::Value = serde_json::to_value(&record).unwrap();

        assert!(value["numero_contrato"].is_null());
        assert!(value["valor"].is_null());
        assert_eq!(value["contratante"], DEFAULT_CONTRATANTE);
        assert_eq!(value["status"], "vigente");
    }

    #[test]
    fn test_degraded_record() {
        let record = ContractRecord::degraded();
        assert_eq!(record.metodo, AcquisitionMethod::FalhaOcr);
        assert_eq!(record.observacoes.as_deref(), Some(REVIEW_NOTE));
        assert!(record.objeto.is_none());
        assert!(record.contratado.is_none());
        assert!(record.valor.is_none());
        assert_eq!(record.contratante, DEFAULT_CONTRATANTE);
    }
}
