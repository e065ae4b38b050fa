//! Best-effort structured-field extraction from recovered contract text.

use tracing::debug;

use crate::config::ExtractionConfig;

use super::record::{AcquisitionMethod, ContractRecord, DEFAULT_CONTRATANTE};
use super::rules::patterns::*;
use super::rules::{
    extract_cnpj, extract_date, extract_valor, first_capture, truncate_chars,
    truncate_with_marker,
};

/// Normalize whitespace before any pattern is evaluated: 3+ consecutive
/// newlines collapse to 2, runs of spaces/tabs to one, surrounding
/// whitespace is stripped. Applied exactly once, up front, so multi-line
/// matches behave predictably.
pub fn normalize_text(text: &str) -> String {
    let text = EXCESS_NEWLINES.replace_all(text, "\n\n");
    let text = SPACE_RUNS.replace_all(&text, " ");
    text.trim().to_string()
}

/// Rule-based contract field extractor.
///
/// Never fails: fields that match nothing stay absent (or take their fixed
/// default), so the caller always gets a well-formed record.
pub struct ContractParser {
    config: ExtractionConfig,
}

impl ContractParser {
    /// Create a parser with default extraction settings.
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Create a parser with explicit extraction settings.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Extract a [`ContractRecord`] from raw recovered text.
    pub fn parse(&self, text: &str, metodo: AcquisitionMethod) -> ContractRecord {
        let text = normalize_text(text);
        debug!("parsing {} characters of contract text", text.chars().count());

        let mut record = ContractRecord::empty(metodo);

        record.numero_contrato = first_capture(
            &[&NUMERO_TERMO, &NUMERO_CONTRATO, &NUMERO_ROTULADO, &NUMERO_AVULSO],
            &text,
        );

        record.objeto = first_capture(
            &[&OBJETO_DO_CONTRATO, &OBJETO, &OBJETO_USO_ATA, &OBJETO_CONTRATACAO],
            &text,
        )
        .map(|objeto| truncate_with_marker(&objeto, self.config.objeto_max_chars));

        record.contratante = first_capture(
            &[
                &CONTRATANTE_ROTULADO,
                &CONTRATANTE_CODEMAR_EXTENSO,
                &CONTRATANTE_CODEMAR,
                &CONTRATANTE_MUNICIPIO,
                &CONTRATANTE_PREFEITURA,
            ],
            &text,
        )
        .map(|contratante| truncate_chars(&contratante, self.config.campo_max_chars))
        .unwrap_or_else(|| DEFAULT_CONTRATANTE.to_string());

        record.contratado = first_capture(
            &[&CONTRATADO_ROTULADO, &CONTRATADO_DESTAQ, &CONTRATADO_EMPRESA],
            &text,
        )
        .map(|contratado| {
            let stripped = CNPJ_SUFFIX.replace(&contratado, "");
            truncate_chars(stripped.trim(), self.config.campo_max_chars)
        })
        .filter(|contratado| !contratado.is_empty());

        record.cnpj_contratado = extract_cnpj(&text);

        record.valor = extract_valor(&text, self.config.valor_min, self.config.valor_max);

        record.data_inicio = extract_date(
            &[&DATA_DO_INICIO, &DATA_DE_INICIO, &INICIO, &VIGENCIA],
            &text,
        );
        record.data_fim = extract_date(&[&DATA_DE_TERMINO, &DATA_DE_FIM, &TERMINO, &ATE], &text);
        record.data_final_documento = extract_date(
            &[&DATA_ASSINATURA_LOCAL, &DATA_POR_EXTENSO, &DATA_ROTULADA],
            &text,
        );

        record.modalidade = self.extract_modalidade(&text);
        record.tipo_contrato = self.extract_tipo_contrato(&text);

        record.secretaria = first_capture(&[&SECRETARIA, &DIRETORIA], &text);
        record.fonte_recurso = first_capture(&[&FONTE_RECURSO, &RECURSOS_ORIGEM], &text);

        record.previsao_legal = first_capture(
            &[
                &PREVISAO_LEGAL,
                &LEI_ESTATAIS,
                &PROCEDIMENTO_LICITATORIO,
                &PROCESSO_ADMINISTRATIVO,
            ],
            &text,
        )
        .map(|previsao| truncate_with_marker(&previsao, self.config.campo_max_chars));

        record.texto_extraido =
            Some(truncate_chars(&text, self.config.texto_extraido_chars));

        record
    }

    /// Membership test against the fixed modality vocabulary.
    fn extract_modalidade(&self, text: &str) -> Option<String> {
        let lowered = text.to_lowercase();
        MODALIDADES
            .iter()
            .find(|modalidade| lowered.contains(&modalidade.to_lowercase()))
            .map(|modalidade| modalidade.to_string())
    }

    /// Contract type inferred from keyword co-occurrence, first type whose
    /// keyword appears wins.
    fn extract_tipo_contrato(&self, text: &str) -> Option<String> {
        let lowered = text.to_lowercase();
        TIPOS_CONTRATO
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
            .map(|(tipo, _)| tipo.to_string())
    }
}

impl Default for ContractParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
TERMO DE CONTRATO Nº 015/2023

CONTRATANTE: COMPANHIA DE DESENVOLVIMENTO DE MARICÁ S.A - CODEMAR
CONTRATADO: DESTAQ COMÉRCIO E SERVIÇOS EIRELI - CNPJ 04.555.610/0001-10
OBJETO: Contratação de empresa especializada na prestação de serviços de manutenção predial.

Dá-se a este contrato o valor total de R$ 1.234.567,89.

DATA DO INÍCIO: 24/10/2023
DATA DE TÉRMINO: 24/10/2024

Modalidade: Pregão Eletrônico nº 012/2023
PREVISÃO LEGAL: Lei nº 13.303/2016, art. 29
FONTE DE RECURSO: Recursos Próprios
SECRETARIA: Diretoria de Administração

Maricá, 24 de outubro de 2023.
";

    #[test]
    fn test_parse_full_contract() {
        let parser = ContractParser::new();
        let record = parser.parse(SAMPLE, AcquisitionMethod::PdfDireto);

        assert_eq!(record.numero_contrato.as_deref(), Some("015/2023"));
        assert_eq!(
            record.contratante,
            "COMPANHIA DE DESENVOLVIMENTO DE MARICÁ S.A - CODEMAR"
        );
        assert_eq!(
            record.contratado.as_deref(),
            Some("DESTAQ COMÉRCIO E SERVIÇOS EIRELI")
        );
        assert_eq!(record.cnpj_contratado.as_deref(), Some("04.555.610/0001-10"));
        assert_eq!(record.valor, Some(1_234_567.89));
        assert_eq!(record.data_inicio.as_deref(), Some("2023-10-24"));
        assert_eq!(record.data_fim.as_deref(), Some("2024-10-24"));
        assert_eq!(record.data_final_documento.as_deref(), Some("2023-10-24"));
        assert_eq!(record.modalidade.as_deref(), Some("Pregão Eletrônico"));
        assert_eq!(record.tipo_contrato.as_deref(), Some("Prestação de Serviços"));
        assert_eq!(record.secretaria.as_deref(), Some("Diretoria de Administração"));
        assert_eq!(record.fonte_recurso.as_deref(), Some("Recursos Próprios"));
        assert_eq!(
            record.previsao_legal.as_deref(),
            Some("Lei nº 13.303/2016, art. 29")
        );
        assert_eq!(record.status, "vigente");
        assert_eq!(record.metodo, AcquisitionMethod::PdfDireto);
        assert!(record.observacoes.is_none());
        assert!(record.objeto.as_deref().unwrap().starts_with("Contratação"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = ContractParser::new();
        let first = parser.parse(SAMPLE, AcquisitionMethod::Ocr);
        let second = parser.parse(SAMPLE, AcquisitionMethod::Ocr);
        assert_eq!(first, second);
    }

    #[test]
    fn test_contratante_falls_back_to_default() {
        let parser = ContractParser::new();
        let record = parser.parse(
            "texto sem as partes identificadas",
            AcquisitionMethod::PdfDireto,
        );
        assert_eq!(record.contratante, DEFAULT_CONTRATANTE);
        assert!(record.contratado.is_none());
    }

    #[test]
    fn test_valor_pattern_priority_end_to_end() {
        let parser = ContractParser::new();
        let record = parser.parse(
            "multa diária de R$ 50,00. VALOR TOTAL R$ 500,00.",
            AcquisitionMethod::PdfDireto,
        );
        assert_eq!(record.valor, Some(500.0));
    }

    #[test]
    fn test_objeto_truncated_with_marker() {
        let long_objeto = format!("OBJETO: {}", "execução de obras e serviços ".repeat(40));
        let parser = ContractParser::new();
        let record = parser.parse(&long_objeto, AcquisitionMethod::PdfDireto);

        let objeto = record.objeto.unwrap();
        assert!(objeto.ends_with("..."));
        assert_eq!(objeto.chars().count(), 500 + 3);
    }

    #[test]
    fn test_normalize_text() {
        let raw = "linha  um\t\tcom    espaços\n\n\n\n\nlinha dois\n";
        assert_eq!(normalize_text(raw), "linha um com espaços\n\nlinha dois");
    }

    #[test]
    fn test_texto_extraido_is_bounded_prefix() {
        let text = format!("CONTRATO {}", "x".repeat(10_000));
        let parser = ContractParser::new();
        let record = parser.parse(&text, AcquisitionMethod::PdfDireto);

        let extraido = record.texto_extraido.unwrap();
        assert_eq!(extraido.chars().count(), 5000);
        assert!(extraido.starts_with("CONTRATO"));
    }
}
