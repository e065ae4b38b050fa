//! Regex patterns and fixed vocabularies for contract field extraction.
//!
//! Pattern lists are ordered most specific first; extraction tries them in
//! order and stops at the first match.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Text normalization
    pub static ref EXCESS_NEWLINES: Regex = Regex::new(r"\n{3,}").unwrap();
    pub static ref SPACE_RUNS: Regex = Regex::new(r"[ \t]+").unwrap();

    // Contract number
    pub static ref NUMERO_TERMO: Regex =
        Regex::new(r"(?i)termo\s*de\s*contrato\s*n[°º]?\s*[:\s]*([0-9/.\-]+)").unwrap();
    pub static ref NUMERO_CONTRATO: Regex =
        Regex::new(r"(?i)contrato\s*n[°º]?\s*[:\s]*([0-9/.\-]+)").unwrap();
    pub static ref NUMERO_ROTULADO: Regex =
        Regex::new(r"(?i)n[úu]mero\s*(?:do\s*)?contrato[:\s]+([^\n]{1,50})").unwrap();
    pub static ref NUMERO_AVULSO: Regex =
        Regex::new(r"(?i)n[°º]\s*([0-9/.\-]+)").unwrap();

    // Contract object/scope
    pub static ref OBJETO_DO_CONTRATO: Regex =
        Regex::new(r"(?i)objeto\s*do\s*contrato[:\s]+([^\n]{10,800})").unwrap();
    pub static ref OBJETO: Regex =
        Regex::new(r"(?i)objeto[:\s]+([^\n]{10,800})").unwrap();
    pub static ref OBJETO_USO_ATA: Regex =
        Regex::new(r"(?i)1[°º]\s*uso\s*da\s*ata[^\n]{10,800}").unwrap();
    pub static ref OBJETO_CONTRATACAO: Regex =
        Regex::new(r"(?i)contrata[çc][ãa]o\s*de\s*empresa[^\n]{10,800}").unwrap();

    // Contracting institution
    pub static ref CONTRATANTE_ROTULADO: Regex =
        Regex::new(r"(?i)contratante[:\s]+([^\n]{5,200})").unwrap();
    pub static ref CONTRATANTE_CODEMAR_EXTENSO: Regex =
        Regex::new(r"(?i)companhia\s*de\s*desenvolvimento\s*de\s*maric[áa][^\n]{5,100}").unwrap();
    pub static ref CONTRATANTE_CODEMAR: Regex =
        Regex::new(r"(?i)codemar[^\n]{5,100}").unwrap();
    pub static ref CONTRATANTE_MUNICIPIO: Regex =
        Regex::new(r"(?i)munic[íi]pio\s*de\s*[^\n]{5,100}").unwrap();
    pub static ref CONTRATANTE_PREFEITURA: Regex =
        Regex::new(r"(?i)prefeitura\s*municipal\s*de\s*[^\n]{5,100}").unwrap();

    // Contracted party
    pub static ref CONTRATADO_ROTULADO: Regex =
        Regex::new(r"(?i)contratad[ao][:\s]+([^\n]{5,200})").unwrap();
    pub static ref CONTRATADO_DESTAQ: Regex =
        Regex::new(r"(?i)destaq\s*com[ée]rcio\s*e\s*servi[çc]os[^\n]{5,100}").unwrap();
    pub static ref CONTRATADO_EMPRESA: Regex =
        Regex::new(r"(?i)empresa[:\s]+([^\n]{5,200})").unwrap();
    /// Trailing tax-id suffix stripped from the contracted party name.
    pub static ref CNPJ_SUFFIX: Regex = Regex::new(r"(?i)\s*-?\s*cnpj.*$").unwrap();

    // CNPJ: punctuation optional, digit shape fixed. Word-bounded so longer
    // digit runs never yield a spurious 14-digit hit.
    pub static ref CNPJ: Regex =
        Regex::new(r"\b(\d{2}\.?\d{3}\.?\d{3}/?\d{4}-?\d{2})\b").unwrap();

    // Monetary value, most specific phrasing first; bare "R$" is last.
    pub static ref VALOR_TOTAL: Regex =
        Regex::new(r"(?i)valor\s*total\s*(?:de\s*)?r\$\s*([\d.,]+)").unwrap();
    pub static ref VALOR_DO_CONTRATO: Regex =
        Regex::new(r"(?i)valor\s*do\s*contrato[^\d\n]*r\$?\s*([\d.,]+)").unwrap();
    pub static ref VALOR_ROTULADO: Regex =
        Regex::new(r"(?i)valor\s*(?:global\s*)?[:\s]*r\$\s*([\d.,]+)").unwrap();
    pub static ref VALOR_AVULSO: Regex =
        Regex::new(r"(?i)r\$\s*([\d.,]+)").unwrap();

    // Dates
    pub static ref DATA_DO_INICIO: Regex =
        Regex::new(r"(?i)data\s*do\s*in[íi]cio[:\s]*([\d/.\-]+)").unwrap();
    pub static ref DATA_DE_INICIO: Regex =
        Regex::new(r"(?i)data\s*(?:de\s*)?in[íi]cio[:\s]*([\d/.\-]+)").unwrap();
    pub static ref INICIO: Regex =
        Regex::new(r"(?i)in[íi]cio[:\s]*([\d/.\-]+)").unwrap();
    pub static ref VIGENCIA: Regex =
        Regex::new(r"(?i)vig[êe]ncia[:\s]*(?:de\s*)?([\d/.\-]+)").unwrap();

    pub static ref DATA_DE_TERMINO: Regex =
        Regex::new(r"(?i)data\s*(?:de\s*)?t[ée]rmino[:\s]*([\d/.\-]+)").unwrap();
    pub static ref DATA_DE_FIM: Regex =
        Regex::new(r"(?i)data\s*(?:de\s*)?fim[:\s]*([\d/.\-]+)").unwrap();
    pub static ref TERMINO: Regex =
        Regex::new(r"(?i)t[ée]rmino[:\s]*([\d/.\-]+)").unwrap();
    pub static ref ATE: Regex =
        Regex::new(r"(?i)at[ée][:\s]*([\d/.\-]+)").unwrap();

    /// Signature line ("Maricá, 24 de outubro de 2023").
    pub static ref DATA_ASSINATURA_LOCAL: Regex =
        Regex::new(r"(?i)maric[áa],\s*(\d{1,2}\s+de\s+[a-zç]+\s+de\s+\d{4})").unwrap();
    pub static ref DATA_POR_EXTENSO: Regex =
        Regex::new(r"(?i)(\d{1,2}\s+de\s+[a-zç]+\s+de\s+\d{4})").unwrap();
    pub static ref DATA_ROTULADA: Regex =
        Regex::new(r"(?i)data[:\s]*([\d/.\-]+)").unwrap();

    /// Long-form Portuguese date, split into day / month name / year.
    pub static ref DATA_LONGA: Regex =
        Regex::new(r"(?i)(\d{1,2})\s+de\s+([a-zç]+)\s+de\s+(\d{4})").unwrap();

    // Department and funding source
    pub static ref SECRETARIA: Regex =
        Regex::new(r"(?i)secretaria[:\s]*(?:de|municipal\s*de)?\s*([^\n]{5,100})").unwrap();
    pub static ref DIRETORIA: Regex =
        Regex::new(r"(?i)diretoria[:\s]*(?:de)?\s*([^\n]{5,100})").unwrap();
    pub static ref FONTE_RECURSO: Regex =
        Regex::new(r"(?i)fonte\s*(?:de\s*)?recursos?[:\s]*([^\n]{5,100})").unwrap();
    pub static ref RECURSOS_ORIGEM: Regex =
        Regex::new(r"(?i)recursos?\s*(?:pr[óo]prios?|federais?|estaduais?)").unwrap();

    // Legal basis
    pub static ref PREVISAO_LEGAL: Regex =
        Regex::new(r"(?i)previs[ãa]o\s*legal[:\s]*([^\n]{10,200})").unwrap();
    pub static ref LEI_ESTATAIS: Regex =
        Regex::new(r"(?i)lei\s*n[°º]?\s*13\.303[^\n]{10,200}").unwrap();
    pub static ref PROCEDIMENTO_LICITATORIO: Regex =
        Regex::new(r"(?i)procedimento\s*licitat[óo]rio[^\n]{10,200}").unwrap();
    pub static ref PROCESSO_ADMINISTRATIVO: Regex =
        Regex::new(r"(?i)processo\s*administrativo[^\n]{10,200}").unwrap();
}

/// Fixed vocabulary of procurement modalities; membership is tested
/// case-insensitively against the document text.
pub const MODALIDADES: [&str; 7] = [
    "Pregão Eletrônico",
    "Pregão Presencial",
    "Concorrência",
    "Tomada de Preços",
    "Convite",
    "Dispensa",
    "Inexigibilidade",
];

/// Contract types and the keywords that infer them, tried in order.
pub const TIPOS_CONTRATO: [(&str, &[&str]); 4] = [
    ("Prestação de Serviços", &["prestação de serviços", "serviços"]),
    ("Fornecimento", &["fornecimento", "aquisição"]),
    ("Obra", &["obra", "construção"]),
    ("Compra", &["compra", "aquisição"]),
];
