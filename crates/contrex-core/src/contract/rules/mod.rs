//! Rule-based field extractors for Portuguese procurement contracts.
//!
//! Every field is driven by an ordered list of candidate patterns tried
//! case-insensitively; the first successful match wins, which encodes the
//! priority among phrasings (the least specific pattern is always last).

pub mod amounts;
pub mod cnpj;
pub mod dates;
pub mod patterns;

pub use amounts::{extract_valor, parse_brl_amount};
pub use cnpj::{extract_cnpj, format_cnpj};
pub use dates::{extract_date, parse_date_pt};

use regex::Regex;

/// Try patterns in priority order and return the first hit.
///
/// The content group (group 1) is taken when the pattern defines one (label
/// patterns strip their label this way); keyword patterns without a group
/// yield the whole match.
pub fn first_capture(patterns: &[&Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        pattern.captures(text).map(|caps| {
            let matched = caps.get(1).unwrap_or_else(|| caps.get(0).unwrap());
            matched.as_str().trim().to_string()
        })
    })
}

/// Truncate to a maximum number of characters.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Truncate to a maximum number of characters, appending an ellipsis marker
/// when anything was cut off.
pub fn truncate_with_marker(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(max).collect();
        truncated.push_str("...");
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref SPECIFIC: Regex = Regex::new(r"(?i)campo\s*exato[:\s]+(\w+)").unwrap();
        static ref GENERIC: Regex = Regex::new(r"(?i)campo[:\s]+(\w+)").unwrap();
    }

    #[test]
    fn test_first_capture_respects_order() {
        let text = "campo: generico\ncampo exato: especifico";
        assert_eq!(
            first_capture(&[&SPECIFIC, &GENERIC], text),
            Some("especifico".to_string())
        );
        assert_eq!(
            first_capture(&[&GENERIC, &SPECIFIC], text),
            Some("generico".to_string())
        );
        assert_eq!(first_capture(&[&SPECIFIC, &GENERIC], "nada aqui"), None);
    }

    #[test]
    fn test_truncate_with_marker() {
        assert_eq!(truncate_with_marker("curto", 10), "curto");
        assert_eq!(truncate_with_marker("abcdefgh", 5), "abcde...");
        // Counts characters, not bytes.
        assert_eq!(truncate_with_marker("licitação", 9), "licitação");
    }
}
