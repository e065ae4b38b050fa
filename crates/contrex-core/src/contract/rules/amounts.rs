//! Monetary value parsing for Brazilian contract text.

use tracing::trace;

use super::patterns::{VALOR_AVULSO, VALOR_DO_CONTRATO, VALOR_ROTULADO, VALOR_TOTAL};

/// Parse a Brazilian-formatted amount (e.g. "1.234.567,89" or "1234,56").
///
/// With both separators present the dots are grouping and the comma is the
/// decimal mark; a lone comma is the decimal mark. A lone dot is ambiguous
/// between grouping and decimal; it is treated as the decimal mark.
pub fn parse_brl_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') && cleaned.contains('.') {
        cleaned.replace('.', "").replace(',', ".")
    } else if cleaned.contains(',') {
        cleaned.replace(',', ".")
    } else {
        cleaned
    };

    let value: f64 = normalized.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Extract the contract value.
///
/// Patterns are tried most specific first; a candidate that fails to parse
/// or falls outside the plausibility bounds is rejected and the next pattern
/// is tried. The bare "R$" pattern is the least specific and always last.
pub fn extract_valor(text: &str, valor_min: f64, valor_max: f64) -> Option<f64> {
    let patterns = [&*VALOR_TOTAL, &*VALOR_DO_CONTRATO, &*VALOR_ROTULADO, &*VALOR_AVULSO];

    patterns.iter().find_map(|pattern| {
        let candidate = pattern
            .captures(text)
            .and_then(|caps| parse_brl_amount(&caps[1]))?;
        if candidate >= valor_min && candidate <= valor_max {
            Some(candidate)
        } else {
            trace!("rejecting implausible valor candidate {candidate}");
            None
        }
    })
}
