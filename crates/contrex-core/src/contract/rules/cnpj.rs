//! CNPJ (Brazilian company tax id) extraction and normalization.

use super::patterns::CNPJ;

/// Extract the first CNPJ from text, normalized to canonical punctuation.
///
/// The match is stripped to digits and accepted only when exactly 14 remain;
/// the field is never partially formatted.
pub fn extract_cnpj(text: &str) -> Option<String> {
    CNPJ.captures_iter(text).find_map(|caps| {
        let digits: String = caps[1].chars().filter(|c| c.is_ascii_digit()).collect();
        (digits.len() == 14).then(|| format_cnpj(&digits))
    })
}

/// Format a 14-digit string as `NN.NNN.NNN/NNNN-NN`.
pub fn format_cnpj(digits: &str) -> String {
    format!(
        "{}.{}.{}/{}-{}",
        &digits[0..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..14]
    )
}
