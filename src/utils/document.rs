//! Brazilian document helpers: CPF check digits and CEP shape.

use regex::Regex;
use std::sync::LazyLock;

static CEP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}-?[0-9]{3}$").expect("Invalid CEP pattern"));

fn digits(value: &str) -> Vec<u32> {
    value.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn check_digit(digits: &[u32]) -> u32 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight_start - i as u32))
        .sum();
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

/// Validate a CPF, ignoring punctuation
pub fn validate_cpf(cpf: &str) -> bool {
    let d = digits(cpf);
    if d.len() != 11 || d.iter().all(|&x| x == d[0]) {
        return false;
    }
    check_digit(&d[..9]) == d[9] && check_digit(&d[..10]) == d[10]
}

/// Render the digits of a CPF as `XXX.XXX.XXX-XX`. Input without exactly
/// eleven digits comes back as its bare digits.
pub fn format_cpf(cpf: &str) -> String {
    let d: String = cpf.chars().filter(char::is_ascii_digit).collect();
    if d.len() != 11 {
        return d;
    }
    format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..])
}

/// A CEP is eight digits, optionally written `XXXXX-XXX`
pub fn validate_cep(cep: &str) -> bool {
    CEP_PATTERN.is_match(cep.trim())
}

pub fn format_cep(cep: &str) -> Option<String> {
    if !validate_cep(cep) {
        return None;
    }
    let d: String = cep.chars().filter(char::is_ascii_digit).collect();
    Some(format!("{}-{}", &d[..5], &d[5..]))
}
