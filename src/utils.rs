// Utility functions
use chrono::Utc;
use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Returns true when the term looks like a barcode (EAN-8 up to GTIN-14).
pub fn is_ean(term: &str) -> bool {
    (8..=14).contains(&term.len()) && term.chars().all(|c| c.is_ascii_digit())
}

/// Converts a string to lowercase kebab-case, collapsing whitespace runs.
pub fn to_kebab_case(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Generates an offer id of the form `{source}-{unix millis}-{7 base36 chars}`.
pub fn generate_offer_id(source_id: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..7)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("{}-{}-{}", source_id, Utc::now().timestamp_millis(), suffix)
}
