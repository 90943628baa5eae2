// Price normalization: raw source text -> canonical Price
use crate::model::{Price, RawPrice};
use serde::Deserialize;

pub const CURRENCY_SYMBOL: &str = "R$";
pub const UNAVAILABLE: &str = "Preço indisponível";

/// Decimal convention a source prints its prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PriceLocale {
    /// `1.234,56`
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    /// `1,234.56`
    #[serde(rename = "en-US")]
    EnUs,
}

impl PriceLocale {
    fn decimal_separator(self) -> char {
        match self {
            PriceLocale::PtBr => ',',
            PriceLocale::EnUs => '.',
        }
    }

    fn thousands_separator(self) -> char {
        match self {
            PriceLocale::PtBr => '.',
            PriceLocale::EnUs => ',',
        }
    }
}

/// Normalizes raw price text printed by a source in `locale`.
///
/// Everything but digits and separators is dropped, thousands separators are
/// removed and the locale's decimal separator becomes the decimal point. Text
/// that does not yield a finite non-negative number becomes the unavailable
/// price.
///
/// The display output is valid input under `PriceLocale::PtBr`: normalizing it
/// again yields the same numeric value.
pub fn normalize(raw: &str, locale: PriceLocale) -> Price {
    match parse_amount(raw, locale) {
        Some(value) => from_amount(value),
        None => unavailable(),
    }
}

/// Builds a canonical price from a number delivered by a structured source.
pub fn from_amount(value: f64) -> Price {
    if !value.is_finite() || value < 0.0 {
        return unavailable();
    }
    // -0.0 passes the check above but must not print or sort as negative
    let value = if value == 0.0 { 0.0 } else { value };
    Price {
        display: format_brl(value),
        value: Some(value),
    }
}

pub fn unavailable() -> Price {
    Price {
        display: UNAVAILABLE.to_string(),
        value: None,
    }
}

pub fn normalize_raw(raw: &RawPrice, locale: PriceLocale) -> Price {
    match raw {
        RawPrice::Text(text) => normalize(text, locale),
        RawPrice::Amount(value) => from_amount(*value),
        RawPrice::Missing => unavailable(),
    }
}

fn parse_amount(raw: &str, locale: PriceLocale) -> Option<f64> {
    let decimal = locale.decimal_separator();
    let thousands = locale.thousands_separator();

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .filter(|c| *c != thousands)
        .map(|c| if c == decimal { '.' } else { c })
        .collect();

    // "R$ 39,90." leaves a dangling separator behind; ",50" keeps its leading one
    let cleaned = cleaned.trim_end_matches('.');
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

/// `1234.5` -> `R$ 1.234,50`
fn format_brl(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    format!("{} {},{}", CURRENCY_SYMBOL, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_brazilian_price_text() {
        let price = normalize("R$ 1.234,56", PriceLocale::PtBr);
        assert_eq!(price.value, Some(1234.56));
        assert_eq!(price.display, "R$ 1.234,56");
    }

    #[test]
    fn parses_us_price_text() {
        let price = normalize("$1,234.56", PriceLocale::EnUs);
        assert_eq!(price.value, Some(1234.56));
        assert_eq!(price.display, "R$ 1.234,56");
    }

    #[test]
    fn pads_to_two_decimals() {
        assert_eq!(normalize("R$ 42", PriceLocale::PtBr).display, "R$ 42,00");
        assert_eq!(normalize("39,9", PriceLocale::PtBr).display, "R$ 39,90");
        assert_eq!(normalize("0,05", PriceLocale::PtBr).display, "R$ 0,05");
    }

    #[test]
    fn groups_large_amounts() {
        let price = normalize("R$ 1.234.567,00", PriceLocale::PtBr);
        assert_eq!(price.value, Some(1234567.0));
        assert_eq!(price.display, "R$ 1.234.567,00");
        assert_eq!(from_amount(100.0).display, "R$ 100,00");
        assert_eq!(from_amount(1000.0).display, "R$ 1.000,00");
    }

    #[test]
    fn renormalizing_display_keeps_value() {
        for raw in ["R$ 1.234,56", "por R$ 39,90", "42"] {
            let first = normalize(raw, PriceLocale::PtBr);
            let second = normalize(&first.display, PriceLocale::PtBr);
            assert_eq!(first.value, second.value);
            assert_eq!(first.display, second.display);
        }
    }

    #[test]
    fn text_without_digits_is_unavailable() {
        let price = normalize("indisponível", PriceLocale::PtBr);
        assert_eq!(price.value, None);
        assert_eq!(price.display, UNAVAILABLE);

        assert!(!normalize("", PriceLocale::PtBr).is_valid());
        assert!(!normalize(",.", PriceLocale::PtBr).is_valid());
        assert!(!normalize(UNAVAILABLE, PriceLocale::PtBr).is_valid());
    }

    #[test]
    fn leading_decimal_separator_is_kept() {
        let price = normalize(",50", PriceLocale::PtBr);
        assert_eq!(price.value, Some(0.5));
        assert_eq!(price.display, "R$ 0,50");
        assert_eq!(normalize("R$ ,99", PriceLocale::PtBr).value, Some(0.99));
        assert_eq!(normalize("$.99", PriceLocale::EnUs).value, Some(0.99));
        assert_eq!(normalize("R$ 39,90.", PriceLocale::PtBr).value, Some(39.9));
    }

    #[test]
    fn negative_zero_amount_becomes_zero() {
        let price = from_amount(-0.0);
        assert_eq!(price.display, "R$ 0,00");
        let value = price.value.unwrap();
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }

    #[test]
    fn ambiguous_separators_are_unavailable() {
        assert!(!normalize("1,2,3", PriceLocale::PtBr).is_valid());
    }

    #[test]
    fn minus_sign_is_stripped_before_parsing() {
        // only digits and separators survive cleaning
        assert_eq!(normalize("-10,00", PriceLocale::PtBr).value, Some(10.0));
    }

    #[test]
    fn rejects_negative_and_non_finite_amounts() {
        assert!(!from_amount(-1.0).is_valid());
        assert!(!from_amount(f64::NAN).is_valid());
        assert!(!from_amount(f64::INFINITY).is_valid());
        assert!(from_amount(0.0).is_valid());
    }

    #[test]
    fn raw_price_variants() {
        assert_eq!(normalize_raw(&RawPrice::Amount(39.9), PriceLocale::PtBr).display, "R$ 39,90");
        assert_eq!(
            normalize_raw(&RawPrice::Text("R$ 10,00".into()), PriceLocale::PtBr).value,
            Some(10.0)
        );
        assert!(!normalize_raw(&RawPrice::Missing, PriceLocale::PtBr).is_valid());
    }
}
