use crate::model::Offer;
use crate::search::coordinator::{OutcomeStatus, SourceOutcome};
use std::cmp::Ordering;

/// Concatenates the offers of all successful outcomes (outcome order, then each
/// source's own order) and sorts them by price. Failed outcomes contribute nothing.
pub fn merge(outcomes: Vec<SourceOutcome>) -> Vec<Offer> {
    let mut offers: Vec<Offer> = outcomes
        .into_iter()
        .filter_map(|outcome| match outcome.status {
            OutcomeStatus::Success(offers) => Some(offers),
            OutcomeStatus::Failure(_) => None,
        })
        .flatten()
        .collect();
    sort_by_price(&mut offers);
    offers
}

/// Stable ascending sort; offers without a price go last in their original order.
pub fn sort_by_price(offers: &mut [Offer]) {
    offers.sort_by(|a, b| compare_prices(a.price.value, b.price.value));
}

fn compare_prices(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Price, SourceError};
    use crate::normalizer::{from_amount, unavailable};
    use std::time::Duration;

    fn offer(id: &str, price: Price) -> Offer {
        Offer {
            id: id.into(),
            title: id.into(),
            price,
            source_name: "Loja".into(),
            url: format!("https://loja.example/{}", id),
            description: None,
            image_url: None,
        }
    }

    fn success(source: &str, offers: Vec<Offer>) -> SourceOutcome {
        SourceOutcome {
            source_id: source.into(),
            status: OutcomeStatus::Success(offers),
            elapsed: Duration::from_millis(10),
        }
    }

    fn ids(offers: &[Offer]) -> Vec<&str> {
        offers.iter().map(|o| o.id.as_str()).collect()
    }

    #[test]
    fn sorts_ascending_across_sources() {
        let merged = merge(vec![
            success("amazon", vec![offer("a1", from_amount(42.0)), offer("a2", from_amount(10.0))]),
            success("magalu", vec![offer("m1", from_amount(39.9))]),
        ]);
        assert_eq!(ids(&merged), ["a2", "m1", "a1"]);
    }

    #[test]
    fn unpriced_offers_go_last_in_original_order() {
        let merged = merge(vec![
            success("amazon", vec![offer("x1", unavailable()), offer("a1", from_amount(5.0))]),
            success("magalu", vec![offer("x2", unavailable()), offer("m1", from_amount(1.0))]),
            success("drogasil", vec![offer("x3", unavailable())]),
        ]);
        assert_eq!(ids(&merged), ["m1", "a1", "x1", "x2", "x3"]);
    }

    #[test]
    fn equal_prices_keep_concatenation_order() {
        let merged = merge(vec![
            success("amazon", vec![offer("a1", from_amount(20.0)), offer("a2", from_amount(20.0))]),
            success("magalu", vec![offer("m1", from_amount(20.0))]),
        ]);
        assert_eq!(ids(&merged), ["a1", "a2", "m1"]);
    }

    #[test]
    fn zero_prices_of_either_sign_keep_order() {
        let negative_zero = Price {
            display: "R$ 0,00".into(),
            value: Some(-0.0),
        };
        let merged = merge(vec![
            success("drogasil", vec![offer("first_zero", from_amount(0.0))]),
            success(
                "paguemenos",
                vec![offer("vtex_zero", negative_zero), offer("amostra", from_amount(-0.0))],
            ),
        ]);
        assert_eq!(ids(&merged), ["first_zero", "vtex_zero", "amostra"]);
    }

    #[test]
    fn failures_contribute_nothing_and_no_dedup() {
        let merged = merge(vec![
            SourceOutcome {
                source_id: "americanas".into(),
                status: OutcomeStatus::Failure(SourceError::Timeout),
                elapsed: Duration::from_secs(8),
            },
            success("amazon", vec![offer("same", from_amount(3.0))]),
            success("magalu", vec![offer("same", from_amount(3.0))]),
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn all_failed_is_empty() {
        let merged = merge(vec![SourceOutcome {
            source_id: "amazon".into(),
            status: OutcomeStatus::Failure(SourceError::Http("connection reset".into())),
            elapsed: Duration::from_millis(300),
        }]);
        assert!(merged.is_empty());
    }
}
