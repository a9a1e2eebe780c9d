use beleg_core::Money;
use serde::Serialize;

/// One resolved line item: a description Line paired with a price Word.
/// Indices point into the receipt's Line and Word lists respectively.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub desc_line: usize,
    pub price_word: usize,
    pub price: Money,
}

/// The detected grand total: the matched label Word and the price Word
/// resolved for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalMatch {
    pub label_word: usize,
    pub price_word: usize,
    pub price: Money,
}

/// The externally visible result: `{"total": number|null, "items": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptSummary {
    pub total: Option<Money>,
    pub items: Vec<ItemEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemEntry {
    pub desc: String,
    pub price: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_serializes_to_contract_shape() {
        let summary = ReceiptSummary {
            total: Some(Money::from_cents(1013)),
            items: vec![ItemEntry {
                desc: "Apples".into(),
                price: Money::from_cents(199),
            }],
        };
        let v = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "total": 10.13,
                "items": [{"desc": "Apples", "price": 1.99}]
            })
        );
    }

    #[test]
    fn absent_total_serializes_as_null() {
        let summary = ReceiptSummary { total: None, items: vec![] };
        let v = serde_json::to_value(&summary).unwrap();
        assert_eq!(v, serde_json::json!({"total": null, "items": []}));
    }
}
