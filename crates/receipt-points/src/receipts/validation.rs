use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde_json::Value;

use super::domain::{Item, Receipt, ReceiptSubmission};
use super::points::PointsOverflow;

/// Reasons a decoded receipt cannot be scored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("items is required")]
    EmptyItems,
    #[error("item is incorrect")]
    MalformedItem { index: usize },
    #[error("{field} is malformed: {reason}")]
    MalformedField { field: &'static str, reason: String },
    #[error("receipt points exceed the supported range")]
    PointsOutOfRange,
}

impl From<PointsOverflow> for ValidationError {
    fn from(_: PointsOverflow) -> Self {
        Self::PointsOutOfRange
    }
}

fn total_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]+\.[0-9]{2}$").expect("total pattern compiles"))
}

/// Check the preconditions the points engine relies on and produce a typed [`Receipt`].
pub fn validate(submission: ReceiptSubmission) -> Result<Receipt, ValidationError> {
    if submission.items.is_empty() {
        return Err(ValidationError::EmptyItems);
    }

    let items = submission
        .items
        .iter()
        .enumerate()
        .map(|(index, raw)| parse_item(raw).ok_or(ValidationError::MalformedItem { index }))
        .collect::<Result<Vec<_>, _>>()?;

    check_total(&submission.total)?;
    check_purchase_date(&submission.purchase_date)?;
    check_purchase_time(&submission.purchase_time)?;

    Ok(Receipt {
        retailer: submission.retailer,
        purchase_date: submission.purchase_date,
        purchase_time: submission.purchase_time,
        total: submission.total,
        items,
    })
}

fn parse_item(raw: &Value) -> Option<Item> {
    let object = raw.as_object()?;
    let short_description = object.get("shortDescription")?.as_str()?;
    let price = object.get("price")?.as_str()?.trim().parse::<f64>().ok()?;
    if !price.is_finite() || price < 0.0 {
        return None;
    }

    Some(Item {
        short_description: short_description.to_string(),
        price,
    })
}

fn check_total(total: &str) -> Result<(), ValidationError> {
    if total_pattern().is_match(total) {
        Ok(())
    } else {
        Err(ValidationError::MalformedField {
            field: "total",
            reason: format!("'{total}' is not a decimal amount with two fractional digits"),
        })
    }
}

fn check_purchase_date(raw: &str) -> Result<(), ValidationError> {
    // chrono also accepts unpadded fields; the scoring rules slice by position.
    let well_formed = raw.len() == 10 && NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok();
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::MalformedField {
            field: "purchaseDate",
            reason: format!("'{raw}' is not a YYYY-MM-DD date"),
        })
    }
}

fn check_purchase_time(raw: &str) -> Result<(), ValidationError> {
    let well_formed = raw.len() == 5 && NaiveTime::parse_from_str(raw, "%H:%M").is_ok();
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::MalformedField {
            field: "purchaseTime",
            reason: format!("'{raw}' is not a 24-hour HH:MM time"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission(items: Vec<Value>) -> ReceiptSubmission {
        ReceiptSubmission {
            retailer: "Walgreens".to_string(),
            purchase_date: "2022-01-02".to_string(),
            purchase_time: "08:13".to_string(),
            total: "2.65".to_string(),
            items,
        }
    }

    fn dasani() -> Vec<Value> {
        vec![json!({ "shortDescription": "Dasani", "price": "1.40" })]
    }

    #[test]
    fn rejects_empty_item_list() {
        assert_eq!(validate(submission(Vec::new())), Err(ValidationError::EmptyItems));
    }

    #[test]
    fn rejects_items_missing_required_fields() {
        let items = vec![
            json!({ "shortDescription": "Pepsi - 12-oz", "price": "1.25" }),
            json!({ "shortDescription": "Dasani" }),
        ];
        assert_eq!(
            validate(submission(items)),
            Err(ValidationError::MalformedItem { index: 1 })
        );

        let items = vec![json!({ "price": "1.40" })];
        assert_eq!(
            validate(submission(items)),
            Err(ValidationError::MalformedItem { index: 0 })
        );
    }

    #[test]
    fn rejects_non_object_items_and_bad_prices() {
        for item in [
            json!("Pepsi"),
            json!({ "shortDescription": "Pepsi", "price": 1.25 }),
            json!({ "shortDescription": "Pepsi", "price": "free" }),
            json!({ "shortDescription": "Pepsi", "price": "-1.00" }),
        ] {
            assert_eq!(
                validate(submission(vec![item])),
                Err(ValidationError::MalformedItem { index: 0 })
            );
        }
    }

    #[test]
    fn rejects_malformed_scalar_fields() {
        let mut bad_total = submission(dasani());
        bad_total.total = "2.6".to_string();
        assert!(matches!(
            validate(bad_total),
            Err(ValidationError::MalformedField { field: "total", .. })
        ));

        let mut bad_date = submission(dasani());
        bad_date.purchase_date = "2022-1-2".to_string();
        assert!(matches!(
            validate(bad_date),
            Err(ValidationError::MalformedField { field: "purchaseDate", .. })
        ));

        let mut bad_time = submission(dasani());
        bad_time.purchase_time = "25:00".to_string();
        assert!(matches!(
            validate(bad_time),
            Err(ValidationError::MalformedField { field: "purchaseTime", .. })
        ));
    }

    #[test]
    fn produces_typed_receipt() {
        let items = vec![
            json!({ "shortDescription": "Pepsi - 12-oz", "price": "1.25" }),
            json!({ "shortDescription": "Dasani", "price": "1.40" }),
        ];
        let receipt = validate(submission(items)).expect("receipt is valid");

        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.items[1].short_description, "Dasani");
        assert!((receipt.items[1].price - 1.40).abs() < f64::EPSILON);
    }

    #[test]
    fn error_messages_match_client_contract() {
        assert_eq!(ValidationError::EmptyItems.to_string(), "items is required");
        assert_eq!(
            ValidationError::MalformedItem { index: 3 }.to_string(),
            "item is incorrect"
        );
    }
}
