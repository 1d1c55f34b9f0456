use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reward points awarded to a receipt.
pub type Points = u64;

/// Opaque identifier handed back to clients after a receipt is processed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReceiptId(pub String);

impl ReceiptId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ReceiptId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Receipt payload as decoded from the request body.
///
/// Top-level fields are typed so the JSON decoder rejects missing or mistyped keys. Items stay
/// loosely typed; their shape is checked by [`super::validation::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSubmission {
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub total: String,
    pub items: Vec<serde_json::Value>,
}

/// Validated receipt handed to the points engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub total: String,
    pub items: Vec<Item>,
}

/// Line item on a validated receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub short_description: String,
    pub price: f64,
}

impl Item {
    /// Length of the description once surrounding whitespace is removed, counted in characters.
    pub fn trimmed_description_len(&self) -> usize {
        self.short_description.trim().chars().count()
    }
}
