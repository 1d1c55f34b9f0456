use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::receipts::domain::{Points, Receipt, ReceiptId, ReceiptSubmission};
use crate::receipts::store::{InMemoryReceiptStore, ReceiptStore, StoreError};
use crate::receipts::validation::validate;
use crate::receipts::{receipt_router, ReceiptService};

pub(super) fn target_json() -> Value {
    json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            { "shortDescription": "Mountain Dew 12PK", "price": "6.49" },
            { "shortDescription": "Emils Cheese Pizza", "price": "12.25" },
            { "shortDescription": "Knorr Creamy Chicken", "price": "1.26" },
            { "shortDescription": "Doritos Nacho Cheese", "price": "3.35" },
            { "shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00" }
        ],
        "total": "35.35"
    })
}

pub(super) fn corner_market_json() -> Value {
    json!({
        "retailer": "M&M Corner Market",
        "purchaseDate": "2022-03-20",
        "purchaseTime": "14:33",
        "items": [
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" }
        ],
        "total": "9.00"
    })
}

pub(super) fn submission_from(value: Value) -> ReceiptSubmission {
    serde_json::from_value(value).expect("fixture decodes")
}

pub(super) fn target_submission() -> ReceiptSubmission {
    submission_from(target_json())
}

pub(super) fn corner_market_submission() -> ReceiptSubmission {
    submission_from(corner_market_json())
}

pub(super) fn empty_items_submission() -> ReceiptSubmission {
    let mut submission = target_submission();
    submission.items.clear();
    submission
}

pub(super) fn receipt(submission: ReceiptSubmission) -> Receipt {
    validate(submission).expect("fixture is valid")
}

pub(super) fn build_service() -> (ReceiptService<InMemoryReceiptStore>, InMemoryReceiptStore) {
    let store = InMemoryReceiptStore::default();
    let service = ReceiptService::new(Arc::new(store.clone()));
    (service, store)
}

pub(super) fn router_with_service(service: ReceiptService<InMemoryReceiptStore>) -> axum::Router {
    receipt_router(Arc::new(service))
}

pub(super) struct UnavailableStore;

impl ReceiptStore for UnavailableStore {
    fn put(&self, _id: ReceiptId, _points: Points) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn get(&self, _id: &ReceiptId) -> Result<Option<Points>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
