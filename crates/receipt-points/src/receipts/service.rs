use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{Points, ReceiptId, ReceiptSubmission};
use super::points::PointsEngine;
use super::store::{ReceiptStore, StoreError};
use super::validation::{validate, ValidationError};

/// Service composing the validator, points engine, and receipt store.
pub struct ReceiptService<S> {
    store: Arc<S>,
    engine: PointsEngine,
}

impl<S> ReceiptService<S>
where
    S: ReceiptStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            engine: PointsEngine::new(),
        }
    }

    pub fn engine(&self) -> &PointsEngine {
        &self.engine
    }

    /// Validate and score a receipt, returning the identifier its points are stored under.
    ///
    /// Nothing is stored when validation fails.
    pub fn submit(&self, submission: ReceiptSubmission) -> Result<ReceiptId, ReceiptServiceError> {
        let receipt = validate(submission).inspect_err(|err| {
            info!(reason = %err, "rejected receipt submission");
        })?;

        let points = self
            .engine
            .score(&receipt)
            .map_err(ValidationError::from)
            .inspect_err(|err| {
                info!(
                    reason = %err,
                    retailer = %receipt.retailer,
                    "rejected receipt submission"
                );
            })?;
        let id = ReceiptId::generate();
        self.store.put(id.clone(), points)?;

        debug!(%id, points, retailer = %receipt.retailer, "processed receipt");
        Ok(id)
    }

    /// Fetch the points previously stored for `id`.
    pub fn lookup(&self, id: &ReceiptId) -> Result<Points, ReceiptServiceError> {
        let points = self
            .store
            .get(id)?
            .ok_or(ReceiptServiceError::NotFound)?;
        debug!(%id, points, "looked up receipt points");
        Ok(points)
    }
}

/// Error raised by the receipt service.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No receipt found for that id")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}
