//! Receipt intake, scoring, and lookup.
//!
//! Submissions are validated into a typed [`Receipt`], scored by the [`PointsEngine`], and the
//! resulting points are kept in a [`ReceiptStore`] under a freshly generated [`ReceiptId`].

pub mod domain;
pub mod points;
pub mod router;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Item, Points, Receipt, ReceiptId, ReceiptSubmission};
pub use points::{PointsBreakdown, PointsComponent, PointsEngine, PointsOverflow, ScoringRule};
pub use router::receipt_router;
pub use service::{ReceiptService, ReceiptServiceError};
pub use store::{InMemoryReceiptStore, ReceiptStore, StoreError};
pub use validation::{validate, ValidationError};
