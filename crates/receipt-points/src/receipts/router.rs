use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{error, info};

use super::domain::{ReceiptId, ReceiptSubmission};
use super::service::{ReceiptService, ReceiptServiceError};
use super::store::ReceiptStore;

/// Router builder exposing the receipt processing and lookup endpoints.
pub fn receipt_router<S>(service: Arc<ReceiptService<S>>) -> Router
where
    S: ReceiptStore + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<S>))
        .route("/receipts/:id/points", get(points_handler::<S>))
        .with_state(service)
}

pub(crate) async fn process_handler<S>(
    State(service): State<Arc<ReceiptService<S>>>,
    payload: Result<Json<ReceiptSubmission>, JsonRejection>,
) -> Response
where
    S: ReceiptStore + 'static,
{
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            info!(reason = %rejection.body_text(), "receipt body failed schema validation");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    match service.submit(submission) {
        Ok(id) => (StatusCode::OK, Json(json!({ "id": id }))).into_response(),
        Err(ReceiptServiceError::Validation(err)) => {
            error_response(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(other) => {
            error!(error = %other, "failed to process receipt");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

pub(crate) async fn points_handler<S>(
    State(service): State<Arc<ReceiptService<S>>>,
    Path(id): Path<String>,
) -> Response
where
    S: ReceiptStore + 'static,
{
    match service.lookup(&ReceiptId(id)) {
        Ok(points) => (StatusCode::OK, Json(json!({ "points": points }))).into_response(),
        Err(ReceiptServiceError::NotFound) => {
            error_response(StatusCode::NOT_FOUND, ReceiptServiceError::NotFound.to_string())
        }
        Err(other) => {
            error!(error = %other, "failed to look up receipt");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
