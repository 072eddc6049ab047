//! HTTP handlers for the lead endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::{Lead, ValidationError};
use crate::ports::{LeadStore, StoreError};

use super::super::ErrorResponse;
use super::dto::{CreateLeadRequest, LeadResponse, ListLeadsQuery};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct LeadHandlers {
    store: Arc<dyn LeadStore>,
}

impl LeadHandlers {
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self { store }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/leads - Validate, sanitize, and persist one lead
pub async fn create_lead(
    State(handlers): State<LeadHandlers>,
    Json(req): Json<CreateLeadRequest>,
) -> Response {
    // A draft that fails validation never reaches the store.
    let lead = match Lead::try_new(req.into()) {
        Ok(lead) => lead,
        Err(e) => return validation_error_response(e),
    };

    match handlers.store.append(&lead).await {
        Ok(()) => (StatusCode::CREATED, Json(LeadResponse::from(&lead))).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/leads?limit=N - Read back stored leads
pub async fn list_leads(
    State(handlers): State<LeadHandlers>,
    Query(query): Query<ListLeadsQuery>,
) -> Response {
    match handlers.store.list(query.limit).await {
        Ok(rows) => {
            let response: Vec<LeadResponse> = rows.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => store_error_response(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn validation_error_response(error: ValidationError) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse::validation(error.field(), error.to_string())),
    )
        .into_response()
}

fn store_error_response(error: StoreError) -> Response {
    if error.is_unavailable() {
        // Configuration fault, not a runtime blip: flag it as such so the
        // operator knows retrying is pointless.
        tracing::error!(error = %error, "lead store was never initialized");
    } else {
        tracing::error!(error = %error, "lead store call failed");
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal("Lead store operation failed")),
    )
        .into_response()
}
