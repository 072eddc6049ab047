//! HTTP routes for the lead endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_lead, list_leads, LeadHandlers};

/// Creates the lead router.
pub fn lead_routes(handlers: LeadHandlers) -> Router {
    Router::new()
        .route("/leads", post(create_lead))
        .route("/leads", get(list_leads))
        .with_state(handlers)
}
