//! Lead HTTP adapter.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::LeadHandlers;
pub use routes::lead_routes;
