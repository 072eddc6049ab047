//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the core and the outside world. Adapters implement these ports.
//!
//! - `ChatModel` / `Conversation` - the hosted language model
//! - `LeadStore` - the remote row store holding lead submissions

mod chat_model;
mod lead_store;

pub use chat_model::{ChatModel, Conversation, ProviderError};
pub use lead_store::{LeadRow, LeadStore, StoreError};
