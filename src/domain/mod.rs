//! Domain layer - pure types and validation logic.
//!
//! Nothing in this module performs I/O; everything is constructible and
//! testable without a runtime.
//!
//! # Module Organization
//!
//! - `chat` - Session identity, conversation turns, session statistics
//! - `lead` - Lead records and the contact-form validation pipeline
//! - `sanitize` - Pure sanitization of free-text and contact fields
//! - `error` - Field-level validation failure type

pub mod chat;
pub mod error;
pub mod lead;
pub mod sanitize;

pub use chat::{Role, SessionId, SessionStats, Turn};
pub use error::ValidationError;
pub use lead::{Lead, LeadDraft, LeadId, LeadStatus};
