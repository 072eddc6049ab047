//! Concierge - conversational assistant backend with lead capture.
//!
//! Receives chat messages over HTTP, delegates text generation to a hosted
//! language model, keeps per-conversation state in an in-process registry,
//! and appends validated contact-form leads to a remote spreadsheet.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
