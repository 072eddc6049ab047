//! Chat-model adapters.
//!
//! ## Available Adapters
//!
//! - `GeminiModel` - Google Gemini over the `generateContent` REST API
//! - `MockChatModel` - Scripted mock for testing

mod gemini;
mod mock;

pub use gemini::{GeminiConfig, GeminiModel};
pub use mock::{MockChatModel, MockFailure};
