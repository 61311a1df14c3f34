//! Generation adapter: asks an external generative model for a diagram.
//!
//! The provider sits behind [`GenerativeService`] so it can be swapped
//! without touching the document model. [`GeminiClient`] is the native
//! implementation; the browser bridge builds the same request with
//! [`GenerateContentRequest`] and feeds the reply to [`interpret_response`].

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod prompt;
pub mod service;

#[cfg(feature = "client")]
pub use client::GeminiClient;
pub use config::GeminiConfig;
pub use error::{GenerateError, ServiceError};
pub use gemini::{GenerateContentRequest, GenerateContentResponse};
pub use generator::{DiagramGenerator, Generation, interpret_response};
pub use prompt::SYSTEM_INSTRUCTION;
pub use service::GenerativeService;
