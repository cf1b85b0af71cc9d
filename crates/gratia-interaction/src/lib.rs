//! Remote collaborators for Gratia: the Gemini text and image model, and
//! the geolocation source.
//!
//! [`GeminiAdviceService`] adapts any [`TextGenerator`] to the domain's
//! [`gratia_core::advice::AdviceService`], resolving every failure to a
//! displayable fallback.

pub mod advice_service;
pub mod attachment;
pub mod gemini_api_agent;
pub mod generator;
pub mod geolocation;
pub mod json;
pub mod prompts;

pub use advice_service::GeminiAdviceService;
pub use gemini_api_agent::GeminiApiAgent;
pub use generator::{GeneratedImage, GenerationRequest, TextGenerator, UnconfiguredGenerator};
pub use geolocation::FixedLocator;
