//! # Remote Module
//!
//! Mind-map generation through an OpenAI-compatible completion service.
//!
//! ## Components
//! - `prompt`: the generation prompt
//! - `client`: `CompletionService` trait and its HTTP implementation
//! - `normalize`: repair and normalization of the service output
//! - `generator`: orchestration

pub mod client;
pub mod generator;
pub mod normalize;
pub mod prompt;

pub use client::{CompletionService, HttpCompletionClient};
pub use generator::RemoteGenerator;
pub use normalize::{normalize_or_recover, normalize_response, parse_relaxed, repair_json};
pub use prompt::build_prompt;
