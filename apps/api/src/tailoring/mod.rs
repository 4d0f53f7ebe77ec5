// Resume tailoring pipeline
// validation → prompt building → tailoring stage → (on request) analysis stage.
// All completion calls go through llm_client; nothing here talks HTTP to the provider.

pub mod download;
pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod prompt_builder;
pub mod prompts;
pub mod stages;
pub mod validation;
