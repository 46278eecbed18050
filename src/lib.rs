//! Toolsmith: LLM-driven tool generation
//!
//! Generates small tool functions through a chat-completion provider, reviews
//! the result with a second prompt, and optionally revises the code using the
//! review feedback before persisting it to disk.

pub mod config;
pub mod error;
pub mod forge;
pub mod logging;
pub mod provider;
pub mod text;
pub mod tooling;
pub mod tools;
