//! Text post-processing for LLM responses.

pub mod fence;

pub use fence::{extract_code_block, strip_code_noise};
