//! Structured description of the tool to generate.

use serde::{Deserialize, Serialize};

/// User-supplied description of the desired tool. All fields are free text
/// and pass through to the prompt unvalidated; empty strings are allowed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Function name, also used for the output filename.
    pub name: String,

    /// What the tool should do.
    pub purpose: String,

    /// Input description, e.g. "text: str, count: int".
    pub inputs: String,

    /// Expected output description, e.g. "List[str]".
    pub output: String,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        purpose: impl Into<String>,
        inputs: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            purpose: purpose.into(),
            inputs: inputs.into(),
            output: output.into(),
        }
    }
}
