//! Workflow orchestration for the generate/review/revise loop.
//!
//! Strictly sequential: each step blocks until its provider call returns.
//! The CLI layer owns the yes/no decision between review and revision; the
//! workflow only exposes the individual steps and their outcomes.

use crate::error::ApiError;
use crate::forge::generator::CodeGenerator;
use crate::forge::planner::Planner;
use crate::forge::prompt::{generation_prompt, revision_prompt};
use crate::forge::reviewer::Reviewer;
use crate::forge::spec::ToolSpec;
use crate::forge::writer::ToolWriter;
use crate::provider::ModelProviderClient;
use crate::text::strip_code_noise;
use std::path::PathBuf;

/// Result of the initial generation step.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub code: String,
    pub path: PathBuf,
}

/// Result of the revision step.
#[derive(Debug, Clone)]
pub struct ImproveOutcome {
    pub code: String,
    pub path: PathBuf,
}

pub struct ForgeWorkflow<'a> {
    generator: CodeGenerator<'a>,
    reviewer: Reviewer<'a>,
    writer: ToolWriter,
}

impl<'a> ForgeWorkflow<'a> {
    pub fn new(
        planner: &'a dyn Planner,
        review_client: &'a dyn ModelProviderClient,
        writer: ToolWriter,
    ) -> Self {
        Self {
            generator: CodeGenerator::new(planner),
            reviewer: Reviewer::new(review_client),
            writer,
        }
    }

    /// Generate the tool from its spec and persist it to `<name>.py`.
    pub async fn generate(&self, spec: &ToolSpec) -> Result<GenerateOutcome, ApiError> {
        let instruction = generation_prompt(spec);
        let code = self.generator.generate(&instruction).await?;
        let path = self
            .writer
            .write(&ToolWriter::tool_filename(&spec.name), &code)?;
        tracing::info!(tool = %spec.name, path = %path.display(), "tool generated");
        Ok(GenerateOutcome { code, path })
    }

    /// Review previously generated code, returning the raw review text.
    pub async fn review(&self, code: &str) -> Result<String, ApiError> {
        self.reviewer.review(code).await
    }

    /// Revise the tool using reviewer feedback and persist the result to
    /// `<name>_improved.py`. The revision passes through the same fence
    /// extraction as generation plus noise-line stripping.
    pub async fn improve(
        &self,
        spec: &ToolSpec,
        original_code: &str,
        feedback: &str,
    ) -> Result<ImproveOutcome, ApiError> {
        let instruction = revision_prompt(original_code, feedback);
        let code = self.generator.generate(&instruction).await?;
        let code = strip_code_noise(&code);
        let path = self
            .writer
            .write(&ToolWriter::improved_filename(&spec.name), &code)?;
        tracing::info!(tool = %spec.name, path = %path.display(), "tool improved");
        Ok(ImproveOutcome { code, path })
    }
}
