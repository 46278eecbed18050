//! Planning-framework boundary.
//!
//! The original workflow hands instructions to an external planning framework
//! that expands them into steps, runs the plan, and exposes step outputs as a
//! mapping of identifier to value. That framework is opaque here: only the
//! trait below is relied on, and a single-step provider-backed implementation
//! covers any chat-completion provider.

use crate::error::ApiError;
use crate::forge::prompt::CODE_ONLY_SYSTEM;
use crate::provider::{ChatMessage, CompletionOptions, ModelProviderClient};
use async_trait::async_trait;

/// One instruction in a plan.
#[derive(Debug, Clone)]
pub struct PlanStep {
    /// Identifier keying this step's output in the run result.
    pub output_id: String,
    pub instruction: String,
}

/// An expanded plan, ready to run.
#[derive(Debug, Clone)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
}

/// A named result produced by executing one plan step.
#[derive(Debug, Clone)]
pub struct StepOutput {
    pub value: String,
}

/// Result of running a plan: step outputs keyed by identifier, in execution
/// order. Identifiers carry no ordering meaning of their own.
#[derive(Debug, Clone)]
pub struct PlanRun {
    pub step_outputs: Vec<(String, StepOutput)>,
}

impl PlanRun {
    /// The first executed step's output, which the workflow treats as the
    /// generated code.
    pub fn first_output(&self) -> Option<&StepOutput> {
        self.step_outputs.first().map(|(_, output)| output)
    }
}

#[async_trait]
pub trait Planner: Send + Sync {
    /// Expand an instruction into a plan.
    fn plan(&self, instruction: &str) -> Result<Plan, ApiError>;

    /// Execute the plan, blocking per step until its call returns.
    async fn run_plan(&self, plan: &Plan) -> Result<PlanRun, ApiError>;
}

/// Single-step planner backed by a chat-completion client. Every instruction
/// becomes one step whose output is the completion text.
pub struct CompletionPlanner<'a> {
    client: &'a dyn ModelProviderClient,
    options: CompletionOptions,
}

impl<'a> CompletionPlanner<'a> {
    pub fn new(client: &'a dyn ModelProviderClient) -> Self {
        Self {
            client,
            options: CompletionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl Planner for CompletionPlanner<'_> {
    fn plan(&self, instruction: &str) -> Result<Plan, ApiError> {
        Ok(Plan {
            steps: vec![PlanStep {
                output_id: "$step_0_output".to_string(),
                instruction: instruction.to_string(),
            }],
        })
    }

    async fn run_plan(&self, plan: &Plan) -> Result<PlanRun, ApiError> {
        let mut step_outputs = Vec::with_capacity(plan.steps.len());
        for step in &plan.steps {
            let messages = [
                ChatMessage::system(CODE_ONLY_SYSTEM),
                ChatMessage::user(step.instruction.clone()),
            ];
            tracing::info!(output_id = %step.output_id, model = %self.client.model(), "running plan step");
            let value = self.client.complete(&messages, &self.options).await?;
            step_outputs.push((step.output_id.clone(), StepOutput { value }));
        }
        Ok(PlanRun { step_outputs })
    }
}
