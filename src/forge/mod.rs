//! Tool forging: the generate, review, and revise pipeline.

pub mod generator;
pub mod planner;
pub mod prompt;
pub mod reviewer;
pub mod spec;
pub mod workflow;
pub mod writer;

pub use generator::CodeGenerator;
pub use planner::{CompletionPlanner, Plan, PlanRun, PlanStep, Planner, StepOutput};
pub use reviewer::Reviewer;
pub use spec::ToolSpec;
pub use workflow::{ForgeWorkflow, GenerateOutcome, ImproveOutcome};
pub use writer::ToolWriter;
