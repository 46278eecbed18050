//! Code generation: plan, run, extract.

use crate::error::ApiError;
use crate::forge::planner::Planner;
use crate::text::extract_code_block;

pub struct CodeGenerator<'a> {
    planner: &'a dyn Planner,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(planner: &'a dyn Planner) -> Self {
        Self { planner }
    }

    /// Run an instruction through the planner and extract the generated code.
    ///
    /// The first step output is taken as the code, after fenced-block
    /// extraction. A response with no fence and no recognizable code passes
    /// through trimmed; nothing here attempts to detect prose.
    pub async fn generate(&self, instruction: &str) -> Result<String, ApiError> {
        let plan = self.planner.plan(instruction)?;
        tracing::debug!(steps = plan.steps.len(), "plan expanded");
        let run = self.planner.run_plan(&plan).await?;
        let output = run.first_output().ok_or_else(|| {
            ApiError::ProviderError("Plan run produced no step outputs".to_string())
        })?;
        Ok(extract_code_block(&output.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::planner::{Plan, PlanRun, PlanStep, StepOutput};
    use async_trait::async_trait;

    struct CannedPlanner {
        response: String,
    }

    #[async_trait]
    impl Planner for CannedPlanner {
        fn plan(&self, instruction: &str) -> Result<Plan, ApiError> {
            Ok(Plan {
                steps: vec![PlanStep {
                    output_id: "$step_0_output".to_string(),
                    instruction: instruction.to_string(),
                }],
            })
        }

        async fn run_plan(&self, _plan: &Plan) -> Result<PlanRun, ApiError> {
            Ok(PlanRun {
                step_outputs: vec![(
                    "$step_0_output".to_string(),
                    StepOutput {
                        value: self.response.clone(),
                    },
                )],
            })
        }
    }

    struct EmptyPlanner;

    #[async_trait]
    impl Planner for EmptyPlanner {
        fn plan(&self, _instruction: &str) -> Result<Plan, ApiError> {
            Ok(Plan { steps: Vec::new() })
        }

        async fn run_plan(&self, _plan: &Plan) -> Result<PlanRun, ApiError> {
            Ok(PlanRun {
                step_outputs: Vec::new(),
            })
        }
    }

    /// Planner whose step identifiers sort against execution order.
    struct MultiStepPlanner;

    #[async_trait]
    impl Planner for MultiStepPlanner {
        fn plan(&self, instruction: &str) -> Result<Plan, ApiError> {
            Ok(Plan {
                steps: vec![
                    PlanStep {
                        output_id: "$zeta_generate".to_string(),
                        instruction: instruction.to_string(),
                    },
                    PlanStep {
                        output_id: "$alpha_cleanup".to_string(),
                        instruction: "tidy up".to_string(),
                    },
                ],
            })
        }

        async fn run_plan(&self, plan: &Plan) -> Result<PlanRun, ApiError> {
            let step_outputs = plan
                .steps
                .iter()
                .enumerate()
                .map(|(i, step)| {
                    (
                        step.output_id.clone(),
                        StepOutput {
                            value: format!("output of executed step {}", i),
                        },
                    )
                })
                .collect();
            Ok(PlanRun { step_outputs })
        }
    }

    #[tokio::test]
    async fn generate_unwraps_fenced_response() {
        let planner = CannedPlanner {
            response: "```python\ndef f():\n    return 1\n```".to_string(),
        };
        let generator = CodeGenerator::new(&planner);
        let code = generator.generate("write f").await.unwrap();
        assert_eq!(code, "def f():\n    return 1");
    }

    #[tokio::test]
    async fn generate_passes_prose_through_trimmed() {
        let planner = CannedPlanner {
            response: "  no code here, sorry  ".to_string(),
        };
        let generator = CodeGenerator::new(&planner);
        let code = generator.generate("write f").await.unwrap();
        assert_eq!(code, "no code here, sorry");
    }

    #[tokio::test]
    async fn first_output_follows_execution_order_not_id_order() {
        let generator = CodeGenerator::new(&MultiStepPlanner);
        let code = generator.generate("write f").await.unwrap();
        assert_eq!(code, "output of executed step 0");
    }

    #[tokio::test]
    async fn empty_plan_run_is_an_error() {
        let generator = CodeGenerator::new(&EmptyPlanner);
        assert!(matches!(
            generator.generate("write f").await,
            Err(ApiError::ProviderError(_))
        ));
    }
}
