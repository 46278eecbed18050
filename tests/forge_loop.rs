//! End-to-end tests for the generate, review, and revise pipeline against a
//! scripted provider client.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use toolsmith::error::ApiError;
use toolsmith::forge::{CompletionPlanner, ForgeWorkflow, ToolSpec, ToolWriter};
use toolsmith::provider::{ChatMessage, ChatRole, CompletionOptions, ModelProviderClient};
use toolsmith::tools::RecipeGenerator;

/// Client that replays canned responses in order and records every request.
struct ScriptedClient {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedClient {
    fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|r| r.to_string()).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn recorded_requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProviderClient for ScriptedClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _options: &CompletionOptions,
    ) -> Result<String, ApiError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ApiError::ProviderError("script exhausted".to_string()))
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

#[tokio::test]
async fn generate_review_improve_round_trip() {
    let client = ScriptedClient::new(&[
        // generation: fenced, with a language tag to strip
        "```python\ndef slugify(text: str) -> str:\n    return text\n```",
        // review: free-form text
        "  Solid start. Consider lowercasing the input and adding a docstring.  ",
        // revision: unfenced, with a leading prose line the pipeline drops
        "Here is the improved function:\ndef slugify(text: str) -> str:\n    \"\"\"Slugify text.\"\"\"\n    return text.lower()",
    ]);

    let dir = tempfile::tempdir().unwrap();
    let planner = CompletionPlanner::new(&client);
    let workflow = ForgeWorkflow::new(&planner, &client, ToolWriter::new(dir.path()));

    let spec = ToolSpec::new("slugify", "turn text into a slug", "text: str", "str");

    let generated = workflow.generate(&spec).await.unwrap();
    assert_eq!(generated.code, "def slugify(text: str) -> str:\n    return text");
    assert!(generated.path.ends_with("slugify.py"));
    assert_eq!(
        std::fs::read_to_string(&generated.path).unwrap(),
        generated.code
    );

    let review = workflow.review(&generated.code).await.unwrap();
    assert_eq!(
        review,
        "Solid start. Consider lowercasing the input and adding a docstring."
    );

    let improved = workflow.improve(&spec, &generated.code, &review).await.unwrap();
    assert_eq!(
        improved.code,
        "def slugify(text: str) -> str:\n    \"\"\"Slugify text.\"\"\"\n    return text.lower()"
    );
    assert!(improved.path.ends_with("slugify_improved.py"));
    assert_eq!(
        std::fs::read_to_string(&improved.path).unwrap(),
        improved.code
    );

    // Both files live side by side in the output directory
    assert!(dir.path().join("slugify.py").exists());
    assert!(dir.path().join("slugify_improved.py").exists());

    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 3);

    // Generation goes through the planner with a code-only system message
    assert_eq!(requests[0][0].role, ChatRole::System);
    assert!(requests[0][1]
        .content
        .contains("Write a complete Python function called `slugify`"));
    assert!(requests[0][1].content.contains("turn text into a slug"));

    // Review is a single user message embedding the generated code
    assert_eq!(requests[1].len(), 1);
    assert_eq!(requests[1][0].role, ChatRole::User);
    assert!(requests[1][0].content.contains("code reviewer"));
    assert!(requests[1][0].content.contains(&generated.code));

    // Revision embeds both the original code and the review feedback
    assert!(requests[2][1].content.contains(&generated.code));
    assert!(requests[2][1].content.contains(&review));
}

#[tokio::test]
async fn generation_failure_stops_the_pipeline_before_writing() {
    let client = ScriptedClient::new(&[]);
    let dir = tempfile::tempdir().unwrap();
    let planner = CompletionPlanner::new(&client);
    let workflow = ForgeWorkflow::new(&planner, &client, ToolWriter::new(dir.path()));

    let spec = ToolSpec::new("broken", "", "", "");
    assert!(matches!(
        workflow.generate(&spec).await,
        Err(ApiError::ProviderError(_))
    ));
    assert!(!dir.path().join("broken.py").exists());
}

#[tokio::test]
async fn unclosed_fence_in_generation_runs_to_end() {
    let client = ScriptedClient::new(&["```python\ndef f():\n    return 1"]);
    let dir = tempfile::tempdir().unwrap();
    let planner = CompletionPlanner::new(&client);
    let workflow = ForgeWorkflow::new(&planner, &client, ToolWriter::new(dir.path()));

    let generated = workflow
        .generate(&ToolSpec::new("f", "", "", ""))
        .await
        .unwrap();
    assert_eq!(generated.code, "def f():\n    return 1");
}

#[tokio::test]
async fn recipe_generation_parses_sections() {
    let client = ScriptedClient::new(&["Pancakes\nEggs\nFlour\nInstructions\nMix\nCook"]);
    let generator = RecipeGenerator::new(&client);

    let recipe = generator
        .generate(&["egg".to_string(), "flour".to_string()], None)
        .await
        .unwrap();

    assert_eq!(recipe.title, vec!["Pancakes".to_string()]);
    assert_eq!(
        recipe.ingredients,
        vec!["Eggs".to_string(), "Flour".to_string()]
    );
    assert_eq!(recipe.instructions, vec!["Mix".to_string(), "Cook".to_string()]);

    let requests = client.recorded_requests();
    assert_eq!(
        requests[0][0].content,
        "Create a recipe using the following ingredients: egg, flour."
    );
}

#[tokio::test]
async fn recipe_prompt_carries_cuisine_style() {
    let client = ScriptedClient::new(&["Ramen\nNoodles\nInstructions\nBoil"]);
    let generator = RecipeGenerator::new(&client);

    generator
        .generate(&["noodles".to_string()], Some("Japanese"))
        .await
        .unwrap();

    let requests = client.recorded_requests();
    assert!(requests[0][0]
        .content
        .ends_with("The recipe should be in the style of Japanese cuisine."));
}
