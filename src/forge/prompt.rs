//! Prompt assembly for tool generation, review, and revision.
//!
//! Straight-line string formatting. Fields pass through unchanged; empty
//! strings produce a prompt with empty sections rather than an error.

use crate::forge::spec::ToolSpec;

/// System instruction applied to every code-producing completion.
pub const CODE_ONLY_SYSTEM: &str =
    "You are a coding assistant. Generate only code, with no explanation, \
     description, or markdown syntax.";

/// Example tool embedded in the generation prompt so the model has a concrete
/// shape to imitate.
const EXAMPLE_TOOL: &str = r#"def word_count(text: str) -> int:
    """Count whitespace-separated words in the given text.

    Parameters:
    text (str): The input string to count words in.

    Returns:
    int: The number of words found.
    """
    return len(text.split())"#;

/// Build the initial generation instruction from a tool spec.
pub fn generation_prompt(spec: &ToolSpec) -> String {
    format!(
        "Write a complete Python function called `{name}`.\n\
         \n\
         Purpose:\n\
         {purpose}\n\
         \n\
         Inputs:\n\
         {inputs}\n\
         \n\
         Expected Output:\n\
         {output}\n\
         \n\
         Requirements:\n\
         - Use full Python syntax with type hints.\n\
         - Include a detailed docstring describing the function's purpose, parameters, and return value.\n\
         - Return actual, working Python code (not a description or summary).\n\
         - Output only the code. Do not include any explanation or markdown code fences.\n\
         \n\
         Follow the shape of this example:\n\
         {example}\n",
        name = spec.name,
        purpose = spec.purpose,
        inputs = spec.inputs,
        output = spec.output,
        example = EXAMPLE_TOOL,
    )
}

/// Build the revision instruction from previously generated code and
/// reviewer feedback.
pub fn revision_prompt(original_code: &str, feedback: &str) -> String {
    format!(
        "You previously created a Python function based on a user request.\n\
         \n\
         Here is the original function code:\n\
         ```python\n\
         {original_code}\n\
         ```\n\
         \n\
         Here is the feedback from a code reviewer:\n\
         {feedback}\n\
         \n\
         Please revise and improve the function accordingly. Keep the same structure, \
         inputs, and purpose. Do not remove any existing logic unless it's incorrect. \
         Only make improvements based on the review.\n\
         Return only the improved Python function code. Do not include any explanation, \
         description, or markdown syntax.\n"
    )
}

/// Build the review instruction embedding the code under review.
pub fn review_prompt(code: &str) -> String {
    format!(
        "You are a professional Python code reviewer.\n\
         \n\
         Please review the following tool function and give detailed feedback on:\n\
         - Design and architecture\n\
         - Input validation and error handling\n\
         - Code clarity and maintainability\n\
         - Security or ethical considerations (if applicable)\n\
         - Opportunities for improvement\n\
         - Suggestions for testing\n\
         \n\
         Only provide the review, not the code.\n\
         \n\
         Here is the tool code:\n\
         ```python\n\
         {code}\n\
         ```\n"
    )
}
