//! Fenced code block extraction.
//!
//! Contract: extract the first fenced block if present, else return the input
//! trimmed. An opening fence may carry a language tag on the same line, which
//! is dropped. A fence that never closes runs to the end of the input. Inputs
//! with multiple fenced blocks yield only the first; that ambiguity is part of
//! the contract, not repaired here.

const FENCE: &str = "```";

/// Extract the first fenced code block, or the trimmed input when no fence
/// is present. The result carries no backticks and no surrounding blank lines.
pub fn extract_code_block(text: &str) -> String {
    let Some(open) = text.find(FENCE) else {
        return text.trim().to_string();
    };

    // Skip the opening fence and its optional language tag (rest of the line).
    let after_open = &text[open + FENCE.len()..];
    let body_start = match after_open.find('\n') {
        Some(newline) => &after_open[newline + 1..],
        None => return text.trim().to_string(),
    };

    let body = match body_start.find(FENCE) {
        Some(close) => &body_start[..close],
        None => body_start,
    };

    body.trim().to_string()
}

/// Clean code output from chat-style tools: remove markdown fences, drop
/// common non-code prose lines, and trim surrounding blank lines.
pub fn strip_code_noise(code: &str) -> String {
    let defenced = code.replace("```python", "").replace(FENCE, "");
    let cleaned: Vec<&str> = defenced
        .lines()
        .filter(|line| {
            let lower = line.trim().to_lowercase();
            !lower.starts_with("here is")
                && !lower.starts_with("this function")
                && !lower.starts_with("example usage")
        })
        .collect();
    cleaned.join("\n").trim().to_string()
}
