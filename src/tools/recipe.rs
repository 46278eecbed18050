//! LLM-backed recipe generation.
//!
//! The provider response is parsed line-wise: first line is the title, blank
//! lines are skipped, and a line starting with "instructions" (any case)
//! switches from the ingredients section to the instructions section without
//! itself being kept.

use crate::error::ApiError;
use crate::provider::{ChatMessage, CompletionOptions, ModelProviderClient};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Single-element list holding the recipe title.
    pub title: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

/// Build the recipe instruction sent to the provider.
pub fn recipe_prompt(ingredients: &[String], cuisine: Option<&str>) -> String {
    let mut prompt = format!(
        "Create a recipe using the following ingredients: {}.",
        ingredients.join(", ")
    );
    if let Some(cuisine) = cuisine {
        prompt.push_str(&format!(
            " The recipe should be in the style of {} cuisine.",
            cuisine
        ));
    }
    prompt
}

/// Split a raw recipe response into title, ingredients, and instructions.
pub fn parse_recipe(text: &str) -> Recipe {
    let trimmed = text.trim();
    let mut lines = trimmed.lines();
    let title = lines.next().unwrap_or_default().to_string();

    let mut ingredients = Vec::new();
    let mut instructions = Vec::new();
    let mut in_ingredients = true;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if in_ingredients {
            if line.to_lowercase().starts_with("instructions") {
                in_ingredients = false;
                continue;
            }
            ingredients.push(line.to_string());
        } else {
            instructions.push(line.to_string());
        }
    }

    Recipe {
        title: vec![title],
        ingredients,
        instructions,
    }
}

pub struct RecipeGenerator<'a> {
    client: &'a dyn ModelProviderClient,
    options: CompletionOptions,
}

impl<'a> RecipeGenerator<'a> {
    pub fn new(client: &'a dyn ModelProviderClient) -> Self {
        Self {
            client,
            options: CompletionOptions {
                temperature: Some(0.7),
                max_tokens: Some(500),
                ..Default::default()
            },
        }
    }

    pub async fn generate(
        &self,
        ingredients: &[String],
        cuisine: Option<&str>,
    ) -> Result<Recipe, ApiError> {
        let prompt = recipe_prompt(ingredients, cuisine);
        let messages = [ChatMessage::user(prompt)];
        let response = self.client.complete(&messages, &self.options).await?;
        Ok(parse_recipe(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_ingredients() {
        let prompt = recipe_prompt(&["egg".to_string(), "flour".to_string()], None);
        assert_eq!(
            prompt,
            "Create a recipe using the following ingredients: egg, flour."
        );
    }

    #[test]
    fn prompt_appends_cuisine_style() {
        let prompt = recipe_prompt(&["rice".to_string()], Some("Japanese"));
        assert!(prompt.ends_with("The recipe should be in the style of Japanese cuisine."));
    }

    #[test]
    fn parse_splits_sections_at_instructions_marker() {
        let recipe = parse_recipe("Pancakes\nEggs\nFlour\nInstructions\nMix\nCook");
        assert_eq!(recipe.title, vec!["Pancakes".to_string()]);
        assert_eq!(
            recipe.ingredients,
            vec!["Eggs".to_string(), "Flour".to_string()]
        );
        assert_eq!(recipe.instructions, vec!["Mix".to_string(), "Cook".to_string()]);
    }

    #[test]
    fn parse_skips_blank_lines_and_is_case_insensitive() {
        let recipe = parse_recipe("Stew\n\nBeef\n\nINSTRUCTIONS:\nSimmer\n");
        assert_eq!(recipe.ingredients, vec!["Beef".to_string()]);
        assert_eq!(recipe.instructions, vec!["Simmer".to_string()]);
    }

    #[test]
    fn parse_without_marker_keeps_everything_as_ingredients() {
        let recipe = parse_recipe("Toast\nBread\nButter");
        assert_eq!(
            recipe.ingredients,
            vec!["Bread".to_string(), "Butter".to_string()]
        );
        assert!(recipe.instructions.is_empty());
    }
}
