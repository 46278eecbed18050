//! Small standalone tools that ship with the CLI.

pub mod email;
pub mod greeter;
pub mod recipe;

pub use email::extract_emails;
pub use greeter::Greeter;
pub use recipe::{Recipe, RecipeGenerator};
