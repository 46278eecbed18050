//! Greeting tool.

/// A tool that creates greetings.
pub struct Greeter {
    pub name: &'static str,
    pub description: &'static str,
}

impl Greeter {
    pub fn new() -> Self {
        Self {
            name: "Greeter",
            description: "Creates greetings",
        }
    }

    /// Greet `name` for the given time of day. Unrecognized times fall back
    /// to a generic greeting.
    pub fn run(&self, name: &str, time_of_day: &str) -> String {
        match time_of_day.to_lowercase().as_str() {
            "morning" => format!("Good morning, {}!", name),
            "afternoon" => format!("Good afternoon, {}!", name),
            "evening" => format!("Good evening, {}!", name),
            _ => format!("Hello, {}!", name),
        }
    }
}

impl Default for Greeter {
    fn default() -> Self {
        Self::new()
    }
}
