//! Toolsmith CLI: argument parsing, command dispatch, and output formatting.

use crate::config::{ConfigLoader, ToolsmithConfig};
use crate::error::ApiError;
use crate::forge::{CompletionPlanner, ForgeWorkflow, ToolSpec, ToolWriter};
use crate::provider::commands::{ProviderCommandService, ProviderListResult, ProviderShowResult};
use crate::provider::diagnostics::ProviderDiagnosticsService;
use crate::provider::{CompletionOptions, ProviderRegistry, ValidationResult};
use crate::tools::{extract_emails, Greeter, RecipeGenerator};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// Toolsmith CLI - LLM-driven tool generation
#[derive(Parser)]
#[command(name = "toolsmith")]
#[command(about = "Generate, review, and improve tool functions with an LLM")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory where generated tool files are written
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a tool, review it, and optionally improve it
    Generate {
        /// Tool (function) name
        #[arg(long)]
        name: Option<String>,

        /// What the tool should do
        #[arg(long)]
        purpose: Option<String>,

        /// Input description (e.g., 'text: str, count: int')
        #[arg(long)]
        inputs: Option<String>,

        /// Expected output description (e.g., 'List[str]')
        #[arg(long)]
        output: Option<String>,

        /// Provider to use (defaults to generation.default_provider)
        #[arg(long)]
        provider: Option<String>,

        /// Skip the review step entirely
        #[arg(long)]
        no_review: bool,

        /// Improve using review feedback without asking
        #[arg(long, conflicts_with = "no_improve")]
        improve: bool,

        /// Keep the original version without asking
        #[arg(long)]
        no_improve: bool,

        /// Use interactive mode (default when no fields given)
        #[arg(long)]
        interactive: bool,

        /// Use non-interactive mode (use flags)
        #[arg(long)]
        non_interactive: bool,
    },
    /// Review an existing tool file
    Review {
        /// Path to the tool source file
        file: PathBuf,

        /// Provider to use (defaults to generation.default_provider)
        #[arg(long)]
        provider: Option<String>,
    },
    /// Generate a recipe from ingredients
    Recipe {
        /// Ingredient (repeatable)
        #[arg(long = "ingredient", required = true)]
        ingredients: Vec<String>,

        /// Cuisine style
        #[arg(long)]
        cuisine: Option<String>,

        /// Provider to use (defaults to generation.default_provider)
        #[arg(long)]
        provider: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Extract email addresses from a file
    Emails {
        /// Path to the text file
        file: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print a greeting
    Greet {
        /// Name to greet
        name: String,

        /// Time of day (morning, afternoon, evening)
        time_of_day: String,
    },
    /// Manage providers
    Provider {
        #[command(subcommand)]
        command: ProviderCommands,
    },
}

#[derive(Subcommand)]
pub enum ProviderCommands {
    /// List all providers
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Filter by provider type (openai, ollama, local)
        #[arg(long)]
        type_filter: Option<String>,
    },
    /// Show provider details
    Show {
        /// Provider name
        provider_name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Show API key status
        #[arg(long)]
        include_credentials: bool,
    },
    /// Validate provider configuration
    Validate {
        /// Provider name
        provider_name: String,
        /// Show detailed validation results
        #[arg(long)]
        verbose: bool,
    },
    /// Test provider connectivity
    Test {
        /// Provider name
        provider_name: String,
        /// Connection timeout in seconds (default: 10)
        #[arg(long, default_value = "10")]
        timeout: u64,
    },
    /// Create new provider
    Create {
        /// Provider name
        provider_name: String,
        /// Provider type (openai, ollama, local)
        #[arg(long)]
        type_: Option<String>,
        /// Model name
        #[arg(long)]
        model: Option<String>,
        /// Endpoint URL
        #[arg(long)]
        endpoint: Option<String>,
        /// API key
        #[arg(long)]
        api_key: Option<String>,
        /// Use interactive mode (default)
        #[arg(long)]
        interactive: bool,
        /// Use non-interactive mode (use flags)
        #[arg(long)]
        non_interactive: bool,
    },
    /// Remove provider
    Remove {
        /// Provider name
        provider_name: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// CLI context holding loaded configuration and the provider registry.
pub struct CliContext {
    config: ToolsmithConfig,
    registry: ProviderRegistry,
    out_dir: PathBuf,
}

impl CliContext {
    /// Create a new CLI context.
    pub fn new(config_path: Option<PathBuf>, out_dir: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(cfg_path) = &config_path {
            ConfigLoader::load_from_file(cfg_path)
                .map_err(|e| ApiError::ConfigError(format!("Failed to load config: {}", e)))?
        } else {
            ConfigLoader::load()
                .map_err(|e| ApiError::ConfigError(format!("Failed to load config: {}", e)))?
        };

        // Providers from config.toml first, then XDG (XDG overrides)
        let mut registry = ProviderRegistry::new();
        registry.load_from_config(&config)?;
        registry.load_from_xdg()?;

        let out_dir = out_dir.unwrap_or_else(|| config.generation.output_dir.clone());

        Ok(Self {
            config,
            registry,
            out_dir,
        })
    }

    /// Logging configuration from the loaded config file.
    pub fn logging_config(&self) -> &crate::logging::LoggingConfig {
        &self.config.logging
    }

    /// Execute a CLI command.
    pub fn execute(&mut self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Generate {
                name,
                purpose,
                inputs,
                output,
                provider,
                no_review,
                improve,
                no_improve,
                interactive,
                non_interactive,
            } => {
                let spec = self.resolve_tool_spec(
                    name.as_deref(),
                    purpose.as_deref(),
                    inputs.as_deref(),
                    output.as_deref(),
                    *interactive,
                    *non_interactive,
                )?;
                let improve_decision = if *improve {
                    Some(true)
                } else if *no_improve {
                    Some(false)
                } else {
                    None
                };
                self.handle_generate(&spec, provider.as_deref(), *no_review, improve_decision)
            }
            Commands::Review { file, provider } => self.handle_review(file, provider.as_deref()),
            Commands::Recipe {
                ingredients,
                cuisine,
                provider,
                format,
            } => self.handle_recipe(ingredients, cuisine.as_deref(), provider.as_deref(), format),
            Commands::Emails { file, format } => handle_emails(file, format),
            Commands::Greet { name, time_of_day } => {
                Ok(Greeter::new().run(name, time_of_day))
            }
            Commands::Provider { command } => self.handle_provider_command(command),
        }
    }

    /// Resolve the tool spec from flags, prompting for missing fields in
    /// interactive mode. Empty answers are allowed; nothing is validated.
    fn resolve_tool_spec(
        &self,
        name: Option<&str>,
        purpose: Option<&str>,
        inputs: Option<&str>,
        output: Option<&str>,
        interactive: bool,
        non_interactive: bool,
    ) -> Result<ToolSpec, ApiError> {
        let is_interactive = interactive || (!non_interactive && name.is_none());

        if !is_interactive {
            let name = name.ok_or_else(|| {
                ApiError::ConfigError(
                    "Tool name is required in non-interactive mode. Use --name <name>".to_string(),
                )
            })?;
            return Ok(ToolSpec::new(
                name,
                purpose.unwrap_or_default(),
                inputs.unwrap_or_default(),
                output.unwrap_or_default(),
            ));
        }

        use dialoguer::Input;

        let ask = |prompt: &str, preset: Option<&str>| -> Result<String, ApiError> {
            if let Some(value) = preset {
                return Ok(value.to_string());
            }
            Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))
        };

        Ok(ToolSpec::new(
            ask("Name of your tool", name)?,
            ask("What should it do?", purpose)?,
            ask("What are the inputs? (e.g., 'text: str, count: int')", inputs)?,
            ask("What is the expected output? (e.g., 'List[str]')", output)?,
        ))
    }

    fn resolve_provider_name(&self, provider: Option<&str>) -> Result<String, ApiError> {
        provider
            .map(|p| p.to_string())
            .or_else(|| self.config.generation.default_provider.clone())
            .ok_or_else(|| {
                ApiError::ProviderNotConfigured(
                    "No provider specified. Use --provider <name> or set generation.default_provider"
                        .to_string(),
                )
            })
    }

    fn provider_options(&self, provider_name: &str) -> CompletionOptions {
        self.registry
            .get(provider_name)
            .map(|p| p.default_options.clone())
            .unwrap_or_default()
    }

    /// Handle the generate command: generate, review, confirm, improve.
    fn handle_generate(
        &self,
        spec: &ToolSpec,
        provider: Option<&str>,
        no_review: bool,
        improve_decision: Option<bool>,
    ) -> Result<String, ApiError> {
        let provider_name = self.resolve_provider_name(provider)?;
        let options = self.provider_options(&provider_name);
        let client = self.registry.create_client(&provider_name)?;
        let planner = CompletionPlanner::new(client.as_ref()).with_options(options);
        let writer = ToolWriter::new(&self.out_dir);
        let workflow = ForgeWorkflow::new(&planner, client.as_ref(), writer);

        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ApiError::ProviderError(format!("Failed to create runtime: {}", e)))?;

        let mut out = String::new();

        let generated = rt.block_on(workflow.generate(spec))?;
        out.push_str(&format!("{}\n\n", format_section_heading("Generated code")));
        out.push_str(&generated.code);
        out.push_str(&format!("\n\nSaved to {}\n", generated.path.display()));

        if no_review {
            return Ok(out);
        }

        let review = rt.block_on(workflow.review(&generated.code))?;
        out.push_str(&format!("\n{}\n\n", format_section_heading("Review")));
        out.push_str(&review);
        out.push('\n');

        let wants_improvement = match improve_decision {
            Some(decision) => decision,
            None => {
                use dialoguer::Confirm;
                Confirm::new()
                    .with_prompt("Would you like to improve the tool using this feedback?")
                    .interact()
                    .map_err(|e| {
                        ApiError::ConfigError(format!("Failed to get user input: {}", e))
                    })?
            }
        };

        if !wants_improvement {
            out.push_str("\nKeeping original version only.\n");
            return Ok(out);
        }

        let improved = rt.block_on(workflow.improve(spec, &generated.code, &review))?;
        out.push_str(&format!("\n{}\n\n", format_section_heading("Improved code")));
        out.push_str(&improved.code);
        out.push_str(&format!("\n\nImproved tool saved to {}\n", improved.path.display()));

        Ok(out)
    }

    /// Handle the review command for an existing file.
    fn handle_review(&self, file: &PathBuf, provider: Option<&str>) -> Result<String, ApiError> {
        let code = std::fs::read_to_string(file).map_err(|e| {
            ApiError::InvalidInput(format!("Failed to read {}: {}", file.display(), e))
        })?;

        let provider_name = self.resolve_provider_name(provider)?;
        let client = self.registry.create_client(&provider_name)?;
        let reviewer = crate::forge::Reviewer::new(client.as_ref());

        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ApiError::ProviderError(format!("Failed to create runtime: {}", e)))?;
        let review = rt.block_on(reviewer.review(&code))?;

        Ok(format!(
            "{}\n\n{}\n",
            format_section_heading("Review"),
            review
        ))
    }

    /// Handle the recipe command.
    fn handle_recipe(
        &self,
        ingredients: &[String],
        cuisine: Option<&str>,
        provider: Option<&str>,
        format: &str,
    ) -> Result<String, ApiError> {
        let provider_name = self.resolve_provider_name(provider)?;
        let client = self.registry.create_client(&provider_name)?;
        let generator = RecipeGenerator::new(client.as_ref());

        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ApiError::ProviderError(format!("Failed to create runtime: {}", e)))?;
        let recipe = rt.block_on(generator.generate(ingredients, cuisine))?;

        if format == "json" {
            return serde_json::to_string_pretty(&recipe)
                .map_err(|e| ApiError::InvalidInput(e.to_string()));
        }
        Ok(format_recipe_text(&recipe))
    }

    /// Handle provider management commands.
    fn handle_provider_command(&mut self, command: &ProviderCommands) -> Result<String, ApiError> {
        match command {
            ProviderCommands::List {
                format,
                type_filter,
            } => {
                let result =
                    ProviderCommandService::run_list(&self.registry, type_filter.as_deref())?;
                match format.as_str() {
                    "json" => serde_json::to_string_pretty(&result)
                        .map_err(|e| ApiError::InvalidInput(e.to_string())),
                    _ => Ok(format_provider_list_text(&result)),
                }
            }
            ProviderCommands::Show {
                provider_name,
                format,
                include_credentials,
            } => {
                let result = ProviderCommandService::run_show(
                    &self.registry,
                    provider_name,
                    *include_credentials,
                )?;
                match format.as_str() {
                    "json" => serde_json::to_string_pretty(&result)
                        .map_err(|e| ApiError::InvalidInput(e.to_string())),
                    _ => Ok(format_provider_show_text(&result)),
                }
            }
            ProviderCommands::Validate {
                provider_name,
                verbose,
            } => {
                let result =
                    ProviderDiagnosticsService::validate_provider(&self.registry, provider_name)?;
                Ok(format_validation_result(&result, *verbose))
            }
            ProviderCommands::Test {
                provider_name,
                timeout,
            } => {
                let started = std::time::Instant::now();
                let reply = ProviderDiagnosticsService::test_connectivity(
                    &self.registry,
                    provider_name,
                    *timeout,
                )?;
                Ok(format!(
                    "Provider {} responded in {}ms: {}",
                    provider_name,
                    started.elapsed().as_millis(),
                    reply.trim()
                ))
            }
            ProviderCommands::Create {
                provider_name,
                type_,
                model,
                endpoint,
                api_key,
                interactive,
                non_interactive,
            } => self.handle_provider_create(
                provider_name,
                type_.as_deref(),
                model.as_deref(),
                endpoint.as_deref(),
                api_key.as_deref(),
                *interactive,
                *non_interactive,
            ),
            ProviderCommands::Remove {
                provider_name,
                force,
            } => self.handle_provider_remove(provider_name, *force),
        }
    }

    /// Handle provider create command.
    fn handle_provider_create(
        &mut self,
        provider_name: &str,
        type_: Option<&str>,
        model: Option<&str>,
        endpoint: Option<&str>,
        api_key: Option<&str>,
        interactive: bool,
        non_interactive: bool,
    ) -> Result<String, ApiError> {
        let is_interactive = interactive || (!non_interactive && type_.is_none());

        let (provider_type, final_model, final_endpoint, final_api_key) = if is_interactive {
            create_provider_interactive()?
        } else {
            let type_str = type_.ok_or_else(|| {
                ApiError::ConfigError(
                    "Provider type is required in non-interactive mode. Use --type <type>"
                        .to_string(),
                )
            })?;
            let parsed_type = ProviderCommandService::parse_provider_type(type_str)?;
            let model_name = model.ok_or_else(|| {
                ApiError::ConfigError(
                    "Model is required in non-interactive mode. Use --model <model>".to_string(),
                )
            })?;
            (
                parsed_type,
                model_name.to_string(),
                endpoint.map(|s| s.to_string()),
                api_key.map(|s| s.to_string()),
            )
        };

        let result = ProviderCommandService::run_create(
            &mut self.registry,
            provider_name,
            provider_type,
            final_model,
            final_endpoint,
            final_api_key,
            CompletionOptions::default(),
        )?;
        Ok(format!(
            "Provider created: {}\nConfiguration file: {}",
            result.provider_name,
            result.config_path.display()
        ))
    }

    /// Handle provider remove command.
    fn handle_provider_remove(
        &mut self,
        provider_name: &str,
        force: bool,
    ) -> Result<String, ApiError> {
        if !force {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt(format!("Remove provider '{}'?", provider_name))
                .interact()
                .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;

            if !confirmed {
                return Ok("Removal cancelled".to_string());
            }
        }

        let result = ProviderCommandService::run_remove(&mut self.registry, provider_name)?;
        Ok(format!(
            "Removed provider: {}\nConfiguration file deleted: {}",
            result.provider_name,
            result.config_path.display()
        ))
    }
}

/// Interactive provider creation.
fn create_provider_interactive(
) -> Result<(crate::provider::ProviderType, String, Option<String>, Option<String>), ApiError> {
    use dialoguer::{Input, Select};

    let type_selection = Select::new()
        .with_prompt("Provider type")
        .items(&["openai", "ollama", "local"])
        .default(0)
        .interact()
        .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;

    let provider_type = match type_selection {
        0 => crate::provider::ProviderType::OpenAI,
        1 => crate::provider::ProviderType::Ollama,
        2 => crate::provider::ProviderType::LocalCustom,
        _ => unreachable!(),
    };

    let model: String = Input::new()
        .with_prompt("Model name")
        .interact_text()
        .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;

    let default_endpoint = ProviderCommandService::default_endpoint(provider_type);
    let endpoint = if provider_type == crate::provider::ProviderType::LocalCustom {
        Some(
            Input::new()
                .with_prompt("Endpoint URL (required)")
                .interact_text()
                .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?,
        )
    } else if let Some(default) = default_endpoint {
        let input: String = Input::new()
            .with_prompt(format!("Endpoint URL (optional, default: {})", default))
            .default(default)
            .interact_text()
            .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;
        Some(input)
    } else {
        None
    };

    let env_var = ProviderCommandService::required_api_key_env_var(provider_type);
    let api_key = if let Some(env_var) = env_var {
        let input: String = Input::new()
            .with_prompt(format!(
                "API key (optional, will use {} env var if not set)",
                env_var
            ))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;
        if input.is_empty() {
            None
        } else {
            Some(input)
        }
    } else {
        None
    };

    Ok((provider_type, model, endpoint, api_key))
}

/// Handle the emails command (no provider involved).
fn handle_emails(file: &PathBuf, format: &str) -> Result<String, ApiError> {
    let text = std::fs::read_to_string(file).map_err(|e| {
        ApiError::InvalidInput(format!("Failed to read {}: {}", file.display(), e))
    })?;
    let emails = extract_emails(&text);
    if format == "json" {
        return serde_json::to_string_pretty(&emails)
            .map_err(|e| ApiError::InvalidInput(e.to_string()));
    }
    if emails.is_empty() {
        return Ok("No email addresses found.".to_string());
    }
    Ok(emails.join("\n"))
}

fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn format_recipe_text(recipe: &crate::tools::Recipe) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        recipe.title.first().map(String::as_str).unwrap_or("")
    ));
    out.push_str(&format!("\n{}\n", format_section_heading("Ingredients")));
    for ingredient in &recipe.ingredients {
        out.push_str(&format!("  - {}\n", ingredient));
    }
    out.push_str(&format!("\n{}\n", format_section_heading("Instructions")));
    for (i, step) in recipe.instructions.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, step));
    }
    out
}

fn format_provider_list_text(result: &ProviderListResult) -> String {
    if result.providers.is_empty() {
        return "No providers configured.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Type", "Model"]);
    for provider in &result.providers {
        table.add_row(vec![
            provider.provider_name.clone(),
            provider.provider_type.clone(),
            provider.model.clone(),
        ]);
    }
    format!("{}\n{} provider(s)", table, result.total)
}

fn format_provider_show_text(result: &ProviderShowResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Provider: {}", result.provider_name))
    ));
    out.push_str(&format!("  Type: {}\n", result.provider_type));
    out.push_str(&format!("  Model: {}\n", result.model));
    out.push_str(&format!(
        "  Endpoint: {}\n",
        result.endpoint.as_deref().unwrap_or("(default)")
    ));
    if let Some(status) = &result.api_key_status {
        out.push_str(&format!("  API key: {}\n", status));
    }
    out
}

fn format_validation_result(result: &ValidationResult, verbose: bool) -> String {
    let mut out = String::new();
    if result.is_valid() {
        out.push_str(&format!(
            "Provider '{}' is valid ({}/{} checks passed)\n",
            result.provider_name,
            result.passed_checks(),
            result.total_checks()
        ));
    } else {
        out.push_str(&format!(
            "Provider '{}' is invalid:\n",
            result.provider_name
        ));
        for error in &result.errors {
            out.push_str(&format!("  error: {}\n", error));
        }
    }
    for warning in &result.warnings {
        out.push_str(&format!("  warning: {}\n", warning));
    }
    if verbose {
        for (description, passed) in &result.checks {
            let marker = if *passed { "ok" } else { "failed" };
            out.push_str(&format!("  [{}] {}\n", marker, description));
        }
    }
    out
}
