use clap::Parser;
use toolsmith::logging::{init_logging, LoggingConfig};
use toolsmith::tooling::cli::{Cli, CliContext};

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut context = match CliContext::new(cli.config.clone(), cli.out_dir.clone()) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let logging = merge_logging_overrides(context.logging_config().clone(), &cli);
    if let Err(e) = init_logging(Some(&logging), cli.log_file.clone()) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// CLI flags override the config file; unset flags leave it untouched. The
/// log file is not merged here: it goes to init_logging directly so it also
/// beats the TOOLSMITH_LOG_FILE environment variable.
fn merge_logging_overrides(mut logging: LoggingConfig, cli: &Cli) -> LoggingConfig {
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        logging.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        logging.output = output.clone();
    }
    logging
}
