//! tfshift CLI entry point.
//!
//! This binary provides the command-line interface for tfshift.

use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tfshift::cli::{Cli, Commands};
use tfshift::{Config, Rewriter, TfShiftError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    // Run the appropriate command
    match run(cli).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");

            // Print error with full chain
            eprintln!("Error: {e}");

            // Print error chain (cause chain)
            let mut source = e.source();
            if source.is_some() {
                eprintln!("\nCaused by:");
                let mut i = 0;
                while let Some(cause) = source {
                    eprintln!("  {i}: {cause}");
                    source = cause.source();
                    i += 1;
                }
            }

            let code = e
                .downcast_ref::<TfShiftError>()
                .map_or(1, TfShiftError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        // First try to use RUST_LOG from environment, otherwise use verbose flag
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| {
                // Default filter: show logs for tfshift only, suppress all other crates
                let base_level = match verbose {
                    0 => "warn",
                    1 => "info",
                    2 => "debug",
                    _ => "trace",
                };
                // Filter string: tfshift at specified level, everything else at warn
                EnvFilter::new(&format!("warn,tfshift={}", base_level))
            })
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // Load configuration
    tracing::debug!("Loading configuration");
    let config = load_config(&cli)?;
    tracing::debug!("Configuration loaded successfully");

    match cli.command {
        Commands::Rewrite(args) => {
            tracing::debug!("Executing rewrite command");
            let mut config = config;

            // CLI flags take precedence over config file and environment
            if let Some(tag) = &args.tag {
                config.rewrite.tag_version = tag.clone();
            }
            if args.to_github {
                config.rewrite.to_github = true;
            }
            if args.update_tag {
                config.rewrite.update_tag = true;
            }
            if args.continue_on_error {
                config.scan.continue_on_error = true;
            }
            config
                .scan
                .exclude_patterns
                .extend(args.exclude_patterns.iter().cloned());

            let rewriter = Rewriter::new(config.clone());
            let result = rewriter
                .rewrite_tree(&args.path, &args.project_root, args.dry_run)
                .await?;

            // Generate report
            let reporter = tfshift::reporter::Reporter::new(&config);
            let report = reporter.generate(&result, args.format)?;

            // Output report
            if let Some(output_path) = args.output {
                std::fs::write(&output_path, &report)?;
                tracing::info!(path = %output_path.display(), "Report written");
            } else {
                println!("{report}");
            }

            Ok(ExitCode::from(0))
        }

        Commands::Init => {
            // Generate example configuration file
            let example_config = Config::example_yaml();
            let config_path = std::path::Path::new("tfshift.yaml");

            if config_path.exists() {
                anyhow::bail!("Configuration file already exists: {}", config_path.display());
            }

            std::fs::write(config_path, example_config)?;
            println!("Created example configuration: tfshift.yaml");
            Ok(ExitCode::from(0))
        }

        Commands::Validate(args) => {
            // Validate configuration file
            let config_content = std::fs::read_to_string(&args.config)?;
            match Config::from_yaml(&config_content) {
                Ok(_) => {
                    println!("Configuration is valid: {}", args.config.display());
                    Ok(ExitCode::from(0))
                }
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    Ok(ExitCode::from(1))
                }
            }
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    // Check for explicit config file
    if let Some(ref config_path) = cli.config {
        tracing::debug!(path = %config_path.display(), "Loading configuration from explicit path");
        let content = std::fs::read_to_string(config_path)?;
        let mut config = Config::from_yaml(&content)?;
        config.apply_env_overrides();
        return Ok(config);
    }

    // Look for default config files
    let default_paths = ["tfshift.yaml", "tfshift.yml", ".tfshift.yaml"];
    tracing::debug!("Searching for default configuration files");
    for path in &default_paths {
        if std::path::Path::new(path).exists() {
            tracing::debug!(path = %path, "Found configuration file");
            let content = std::fs::read_to_string(path)?;
            let mut config = Config::from_yaml(&content)?;
            config.apply_env_overrides();
            return Ok(config);
        }
    }

    tracing::debug!("No configuration file found, using default configuration");
    // Use default configuration
    let mut config = Config::default();
    config.apply_env_overrides();
    Ok(config)
}
