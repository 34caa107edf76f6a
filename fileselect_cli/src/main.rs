use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;

use fileselect_cli::config::{AppConfig, ConfigManager};
use fileselect_cli::output::{OutputFormat, render_selection, render_summary, render_warnings};
use fileselect_core::{Selector, find_files};

/// Exit code of `select --strict` when a sort rule reported errors
const EXIT_RULE_ERRORS: u8 = 3;

#[derive(Parser)]
#[command(name = "fileselect")]
#[command(author, version, about = "Select the log file(s) to read from glob patterns and ordering rules", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Configuration file (defaults to the XDG configuration path)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find matching files and apply the ordering rules
    Select {
        /// Include patterns (glob patterns, can be specified multiple times, replace configured ones)
        #[arg(short = 'i', long = "include", value_name = "PATTERN")]
        include_patterns: Vec<String>,

        /// Exclude patterns (glob patterns, can be specified multiple times, replace configured ones)
        #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
        exclude_patterns: Vec<String>,

        /// Output format (defaults to output.default_format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Reject invalid criteria and fail when a sort rule reports errors
        #[arg(long)]
        strict: bool,
    },

    /// Validate the configured matching criteria
    Check,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("fileselect_core", log::LevelFilter::Debug)
            .filter_module("fileselect_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .init();
    }

    let manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };

    match cli.command {
        Commands::Select {
            include_patterns,
            exclude_patterns,
            format,
            strict,
        } => {
            let mut config = manager.load()?;
            config.apply_cli_overrides(include_patterns, exclude_patterns);
            return select_command(config, format, strict);
        }
        Commands::Check => {
            let config = manager.load()?;
            check_command(config)?;
        }
        Commands::Config { command } => match command {
            ConfigCommand::Show => print!("{}", manager.render()?),
            ConfigCommand::Path => println!("{}", manager.get_config_path().display()),
        },
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn select_command(config: AppConfig, format: Option<OutputFormat>, strict: bool) -> Result<ExitCode> {
    if !config.output.color_enabled {
        colored::control::set_override(false);
    }
    let format =
        format.unwrap_or_else(|| OutputFormat::from_config(&config.output.default_format));

    log::debug!("Include patterns: {:?}", config.matching.include);
    log::debug!("Exclude patterns: {:?}", config.matching.exclude);
    log::debug!("Strict: {strict}");

    if config.matching.include.is_empty() {
        anyhow::bail!(
            "No include patterns configured; pass --include or set matching.include in the configuration"
        );
    }

    let selection = if strict {
        Selector::new(config.matching)
            .context("Invalid matching criteria")?
            .select()
    } else {
        find_files(&config.matching)
    };

    print!("{}", render_selection(&selection, format)?);
    if format == OutputFormat::Text {
        eprint!("{}", render_warnings(&selection.errors));
    }

    if strict && !selection.is_clean() {
        return Ok(ExitCode::from(EXIT_RULE_ERRORS));
    }
    Ok(ExitCode::SUCCESS)
}

fn check_command(config: AppConfig) -> Result<()> {
    if !config.output.color_enabled {
        colored::control::set_override(false);
    }
    let selector = Selector::new(config.matching).context("Invalid matching criteria")?;

    println!("{}", "✓ Matching criteria are valid".green());
    print!("{}", render_summary(selector.criteria()));
    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
