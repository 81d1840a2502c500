//! Transfer directive command line interface
//!
//! Resolves and plans money movement commands against a ledger snapshot
//! stored as JSON, without talking to the ledger itself.
//!
//! # Usage
//!
//! ```bash
//! # Resolve a command body into a directive
//! transfer_cli resolve --snapshot ledger.json 10 from holiday to bills
//!
//! # Plan a full command, prefix included
//! transfer_cli plan --snapshot ledger.json move £10 holiday my account
//!
//! # Show what the resolver can match against
//! transfer_cli catalog --snapshot ledger.json --format json
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use transfer_directive::config::CONFIG_ENV_VAR;
use transfer_directive::transfer::LedgerOp;
use transfer_directive::{LedgerSnapshot, MoveCommand, ResolverConfig};

#[derive(Parser)]
#[command(name = "transfer_cli")]
#[command(version)]
#[command(about = "Resolve and plan free-text money movement commands")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: json or pretty (default)
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a command body (without the command word) into a directive
    Resolve {
        /// Ledger snapshot JSON file
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Resolver config YAML file
        #[arg(short, long, env = CONFIG_ENV_VAR)]
        config: Option<PathBuf>,

        /// Command body, e.g. `10 from holiday to bills`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        body: Vec<String>,
    },

    /// Resolve and plan a full `move`/`transfer` command
    Plan {
        /// Ledger snapshot JSON file
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Resolver config YAML file
        #[arg(short, long, env = CONFIG_ENV_VAR)]
        config: Option<PathBuf>,

        /// Full command, e.g. `move 10 from holiday to bills`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Print the pot and account catalogs built from a snapshot
    Catalog {
        /// Ledger snapshot JSON file
        #[arg(short, long)]
        snapshot: PathBuf,
    },
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Resolve {
            snapshot,
            config,
            body,
        } => cmd_resolve(&snapshot, config.as_deref(), &body.join(" "), cli.format),
        Commands::Plan {
            snapshot,
            config,
            command,
        } => cmd_plan(&snapshot, config.as_deref(), &command.join(" "), cli.format),
        Commands::Catalog { snapshot } => cmd_catalog(&snapshot, cli.format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{e:#}") }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn cmd_resolve(
    snapshot: &Path,
    config: Option<&Path>,
    body: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let snapshot = LedgerSnapshot::load(snapshot)?;
    let (pots, accounts) = snapshot.catalogs();

    let directive = config.resolver().resolve(body, &pots, &accounts)?;

    match format {
        OutputFormat::Json => print_json(&directive)?,
        OutputFormat::Pretty => {
            println!("{} Resolved transfer", "OK".green());
            println!("  amount:      {}", directive.amount);
            println!(
                "  source:      {} {}",
                directive.source.kind,
                directive.source.id.cyan()
            );
            println!(
                "  destination: {} {}",
                directive.destination.kind,
                directive.destination.id.cyan()
            );
        }
    }
    Ok(())
}

fn cmd_plan(
    snapshot: &Path,
    config: Option<&Path>,
    message: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let snapshot = LedgerSnapshot::load(snapshot)?;

    let prepared = MoveCommand::new(config).prepare(message, &snapshot)?;

    match format {
        OutputFormat::Json => print_json(&prepared)?,
        OutputFormat::Pretty => {
            println!(
                "{} {} step(s), {} minor units",
                "PLAN".green(),
                prepared.plan.steps.len(),
                prepared.plan.amount_minor
            );
            for (i, step) in prepared.plan.steps.iter().enumerate() {
                match step {
                    LedgerOp::Withdraw {
                        pot_id, account_id, ..
                    } => println!("  [{}] withdraw {} -> {}", i + 1, pot_id, account_id),
                    LedgerOp::Deposit {
                        account_id, pot_id, ..
                    } => println!("  [{}] deposit  {} -> {}", i + 1, account_id, pot_id),
                }
            }
            println!("{}", prepared.summary.bold());
        }
    }
    Ok(())
}

fn cmd_catalog(snapshot: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let snapshot = LedgerSnapshot::load(snapshot)?;
    let (pots, accounts) = snapshot.catalogs();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "pots": pots.iter().map(|(name, id)| serde_json::json!({"name": name, "id": id})).collect::<Vec<_>>(),
                "accounts": accounts.iter().map(|(terms, id)| serde_json::json!({"search_terms": terms, "id": id})).collect::<Vec<_>>(),
            });
            print_json(&output)?;
        }
        OutputFormat::Pretty => {
            println!("{} ({})", "Pots".bold(), pots.len());
            for (name, id) in pots.iter() {
                println!("  {:<24} {}", name, id.cyan());
            }
            println!("{} ({})", "Accounts".bold(), accounts.len());
            for (terms, id) in accounts.iter() {
                println!("  {:<24} {}", terms, id.cyan());
            }
        }
    }
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

fn load_config(path: Option<&Path>) -> anyhow::Result<ResolverConfig> {
    match path {
        Some(path) => ResolverConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(ResolverConfig::default()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{json}");
    Ok(())
}
