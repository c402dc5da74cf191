//! apidocs CLI - Documentation registration and export
//!
//! Registers the todo API documentation on the hosting platform,
//! manages documentation versions and fetches the merged OAS3 document.

mod config;
mod retry;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;
use std::fs;
use std::io::Write;
use std::sync::Arc;

use apidocs::{
    catalog, BuildContext, ExportConfig, ExportPipeline, FragmentStore, HttpPlatform,
    RegistrationMode, RegistrationPass, SnapshotManager,
};
use config::Config;
use retry::{export_with_retry, RetryPolicy};

#[derive(Parser)]
#[command(name = "apidocs")]
#[command(about = "apidocs CLI - API documentation registration and export", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Target API id (overrides config and APIDOCS_API_ID)
    #[arg(long, global = true)]
    api_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the todo API documentation and propose a version
    Register {
        /// Registration mode: append, upsert
        #[arg(short, long, default_value = "append")]
        mode: RegistrationMode,
        /// Print the fragments without contacting the platform
        #[arg(long)]
        dry_run: bool,
    },

    /// List documentation fragments registered on the platform
    List,

    /// Create a documentation version from the current fragments
    Snapshot {
        /// Version description
        #[arg(short, long)]
        description: String,
    },

    /// Make a version the one a stage serves
    Promote {
        /// Version id, as printed by `register` or `snapshot`
        version: String,
        /// Stage to promote to (defaults to the configured stage)
        #[arg(short, long)]
        stage: Option<String>,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Fetch the merged OAS3 document
    Export {
        /// Write to file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
        /// Stage to export (defaults to the configured stage)
        #[arg(short, long)]
        stage: Option<String>,
        /// Retries on transient platform failures
        #[arg(long, default_value = "0")]
        retries: u32,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// platform_url, token, api_id, stage, timeout_secs
        key: String,
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Register { mode, dry_run } => cmd_register(cli.api_id, mode, dry_run).await,
        Commands::List => cmd_list(cli.api_id).await,
        Commands::Snapshot { description } => cmd_snapshot(cli.api_id, description).await,
        Commands::Promote { version, stage, yes } => {
            cmd_promote(cli.api_id, version, stage, yes).await
        }
        Commands::Export {
            output,
            stage,
            retries,
        } => cmd_export(cli.api_id, output, stage, retries).await,
        Commands::Config { action } => cmd_config(action.unwrap_or(ConfigAction::Show)),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file, then environment, then command-line flags
fn load_config(api_id: Option<String>) -> Result<Config> {
    let mut config = Config::load()?.with_overrides(|key| std::env::var(key).ok())?;
    if let Some(api_id) = api_id {
        config.api_id = Some(api_id);
    }
    Ok(config)
}

fn platform(config: &Config) -> Result<Arc<HttpPlatform>> {
    Ok(Arc::new(HttpPlatform::new(config.platform_config()?)))
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_register(api_id: Option<String>, mode: RegistrationMode, dry_run: bool) -> Result<()> {
    let context = BuildContext::now();
    let fragments = catalog::todo_api(&context).context("Failed to build documentation")?;

    if dry_run {
        println!(
            "{}",
            serde_json::to_string_pretty(&fragments).context("Failed to serialize fragments")?
        );
        return Ok(());
    }

    let config = load_config(api_id)?;
    let api_id = config.require_api_id()?;
    let platform = platform(&config)?;

    let store = FragmentStore::new(platform.clone(), api_id).with_mode(mode);
    let snapshots = SnapshotManager::new(platform, api_id);
    let pass = RegistrationPass::new(&store, &snapshots, context);

    println!(
        "Registering {} fragments on {} ({})...",
        fragments.len(),
        api_id.cyan(),
        mode
    );

    let report = pass.run(fragments).await.context("Registration failed")?;

    for (location, handle) in &report.registered {
        println!("  {} {} {}", "✓".green(), location, handle.to_string().dimmed());
    }
    println!(
        "\n{} Proposed version {} ({})",
        "✓".green(),
        report.snapshot.version_id.cyan(),
        report.snapshot.description.dimmed()
    );
    println!("\n{}", "Promote it with:".dimmed());
    println!("  apidocs promote {}", report.snapshot.version_id);

    Ok(())
}

async fn cmd_list(api_id: Option<String>) -> Result<()> {
    let config = load_config(api_id)?;
    let api_id = config.require_api_id()?;
    let store = FragmentStore::new(platform(&config)?, api_id);

    let fragments = store.list().await.context("Failed to list documentation")?;

    if fragments.is_empty() {
        println!("No documentation registered for {}.", api_id);
        println!("\n{}", "Register it with:".dimmed());
        println!("  apidocs register");
        return Ok(());
    }

    println!("{} ({}):", "Documentation".bold(), fragments.len());
    for (location, fragment) in &fragments {
        let text = fragment
            .summary()
            .or_else(|| fragment.description())
            .unwrap_or("-");
        println!(
            "  {} {}",
            location.to_string().cyan(),
            truncate_string(text, 60).dimmed()
        );
    }

    Ok(())
}

async fn cmd_snapshot(api_id: Option<String>, description: String) -> Result<()> {
    let config = load_config(api_id)?;
    let api_id = config.require_api_id()?;
    let snapshots = SnapshotManager::new(platform(&config)?, api_id);

    let snapshot = snapshots
        .create_snapshot(description)
        .await
        .context("Failed to create documentation version")?;

    println!(
        "{} Proposed version {} for {}",
        "✓".green(),
        snapshot.version_id.cyan(),
        api_id
    );

    Ok(())
}

async fn cmd_promote(
    api_id: Option<String>,
    version: String,
    stage: Option<String>,
    yes: bool,
) -> Result<()> {
    let config = load_config(api_id)?;
    let api_id = config.require_api_id()?;
    let stage = stage.unwrap_or_else(|| config.stage.clone());

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Serve version {} on stage '{}' of {}?",
                version, stage, api_id
            ))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let snapshots = SnapshotManager::new(platform(&config)?, api_id);
    let promotion = snapshots
        .promote(&version, &stage)
        .await
        .context("Failed to promote documentation version")?;

    println!(
        "{} Version {} is {} on stage '{}'",
        "✓".green(),
        promotion.version_id.cyan(),
        promotion.state,
        promotion.stage
    );

    Ok(())
}

async fn cmd_export(
    api_id: Option<String>,
    output: Option<String>,
    stage: Option<String>,
    retries: u32,
) -> Result<()> {
    let config = load_config(api_id)?;
    let api_id = config.require_api_id()?;
    let stage = stage.unwrap_or_else(|| config.stage.clone());

    let pipeline = ExportPipeline::new(platform(&config)?, ExportConfig::new(api_id, stage));
    let result = export_with_retry(&pipeline, RetryPolicy::new(retries))
        .await
        .context("Export failed")?;

    if result.body.is_empty() {
        bail!("Platform returned an empty document");
    }

    match output {
        Some(path) => {
            fs::write(&path, &result.body)
                .with_context(|| format!("Failed to write document to {}", path))?;
            eprintln!(
                "{} Wrote {} bytes to {}",
                "✓".green(),
                result.body.len(),
                path.cyan()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&result.body)
                .and_then(|_| stdout.write_all(b"\n"))
                .context("Failed to write document")?;
        }
    }

    Ok(())
}

fn cmd_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(None)?;

            println!("{}", "Configuration:".bold());
            println!("  Config file:  {:?}", Config::config_path()?);
            println!(
                "  Platform URL: {}",
                config.platform_url.as_deref().unwrap_or("(not set)")
            );
            println!(
                "  Token:        {}",
                config
                    .token
                    .as_deref()
                    .map(mask_secret)
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!(
                "  API id:       {}",
                config.api_id.as_deref().unwrap_or("(not set)")
            );
            println!("  Stage:        {}", config.stage);
            println!("  Timeout:      {}s", config.timeout_secs);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, value)?;
            config.save()?;
            println!("{} {} saved to {:?}", "✓".green(), key, Config::config_path()?);
        }
    }

    Ok(())
}

// ============================================
// Helpers
// ============================================

fn truncate_string(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", chars.into_iter().collect::<String>())
    } else {
        s.to_string()
    }
}

fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{}****", visible)
}
