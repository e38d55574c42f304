//! CLI command definitions, routing, and tracing setup.

use std::path::Path;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use leadflow_board::{LeadStore, registry};
use leadflow_core::TransitionService;
use leadflow_data::{load_leads, sample_leads, save_leads};
use leadflow_shared::{AppConfig, StageId, format_usd, init_config, load_config, sync_endpoint};
use leadflow_sync::StatusSync;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Leadflow — manage your sales pipeline from the terminal.
#[derive(Parser)]
#[command(
    name = "leadflow",
    version,
    about = "Inspect the pipeline board and move leads between stages.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Show the board grouped by stage.
    List {
        /// Show a single stage (e.g. "qualified").
        #[arg(short, long)]
        stage: Option<String>,

        /// Emit machine-readable JSON instead of the table.
        #[arg(long)]
        json: bool,
    },

    /// List the pipeline stages in board order.
    Stages,

    /// Move a lead to another stage.
    Move {
        /// Lead id (e.g. "L3").
        id: String,

        /// Target stage (e.g. "proposal-sent").
        stage: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "leadflow=info",
        1 => "leadflow=debug",
        _ => "leadflow=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::List { stage, json } => cmd_list(stage.as_deref(), json).await,
        Command::Stages => cmd_stages().await,
        Command::Move { id, stage } => cmd_move(&id, &stage).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Data helpers
// ---------------------------------------------------------------------------

/// Load the lead collection: the configured lead file, or the demo dataset.
fn load_store(config: &AppConfig) -> Result<LeadStore> {
    match config.data.lead_file.as_deref() {
        Some(path) => {
            let leads = load_leads(Path::new(path))?;
            Ok(LeadStore::from_leads(leads))
        }
        None => Ok(LeadStore::from_leads(sample_leads())),
    }
}

/// Build the sync client when an endpoint is configured.
fn build_sync(config: &AppConfig) -> Result<Option<StatusSync>> {
    match sync_endpoint(config)? {
        Some(url) => Ok(Some(StatusSync::new(url)?)),
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_list(stage: Option<&str>, json: bool) -> Result<()> {
    let config = load_config()?;
    let store = load_store(&config)?;

    let only: Option<StageId> = match stage {
        Some(s) => Some(s.parse()?),
        None => None,
    };

    if json {
        let mut grouped = serde_json::Map::new();
        for column in registry::columns() {
            if only.is_some_and(|s| s != column.stage) {
                continue;
            }
            let leads = store.by_stage(column.stage);
            grouped.insert(
                column.stage.to_string(),
                serde_json::to_value(leads.iter().map(|l| l.as_ref()).collect::<Vec<_>>())?,
            );
        }
        println!("{}", serde_json::to_string_pretty(&grouped)?);
        return Ok(());
    }

    let open_value: f64 = store.iter().filter_map(|l| l.value).sum();
    println!();
    println!(
        "  Pipeline  ({} leads, {} total)",
        store.len(),
        format_usd(open_value)
    );

    for column in registry::columns() {
        if only.is_some_and(|s| s != column.stage) {
            continue;
        }
        let leads = store.by_stage(column.stage);
        let stage_value: f64 = leads.iter().filter_map(|l| l.value).sum();

        println!();
        println!(
            "  {} ({})  {}",
            column.title,
            leads.len(),
            format_usd(stage_value)
        );

        if leads.is_empty() {
            println!("    (empty)");
            continue;
        }
        for lead in leads {
            println!(
                "    {:<5} {:<22} {:<20} {:>10}",
                lead.id,
                lead.name,
                lead.company.as_deref().unwrap_or("-"),
                lead.value.map(format_usd).unwrap_or_else(|| "-".into()),
            );
        }
    }
    println!();

    Ok(())
}

async fn cmd_stages() -> Result<()> {
    println!();
    for (i, column) in registry::columns().iter().enumerate() {
        println!(
            "  {}. {:<14} {:<15} {}",
            i + 1,
            column.title,
            format!("({})", column.stage),
            column.description
        );
    }
    println!();
    Ok(())
}

async fn cmd_move(id: &str, stage: &str) -> Result<()> {
    let config = load_config()?;
    let store = load_store(&config)?;

    let target: StageId = stage.parse()?;
    let lead_id = leadflow_shared::LeadId::from(id);

    // The service treats an unknown id as a silent no-op; for a one-shot
    // command that would read as success, so check up front.
    let Some(lead) = store.get(&lead_id) else {
        return Err(eyre!("no lead with id '{id}'"));
    };
    let from = lead.status;
    if from == target {
        println!("{id} is already in '{target}', nothing to do");
        return Ok(());
    }

    let sync = build_sync(&config)?;
    let synced = sync.is_some();
    let service = TransitionService::new(sync);

    info!(%lead_id, %from, %target, "moving lead");
    let outcome = service.attempt(&store, &lead_id, Some(target));

    if let Some(path) = config.data.lead_file.as_deref() {
        save_leads(
            Path::new(path),
            outcome.store.iter().map(|l| l.as_ref()),
        )?;
    }

    if let Some(handle) = outcome.sync {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        spinner.set_message("Syncing status to the lead service...");
        handle.await?;
        spinner.finish_and_clear();
    }

    println!();
    println!("  Lead moved!");
    println!("  ID:    {id}");
    println!("  From:  {from}");
    println!("  To:    {target}");
    if synced {
        println!("  Sync:  dispatched (failures are logged, local state stands)");
    } else {
        println!("  Sync:  skipped (no endpoint configured)");
    }
    println!();

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
