use clap::{Parser, Subcommand};
use engine::DreamId;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/budgety.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level for `budgety` and `engine` targets.
    pub level: String,
    /// JSON file holding the balance and the dreams.
    pub state_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            state_path: "config/budgety_state.json".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "budgety",
    about = "A piggy bank with dreams to save for",
    disable_version_flag = true
)]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override the state file path.
    #[arg(long)]
    pub state: Option<String>,
    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the balance and every dream.
    Show,
    /// Put money in the piggy bank.
    Deposit {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Take money out of the piggy bank.
    Withdraw {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Overwrite the balance.
    SetBalance {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Show the balance a deposit (positive) or withdrawal (negative) would
    /// leave, without changing anything.
    Preview {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Manage dreams.
    #[command(subcommand)]
    Dream(DreamCommand),
}

#[derive(Debug, Subcommand)]
pub enum DreamCommand {
    /// Add a new dream.
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Save money toward a dream.
    Save {
        id: DreamId,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Save as much as possible toward a dream ("catch this dream").
    Boost { id: DreamId },
    /// Change a dream's cost and/or saved amount.
    Edit {
        id: DreamId,
        /// New cost, defaults to the current one.
        #[arg(long, allow_hyphen_values = true)]
        cost: Option<String>,
        /// New saved amount, defaults to the current one.
        #[arg(long, allow_hyphen_values = true)]
        saved: Option<String>,
    },
    /// Show the balance an edit of the saved amount would leave.
    Project {
        id: DreamId,
        #[arg(allow_hyphen_values = true)]
        saved: String,
    },
    /// Remove a dream and get its savings back.
    Delete { id: DreamId },
    /// Mark a fully funded dream as achieved.
    Achieve { id: DreamId },
    /// Remove every dream. Savings are not returned.
    Clear,
}

/// Layer defaults, the config file, `BUDGETY_*` environment variables and
/// command line overrides.
pub fn load(args: &Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("BUDGETY"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(state) = &args.state {
        settings.state_path = state.clone();
    }
    if let Some(level) = &args.level {
        settings.level = level.clone();
    }

    Ok(settings)
}
