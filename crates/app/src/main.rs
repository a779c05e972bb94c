use clap::Parser;
use engine::{Engine, FileStore};

use crate::error::{AppError, Result};

mod commands;
mod config;
mod error;
mod notice;

fn main() -> Result<()> {
    let args = config::Args::parse();
    let settings = config::load(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "budgety={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))?;

    tracing::debug!(state = %settings.state_path, "opening state");
    let store = FileStore::open(&settings.state_path)?;
    let mut engine = Engine::builder().store(store).build()?;

    let notice = commands::execute(&mut engine, args.command);
    if notice.is_error() {
        eprintln!("{notice}");
        std::process::exit(1);
    }
    println!("{notice}");
    Ok(())
}
