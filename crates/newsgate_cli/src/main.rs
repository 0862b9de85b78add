//! `newsgate` command-line entry point.
//!
//! # Responsibility
//! - Load gateway settings from a TOML file, `--db` and `NEWSGATE_*` variables.
//! - Run one gateway operation and print its outcome message.
//!
//! Exit codes: 0 on success, 1 on a rejected write, 2 on storage or
//! bootstrap failure.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use log::info;
use newsgate_core::{
    core_version, default_log_level, init_logging, open_pool, GatewayConfig, GatewayOutcome,
    NewsDraft, RecordGateway,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "newsgate",
    version = core_version(),
    about = "Register news agencies and record news items"
)]
struct Cli {
    /// TOML settings file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file; overrides `database_path` from --config.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register an agency by name.
    Agency { name: String },
    /// Record a news item for an existing agency.
    News {
        #[arg(long)]
        agency: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        link: String,
        #[arg(long, default_value = "")]
        text: String,
        /// RFC 3339 timestamp; defaults to now.
        #[arg(long)]
        published_at: Option<DateTime<Utc>>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("newsgate: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = resolve_config(cli.config, cli.db)?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        let level = config.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)
            .map_err(|err| anyhow!("failed to start logging: {err}"))?;
    }

    let pool = open_pool(&config).with_context(|| {
        format!(
            "failed to open database `{}`",
            config.database_path.display()
        )
    })?;
    let gateway = RecordGateway::new(pool);

    let outcome = match cli.command {
        Command::Agency { name } => gateway.register_agency(&name),
        Command::News {
            agency,
            title,
            link,
            text,
            published_at,
        } => {
            let draft = NewsDraft::new(
                published_at.unwrap_or_else(Utc::now),
                title,
                text,
                link,
                agency,
            );
            gateway.record_news_item(&draft)
        }
    };

    info!(
        "event=cli_command module=cli status=done outcome={}",
        outcome.kind()
    );
    println!("{outcome}");
    Ok(ExitCode::from(exit_status(&outcome)))
}

fn resolve_config(config_path: Option<PathBuf>, db: Option<PathBuf>) -> Result<GatewayConfig> {
    let mut config = match (config_path, db.as_ref()) {
        (Some(path), _) => GatewayConfig::load(&path)?,
        (None, Some(db)) => GatewayConfig::new(db),
        (None, None) => match std::env::var_os(newsgate_core::config::ENV_DATABASE_PATH) {
            Some(path) => GatewayConfig::new(path),
            None => bail!(
                "no database configured; pass --db, --config or set {}",
                newsgate_core::config::ENV_DATABASE_PATH
            ),
        },
    };
    config.apply_env_overrides()?;
    if let Some(db) = db {
        config.database_path = db;
    }
    Ok(config)
}

fn exit_status(outcome: &GatewayOutcome) -> u8 {
    match outcome {
        GatewayOutcome::StorageFailure { .. } => 2,
        _ if outcome.is_success() => 0,
        _ => 1,
    }
}
