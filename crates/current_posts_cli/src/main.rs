//! Command-line host for the current-posts block.
//!
//! # Responsibility
//! - Wire config, logging, the item store and the block registry together.
//! - Print rendered block output for local checks.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use current_posts_core::db::{open_db, open_db_in_memory};
use current_posts_core::{
    core_version, init_logging, CurrentPostsModule, ModuleConfig, ModuleRegistry, PermissionSet,
    SqliteItemRepository, BLOCK_DELTA, MODULE_ID,
};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "current-posts",
    version,
    about = "Render the current posts block",
    disable_help_subcommand = true
)]
struct Cli {
    /// JSON module configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the block from an item store.
    Render {
        /// Item store path; overrides `database_path` from the config.
        /// One of the two is required.
        #[arg(long)]
        db: Option<PathBuf>,
        /// Render as of this RFC 3339 instant instead of the wall clock.
        #[arg(long)]
        now: Option<DateTime<Utc>>,
        /// Link prefix; overrides `base_path` from the config.
        #[arg(long)]
        base_path: Option<String>,
        /// Render for a viewer without `access content`.
        #[arg(long)]
        deny_access: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
    },
    /// Print help text for one admin help page key.
    Help { page_key: String },
    /// List registered blocks.
    Blocks,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Html,
    Json,
}

/// `--db` wins over `database_path` from the config.
fn store_path(command: &Command, config: &ModuleConfig) -> Option<PathBuf> {
    match command {
        Command::Render { db: Some(path), .. } => Some(path.clone()),
        _ => config.database_path.clone(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(message) => {
            error!("event=cli_run module=cli status=error error={message}");
            eprintln!("current-posts: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, String> {
    let config = match cli.config.as_ref() {
        Some(path) => ModuleConfig::load(path).map_err(|err| err.to_string())?,
        None => ModuleConfig::default(),
    };
    if let Some(settings) = config.log.as_ref() {
        init_logging(settings).map_err(|err| err.to_string())?;
    }
    let messages = config.message_catalog().map_err(|err| err.to_string())?;

    let conn = match (&cli.command, store_path(&cli.command, &config)) {
        (_, Some(path)) => open_db(path),
        (Command::Render { .. }, None) => {
            return Err(
                "render needs an item store: pass --db or set `database_path` in the config"
                    .to_string(),
            );
        }
        // Help and block listings never query items.
        (_, None) => open_db_in_memory(),
    }
    .map_err(|err| err.to_string())?;
    let repo = SqliteItemRepository::try_new(&conn).map_err(|err| err.to_string())?;

    let mut registry = ModuleRegistry::new();
    registry
        .register(Box::new(CurrentPostsModule::new(repo, messages)))
        .map_err(|err| err.to_string())?;

    match cli.command {
        Command::Render {
            now,
            base_path,
            deny_access,
            format,
            ..
        } => {
            let access = if deny_access {
                PermissionSet::none()
            } else {
                PermissionSet::content_viewer()
            };
            let base_path = base_path.unwrap_or(config.base_path);
            let view = registry
                .view_block(
                    MODULE_ID,
                    BLOCK_DELTA,
                    &access,
                    now.unwrap_or_else(Utc::now),
                )
                .map_err(|err| err.to_string())?
                .ok_or_else(|| format!("block {MODULE_ID}/{BLOCK_DELTA} is not registered"))?;

            match format {
                OutputFormat::Html => {
                    println!("{}", view.subject);
                    if let Some(content) = view.content {
                        println!("{}", content.to_html(&base_path));
                    }
                }
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&view).map_err(|err| err.to_string())?;
                    println!("{json}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Help { page_key } => match registry.help_for(&page_key) {
            Some(text) => {
                println!("{text}");
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("no help for `{page_key}`");
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Blocks => {
            println!("current_posts_core version={}", core_version());
            for block in registry.blocks() {
                println!(
                    "{}/{}\t{}\tcache={:?}",
                    block.module_id, block.delta, block.info.info, block.info.cache
                );
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
