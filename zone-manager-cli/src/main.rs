//! Command-line entry point for Zone Manager.
//!
//! Zones live in a SQLite database; provider state for `sync` is read from and
//! written to JSON snapshot files. Logs go to stderr, command output to stdout.

mod cli;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zone_manager_app::adapters::{JsonSnapshotGateway, SqliteStore};
use zone_manager_app::{load_config, AppState, AppStateBuilder};
use zone_manager_core::error::CoreError;
use zone_manager_core::types::NewRecord;

use cli::{Cli, Command, GlobalOptions};

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    match run(cli, &mut stdout).await {
        Ok(code) => code,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<CoreError>() {
        Some(core) => {
            eprintln!("error: {core}");
            if matches!(
                core,
                CoreError::ValidationFailed(_) | CoreError::ParseFailed(_)
            ) {
                for line in core.details() {
                    eprintln!("  - {line}");
                }
            }
        }
        None => eprintln!("error: {err:#}"),
    }
}

async fn build_state(global: &GlobalOptions) -> Result<AppState> {
    let config = load_config(global.config.as_deref()).await?;
    let db_path = global.db_path()?;
    let store = SqliteStore::new(&db_path).await?;
    tracing::debug!("Using zone store {}", db_path.display());

    let state = AppStateBuilder::new()
        .zone_repository(Arc::new(store))
        .provider_gateway(Arc::new(JsonSnapshotGateway::new(global.snapshot_dir()?)))
        .config(config)
        .build()?;
    Ok(state)
}

async fn run(cli: Cli, out: &mut impl Write) -> Result<ExitCode> {
    let state = build_state(&cli.global).await?;
    let zones = &state.zone_service;

    match cli.command {
        Command::Create { zone, ttl } => {
            let zone = zones.create_zone(&zone, ttl).await?;
            writeln!(out, "Created zone {} (serial {})", zone.name, zone.serial)?;
        }
        Command::AddRecord {
            zone,
            record_type,
            name,
            value,
            ttl,
            priority,
        } => {
            let request = NewRecord {
                record_type,
                name,
                value,
                ttl,
                priority,
            };
            let record = zones.add_record(&zone, request).await?;
            writeln!(
                out,
                "Added {} {} (id {})",
                record.record_type,
                record.name,
                record.id.unwrap_or_default()
            )?;
        }
        Command::RemoveRecord { zone, id } => {
            if !zones.remove_record(&zone, id).await? {
                return Err(CoreError::RecordNotFound(id.to_string()).into());
            }
            writeln!(out, "Removed record {id}")?;
        }
        Command::Validate { zone } => {
            let errors = zones.validate_zone(&zone).await?;
            if !errors.is_empty() {
                for error in &errors {
                    writeln!(out, "{error}")?;
                }
                return Ok(ExitCode::FAILURE);
            }
            writeln!(out, "Zone is valid")?;
        }
        Command::Export { zone, output } => {
            let text = zones.export_zone(&zone).await?;
            match output {
                Some(path) => tokio::fs::write(&path, text)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => out.write_all(text.as_bytes())?,
            }
        }
        Command::Import {
            file,
            origin,
            replace,
        } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let zone = zones.import_zone(&text, origin.as_deref(), replace).await?;
            writeln!(
                out,
                "Imported zone {} with {} record(s)",
                zone.name,
                zone.records.len()
            )?;
        }
        Command::Sync {
            zone,
            provider,
            apply,
        } => {
            let summary = state.sync_service.sync(&zone, &provider, !apply).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
            if !summary.errors.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::List => {
            for zone in zones.list_zones().await? {
                writeln!(
                    out,
                    "{}\tttl={}\tserial={}\tcreated={}",
                    zone.name,
                    zone.ttl,
                    zone.serial,
                    zone.created_at.to_rfc3339()
                )?;
            }
        }
        Command::Delete { zone } => {
            if !zones.delete_zone(&zone).await? {
                return Err(CoreError::ZoneNotFound(zone).into());
            }
            writeln!(out, "Deleted zone {zone}")?;
        }
        Command::Checksum { zone } => {
            writeln!(out, "{}", zones.checksum(&zone).await?)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
