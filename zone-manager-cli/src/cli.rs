//! Command-line argument parsing.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

/// Directory under the platform data dir holding the store and snapshots.
const APP_DIR: &str = "zone-manager";

/// Manage DNS zones, export them as BIND files and sync them to providers
#[derive(Debug, Parser)]
#[command(name = "zone-manager", version)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct GlobalOptions {
    /// SQLite database file. Defaults to `<data dir>/zone-manager/zones.db`.
    #[arg(long, env = "ZONE_MANAGER_DB", global = true)]
    pub db: Option<PathBuf>,

    /// JSON configuration file (zone defaults and validation options)
    #[arg(long, env = "ZONE_MANAGER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory of provider snapshot files used by `sync`.
    /// Defaults to `<data dir>/zone-manager/snapshots`.
    #[arg(long, env = "ZONE_MANAGER_SNAPSHOTS", global = true)]
    pub snapshots: Option<PathBuf>,
}

impl GlobalOptions {
    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.db {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("zones.db")),
        }
    }

    pub fn snapshot_dir(&self) -> Result<PathBuf> {
        match &self.snapshots {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("snapshots")),
        }
    }
}

fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .context("could not determine the platform data directory; pass --db")
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an empty zone with the default nameservers
    Create {
        /// Zone name, e.g. example.com
        zone: String,
        /// Default TTL for the zone
        #[arg(long)]
        ttl: Option<u32>,
    },

    /// Add a record to a zone
    AddRecord {
        zone: String,
        /// Record type (A, AAAA, CNAME, MX, TXT, NS, SOA, SRV, PTR, CAA)
        #[arg(value_name = "TYPE")]
        record_type: String,
        /// Relative owner name, `@` for the apex
        name: String,
        value: String,
        #[arg(long)]
        ttl: Option<u32>,
        /// Required for MX and SRV
        #[arg(long)]
        priority: Option<u32>,
    },

    /// Remove a record by id
    RemoveRecord { zone: String, id: i64 },

    /// Validate a zone; exits non-zero when it has errors
    Validate { zone: String },

    /// Print a zone as a BIND master file
    Export {
        zone: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a BIND master file
    Import {
        file: PathBuf,
        /// Origin to use when the file has no $ORIGIN
        #[arg(long)]
        origin: Option<String>,
        /// Replace an existing zone of the same name
        #[arg(long)]
        replace: bool,
    },

    /// Diff a zone against a provider; changes are applied only with `--apply`
    Sync {
        zone: String,
        /// cloudflare, route53 or digitalocean
        provider: String,
        /// Push the changes to the provider instead of only reporting them
        #[arg(long)]
        apply: bool,
    },

    /// List stored zones
    List,

    /// Delete a zone and its records
    Delete { zone: String },

    /// Print the zone content checksum
    Checksum { zone: String },
}
