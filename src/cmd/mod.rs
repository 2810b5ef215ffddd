mod export;
mod inspect;
mod serve;

use crate::catalog::DuckDbCatalog;
use crate::config::{AppConfig, Driver};
use crate::graph::{ReferenceMatching, SchemaSnapshot};
use anyhow::Context;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "schema-graph")]
#[command(version)]
#[command(
    about = "Explore a database schema as an interactive graph of inferred table relationships",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the interactive schema explorer over HTTP
    Serve {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Address to listen on (default: 127.0.0.1:8887)
        #[arg(short, long)]
        bind: Option<String>,

        /// Initial layout: cose, breadthfirst, circle, concentric, grid
        #[arg(short, long)]
        layout: Option<String>,
    },

    /// Export the schema graph as JSON, Mermaid or DOT
    Export {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: json, mermaid, dot (default: from extension, else json)
        #[arg(short, long)]
        format: Option<String>,

        /// Only include tables whose name contains this text (case-insensitive)
        #[arg(long, default_value = "")]
        filter: String,
    },

    /// Print a table's columns and its related tables
    Inspect {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Table name
        table: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Catalog connection flags shared by every command that reads a schema
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Database driver: mysql, postgres, duckdb
    #[arg(long)]
    pub driver: Option<String>,

    /// DuckDB database file (duckdb driver)
    #[arg(long)]
    pub path: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(short, long)]
    pub user: Option<String>,

    #[arg(long, env = "SCHEMA_GRAPH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Database name
    #[arg(short, long)]
    pub database: Option<String>,

    /// Schema to introspect (mysql: the database, postgres: public, duckdb: main)
    #[arg(long)]
    pub schema: Option<String>,

    /// How `<prefix>_id` columns match table names: exact, plural
    #[arg(long = "match")]
    pub matching: Option<String>,
}

impl ConnectionArgs {
    /// Load the config file if given, then apply flag overrides and validate
    pub fn resolve(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        let db = &mut config.database;
        if let Some(ref driver) = self.driver {
            db.driver = driver.parse::<Driver>().map_err(|e| anyhow::anyhow!(e))?;
        }
        if self.path.is_some() {
            db.path = self.path.clone();
        }
        if let Some(ref host) = self.host {
            db.host = host.clone();
        }
        if self.port.is_some() {
            db.port = self.port;
        }
        if self.user.is_some() {
            db.user = self.user.clone();
        }
        if self.password.is_some() {
            db.password = self.password.clone();
        }
        if self.database.is_some() {
            db.database = self.database.clone();
        }
        if self.schema.is_some() {
            db.schema = self.schema.clone();
        }
        if let Some(ref matching) = self.matching {
            config.inference.matching = matching
                .parse::<ReferenceMatching>()
                .map_err(|e| anyhow::anyhow!(e))?;
        }

        config.database.validate()?;
        Ok(config)
    }
}

/// Run the catalog query and build the snapshot
fn load_snapshot(config: &AppConfig) -> anyhow::Result<SchemaSnapshot> {
    let target = config.database.describe();
    log::info!("Reading catalog from {}", target);

    let catalog = DuckDbCatalog::connect(&config.database)?;
    let snapshot = SchemaSnapshot::load(&catalog, config.inference.matching)
        .with_context(|| format!("failed to read catalog of {}", target))?;

    log::info!(
        "Loaded {} tables, {} columns, {} inferred relationships (schema {}, {} matching)",
        snapshot.table_count(),
        snapshot.column_count(),
        snapshot.dependency_count(),
        catalog.schema(),
        config.inference.matching
    );
    if snapshot.is_empty() {
        log::warn!("No tables found in schema {}", catalog.schema());
    }
    Ok(snapshot)
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve {
            connection,
            bind,
            layout,
        } => serve::run(connection, bind, layout),
        Commands::Export {
            connection,
            output,
            format,
            filter,
        } => export::run(connection, output, format, filter),
        Commands::Inspect { connection, table } => inspect::run(connection, table),
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "schema-graph",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
