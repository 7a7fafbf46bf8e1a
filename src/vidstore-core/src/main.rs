//! Vidstore - HTTP CRUD service for video records

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::{error, info, Level};

use vidstore_core::colored_logger::{init_component_logger, Component};
use vidstore_core::config::Config;

#[derive(Parser)]
#[command(name = "vidstore")]
#[command(about = "Store and serve video records over HTTP")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database file and schema
    Init {
        /// Database file path
        #[arg(short, long)]
        db: Option<PathBuf>,
    },

    /// Serve the video resource over HTTP
    Serve {
        /// Database file path
        #[arg(short, long)]
        db: Option<PathBuf>,

        /// Address to listen on
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show database status
    Status {
        /// Database file path
        #[arg(short, long)]
        db: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let component = match cli.command {
        Commands::Init { .. } => Component::Init,
        Commands::Serve { .. } => Component::Server,
        Commands::Status { .. } => Component::Status,
    };
    init_component_logger(component, level)?;

    let mut config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Init { db } => {
            if let Some(db) = db {
                config.database_path = db;
            }
            cmd_init(&config)?;
        }
        Commands::Serve { db, host, port } => {
            if let Some(db) = db {
                config.database_path = db;
            }
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            cmd_serve(&config)?;
        }
        Commands::Status { db } => {
            if let Some(db) = db {
                config.database_path = db;
            }
            cmd_status(&config)?;
        }
    }

    Ok(())
}

fn cmd_init(config: &Config) -> Result<()> {
    let db = vidstore_db::Database::create(&config.database_path)
        .with_context(|| format!("failed to initialize {:?}", config.database_path))?;
    let count = vidstore_db::get_video_count(db.connection())?;

    info!("database ready at {:?} ({} videos)", config.database_path, count);
    Ok(())
}

#[tokio::main]
async fn cmd_serve(config: &Config) -> Result<()> {
    let db_path = require_database(&config.database_path)?;

    info!("starting vidstore server");
    info!("database: {:?}", db_path);

    let db = vidstore_db::Database::open(db_path)?;
    vidstore_web::serve(db.into_connection(), config.socket_addr()).await?;

    Ok(())
}

fn cmd_status(config: &Config) -> Result<()> {
    let db_path = require_database(&config.database_path)?;

    let db = vidstore_db::Database::open(db_path)?;
    let count = vidstore_db::get_video_count(db.connection())?;

    println!("status: ready");
    println!("database: {:?}", db_path);
    println!("schema version: {}", vidstore_db::SCHEMA_VERSION);
    println!("videos: {}", count);

    Ok(())
}

fn require_database(db_path: &Path) -> Result<&Path> {
    if !db_path.exists() {
        error!("database not found at {:?}", db_path);
        error!("please run 'vidstore init' first to create the database");
        return Err(anyhow::anyhow!("database not found"));
    }
    Ok(db_path)
}
