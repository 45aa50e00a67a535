//! Realtime collaborative document server.
//!
//! Clients join a document room over WebSocket, relay edits to the other
//! members and periodically save the content to the document store.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsuzuri-server
//! cargo run --bin tsuzuri-server -- --host 0.0.0.0 --port 5000 --database documents.db
//! cargo run --bin tsuzuri-server -- --in-memory
//! cargo run --bin tsuzuri-server -- create-document
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};

use tsuzuri_server::{
    config::{
        DEFAULT_ALLOWED_ORIGIN, DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_PORT,
        DEFAULT_PORT_ATTEMPTS, ServerConfig, StoreConfig,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemorySessionRegistry,
    },
    ui::{AppState, Server},
    usecase::CreateDocumentUseCase,
};
use tsuzuri_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "tsuzuri-server")]
#[command(about = "Realtime collaborative document server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "TSUZURI_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "TSUZURI_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Number of consecutive ports to try when the port is in use
    #[arg(long, env = "TSUZURI_PORT_ATTEMPTS", default_value_t = DEFAULT_PORT_ATTEMPTS)]
    port_attempts: u16,

    /// SQLite database file
    #[arg(short = 'd', long, env = "TSUZURI_DATABASE", default_value = DEFAULT_DATABASE)]
    database: PathBuf,

    /// Keep documents in memory instead of SQLite
    #[arg(long, env = "TSUZURI_IN_MEMORY")]
    in_memory: bool,

    /// Origin allowed by CORS for the HTTP API
    #[arg(long, env = "TSUZURI_ALLOWED_ORIGIN", default_value = DEFAULT_ALLOWED_ORIGIN)]
    allowed_origin: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty document in the store and print its id
    CreateDocument,
}

impl Args {
    fn store_config(&self) -> StoreConfig {
        if self.in_memory {
            StoreConfig::InMemory
        } else {
            StoreConfig::Sqlite(self.database.clone())
        }
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            port_attempts: self.port_attempts,
            allowed_origin: self.allowed_origin.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(&[env!("CARGO_CRATE_NAME"), "tower_http"], "debug");

    let args = Args::parse();

    let result = match args.command {
        Some(Command::CreateDocument) => create_document(&args).await,
        None => serve(&args).await,
    };

    if let Err(e) = result {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn serve(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize dependencies in order:
    // 1. DocumentStore / SessionRegistry
    // 2. MessagePusher
    // 3. AppState (UseCases)
    // 4. Server
    let store = args.store_config().open()?;
    let registry = Arc::new(InMemorySessionRegistry::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::default());
    let state = Arc::new(AppState::new(
        registry,
        store,
        message_pusher,
        Arc::new(SystemClock),
    ));

    Server::new(state, args.server_config()).run().await
}

async fn create_document(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let store = args.store_config().open()?;
    let created = CreateDocumentUseCase::new(store).execute().await;
    created.persisted?;

    println!("{}", created.id);
    Ok(())
}
