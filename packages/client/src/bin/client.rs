//! Terminal client for the collaborative document server.
//!
//! Creates a new document (or opens `--doc`), joins its room and appends
//! every typed line to the shared document. The buffer is saved every
//! `--autosave-secs` seconds when it changed, and on `/save`.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsuzuri-client
//! cargo run --bin tsuzuri-client -- --doc 0b6f1c2e-9d1a-4f52-8c35-0a8e2b1d7f00
//! cargo run --bin tsuzuri-client -- -s http://127.0.0.1:5001 --autosave-secs 0
//! ```

use std::time::Duration;

use clap::Parser;

use tsuzuri_client::{ClientConfig, run_client};
use tsuzuri_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tsuzuri-client")]
#[command(about = "Terminal client for the collaborative document server", long_about = None)]
struct Args {
    /// HTTP base URL of the server
    #[arg(short = 's', long, env = "TSUZURI_SERVER", default_value = "http://127.0.0.1:5000")]
    server: String,

    /// Document ID to open (a new document is created when omitted)
    #[arg(short = 'd', long)]
    doc: Option<String>,

    /// Autosave period in seconds (0 disables autosave)
    #[arg(long, default_value_t = 2)]
    autosave_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(&[env!("CARGO_CRATE_NAME")], "info");

    let args = Args::parse();

    let config = ClientConfig {
        server: args.server,
        doc_id: args.doc,
        autosave: (args.autosave_secs > 0).then(|| Duration::from_secs(args.autosave_secs)),
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
