//! pagewiki Server Binary
//!
//! Starts the HTTP server for pagewiki.

use std::sync::Arc;

use clap::Parser;
use pagewiki::network::Server;
use pagewiki::{Config, Dispatcher, Result, WikiError};
use tracing_subscriber::{fmt, EnvFilter};

/// pagewiki Server
#[derive(Parser, Debug)]
#[command(name = "pagewiki-server")]
#[command(about = "Small wiki server with bracket links")]
#[command(version)]
struct Args {
    /// Directory holding the page files
    #[arg(short, long, default_value = "./pages")]
    pages_dir: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    listen: String,

    /// Page the index route redirects to
    #[arg(short, long, default_value = "FrontPage")]
    default_title: String,

    /// Directory with view.html and edit.html (built-in templates if unset)
    #[arg(short, long)]
    templates_dir: Option<String>,

    /// Largest accepted request body in KB
    #[arg(short = 'm', long, default_value = "10240")]
    max_form_kb: usize,
}

/// Convert the `--max-form-kb` flag to bytes
fn max_form_bytes(kb: usize) -> Result<usize> {
    kb.checked_mul(1024)
        .ok_or_else(|| WikiError::Config(format!("max form size of {} KB is too large", kb)))
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pagewiki=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("pagewiki Server v{}", pagewiki::VERSION);
    tracing::info!("Pages directory: {}", args.pages_dir);
    tracing::info!("Listen address: {}", args.listen);

    let max_form_bytes = match max_form_bytes(args.max_form_kb) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    // Build config from args
    let mut builder = Config::builder()
        .pages_dir(&args.pages_dir)
        .listen_addr(&args.listen)
        .default_title(&args.default_title)
        .max_form_bytes(max_form_bytes);
    if let Some(dir) = &args.templates_dir {
        builder = builder.templates_dir(dir);
    }
    let config = builder.build();

    // Open pages and templates
    let dispatcher = match Dispatcher::open(config.clone()) {
        Ok(d) => Arc::new(d),
        Err(e) => {
            tracing::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Dispatcher initialized successfully");

    // Start server
    let server = Server::new(config, dispatcher);
    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
    }

    tracing::info!("Server stopped");
}
