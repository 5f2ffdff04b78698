//! HTTP Server
//!
//! Accepts connections and hands each one to its own task.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use super::Connection;
use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::{Result, WikiError};

/// Pause after a failed accept before trying again
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// HTTP server for pagewiki
pub struct Server {
    /// Server configuration
    config: Config,

    /// Shared request dispatcher
    dispatcher: Arc<Dispatcher>,
}

impl Server {
    /// Create a new server with the given config and dispatcher
    pub fn new(config: Config, dispatcher: Arc<Dispatcher>) -> Self {
        Self { config, dispatcher }
    }

    /// Bind the configured address and serve until the task is dropped
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.listen_addr)
            .await
            .map_err(|e| {
                WikiError::Network(format!("Failed to bind to {}: {}", self.config.listen_addr, e))
            })?;
        self.serve(listener).await
    }

    /// Serve connections from an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let local_addr = listener
            .local_addr()
            .map_err(|e| WikiError::Network(format!("Failed to get local address: {}", e)))?;
        tracing::info!("HTTP server listening on {}", local_addr);

        loop {
            let (stream, peer_addr) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    back_off_after_accept_error(&e).await;
                    continue;
                }
            };

            let connection = Connection::new(
                Arc::clone(&self.dispatcher),
                self.config.max_form_bytes,
                peer_addr.to_string(),
            );
            tokio::spawn(connection.serve(stream));
        }
    }
}

/// Accept errors are usually fd exhaustion and persist until a connection
/// closes; retrying at once would spin.
async fn back_off_after_accept_error(error: &io::Error) {
    tracing::warn!(
        "Failed to accept connection: {}; retrying in {:?}",
        error,
        ACCEPT_BACKOFF
    );
    tokio::time::sleep(ACCEPT_BACKOFF).await;
}
