//! Network Module
//!
//! HTTP server and connection handling.
//!
//! ## Architecture
//! - Single accept loop on the tokio runtime
//! - One task per connection (hyper HTTP/1.1)
//! - Each request dispatched on the blocking pool, since page loads and
//!   saves are synchronous file I/O

mod server;
mod connection;

pub use server::Server;
pub use connection::{into_hyper_response, Connection, HyperResponse};
