//! Connection Handler
//!
//! Serves HTTP/1.1 on one client connection and translates between hyper
//! messages and the dispatcher's request/response types.

use std::convert::Infallible;
use std::sync::Arc;

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::header::{CONTENT_TYPE, LOCATION};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::StatusCode;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::dispatcher::Dispatcher;
use crate::error::{Result, WikiError};
use crate::protocol::{Method, Request, Response, Status};

/// Type alias for Hyper responses with full body
pub type HyperResponse = hyper::Response<Full<Bytes>>;

/// Handles a single client connection
pub struct Connection {
    /// Shared request dispatcher
    dispatcher: Arc<Dispatcher>,

    /// Largest accepted request body
    max_form_bytes: usize,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    pub fn new(dispatcher: Arc<Dispatcher>, max_form_bytes: usize, peer_addr: String) -> Self {
        Self {
            dispatcher,
            max_form_bytes,
            peer_addr,
        }
    }

    /// Serve requests until the client disconnects
    pub async fn serve(self, stream: TcpStream) {
        tracing::debug!("Connection established from {}", self.peer_addr);

        let io = TokioIo::new(stream);
        let connection = Arc::new(self);
        let handler = Arc::clone(&connection);

        let service = service_fn(move |req| {
            let handler = Arc::clone(&handler);
            async move { handler.handle(req).await }
        });

        match http1::Builder::new().serve_connection(io, service).await {
            Ok(()) => tracing::debug!("Client {} disconnected", connection.peer_addr),
            Err(e) if e.is_incomplete_message() => {
                tracing::debug!("Client {} closed mid-request", connection.peer_addr)
            }
            Err(e) => tracing::warn!("Error serving {}: {}", connection.peer_addr, e),
        }
    }

    /// Handle one HTTP request. Failures become error responses.
    pub async fn handle(&self, req: hyper::Request<Incoming>) -> std::result::Result<HyperResponse, Infallible> {
        let request = match self.read_request(req).await {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Rejected request from {}: {}", self.peer_addr, e);
                return Ok(into_hyper_response(Response::error(e.status(), &e.to_string())));
            }
        };

        // Page I/O is blocking
        let dispatcher = Arc::clone(&self.dispatcher);
        let response = match tokio::task::spawn_blocking(move || dispatcher.dispatch(&request)).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Request handler for {} failed: {}", self.peer_addr, e);
                Response::error(Status::InternalServerError, "internal server error")
            }
        };

        Ok(into_hyper_response(response))
    }

    /// Collect the body (bounded) and build a dispatcher request
    async fn read_request(&self, req: hyper::Request<Incoming>) -> Result<Request> {
        let (parts, body) = req.into_parts();

        let body = Limited::new(body, self.max_form_bytes)
            .collect()
            .await
            .map_err(|e| {
                if e.is::<LengthLimitError>() {
                    WikiError::PayloadTooLarge {
                        limit: self.max_form_bytes,
                    }
                } else {
                    WikiError::Network(format!("Failed to read request body: {}", e))
                }
            })?
            .to_bytes();

        let content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(Request::new(Method::from(parts.method.as_str()), parts.uri.path())
            .with_query(parts.uri.query().map(str::to_string))
            .with_body(content_type, body))
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

/// Convert a dispatcher response into a hyper response
pub fn into_hyper_response(response: Response) -> HyperResponse {
    let mut builder = hyper::Response::builder().status(response.status.code());
    if let Some(content_type) = response.content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    if let Some(location) = &response.location {
        builder = builder.header(LOCATION, location.as_str());
    }

    match builder.body(Full::new(response.body)) {
        Ok(http_response) => http_response,
        Err(e) => {
            tracing::error!("Failed to build response: {}", e);
            let mut fallback = hyper::Response::new(Full::new(Bytes::from_static(
                b"internal server error\n",
            )));
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_conversion() {
        let response = into_hyper_response(Response::redirect("/view/Home"));
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/view/Home");
        assert!(response.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_html_conversion() {
        let response = into_hyper_response(Response::html("<p>hi</p>".to_string()));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], Response::HTML);
    }

    #[test]
    fn test_error_conversion() {
        let response = into_hyper_response(Response::error(Status::PayloadTooLarge, "too big"));
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.headers()[CONTENT_TYPE], Response::TEXT);
    }
}
