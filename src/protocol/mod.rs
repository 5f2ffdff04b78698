//! Protocol Module
//!
//! Transport-neutral request and response types exchanged between the
//! network layer and the dispatcher.
//!
//! ## Request
//! ```text
//! ┌──────────┬────────────────┬──────────────┬───────────────────────┐
//! │  Method  │      Path      │    Query     │ Form body (urlencoded)│
//! └──────────┴────────────────┴──────────────┴───────────────────────┘
//! ```
//!
//! ## Response
//! ```text
//! ┌──────────┬────────────────┬──────────────┬───────────────────────┐
//! │  Status  │  Content-Type  │   Location   │         Body          │
//! └──────────┴────────────────┴──────────────┴───────────────────────┘
//! ```
//!
//! ### Status Codes
//! - 200: page rendered
//! - 302: redirect (index, view miss, save success)
//! - 404: route not matched
//! - 413: request body over the configured limit
//! - 500: storage or template failure

mod request;
mod response;
mod form;

pub use request::{Method, Request};
pub use response::{Response, Status};
pub use form::{encode_form, form_value, FORM_CONTENT_TYPE};
