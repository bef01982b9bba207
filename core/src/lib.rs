//! Synchronous client core for the VK API.
//!
//! # Overview
//! Calls `{endpoint}/method/{name}` with GET, stamping `access_token`, `v`
//! and `lang` onto every request, and unwraps the `{"response": ...}`
//! envelope into either a `serde_json::Value` or a caller-defined model.
//!
//! # Design
//! - `VkClient` carries only its `ClientConfig` and a `Transport`; nothing is
//!   mutated between calls.
//! - Request building and response parsing are plain functions over plain
//!   data (`HttpRequest`, `HttpResponse`), so both can be tested without I/O.
//! - Any body that does not yield a payload becomes an `ApiError`; transport
//!   failures pass through untouched inside `RequestError::Transport`.
//! - `UreqTransport` (feature `ureq`, on by default) is the stock blocking
//!   transport.
//!
//! ```no_run
//! use serde::Deserialize;
//! use vk_core::{Params, VkClient};
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: i64,
//!     first_name: String,
//! }
//!
//! let client = VkClient::new("token");
//! let users: Vec<User> = client
//!     .make_request_as("users.get", Params::new().with("user_ids", vec![1i64, 2]))
//!     .unwrap();
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod parse;
#[cfg(feature = "ureq")]
pub mod transport;

pub use client::VkClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorInfo, ApiErrorKind, RequestError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use params::{ParamValue, Params};
pub use parse::parse_response;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
