//! The VK API client.
//!
//! # Design
//! `VkClient` holds an immutable `ClientConfig` and a `Transport`. Every call
//! is split the same way: `build_request` normalizes parameters into an
//! `HttpRequest`, the transport executes it, and `parse_response*` classifies
//! the body. The build and parse halves are public so they can be driven
//! without a network round-trip.
//!
//! Typed and untyped results are separate methods (`*_as::<M>` vs the plain
//! ones returning `serde_json::Value`) rather than an optional model
//! argument.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ApiError, RequestError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::params::{self, Params};
use crate::parse;

/// Blocking client for `{endpoint}/method/{name}` calls.
#[derive(Clone)]
pub struct VkClient<T> {
    config: ClientConfig,
    transport: T,
}

#[cfg(feature = "ureq")]
impl VkClient<crate::transport::UreqTransport> {
    /// A client with default endpoint, version and language over a fresh
    /// `ureq` agent.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_transport(ClientConfig::new(token), Default::default())
    }
}

impl<T: Transport> VkClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Flatten list values and add `access_token`, `v` and `lang`.
    pub fn normalize_params(&self, params: Params) -> Vec<(String, String)> {
        params::normalize(&self.config, params)
    }

    /// The GET request for `method` with normalized `params`.
    pub fn build_request(&self, method: &str, params: Params) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.config.method_url(method),
            query: self.normalize_params(params),
        }
    }

    /// Call `method` and return the untyped payload.
    pub fn make_request(
        &self,
        method: &str,
        params: Params,
    ) -> Result<Value, RequestError<T::Error>> {
        self.make_request_as(method, params)
    }

    /// Call `method` and decode the payload into `M`.
    pub fn make_request_as<M: DeserializeOwned>(
        &self,
        method: &str,
        params: Params,
    ) -> Result<M, RequestError<T::Error>> {
        let request = self.build_request(method, params);
        debug!(
            method,
            url = %request.url,
            params = request.query.len(),
            "dispatching api request"
        );
        let response = self
            .transport
            .execute(&request)
            .map_err(RequestError::Transport)?;
        Ok(self.parse_response_as(response)?)
    }

    /// Classify an already-received response and return the untyped payload.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse::parse_response(response)
    }

    /// Classify an already-received response and decode the payload into `M`.
    pub fn parse_response_as<M: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<M, ApiError> {
        parse::parse_response(response)
    }
}

impl<T> std::fmt::Debug for VkClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VkClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
