//! Error types for the VK API client.
//!
//! # Design
//! Everything that can go wrong with a response body is an `ApiError`; the
//! `kind` tells decode failures, API-reported errors and envelope violations
//! apart. The error owns the `HttpResponse` it was raised for, so callers can
//! still look at the status and raw body.
//!
//! Transport failures are not reclassified: `RequestError::Transport` carries
//! the transport's own error value untouched.

use serde::Deserialize;
use thiserror::Error;

use crate::http::HttpResponse;

/// Which check rejected the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The body (or a part of it) could not be decoded.
    DecodeFailure,

    /// The body carried an `"error"` object.
    Api,

    /// The body decoded but has no `"response"` key.
    MissingResponse,
}

/// The `"error"` object VK sends instead of `"response"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorInfo {
    pub error_code: i64,
    pub error_msg: String,
}

/// A response that did not yield a payload.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    error_code: Option<i64>,
    error_msg: Option<String>,
    response: Box<HttpResponse>,
    #[source]
    source: Option<serde_json::Error>,
}

impl ApiError {
    pub(crate) fn decode(
        message: impl Into<String>,
        response: HttpResponse,
        source: serde_json::Error,
    ) -> Self {
        Self {
            kind: ApiErrorKind::DecodeFailure,
            message: message.into(),
            error_code: None,
            error_msg: None,
            response: Box::new(response),
            source: Some(source),
        }
    }

    pub(crate) fn api(info: ApiErrorInfo, response: HttpResponse) -> Self {
        Self {
            kind: ApiErrorKind::Api,
            message: info.error_msg.clone(),
            error_code: Some(info.error_code),
            error_msg: Some(info.error_msg),
            response: Box::new(response),
            source: None,
        }
    }

    pub(crate) fn missing_response(message: impl Into<String>, response: HttpResponse) -> Self {
        Self {
            kind: ApiErrorKind::MissingResponse,
            message: message.into(),
            error_code: None,
            error_msg: None,
            response: Box::new(response),
            source: None,
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `error_code` from the `"error"` object, for `ApiErrorKind::Api` only.
    pub fn error_code(&self) -> Option<i64> {
        self.error_code
    }

    /// `error_msg` from the `"error"` object, for `ApiErrorKind::Api` only.
    pub fn error_msg(&self) -> Option<&str> {
        self.error_msg.as_deref()
    }

    /// The response this error was raised for.
    pub fn response(&self) -> &HttpResponse {
        &self.response
    }

    pub fn into_response(self) -> HttpResponse {
        *self.response
    }
}

/// Errors returned by `VkClient::make_request*`.
#[derive(Debug, Error)]
pub enum RequestError<E> {
    /// The transport failed before a response existed.
    #[error("transport error: {0}")]
    Transport(#[source] E),

    /// A response arrived but did not carry a payload.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl<E> RequestError<E> {
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            RequestError::Api(err) => Some(err),
            RequestError::Transport(_) => None,
        }
    }

    pub fn transport_error(&self) -> Option<&E> {
        match self {
            RequestError::Transport(err) => Some(err),
            RequestError::Api(_) => None,
        }
    }
}
