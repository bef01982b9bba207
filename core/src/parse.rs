//! Response classification.
//!
//! A VK body is either `{"response": ...}` or `{"error": {...}}`. The checks
//! run in a fixed order: undecodable JSON, then an `"error"` key, then a
//! missing `"response"` key. An `"error"` key wins even when `"response"` is
//! present too.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, ApiErrorInfo};
use crate::http::HttpResponse;

pub const DECODE_FAILURE_MSG: &str = "can't decode json response";
pub const MISSING_RESPONSE_MSG: &str = "no 'response' key found in response dict";
pub const BAD_ERROR_OBJECT_MSG: &str = "can't decode error object";
pub const MODEL_MISMATCH_MSG: &str = "can't decode response into model";

const ERROR_KEY: &str = "error";
const RESPONSE_KEY: &str = "response";

/// Extract the `"response"` payload and decode it into `M`.
///
/// Use `M = serde_json::Value` for the untyped payload. The response is moved
/// into the returned `ApiError` on failure.
pub fn parse_response<M: DeserializeOwned>(response: HttpResponse) -> Result<M, ApiError> {
    extract_payload(response)?
        .map_err(|(source, response)| ApiError::decode(MODEL_MISMATCH_MSG, response, source))
}

type Payload<M> = Result<M, (serde_json::Error, HttpResponse)>;

// The outer Result is an envelope failure; the inner one is a model mismatch,
// which still needs the response handed back to build the error.
fn extract_payload<M: DeserializeOwned>(response: HttpResponse) -> Result<Payload<M>, ApiError> {
    let body: Value = match response.json() {
        Ok(body) => body,
        Err(err) => {
            debug!(status = response.status, "response body is not json");
            return Err(ApiError::decode(DECODE_FAILURE_MSG, response, err));
        }
    };

    let Value::Object(mut fields) = body else {
        debug!(status = response.status, "response body is not an object");
        return Err(ApiError::missing_response(MISSING_RESPONSE_MSG, response));
    };

    if let Some(error) = fields.remove(ERROR_KEY) {
        return match serde_json::from_value::<ApiErrorInfo>(error) {
            Ok(info) => {
                debug!(
                    status = response.status,
                    error_code = info.error_code,
                    "api returned an error"
                );
                Err(ApiError::api(info, response))
            }
            Err(err) => Err(ApiError::decode(BAD_ERROR_OBJECT_MSG, response, err)),
        };
    }

    let Some(payload) = fields.remove(RESPONSE_KEY) else {
        debug!(status = response.status, "response body has no payload");
        return Err(ApiError::missing_response(MISSING_RESPONSE_MSG, response));
    };

    Ok(serde_json::from_value(payload).map_err(|err| (err, response)))
}
