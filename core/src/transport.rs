//! Blocking `Transport` backed by `ureq`.

use tracing::debug;

use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Executes requests on a shared `ureq::Agent`.
///
/// The agent pools connections, so reuse one transport (or one `VkClient`)
/// across calls. Clones share the same pool. HTTP error statuses are
/// returned as data so the parser sees the body.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    /// Wrap an existing agent. It should be built with
    /// `http_status_as_error(false)`, otherwise 4xx/5xx responses surface as
    /// transport errors instead of reaching the parser.
    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    type Error = ureq::Error;

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ureq::Error> {
        let mut response = match request.method {
            HttpMethod::Get => self
                .agent
                .get(&request.url)
                .query_pairs(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .call()?,
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_vec()?;
        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
