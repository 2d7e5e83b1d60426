use crate::ctx::Headers;
use http::StatusCode;
use serde::Serialize;

/// A synthetic response returned by the edge instead of forwarding the request.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EdgeResponse {
    /// Status code as a decimal string, e.g. `"302"`.
    pub status: String,

    pub status_description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
}

impl EdgeResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status: status.as_str().to_string(),
            status_description: status.canonical_reason().unwrap_or_default().to_string(),
            headers: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .append(key, value);
        self
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
            .parse::<u16>()
            .ok()
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// First value of a response header.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.as_ref().and_then(|h| h.first(name))
    }
}
