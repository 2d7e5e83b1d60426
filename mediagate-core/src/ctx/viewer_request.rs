use crate::ctx::Headers;
use serde::{Deserialize, Serialize};

/// A viewer request as delivered by the CDN edge.
///
/// The handler only ever reads it. Callers keep ownership and forward it unchanged when the
/// decision is [`Decision::Allow`](crate::ctx::Decision::Allow).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ViewerRequest {
    pub method: String,

    pub uri: String,

    #[serde(default)]
    pub headers: Headers,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub querystring: Option<String>,
}

impl ViewerRequest {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            headers: Headers::new(),
            querystring: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(key, value);
        self
    }

    pub fn query(mut self, querystring: impl Into<String>) -> Self {
        self.querystring = Some(querystring.into());
        self
    }

    /// Build from plain HTTP request parts, the way the edge would record them.
    pub fn from_http(method: &http::Method, uri: &http::Uri, headers: &http::HeaderMap) -> Self {
        let mut recorded = Headers::new();
        for (name, value) in headers {
            // Non-UTF-8 values cannot be represented in the edge record.
            if let Ok(value) = value.to_str() {
                recorded.append(name.as_str(), value);
            }
        }

        Self {
            method: method.as_str().to_string(),
            uri: uri.path().to_string(),
            headers: recorded,
            querystring: uri.query().map(str::to_string),
        }
    }

    /// The query string, treating an empty one as absent.
    pub fn non_empty_querystring(&self) -> Option<&str> {
        self.querystring.as_deref().filter(|q| !q.is_empty())
    }

    pub fn host(&self) -> Option<&str> {
        self.headers.first("host")
    }
}
