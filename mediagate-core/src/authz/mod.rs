//! Outbound access checks against the website's authorization API.

mod error;
pub mod urls;
mod website_api;

pub use error::AuthorizationError;
pub use website_api::{EDGE_SECRET_HEADER, WebsiteApiClient};

use async_trait::async_trait;
use std::fmt;

/// The protected resource a request is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessTarget {
    Room(String),
    DocumentInput(String),
    MediaTrash,
}

impl AccessTarget {
    /// Endpoint of the authorization API that decides about this target.
    pub fn endpoint_url(&self, website_base_url: &str) -> String {
        match self {
            AccessTarget::Room(room_id) => urls::room_access_url(website_base_url, room_id),
            AccessTarget::DocumentInput(document_input_id) => {
                urls::document_input_access_url(website_base_url, document_input_id)
            }
            AccessTarget::MediaTrash => urls::media_trash_access_url(website_base_url),
        }
    }
}

impl fmt::Display for AccessTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessTarget::Room(id) => write!(f, "room:{id}"),
            AccessTarget::DocumentInput(id) => write!(f, "document-input:{id}"),
            AccessTarget::MediaTrash => f.write_str("media-trash"),
        }
    }
}

/// HTTP status returned by the authorization service. The body is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationOutcome {
    pub status_code: u16,
}

/// Asks a remote service whether a session may read a target.
///
/// One call per invocation. Implementations never retry and never cache.
#[async_trait]
pub trait AccessAuthorizer: Send + Sync {
    async fn authorize(
        &self,
        target: &AccessTarget,
        session_token: &str,
    ) -> Result<AuthorizationOutcome, AuthorizationError>;
}
