use crate::authz::{AccessAuthorizer, AccessTarget, AuthorizationError, AuthorizationOutcome};
use crate::conf::GatekeeperConfig;
use async_trait::async_trait;
use http::header::{ACCEPT, COOKIE};
use reqwest::Client;

/// Header carrying the shared secret that identifies the edge to the website.
pub const EDGE_SECRET_HEADER: &str = "X-Edge-Secret";

/// [`AccessAuthorizer`] backed by the website's HTTP API.
#[derive(Clone, Debug)]
pub struct WebsiteApiClient {
    http: Client,
    website_base_url: String,
    session_cookie_name: String,
    shared_secret: String,
}

impl WebsiteApiClient {
    pub fn new(config: &GatekeeperConfig) -> Result<Self, AuthorizationError> {
        // Redirects are answers too; they surface as unexpected statuses.
        let http = Client::builder()
            .timeout(config.authorization_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthorizationError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            http,
            website_base_url: config.website_base_url.clone(),
            session_cookie_name: config.session_cookie_name.clone(),
            shared_secret: config.shared_secret.clone(),
        })
    }

    pub async fn check_room_access(
        &self,
        room_id: &str,
        session_token: &str,
    ) -> Result<AuthorizationOutcome, AuthorizationError> {
        self.authorize(&AccessTarget::Room(room_id.to_string()), session_token)
            .await
    }

    pub async fn check_document_input_access(
        &self,
        document_input_id: &str,
        session_token: &str,
    ) -> Result<AuthorizationOutcome, AuthorizationError> {
        self.authorize(
            &AccessTarget::DocumentInput(document_input_id.to_string()),
            session_token,
        )
        .await
    }

    pub async fn check_media_trash_access(
        &self,
        session_token: &str,
    ) -> Result<AuthorizationOutcome, AuthorizationError> {
        self.authorize(&AccessTarget::MediaTrash, session_token).await
    }
}

#[async_trait]
impl AccessAuthorizer for WebsiteApiClient {
    async fn authorize(
        &self,
        target: &AccessTarget,
        session_token: &str,
    ) -> Result<AuthorizationOutcome, AuthorizationError> {
        let url = target.endpoint_url(&self.website_base_url);

        tracing::debug!(%target, url, "calling authorization endpoint");

        let resp = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(
                COOKIE,
                format!("{}={}", self.session_cookie_name, session_token),
            )
            .header(EDGE_SECRET_HEADER, &self.shared_secret)
            .send()
            .await
            .map_err(|e| AuthorizationError::from_reqwest(&url, e))?;

        Ok(AuthorizationOutcome {
            status_code: resp.status().as_u16(),
        })
    }
}
