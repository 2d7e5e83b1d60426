//! Builders for the terminal edge responses.

use crate::authz::urls::login_page_url;
use crate::conf::GatekeeperConfig;
use crate::ctx::{EdgeResponse, ViewerRequest};
use http::StatusCode;

#[derive(Debug, Clone)]
pub struct ResponseSynthesizer {
    website_base_url: String,
    site_scheme: String,
}

impl ResponseSynthesizer {
    pub fn new(config: &GatekeeperConfig) -> Self {
        Self {
            website_base_url: config.website_base_url.clone(),
            site_scheme: config.site_scheme.clone(),
        }
    }

    /// Absolute URL the viewer asked for. `None` when the request carries no `Host`.
    pub fn request_url(&self, request: &ViewerRequest) -> Option<String> {
        let host = request.host()?;
        let mut url = format!("{}://{}{}", self.site_scheme, host, request.uri);

        if let Some(query) = request.non_empty_querystring() {
            url.push('?');
            url.push_str(query);
        }

        Some(url)
    }

    /// 302 to the login page, which sends the viewer back here afterwards.
    pub fn login_redirect(&self, request: &ViewerRequest) -> Option<EdgeResponse> {
        let redirect = self.request_url(request)?;
        let location = login_page_url(&self.website_base_url, &redirect);

        Some(EdgeResponse::new(StatusCode::FOUND).header("Location", location))
    }

    pub fn forbidden(&self) -> EdgeResponse {
        EdgeResponse::new(StatusCode::FORBIDDEN)
    }

    pub fn not_found(&self) -> EdgeResponse {
        EdgeResponse::new(StatusCode::NOT_FOUND)
    }

    pub fn internal_server_error(&self) -> EdgeResponse {
        EdgeResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
