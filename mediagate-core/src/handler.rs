//! The per-request decision procedure.
//!
//! Intent:
//! GUARD METHOD --> CLASSIFY --> REQUIRE SESSION --> AUTHORIZE --> (ALLOW | RESPOND)

use crate::authz::{AccessAuthorizer, AuthorizationError, WebsiteApiClient};
use crate::classify::{RequestClassifier, ResourceCategory};
use crate::conf::GatekeeperConfig;
use crate::ctx::{Decision, ViewerRequest, ViewerRequestEvent};
use crate::respond::ResponseSynthesizer;
use serde_json::Value;
use std::sync::Arc;

/// Decides, once per request, whether a viewer request may reach the origin.
///
/// Holds only immutable state, so one instance serves any number of concurrent requests.
#[derive(Clone)]
pub struct RequestHandler {
    classifier: RequestClassifier,
    responses: ResponseSynthesizer,
    authorizer: Arc<dyn AccessAuthorizer>,
}

impl RequestHandler {
    pub fn new(config: &GatekeeperConfig, authorizer: Arc<dyn AccessAuthorizer>) -> Self {
        Self {
            classifier: RequestClassifier::new(config.session_cookie_name.clone()),
            responses: ResponseSynthesizer::new(config),
            authorizer,
        }
    }

    /// Handler that authorizes against the website API.
    pub fn from_config(config: &GatekeeperConfig) -> Result<Self, AuthorizationError> {
        let client = WebsiteApiClient::new(config)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    pub async fn handle(&self, request: &ViewerRequest) -> Decision {
        //---------------------------------------------------------------------
        // 1. Only read requests may reach this point
        //---------------------------------------------------------------------
        if request.method != "GET" && request.method != "HEAD" {
            tracing::warn!(method = %request.method, "non-read request reached the edge handler");
            return self.responses.internal_server_error().into();
        }

        //---------------------------------------------------------------------
        // 2. Classify
        //---------------------------------------------------------------------
        let classification = self.classifier.classify(request);

        let Some(target) = classification.access_target() else {
            tracing::debug!(
                category = %classification.category,
                uri = %request.uri,
                "path matches no protected resource"
            );
            return self.responses.not_found().into();
        };

        //---------------------------------------------------------------------
        // 3. A session is required
        //---------------------------------------------------------------------
        let Some(session_token) = classification.session_token.as_deref() else {
            tracing::debug!(
                category = %classification.category,
                %target,
                "no session cookie, redirecting to login"
            );
            return self.login_redirect(request);
        };

        //---------------------------------------------------------------------
        // 4. Authorize (single outbound call)
        //---------------------------------------------------------------------
        let outcome = match self.authorizer.authorize(&target, session_token).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(
                    category = %classification.category,
                    %target,
                    error = %err,
                    detail = ?err,
                    "authorization request failed"
                );
                return self.responses.internal_server_error().into();
            }
        };

        match outcome.status_code {
            200 => Decision::Allow,

            // Cookie present but the session is gone.
            401 => {
                tracing::debug!(
                    category = %classification.category,
                    %target,
                    "session rejected, redirecting to login"
                );
                self.login_redirect(request)
            }

            403 => {
                tracing::debug!(category = %classification.category, %target, "access denied");
                self.responses.forbidden().into()
            }

            status => {
                tracing::warn!(
                    category = %classification.category,
                    %target,
                    status,
                    "unexpected authorization status"
                );
                self.responses.internal_server_error().into()
            }
        }
    }

    /// Run the handler on a CDN event and produce the invocation result record.
    pub async fn handle_event(&self, event: ViewerRequestEvent) -> Value {
        let decision = self.handle(event.request()).await;
        event.into_result(decision)
    }

    /// Whether the dev proxy should consult the handler for `path` at all.
    pub fn guards_path(&self, path: &str) -> bool {
        self.classifier.categorize(path).0 != ResourceCategory::Unknown
    }

    fn login_redirect(&self, request: &ViewerRequest) -> Decision {
        self.responses
            .login_redirect(request)
            .unwrap_or_else(|| {
                tracing::warn!(
                    uri = %request.uri,
                    "cannot build login redirect without a Host header"
                );
                self.responses.internal_server_error()
            })
            .into()
    }
}
