use crate::conf::env::{self, Lookup};
use crate::conf::error::ConfigError;
use serde::Serialize;
use std::time::Duration;
use url::Url;

pub const WEBSITE_BASE_URL: &str = "WEBSITE_BASE_URL";
pub const SESSION_COOKIE_NAME: &str = "SESSION_COOKIE_NAME";
pub const EDGE_SHARED_SECRET: &str = "EDGE_SHARED_SECRET";
pub const DISABLE_LOGGING: &str = "DISABLE_LOGGING";
pub const AUTHORIZATION_TIMEOUT_MS: &str = "AUTHORIZATION_TIMEOUT_MS";

const DEFAULT_AUTHORIZATION_TIMEOUT_MS: u64 = 3_000;

/// Process-wide gatekeeper settings.
///
/// Built once at startup and shared read-only between all invocations.
#[derive(Clone, Debug, Serialize)]
pub struct GatekeeperConfig {
    /// Base URL of the website, without a trailing slash.
    pub website_base_url: String,

    /// Scheme of the website, which the CDN shares (`http` or `https`).
    pub site_scheme: String,

    pub session_cookie_name: String,

    /// Sent as `X-Edge-Secret` so the website can trust the caller.
    #[serde(skip_serializing)]
    pub shared_secret: String,

    pub disable_logging: bool,

    #[serde(serialize_with = "serialize_millis")]
    pub authorization_timeout: Duration,
}

impl GatekeeperConfig {
    /// Load from the process environment, failing fast on the first missing or invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env::ProcessEnv)
    }

    pub fn from_lookup(lookup: &impl Lookup) -> Result<Self, ConfigError> {
        let raw_base_url = env::required(lookup, WEBSITE_BASE_URL)?;
        let base_url: Url = env::http_url(WEBSITE_BASE_URL, &raw_base_url)?;

        let session_cookie_name = env::required(lookup, SESSION_COOKIE_NAME)?;
        let shared_secret = env::required(lookup, EDGE_SHARED_SECRET)?;

        let disable_logging = env::optional(lookup, DISABLE_LOGGING).as_deref() == Some("true");

        let authorization_timeout = match env::optional(lookup, AUTHORIZATION_TIMEOUT_MS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: AUTHORIZATION_TIMEOUT_MS,
                        value: raw,
                    });
                }
            },
            None => Duration::from_millis(DEFAULT_AUTHORIZATION_TIMEOUT_MS),
        };

        Ok(Self {
            website_base_url: raw_base_url.trim_end_matches('/').to_string(),
            site_scheme: base_url.scheme().to_string(),
            session_cookie_name,
            shared_secret,
            disable_logging,
            authorization_timeout,
        })
    }

    /// Login page of the website.
    pub fn login_page_url(&self) -> String {
        format!("{}/login", self.website_base_url)
    }
}

fn serialize_millis<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(value.as_millis() as u64)
}
