use crate::conf::env::{self, Lookup};
use crate::conf::error::ConfigError;
use serde::Serialize;
use url::Url;

pub const PORT: &str = "PORT";
pub const CDN_BASE_URL: &str = "CDN_BASE_URL";

const DEFAULT_PORT: u16 = 10_000;
const DEFAULT_CDN_BASE_URL: &str = "http://localhost:9000/dev-cdn";

/// Settings of the local dev proxy that stands in for the CDN edge.
#[derive(Clone, Debug, Serialize)]
pub struct DevProxyConfig {
    pub port: u16,

    #[serde(serialize_with = "serialize_url")]
    pub cdn_base_url: Url,
}

impl DevProxyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env::ProcessEnv)
    }

    pub fn from_lookup(lookup: &impl Lookup) -> Result<Self, ConfigError> {
        let port = match env::optional(lookup, PORT) {
            Some(raw) => match raw.parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => {
                    return Err(ConfigError::InvalidPort {
                        name: PORT,
                        value: raw,
                    });
                }
            },
            None => DEFAULT_PORT,
        };

        let raw_cdn = env::optional(lookup, CDN_BASE_URL)
            .unwrap_or_else(|| DEFAULT_CDN_BASE_URL.to_string());
        let cdn_base_url = env::http_url(CDN_BASE_URL, &raw_cdn)?;

        Ok(Self { port, cdn_base_url })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Host and port of the CDN, with the scheme's default port filled in.
    pub fn cdn_host_port(&self) -> (String, u16) {
        let host = self.cdn_base_url.host_str().unwrap_or("localhost").to_string();
        let port = self.cdn_base_url.port_or_known_default().unwrap_or(80);
        (host, port)
    }

    pub fn cdn_uses_tls(&self) -> bool {
        self.cdn_base_url.scheme() == "https"
    }

    /// `Host` header value for requests forwarded to the CDN.
    pub fn cdn_authority(&self) -> String {
        let host = self.cdn_base_url.host_str().unwrap_or("localhost");
        match self.cdn_base_url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// Prefix the CDN base path to a forwarded path-and-query.
    pub fn cdn_path(&self, path_and_query: &str) -> String {
        let prefix = self.cdn_base_url.path().trim_end_matches('/');
        format!("{prefix}{path_and_query}")
    }
}

fn serialize_url<S>(value: &Url, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(value.as_str())
}
