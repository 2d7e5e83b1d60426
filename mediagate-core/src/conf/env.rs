use crate::conf::error::ConfigError;
use url::Url;

/// Looks up a configuration variable by name.
///
/// Production code reads the process environment. Tests pass a closure over a fixed table so
/// several configurations can coexist in one process.
pub trait Lookup {
    fn get(&self, name: &str) -> Option<String>;
}

impl<F> Lookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Reads the real process environment.
pub struct ProcessEnv;

impl Lookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Empty values count as undefined.
pub(crate) fn optional(env: &impl Lookup, name: &'static str) -> Option<String> {
    env.get(name).filter(|v| !v.is_empty())
}

pub(crate) fn required(env: &impl Lookup, name: &'static str) -> Result<String, ConfigError> {
    optional(env, name).ok_or(ConfigError::Missing { name })
}

pub(crate) fn http_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidUrl { name, source })?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme {
            name,
            value: value.to_string(),
        }),
    }
}
