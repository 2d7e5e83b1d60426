use crate::conf::{ConfigError, DevProxyConfig, GatekeeperConfig};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::time::Duration;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let table: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| table.get(name).cloned()
}

fn base_vars() -> Vec<(&'static str, &'static str)> {
    vec![
        ("WEBSITE_BASE_URL", "http://localhost:3000"),
        ("SESSION_COOKIE_NAME", "SESSION_ID"),
        ("EDGE_SHARED_SECRET", "s3cr3t"),
    ]
}

#[test]
fn gatekeeper_loads_required_values() {
    let cfg = GatekeeperConfig::from_lookup(&lookup(&base_vars())).unwrap();

    assert_eq!(cfg.website_base_url, "http://localhost:3000");
    assert_eq!(cfg.site_scheme, "http");
    assert_eq!(cfg.session_cookie_name, "SESSION_ID");
    assert_eq!(cfg.shared_secret, "s3cr3t");
    assert!(!cfg.disable_logging);
    assert_eq!(cfg.authorization_timeout, Duration::from_millis(3_000));
    assert_eq!(cfg.login_page_url(), "http://localhost:3000/login");
}

#[test]
fn gatekeeper_strips_trailing_slash_from_base_url() {
    let mut vars = base_vars();
    vars[0] = ("WEBSITE_BASE_URL", "https://example.org/");

    let cfg = GatekeeperConfig::from_lookup(&lookup(&vars)).unwrap();

    assert_eq!(cfg.website_base_url, "https://example.org");
    assert_eq!(cfg.site_scheme, "https");
}

#[test]
fn gatekeeper_fails_fast_on_missing_variables() {
    for missing in ["WEBSITE_BASE_URL", "SESSION_COOKIE_NAME", "EDGE_SHARED_SECRET"] {
        let vars: Vec<_> = base_vars().into_iter().filter(|(k, _)| *k != missing).collect();

        let err = GatekeeperConfig::from_lookup(&lookup(&vars)).unwrap_err();

        assert!(matches!(err, ConfigError::Missing { .. }));
        assert_eq!(err.variable(), missing);
    }
}

#[test]
fn gatekeeper_treats_empty_value_as_missing() {
    let mut vars = base_vars();
    vars[1] = ("SESSION_COOKIE_NAME", "");

    let err = GatekeeperConfig::from_lookup(&lookup(&vars)).unwrap_err();

    assert_eq!(err.variable(), "SESSION_COOKIE_NAME");
}

#[test]
fn gatekeeper_rejects_relative_base_url() {
    let mut vars = base_vars();
    vars[0] = ("WEBSITE_BASE_URL", "/login");

    let err = GatekeeperConfig::from_lookup(&lookup(&vars)).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidUrl { .. }));
}

#[test]
fn gatekeeper_rejects_non_http_base_url() {
    let mut vars = base_vars();
    vars[0] = ("WEBSITE_BASE_URL", "ftp://example.org");

    let err = GatekeeperConfig::from_lookup(&lookup(&vars)).unwrap_err();

    assert!(matches!(err, ConfigError::UnsupportedScheme { .. }));
}

#[test]
fn gatekeeper_disables_logging_only_on_exact_true() {
    for (raw, expected) in [("true", true), ("TRUE", false), ("1", false), ("false", false)] {
        let mut vars = base_vars();
        vars.push(("DISABLE_LOGGING", raw));

        let cfg = GatekeeperConfig::from_lookup(&lookup(&vars)).unwrap();

        assert_eq!(cfg.disable_logging, expected, "DISABLE_LOGGING={raw}");
    }
}

#[test]
fn gatekeeper_parses_authorization_timeout() {
    let mut vars = base_vars();
    vars.push(("AUTHORIZATION_TIMEOUT_MS", "250"));

    let cfg = GatekeeperConfig::from_lookup(&lookup(&vars)).unwrap();

    assert_eq!(cfg.authorization_timeout, Duration::from_millis(250));
}

#[test]
fn gatekeeper_rejects_zero_timeout() {
    let mut vars = base_vars();
    vars.push(("AUTHORIZATION_TIMEOUT_MS", "0"));

    let err = GatekeeperConfig::from_lookup(&lookup(&vars)).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidNumber { .. }));
}

#[test]
fn gatekeeper_dump_never_contains_secret() {
    let cfg = GatekeeperConfig::from_lookup(&lookup(&base_vars())).unwrap();

    let json = serde_json::to_string(&cfg).unwrap();

    assert!(!json.contains("s3cr3t"));
    assert!(json.contains("\"authorization_timeout\":3000"));
}

#[test]
fn dev_proxy_uses_defaults() {
    let cfg = DevProxyConfig::from_lookup(&lookup(&[])).unwrap();

    assert_eq!(cfg.port, 10_000);
    assert_eq!(cfg.listen_addr(), "0.0.0.0:10000");
    assert_eq!(cfg.cdn_host_port(), ("localhost".to_string(), 9000));
    assert_eq!(cfg.cdn_authority(), "localhost:9000");
    assert!(!cfg.cdn_uses_tls());
    assert_eq!(cfg.cdn_path("/room-media/a/b.png"), "/dev-cdn/room-media/a/b.png");
}

#[test]
fn dev_proxy_fills_default_https_port() {
    let vars = [("CDN_BASE_URL", "https://cdn.example.org")];
    let cfg = DevProxyConfig::from_lookup(&lookup(&vars)).unwrap();

    assert_eq!(cfg.cdn_host_port(), ("cdn.example.org".to_string(), 443));
    assert_eq!(cfg.cdn_authority(), "cdn.example.org");
    assert!(cfg.cdn_uses_tls());
    assert_eq!(cfg.cdn_path("/x?y=1"), "/x?y=1");
}

#[test]
fn dev_proxy_rejects_invalid_port() {
    for raw in ["0", "70000", "http"] {
        let err = DevProxyConfig::from_lookup(&lookup(&[("PORT", raw)])).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidPort { .. }), "PORT={raw}");
    }
}
