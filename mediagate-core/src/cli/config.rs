use crate::conf::{ConfigError, DevProxyConfig, GatekeeperConfig};
use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate the environment configuration and exit
    Check {
        /// Also validate the dev proxy settings
        #[arg(long)]
        dev_proxy: bool,
    },

    /// Print the resolved configuration as JSON (the shared secret is never printed)
    Dump,
}

pub fn run(cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Check { dev_proxy } => check(dev_proxy),
        ConfigCmd::Dump => dump(),
    }
}

pub fn check(dev_proxy: bool) -> Result<()> {
    let gatekeeper = GatekeeperConfig::from_env().unwrap_or_else(|err| fail(err));

    println!("✔ Config loaded successfully");
    println!("✔ website: {}", gatekeeper.website_base_url);
    println!("✔ login page: {}", gatekeeper.login_page_url());
    println!("✔ session cookie: {}", gatekeeper.session_cookie_name);
    println!(
        "✔ authorization timeout: {} ms",
        gatekeeper.authorization_timeout.as_millis()
    );
    println!(
        "✔ logging {}",
        if gatekeeper.disable_logging {
            "disabled"
        } else {
            "enabled"
        }
    );

    if dev_proxy {
        let proxy = DevProxyConfig::from_env().unwrap_or_else(|err| fail(err));
        println!("✔ dev proxy listens on {}", proxy.listen_addr());
        println!("✔ dev proxy forwards to {}", proxy.cdn_base_url);
    }

    Ok(())
}

pub fn dump() -> Result<()> {
    #[derive(Serialize)]
    struct Resolved {
        gatekeeper: GatekeeperConfig,
        dev_proxy: DevProxyConfig,
    }

    let resolved = Resolved {
        gatekeeper: GatekeeperConfig::from_env()?,
        dev_proxy: DevProxyConfig::from_env()?,
    };

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

fn fail(err: ConfigError) -> ! {
    eprintln!("✘ {err}");
    if let Some(hint) = config_error_hint(&err) {
        eprintln!();
        eprintln!("{hint}");
    }
    std::process::exit(1);
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err.variable() {
        "WEBSITE_BASE_URL" => Some(
            "WEBSITE_BASE_URL is the absolute URL of the website, without a path.\n\
             \n\
             Example:\n\
             \n\
             WEBSITE_BASE_URL=https://www.example.org",
        ),

        "SESSION_COOKIE_NAME" => Some(
            "SESSION_COOKIE_NAME names the cookie holding the website session.\n\
             \n\
             Example:\n\
             \n\
             SESSION_COOKIE_NAME=SESSION_ID",
        ),

        "EDGE_SHARED_SECRET" => Some(
            "EDGE_SHARED_SECRET must match the secret the website expects in the X-Edge-Secret header.",
        ),

        "AUTHORIZATION_TIMEOUT_MS" => {
            Some("AUTHORIZATION_TIMEOUT_MS is a number of milliseconds greater than zero.")
        }

        "PORT" => Some("PORT is the local port of the dev proxy, between 1 and 65535."),

        "CDN_BASE_URL" => Some(
            "CDN_BASE_URL is the absolute URL of the CDN bucket the dev proxy forwards to.\n\
             \n\
             Example:\n\
             \n\
             CDN_BASE_URL=http://localhost:9000/dev-cdn",
        ),

        _ => None,
    }
}
