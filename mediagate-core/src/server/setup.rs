use crate::conf::{DevProxyConfig, GatekeeperConfig};
use crate::handler::RequestHandler;
use crate::server::proxy::DevProxy;
use anyhow::{Context, Error, Result};
use pingora::prelude::*;
use pingora::server::Server;

/// Run the dev proxy until the process is stopped.
pub fn run(gatekeeper: GatekeeperConfig, proxy: DevProxyConfig) -> Result<()> {
    let listen = proxy.listen_addr();
    let cdn = proxy.cdn_base_url.to_string();

    let server = build_pingora_server(&gatekeeper, proxy)?;

    ctrlc::set_handler(|| {
        tracing::info!("shutting down dev proxy");
        std::process::exit(0);
    })?;

    tracing::info!(listen, cdn, "dev proxy started");

    server.run_forever();
}

/// Build the Pingora server.
pub fn build_pingora_server(
    gatekeeper: &GatekeeperConfig,
    proxy: DevProxyConfig,
) -> Result<Server, Error> {
    // "None" is required here to truly tell Pingora to use its default settings.
    let mut server = Server::new(None)?;
    server.bootstrap();

    let handler =
        RequestHandler::from_config(gatekeeper).context("failed to build authorization client")?;

    let listen = proxy.listen_addr();
    let gateway = DevProxy { handler, proxy };

    // Build HTTP proxy service from Pingora.
    let mut svc = http_proxy_service(&server.configuration, gateway);
    svc.add_tcp(&listen);

    server.add_service(svc);

    Ok(server)
}
