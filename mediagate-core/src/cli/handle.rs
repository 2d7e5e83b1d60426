use crate::conf::GatekeeperConfig;
use crate::ctx::ViewerRequestEvent;
use crate::handler::RequestHandler;
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Run the handler once on a viewer-request event and print the invocation result.
///
/// Reads the event from `path`, or from stdin when no path is given.
pub fn run(config: &GatekeeperConfig, path: Option<&Path>) -> Result<()> {
    let bytes = match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read event file {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read event from stdin")?;
            buf
        }
    };

    let result = evaluate(config, &bytes)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Parse `bytes` as an event and produce the invocation result record.
///
/// Must not be called from inside a Tokio runtime.
pub fn evaluate(config: &GatekeeperConfig, bytes: &[u8]) -> Result<Value> {
    let event = ViewerRequestEvent::from_slice(bytes)?;
    let handler = RequestHandler::from_config(config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build Tokio runtime")?;

    Ok(runtime.block_on(handler.handle_event(event)))
}
