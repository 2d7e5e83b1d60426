mod proxy;
mod setup;

pub use proxy::{DevProxy, ProxyCtx};
pub use setup::{build_pingora_server, run};
