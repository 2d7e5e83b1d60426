mod dev_proxy;
mod env;
pub mod error;
mod gatekeeper;
#[cfg(test)]
mod tests;

pub use dev_proxy::*;
pub use env::{Lookup, ProcessEnv};
pub use error::ConfigError;
pub use gatekeeper::*;
