pub mod authz;
pub mod classify;
pub mod cli;
pub mod conf;
pub mod cookie;
pub mod ctx;
pub mod handler;
pub mod logging;
pub mod respond;
#[cfg(feature = "dev_proxy")]
pub mod server;

#[cfg(test)]
mod test_helpers;

pub use handler::RequestHandler;
