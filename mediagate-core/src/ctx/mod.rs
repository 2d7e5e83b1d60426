mod decision;
mod edge_response;
mod event;
mod headers;
mod viewer_request;

pub use decision::*;
pub use edge_response::*;
pub use event::*;
pub use headers::*;
pub use viewer_request::*;
