use crate::ctx::EdgeResponse;

/// Outcome of one handler invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Forward the original request to the origin unchanged.
    Allow,

    /// Stop here and return this response to the viewer.
    Respond(EdgeResponse),
}

impl Decision {
    pub fn response(&self) -> Option<&EdgeResponse> {
        match self {
            Decision::Allow => None,
            Decision::Respond(resp) => Some(resp),
        }
    }
}

impl From<EdgeResponse> for Decision {
    fn from(resp: EdgeResponse) -> Self {
        Decision::Respond(resp)
    }
}
