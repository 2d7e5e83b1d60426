use crate::ctx::{Decision, ViewerRequest};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("event is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("event has no Records[0].cf.request")]
    MissingRequest,

    #[error("viewer request record is malformed: {0}")]
    MalformedRequest(#[source] serde_json::Error),
}

/// A parsed viewer-request event.
///
/// The raw request record is kept next to its typed form so an allowed request can be echoed
/// back exactly as received.
#[derive(Debug)]
pub struct ViewerRequestEvent {
    raw: Value,
    request: ViewerRequest,
}

impl ViewerRequestEvent {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EventError> {
        let event: Value = serde_json::from_slice(bytes)?;
        Self::from_value(event)
    }

    pub fn from_value(mut event: Value) -> Result<Self, EventError> {
        let raw = event
            .pointer_mut("/Records/0/cf/request")
            .map(Value::take)
            .ok_or(EventError::MissingRequest)?;

        if !raw.is_object() {
            return Err(EventError::MissingRequest);
        }

        let request =
            serde_json::from_value(raw.clone()).map_err(EventError::MalformedRequest)?;

        Ok(Self { raw, request })
    }

    pub fn request(&self) -> &ViewerRequest {
        &self.request
    }

    /// The invocation result: the untouched request record, or the synthetic response.
    pub fn into_result(self, decision: Decision) -> Value {
        match decision {
            Decision::Allow => self.raw,
            // EdgeResponse only holds strings and string lists.
            Decision::Respond(resp) => serde_json::to_value(resp).unwrap_or(Value::Null),
        }
    }
}
