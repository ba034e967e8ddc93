use crate::attributes::AttrValue;
use crate::error::{PropflowError, Result};
use serde::{Deserialize, Serialize};

/// A dispatched action: a `type` tag plus an optional payload.
///
/// Serialized as `{"type": "...", "payload": ...}`; both fields may be
/// omitted, in which case the tag is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action<P = AttrValue> {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub payload: Option<P>,
}

impl<P> Action<P> {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: impl Into<P>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// The payload, or `MissingAttribute("payload")` when there is none.
    pub fn require_payload(&self) -> Result<&P> {
        self.payload
            .as_ref()
            .ok_or_else(|| PropflowError::missing("payload"))
    }
}
