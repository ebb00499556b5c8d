use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Acknowledgment of a write: the key that was written and the store's
/// request id, when the store reports one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreAck {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl StoreAck {
    /// Creates an acknowledgment without a request id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            request_id: None,
        }
    }
}

impl From<StoreAck> for Value {
    fn from(ack: StoreAck) -> Self {
        match ack.request_id {
            Some(request_id) => json!({"id": ack.id, "requestId": request_id}),
            None => json!({"id": ack.id}),
        }
    }
}
