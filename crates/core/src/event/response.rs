use serde_json::Value;

/// Status code and JSON document produced for a request.
///
/// Adapters decide how the document is framed on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub status_code: u16,
    pub body: Value,
}

impl Envelope {
    pub fn new(status_code: u16, body: Value) -> Self {
        Self { status_code, body }
    }
}
