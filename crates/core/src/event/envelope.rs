//! Uniform success and failure envelopes.
//!
//! Every invocation answers with a status code and a JSON document: `{message, body}` on success and
//! `{message, errorMsg, errorStack}` on failure.

use serde_json::{json, Value};

use crate::item::Item;
use crate::storage::StoreAck;

use super::Envelope;

pub const SUCCESS_STATUS: u16 = 200;
pub const FAILURE_STATUS: u16 = 500;

const FAILURE_MESSAGE: &str = "Failed to perform operation.";
const REDACTED_ERROR: &str = "Internal error";

/// How reads that found nothing are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyReads {
    /// A missing item and an empty scan render as `{}`; an empty query as `[]`.
    #[default]
    Legacy,
    /// A missing item renders as `null`; every empty collection as `[]`.
    Normalized,
}

impl EmptyReads {
    /// Parses `legacy` or `normalized`, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" => Some(Self::Legacy),
            "normalized" => Some(Self::Normalized),
            _ => None,
        }
    }
}

/// Rendering switches applied to every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseOptions {
    pub empty_reads: EmptyReads,
    /// When false, failure envelopes carry a generic message and no chain.
    pub expose_error_detail: bool,
}

impl Default for ResponseOptions {
    fn default() -> Self {
        Self {
            empty_reads: EmptyReads::Legacy,
            expose_error_detail: true,
        }
    }
}

/// The result of a successful operation, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// get-by-id
    Item(Option<Item>),
    /// scan-all
    Scan(Vec<Item>),
    /// query-by-id-and-category
    Query(Vec<Item>),
    /// create, update-by-id, delete-by-id
    Write(StoreAck),
}

impl Outcome {
    /// Renders the outcome as the `body` field of a success envelope.
    pub fn into_body(self, empty_reads: EmptyReads) -> Value {
        match (self, empty_reads) {
            (Self::Item(Some(item)), _) => item.into(),
            (Self::Item(None), EmptyReads::Legacy) => json!({}),
            (Self::Item(None), EmptyReads::Normalized) => Value::Null,
            (Self::Scan(items), EmptyReads::Legacy) if items.is_empty() => json!({}),
            (Self::Scan(items), _) | (Self::Query(items), _) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            (Self::Write(ack), _) => ack.into(),
        }
    }
}

/// Builds the 200 envelope for `method`.
pub fn success(method: &str, outcome: Outcome, options: &ResponseOptions) -> Envelope {
    Envelope::new(
        SUCCESS_STATUS,
        json!({
            "message": format!("Successfully finished operation: \"{method}\""),
            "body": outcome.into_body(options.empty_reads),
        }),
    )
}

/// Builds the 500 envelope.
///
/// `error_stack` is the error together with its source chain.
pub fn failure(error_msg: &str, error_stack: &str, options: &ResponseOptions) -> Envelope {
    let body = if options.expose_error_detail {
        json!({
            "message": FAILURE_MESSAGE,
            "errorMsg": error_msg,
            "errorStack": error_stack,
        })
    } else {
        json!({
            "message": FAILURE_MESSAGE,
            "errorMsg": REDACTED_ERROR,
        })
    };

    Envelope::new(FAILURE_STATUS, body)
}
