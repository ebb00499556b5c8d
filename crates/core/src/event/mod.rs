//! Request view, route selection and response envelopes.

mod envelope;
mod error;
mod request;
mod response;
mod route;

pub use envelope::{
    failure, success, EmptyReads, Outcome, ResponseOptions, FAILURE_STATUS, SUCCESS_STATUS,
};
pub use error::RouteError;
pub use request::RouteRequest;
pub use response::Envelope;
pub use route::{Route, DELETE, GET, POST, PUT};
