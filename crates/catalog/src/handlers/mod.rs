mod error;
mod products;

pub use error::failure_response;
pub use products::{dispatch, handle_request};
