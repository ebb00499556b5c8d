//! Construction of `UpdateItem` expressions from arbitrary change sets.

mod error;
mod expression;

pub use error::UpdateError;
pub use expression::UpdateExpression;
