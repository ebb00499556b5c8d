mod error;
mod types;

pub use error::ItemError;
pub use types::{Item, CATEGORY_ATTRIBUTE, ID_ATTRIBUTE};
