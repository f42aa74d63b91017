//! Error types

mod field;
mod schema;
mod validation;
mod view;

pub use field::*;
pub use schema::*;
pub use validation::*;
pub use view::*;
