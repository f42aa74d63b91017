//! In-memory data core for the kit's table and data-entry components.
//!
//! [`table`] sorts, filters and exports rows; [`form`] validates records
//! against nested field schemas before submit.

pub mod error;
pub mod form;
pub mod model;
pub mod table;
