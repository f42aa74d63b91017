//! Record validation for data-entry panels.
//!
//! A panel is described by a tree of [`FieldSpec`]s. Groups map onto nested
//! objects and lists onto arrays, so validation walks the record recursively
//! and reports each failure under its dotted path.
//!
//! # Example
//!
//! ```
//! use tabkit_lib::form::{FieldSpec, Rule, validate};
//! use tabkit_lib::model::Record;
//!
//! let fields = vec![
//!     FieldSpec::text("username", "Username")
//!         .required()
//!         .rule(Rule::MinLength(3)),
//!     FieldSpec::email("email", "Email").required(),
//! ];
//!
//! let record = Record::new(1).set("username", "al");
//! let result = validate(&fields, &record);
//!
//! assert!(result.is_invalid());
//! assert_eq!(result.errors().len(), 2);
//! ```

mod field;
mod result;
mod validator;

pub use field::{FieldKind, FieldSpec, Rule};
pub use result::ValidationResult;
pub use validator::{validate, validate_value};
