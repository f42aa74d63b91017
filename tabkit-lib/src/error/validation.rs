//! Data-entry validation failures

use std::fmt;

/// The check a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationCode {
    /// Blank value in a required field.
    Required,
    /// Value of the wrong kind, e.g. text where a number belongs.
    WrongType,
    /// Not a well-formed email address.
    Email,
    /// Not one of a select field's options.
    UnknownOption,
    MinLength,
    MaxLength,
    Min,
    Max,
    Pattern,
    /// Unchecked box that has to be checked.
    Checked,
}

impl ValidationCode {
    /// Stable machine-readable name, e.g. `min_length`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::WrongType => "type",
            Self::Email => "email",
            Self::UnknownOption => "option",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::Min => "min",
            Self::Max => "max",
            Self::Pattern => "pattern",
            Self::Checked => "checked",
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed field, reported under its dotted path (`contacts.1.email`).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field}: {message} ({code})")]
pub struct FieldValidationError {
    pub field: String,
    /// Message meant for the person filling in the panel.
    pub message: String,
    pub code: ValidationCode,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: ValidationCode) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_path_and_code() {
        let error = FieldValidationError::new(
            "contacts.1.email",
            "Email must be a valid email address",
            ValidationCode::Email,
        );
        assert_eq!(
            error.to_string(),
            "contacts.1.email: Email must be a valid email address (email)"
        );
        assert_eq!(ValidationCode::WrongType.to_string(), "type");
        assert_eq!(ValidationCode::UnknownOption.as_str(), "option");
    }
}
