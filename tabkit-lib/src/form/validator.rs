//! Recursive record validation.

use email_address::EmailAddress;

use super::field::{FieldKind, FieldSpec, Rule};
use super::result::ValidationResult;
use crate::error::{FieldValidationError, ValidationCode};
use crate::model::Record;
use crate::model::Value;

/// Validate a record against a panel's fields.
///
/// Each field reports at most one error of its own; groups and lists also
/// report the errors of their children.
pub fn validate(fields: &[FieldSpec], record: &Record) -> ValidationResult {
    let mut errors = Vec::new();
    for field in fields {
        check(field, record.get(&field.key).cloned(), &field.key, &mut errors);
    }

    if !errors.is_empty() {
        log::debug!("validation failed on {} field(s)", errors.len());
    }
    ValidationResult::from_errors(errors)
}

/// Validate a single value against one field, reporting under the field key.
pub fn validate_value(field: &FieldSpec, value: Option<&Value>) -> ValidationResult {
    let mut errors = Vec::new();
    check(field, value.cloned(), &field.key, &mut errors);
    ValidationResult::from_errors(errors)
}

/// Missing, null, whitespace-only text and empty lists count as not filled in.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Json(serde_json::Value::Array(items)) => items.is_empty(),
        _ => false,
    }
}

fn check(field: &FieldSpec, value: Option<Value>, path: &str, errors: &mut Vec<FieldValidationError>) {
    let value = match value {
        Some(value) if !is_blank(&value) => value,
        _ => {
            if field.required {
                errors.push(FieldValidationError::new(
                    path,
                    format!("{} is required", field.label),
                    ValidationCode::Required,
                ));
            }
            return;
        }
    };

    let own = match &field.kind {
        FieldKind::Text => check_text(field, &value, path),
        FieldKind::Number => check_number(field, &value, path),
        FieldKind::Boolean => check_boolean(field, &value, path),
        FieldKind::Email => match value.as_str() {
            Some(s) if !EmailAddress::is_valid(s.trim()) => Some(FieldValidationError::new(
                path,
                format!("{} must be a valid email address", field.label),
                ValidationCode::Email,
            )),
            _ => check_text(field, &value, path),
        },
        FieldKind::Select(options) => match value.as_str() {
            Some(s) if !options.iter().any(|o| o == s) => Some(FieldValidationError::new(
                path,
                format!("{} must be one of: {}", field.label, options.join(", ")),
                ValidationCode::UnknownOption,
            )),
            _ => check_text(field, &value, path),
        },
        FieldKind::Group(children) => match &value {
            Value::Json(serde_json::Value::Object(_)) => {
                for child in children {
                    let child_path = format!("{}.{}", path, child.key);
                    check(child, value.child(&child.key), &child_path, errors);
                }
                None
            }
            _ => Some(type_error(field, path, "an object")),
        },
        FieldKind::List(item) => match &value {
            Value::Json(serde_json::Value::Array(items)) => {
                let own = check_length(field, items.len(), path, "items");
                for (index, element) in items.iter().enumerate() {
                    let child_path = format!("{}.{}", path, index);
                    check(item, Some(Value::from_json(element.clone())), &child_path, errors);
                }
                own
            }
            _ => Some(type_error(field, path, "a list")),
        },
    };

    if let Some(error) = own {
        errors.push(error);
    }
}

fn type_error(field: &FieldSpec, path: &str, expected: &str) -> FieldValidationError {
    FieldValidationError::new(
        path,
        format!("{} must be {}", field.label, expected),
        ValidationCode::WrongType,
    )
}

fn check_text(field: &FieldSpec, value: &Value, path: &str) -> Option<FieldValidationError> {
    let Some(text) = value.as_str() else {
        return Some(type_error(field, path, "text"));
    };

    if let Some(error) = check_length(field, text.chars().count(), path, "characters") {
        return Some(error);
    }

    field.rules.iter().find_map(|rule| match rule {
        Rule::Pattern(re) if !re.is_match(text) => Some(FieldValidationError::new(
            path,
            format!("{} is not in the expected format", field.label),
            ValidationCode::Pattern,
        )),
        _ => None,
    })
}

fn check_length(field: &FieldSpec, len: usize, path: &str, unit: &str) -> Option<FieldValidationError> {
    field.rules.iter().find_map(|rule| match rule {
        Rule::MinLength(min) if len < *min => Some(FieldValidationError::new(
            path,
            format!("{} must be at least {} {}", field.label, min, unit),
            ValidationCode::MinLength,
        )),
        Rule::MaxLength(max) if len > *max => Some(FieldValidationError::new(
            path,
            format!("{} must be at most {} {}", field.label, max, unit),
            ValidationCode::MaxLength,
        )),
        _ => None,
    })
}

fn check_number(field: &FieldSpec, value: &Value, path: &str) -> Option<FieldValidationError> {
    let number = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    };
    let Some(number) = number.filter(|n| n.is_finite()) else {
        return Some(type_error(field, path, "a number"));
    };

    field.rules.iter().find_map(|rule| match rule {
        Rule::Min(min) if number < *min => Some(FieldValidationError::new(
            path,
            format!("{} must be at least {}", field.label, Value::Float(*min)),
            ValidationCode::Min,
        )),
        Rule::Max(max) if number > *max => Some(FieldValidationError::new(
            path,
            format!("{} must be at most {}", field.label, Value::Float(*max)),
            ValidationCode::Max,
        )),
        _ => None,
    })
}

fn check_boolean(field: &FieldSpec, value: &Value, path: &str) -> Option<FieldValidationError> {
    let Some(checked) = value.as_bool() else {
        return Some(type_error(field, path, "true or false"));
    };

    let must_check = field.rules.iter().any(|rule| matches!(rule, Rule::Checked));
    if must_check && !checked {
        return Some(FieldValidationError::new(
            path,
            format!("{} must be checked", field.label),
            ValidationCode::Checked,
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use regex::Regex;
    use serde_json::json;

    use super::*;

    fn codes(result: &ValidationResult) -> Vec<(&str, &str)> {
        result
            .errors()
            .iter()
            .map(|e| (e.field.as_str(), e.code.as_str()))
            .collect()
    }

    #[test]
    fn test_valid_record() {
        let fields = vec![
            FieldSpec::text("name", "Name").required(),
            FieldSpec::number("age", "Age").rule(Rule::Min(0.0)),
        ];
        let record = Record::new(1).set("name", "Ada").set("age", 36i64);
        assert!(validate(&fields, &record).is_valid());
    }

    #[test]
    fn test_required_and_blank() {
        let fields = vec![
            FieldSpec::text("name", "Name").required(),
            FieldSpec::text("nickname", "Nickname"),
        ];
        let record = Record::new(1).set("name", "   ").set("nickname", "");
        let result = validate(&fields, &record);

        assert_eq!(codes(&result), vec![("name", "required")]);
        assert_eq!(result.first_error().unwrap().message, "Name is required");
    }

    #[test]
    fn test_only_first_rule_reported() {
        let fields = vec![FieldSpec::text("code", "Code")
            .rule(Rule::MinLength(4))
            .rule(Rule::Pattern(Regex::new("^[0-9]+$").unwrap()))];
        let record = Record::new(1).set("code", "ab");
        assert_eq!(codes(&validate(&fields, &record)), vec![("code", "min_length")]);
    }

    #[test]
    fn test_number_rules_and_numeric_text() {
        let fields = vec![FieldSpec::number("qty", "Quantity")
            .rule(Rule::Min(1.0))
            .rule(Rule::Max(10.0))];

        let ok = Record::new(1).set("qty", "5");
        assert!(validate(&fields, &ok).is_valid());

        let high = Record::new(1).set("qty", 11i64);
        let result = validate(&fields, &high);
        assert_eq!(result.first_error().unwrap().message, "Quantity must be at most 10");

        let junk = Record::new(1).set("qty", "five");
        assert_eq!(codes(&validate(&fields, &junk)), vec![("qty", "type")]);
    }

    #[test]
    fn test_email_and_select() {
        let fields = vec![
            FieldSpec::email("email", "Email"),
            FieldSpec::select("role", "Role", ["student", "teacher"]),
        ];
        let record = Record::new(1).set("email", "not-an-email").set("role", "admin");
        assert_eq!(
            codes(&validate(&fields, &record)),
            vec![("email", "email"), ("role", "option")]
        );
    }

    #[test]
    fn test_checked_rule() {
        let fields = vec![FieldSpec::boolean("terms", "Terms").rule(Rule::Checked)];
        let record = Record::new(1).set("terms", false);
        assert_eq!(codes(&validate(&fields, &record)), vec![("terms", "checked")]);
    }

    #[test]
    fn test_nested_group_paths() {
        let fields = vec![FieldSpec::group(
            "address",
            "Address",
            vec![
                FieldSpec::text("city", "City").required(),
                FieldSpec::text("zip", "Zip").rule(Rule::MaxLength(5)),
            ],
        )];
        let record = Record::new(1).set("address", json!({"zip": "1234567"}));
        let result = validate(&fields, &record);

        assert_eq!(
            codes(&result),
            vec![("address.city", "required"), ("address.zip", "max_length")]
        );
        assert_eq!(result.errors_for("address").count(), 2);
        assert_eq!(result.errors_for("addr").count(), 0);
    }

    #[test]
    fn test_list_of_groups() {
        let contact = FieldSpec::group(
            "contact",
            "Contact",
            vec![FieldSpec::email("email", "Email").required()],
        );
        let fields = vec![FieldSpec::list("contacts", "Contacts", contact)
            .required()
            .rule(Rule::MaxLength(2))];

        let record = Record::new(1).set(
            "contacts",
            json!([{"email": "a@example.com"}, {"email": "nope"}, {}]),
        );
        let result = validate(&fields, &record);

        assert_eq!(
            codes(&result),
            vec![
                ("contacts.1.email", "email"),
                ("contacts.2.email", "required"),
                ("contacts", "max_length"),
            ]
        );
        assert_eq!(result.first_invalid_field(), Some("contacts.1.email"));
    }

    #[test]
    fn test_empty_required_list() {
        let fields = vec![FieldSpec::list("tags", "Tags", FieldSpec::text("tag", "Tag")).required()];
        let record = Record::new(1).set("tags", json!([]));
        assert_eq!(codes(&validate(&fields, &record)), vec![("tags", "required")]);
    }

    #[test]
    fn test_group_type_mismatch() {
        let fields = vec![FieldSpec::group("address", "Address", Vec::new())];
        let record = Record::new(1).set("address", "12 Main St");
        let result = validate(&fields, &record);
        assert_eq!(result.first_error().unwrap().message, "Address must be an object");
    }

    #[test]
    fn test_validate_value() {
        let field = FieldSpec::number("score", "Score").rule(Rule::Min(0.5));
        let result = validate_value(&field, Some(&Value::Float(0.25)));
        assert_eq!(result.first_error().unwrap().message, "Score must be at least 0.5");
    }
}
