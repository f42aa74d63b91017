//! Dynamic row record

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::Value;
use crate::error::FieldError;

/// Reserved key holding the row id in JSON and accessor paths.
pub const ID_FIELD: &str = "id";

/// Name of the field consulted by the sort tie-break.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Unique identifier of a row, either a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Number(i64),
    Text(String),
}

impl RowId {
    /// Returns the id as a cell value.
    pub fn to_value(&self) -> Value {
        match self {
            RowId::Number(n) => Value::Int(*n),
            RowId::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Number(n) => write!(f, "{}", n),
            RowId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(v: i64) -> Self {
        RowId::Number(v)
    }
}

impl From<i32> for RowId {
    fn from(v: i32) -> Self {
        RowId::Number(v as i64)
    }
}

impl From<&str> for RowId {
    fn from(v: &str) -> Self {
        RowId::Text(v.to_string())
    }
}

impl From<String> for RowId {
    fn from(v: String) -> Self {
        RowId::Text(v)
    }
}

/// A row of tabular data.
///
/// Records hold field values as a `HashMap<String, Value>` next to a mandatory
/// id. The table engine only ever reads them.
///
/// # Example
///
/// ```
/// use tabkit_lib::model::Record;
///
/// let record = Record::new(1)
///     .set("name", "Ada")
///     .set("score", 42i64);
///
/// assert_eq!(record.get_string("name").unwrap(), Some("Ada"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The unique identifier of the row.
    pub(crate) id: RowId,

    /// The field values.
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record with the given id.
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    /// Returns the row id.
    pub fn id(&self) -> &RowId {
        &self.id
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Sets a field value (builder pattern).
    ///
    /// `id` is reserved for the row id; a field by that name is dropped.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts a field value. A field named `id` is dropped, as with [`Record::set`].
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        if field == ID_FIELD {
            log::warn!("ignoring field 'id' on row {}; it is reserved for the row id", self.id);
            return;
        }
        self.fields.insert(field, value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Path resolution
    // =========================================================================

    /// Resolves a dotted accessor path such as `user.email`.
    ///
    /// The first segment names a field, or `id` for the row id; later
    /// segments walk into nested JSON. Anything missing along the way, and a
    /// final `null`, resolves to `None`.
    pub fn resolve(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;

        let mut current = if first == ID_FIELD {
            self.id.to_value()
        } else {
            self.fields.get(first)?.clone()
        };
        for segment in segments {
            current = current.child(segment)?;
        }

        if current.is_null() { None } else { Some(current) }
    }

    /// Returns the tie-break timestamp, `0` when absent, not a number or NaN.
    pub fn timestamp(&self) -> f64 {
        self.fields
            .get(TIMESTAMP_FIELD)
            .and_then(Value::as_f64)
            .filter(|t| !t.is_nan())
            .unwrap_or(0.0)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(field, "string", other)),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other)),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other)),
        }
    }

    /// Gets an f64 field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(*n as f64)), // Allow widening
            Some(other) => Err(FieldError::type_mismatch(field, "float", other)),
        }
    }

    /// Gets an array or object field value.
    pub fn get_json(&self, field: &str) -> Result<Option<&serde_json::Value>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Json(json)) => Ok(Some(json)),
            Some(other) => Err(FieldError::type_mismatch(field, "json", other)),
        }
    }
}
