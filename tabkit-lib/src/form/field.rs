//! Field schema for data-entry panels.

use regex::Regex;

/// What kind of input a field is.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Text,
    /// Numbers, or text that parses as one.
    Number,
    Boolean,
    Email,
    /// Text restricted to one of the given options.
    Select(Vec<String>),
    /// A nested object with its own fields.
    Group(Vec<FieldSpec>),
    /// An array whose elements all follow one spec.
    List(Box<FieldSpec>),
}

/// Extra constraints checked after the kind matches.
///
/// Length rules count characters on text and elements on lists. Rules that
/// do not apply to a field's kind are ignored.
#[derive(Debug, Clone)]
pub enum Rule {
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    Pattern(Regex),
    /// A boolean that has to be `true`, e.g. accepting terms.
    Checked,
}

/// One field of a data-entry panel.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Key in the record, or in the enclosing group's object.
    pub key: String,
    /// Human-readable name used in messages.
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
            rules: Vec::new(),
        }
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Number)
    }

    pub fn boolean(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Boolean)
    }

    pub fn email(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Email)
    }

    pub fn select<S: Into<String>>(
        key: impl Into<String>,
        label: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        let options = options.into_iter().map(Into::into).collect();
        Self::new(key, label, FieldKind::Select(options))
    }

    pub fn group(key: impl Into<String>, label: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self::new(key, label, FieldKind::Group(fields))
    }

    /// A list field. The item spec's key is not used; elements are addressed
    /// by index.
    pub fn list(key: impl Into<String>, label: impl Into<String>, item: FieldSpec) -> Self {
        Self::new(key, label, FieldKind::List(Box::new(item)))
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Add a constraint.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}
