//! Field definitions and coercion.

use crate::datetime::parse_datetime;
use crate::error::CoercionError;
use crate::validate::matches_pattern;
use crate::value::Value;

/// Element kind for array fields.
///
/// `Object` covers arrays of embedded resources; the owning model impl is
/// responsible for hydrating the element objects into typed children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayElement {
    /// Text elements
    Char,
    /// Integer elements
    Int,
    /// Embedded JSON objects
    Object,
}

impl ArrayElement {
    /// Get the kind name of this element type.
    pub const fn type_name(&self) -> &'static str {
        match self {
            ArrayElement::Char => "text",
            ArrayElement::Int => "integer",
            ArrayElement::Object => "object",
        }
    }

    fn coerce(&self, raw: Value) -> Result<Value, CoercionError> {
        match self {
            ArrayElement::Char => coerce_text(raw),
            ArrayElement::Int => coerce_int(raw),
            ArrayElement::Object => match raw {
                Value::Object(_) => Ok(raw),
                other => Err(CoercionError::new("object", describe(&other))),
            },
        }
    }
}

/// Declared kind of a model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int,
    Char,
    DateTime,
    Array(ArrayElement),
}

impl FieldKind {
    /// Get the kind name of this field kind.
    pub const fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Bool => "boolean",
            FieldKind::Int => "integer",
            FieldKind::Char => "text",
            FieldKind::DateTime => "datetime",
            FieldKind::Array(_) => "array",
        }
    }

    /// Coerce a raw value into this kind.
    ///
    /// Null passes through every kind, and coercing an already-coerced
    /// value is a no-op, so coercion is idempotent.
    pub fn coerce(&self, raw: Value) -> Result<Value, CoercionError> {
        if raw.is_null() {
            return Ok(Value::Null);
        }
        match self {
            FieldKind::Bool => coerce_bool(raw),
            FieldKind::Int => coerce_int(raw),
            FieldKind::Char => coerce_text(raw),
            FieldKind::DateTime => coerce_datetime(raw),
            FieldKind::Array(element) => coerce_array(raw, *element),
        }
    }
}

fn coerce_bool(raw: Value) -> Result<Value, CoercionError> {
    match raw {
        Value::Bool(_) => Ok(raw),
        Value::Int(0) => Ok(Value::Bool(false)),
        Value::Int(1) => Ok(Value::Bool(true)),
        Value::Text(ref s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(CoercionError::new("boolean", describe(&raw))),
        },
        other => Err(CoercionError::new("boolean", describe(&other))),
    }
}

fn coerce_int(raw: Value) -> Result<Value, CoercionError> {
    match raw {
        Value::Int(_) => Ok(raw),
        Value::Text(ref s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| CoercionError::new("integer", describe(&raw)).with_source(e)),
        #[allow(clippy::cast_possible_truncation)]
        Value::Double(v)
            if v.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(&v) =>
        {
            Ok(Value::Int(v as i64))
        }
        other => Err(CoercionError::new("integer", describe(&other))),
    }
}

fn coerce_text(raw: Value) -> Result<Value, CoercionError> {
    match raw {
        Value::Text(_) => Ok(raw),
        Value::Int(v) => Ok(Value::Text(v.to_string())),
        Value::Double(v) => Ok(Value::Text(v.to_string())),
        Value::Bool(v) => Ok(Value::Text(v.to_string())),
        other => Err(CoercionError::new("text", describe(&other))),
    }
}

fn coerce_datetime(raw: Value) -> Result<Value, CoercionError> {
    match raw {
        Value::DateTime(_) => Ok(raw),
        Value::Text(ref s) => parse_datetime(s)
            .map(Value::DateTime)
            .ok_or_else(|| CoercionError::new("datetime", describe(&raw))),
        other => Err(CoercionError::new("datetime", describe(&other))),
    }
}

fn coerce_array(raw: Value, element: ArrayElement) -> Result<Value, CoercionError> {
    match raw {
        Value::Array(items) => items
            .into_iter()
            .map(|item| element.coerce(item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Err(CoercionError::new("array", describe(&other))),
    }
}

fn describe(raw: &Value) -> String {
    let shown = raw.to_param();
    if shown.is_empty() {
        raw.type_name().to_string()
    } else {
        shown
    }
}

/// Metadata about a model field.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    /// Rust field name
    pub name: &'static str,
    /// Remote payload key (may differ from the field name)
    pub rest_name: &'static str,
    /// Declared kind for this field
    pub kind: FieldKind,
    /// Whether the backend assigns this field; excluded from outbound parameters
    pub backend_generated: bool,
    /// Maximum length (in characters) for text fields
    pub max_length: Option<usize>,
    /// Regex constraint for text fields
    pub pattern: Option<&'static str>,
    /// Default value as a JSON literal, coerced through `kind`
    pub default: Option<&'static str>,
}

impl FieldInfo {
    /// Create a new field info; the remote name defaults to the field name.
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            rest_name: name,
            kind,
            backend_generated: false,
            max_length: None,
            pattern: None,
            default: None,
        }
    }

    /// Set the remote payload key.
    pub const fn rest_name(mut self, name: &'static str) -> Self {
        self.rest_name = name;
        self
    }

    /// Set the backend-generated flag.
    pub const fn backend_generated(mut self, value: bool) -> Self {
        self.backend_generated = value;
        self
    }

    /// Set the maximum length for text fields.
    pub const fn max_length(mut self, value: usize) -> Self {
        self.max_length = Some(value);
        self
    }

    /// Set a regex constraint for text fields.
    pub const fn pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Set the default value as a JSON literal.
    pub const fn default(mut self, literal: &'static str) -> Self {
        self.default = Some(literal);
        self
    }

    /// Coerce a raw value through this field's kind and constraints.
    ///
    /// Errors carry the field name and preserve the underlying cause.
    pub fn coerce(&self, raw: Value) -> Result<Value, CoercionError> {
        let value = self
            .kind
            .coerce(raw)
            .map_err(|e| e.for_field(self.name))?;
        self.check_constraints(&value)?;
        Ok(value)
    }

    fn check_constraints(&self, value: &Value) -> Result<(), CoercionError> {
        let Value::Text(s) = value else {
            return Ok(());
        };
        if let Some(max) = self.max_length {
            let length = s.chars().count();
            if length > max {
                return Err(CoercionError::new(
                    self.kind.type_name(),
                    format!("'{s}' (length {length} exceeds max_length {max})"),
                )
                .for_field(self.name));
            }
        }
        if let Some(pattern) = self.pattern {
            if !matches_pattern(s, pattern) {
                return Err(CoercionError::new(
                    self.kind.type_name(),
                    format!("'{s}' (does not match pattern '{pattern}')"),
                )
                .for_field(self.name));
            }
        }
        Ok(())
    }

    /// Coerce this field's declared default, if any.
    pub fn default_value(&self) -> Result<Option<Value>, CoercionError> {
        let Some(literal) = self.default else {
            return Ok(None);
        };
        let raw: serde_json::Value = serde_json::from_str(literal).map_err(|e| {
            CoercionError::new(self.kind.type_name(), literal)
                .with_source(e)
                .for_field(self.name)
        })?;
        self.coerce(Value::from_json(&raw)).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_name_defaults_to_field_name() {
        let info = FieldInfo::new("color", FieldKind::Char);
        assert_eq!(info.rest_name, "color");

        let aliased = FieldInfo::new("color", FieldKind::Char).rest_name("colour");
        assert_eq!(aliased.rest_name, "colour");
        assert_eq!(aliased.name, "color");
    }

    #[test]
    fn null_passes_every_kind() {
        for kind in [
            FieldKind::Bool,
            FieldKind::Int,
            FieldKind::Char,
            FieldKind::DateTime,
            FieldKind::Array(ArrayElement::Int),
        ] {
            assert_eq!(kind.coerce(Value::Null).unwrap(), Value::Null);
        }
    }

    #[test]
    fn bool_coercion() {
        assert_eq!(
            FieldKind::Bool.coerce(Value::Int(1)).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            FieldKind::Bool.coerce(Value::Text("False".into())).unwrap(),
            Value::Bool(false)
        );
        assert!(FieldKind::Bool.coerce(Value::Int(2)).is_err());
        assert!(FieldKind::Bool.coerce(Value::Text("yes".into())).is_err());
    }

    #[test]
    fn int_coercion_parses_strings() {
        assert_eq!(
            FieldKind::Int.coerce(Value::Text(" 42 ".into())).unwrap(),
            Value::Int(42)
        );
        assert!(FieldKind::Int.coerce(Value::Text("4.2".into())).is_err());
    }

    #[test]
    fn int_coercion_accepts_integral_doubles() {
        assert_eq!(
            FieldKind::Int.coerce(Value::Double(7.0)).unwrap(),
            Value::Int(7)
        );
        assert!(FieldKind::Int.coerce(Value::Double(7.5)).is_err());
    }

    #[test]
    fn int_coercion_error_preserves_cause() {
        let err = FieldKind::Int.coerce(Value::Text("abc".into())).unwrap_err();
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn text_coercion_stringifies_scalars() {
        assert_eq!(
            FieldKind::Char.coerce(Value::Int(7)).unwrap(),
            Value::Text("7".into())
        );
        assert_eq!(
            FieldKind::Char.coerce(Value::Bool(true)).unwrap(),
            Value::Text("true".into())
        );
        assert!(FieldKind::Char.coerce(Value::Array(vec![])).is_err());
    }

    #[test]
    fn datetime_coercion_parses_text() {
        let value = FieldKind::DateTime
            .coerce(Value::Text("2024-05-01 10:30:00".into()))
            .unwrap();
        assert!(matches!(value, Value::DateTime(_)));
        assert!(
            FieldKind::DateTime
                .coerce(Value::Text("not a date".into()))
                .is_err()
        );
        assert!(FieldKind::DateTime.coerce(Value::Int(0)).is_err());
    }

    #[test]
    fn array_of_int_constructs_elements_from_strings() {
        let raw = Value::Array(vec![Value::Text("1".into()), Value::Int(2)]);
        let coerced = FieldKind::Array(ArrayElement::Int).coerce(raw).unwrap();
        assert_eq!(coerced, Value::Array(vec![Value::Int(1), Value::Int(2)]));
    }

    #[test]
    fn array_rejects_non_sequences() {
        let err = FieldKind::Array(ArrayElement::Int)
            .coerce(Value::Text("1,2".into()))
            .unwrap_err();
        assert_eq!(err.expected, "array");
    }

    #[test]
    fn array_of_object_passes_objects_only() {
        let object = Value::Object(serde_json::Map::new());
        let raw = Value::Array(vec![object.clone()]);
        assert_eq!(
            FieldKind::Array(ArrayElement::Object)
                .coerce(raw)
                .unwrap(),
            Value::Array(vec![object])
        );
        assert!(
            FieldKind::Array(ArrayElement::Object)
                .coerce(Value::Array(vec![Value::Int(1)]))
                .is_err()
        );
    }

    #[test]
    fn coercion_is_idempotent() {
        let cases = [
            (FieldKind::Bool, Value::Text("1".into())),
            (FieldKind::Int, Value::Text("42".into())),
            (FieldKind::Char, Value::Int(7)),
            (FieldKind::DateTime, Value::Text("2024-05-01".into())),
            (
                FieldKind::Array(ArrayElement::Int),
                Value::Array(vec![Value::Text("1".into())]),
            ),
        ];
        for (kind, raw) in cases {
            let once = kind.coerce(raw).unwrap();
            let twice = kind.coerce(once.clone()).unwrap();
            assert_eq!(once, twice, "{kind:?} coercion must be idempotent");
        }
    }

    #[test]
    fn max_length_is_enforced() {
        let info = FieldInfo::new("model", FieldKind::Char).max_length(3);
        assert!(info.coerce(Value::Text("abc".into())).is_ok());
        let err = info.coerce(Value::Text("abcd".into())).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("model"));
    }

    #[test]
    fn pattern_is_enforced() {
        let info = FieldInfo::new("slug", FieldKind::Char).pattern(r"^[a-z-]+$");
        assert!(info.coerce(Value::Text("red-car".into())).is_ok());
        assert!(info.coerce(Value::Text("Red Car".into())).is_err());
    }

    #[test]
    fn default_value_is_coerced_through_the_kind() {
        let info = FieldInfo::new("available", FieldKind::Bool).default("true");
        assert_eq!(info.default_value().unwrap(), Some(Value::Bool(true)));

        let info = FieldInfo::new("count", FieldKind::Int).default("\"7\"");
        assert_eq!(info.default_value().unwrap(), Some(Value::Int(7)));

        let info = FieldInfo::new("count", FieldKind::Int);
        assert_eq!(info.default_value().unwrap(), None);
    }

    #[test]
    fn invalid_default_literal_is_an_error() {
        let info = FieldInfo::new("count", FieldKind::Int).default("not json");
        assert!(info.default_value().is_err());
    }
}
