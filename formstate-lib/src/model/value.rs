//! Value enum for dynamic field values

use chrono::DateTime;
use chrono::Utc;
use indexmap::IndexMap;
use serde::Serialize;

use super::FileValue;

/// An insertion-ordered map of field names to values.
pub type Fields = IndexMap<String, Value>;

/// A dynamic value that can hold any form field.
///
/// Nested objects and arrays can be arbitrarily deep. Files may appear at
/// any depth; their presence switches submissions to multipart encoding.
///
/// # Example
///
/// ```
/// use formstate_lib::Value;
///
/// let name = Value::from("Jane");
/// let age = Value::from(42);
/// let tags = Value::from(vec!["admin", "editor"]);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
    /// Binary file.
    File(FileValue),
    /// Ordered list of values.
    Array(Vec<Value>),
    /// Nested object.
    Object(Fields),
}

impl Value {
    /// Returns the empty string value, used when clearing a form.
    pub fn empty() -> Self {
        Value::String(String::new())
    }

    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::File(_) => "file",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Returns `true` if this value is, or contains at any depth, a file.
    pub fn contains_file(&self) -> bool {
        match self {
            Value::File(_) => true,
            Value::Array(items) => items.iter().any(Value::contains_file),
            Value::Object(fields) => fields.values().any(Value::contains_file),
            _ => false,
        }
    }

    /// Returns a structural copy that shares nothing mutable with `self`.
    ///
    /// Arrays and objects are rebuilt element by element. Files keep pointing
    /// at the same content buffer; their bytes are never copied.
    pub fn deep_clone(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Int(n) => Value::Int(*n),
            Value::Float(n) => Value::Float(*n),
            Value::String(s) => Value::String(s.clone()),
            Value::DateTime(dt) => Value::DateTime(*dt),
            Value::File(file) => Value::File(file.clone()),
            Value::Array(items) => Value::Array(items.iter().map(Value::deep_clone).collect()),
            Value::Object(fields) => Value::Object(deep_clone_fields(fields)),
        }
    }

    /// Returns the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements, if this is an array.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the elements mutably, if this is an array.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested fields, if this is an object.
    pub fn as_object(&self) -> Option<&Fields> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns the nested fields mutably, if this is an object.
    pub fn as_object_mut(&mut self) -> Option<&mut Fields> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Deep-copies every value of a field map.
pub fn deep_clone_fields(fields: &Fields) -> Fields {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), v.deep_clone()))
        .collect()
}

/// Merges deep copies of `values` into `target`, overwriting existing keys.
pub fn merge_into(target: &mut Fields, values: &Fields) {
    for (key, value) in values {
        target.insert(key.clone(), value.deep_clone());
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<FileValue> for Value {
    fn from(v: FileValue) -> Self {
        Value::File(v)
    }
}

impl From<Fields> for Value {
    fn from(v: Fields) -> Self {
        Value::Object(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}
