//! Recursive multipart encoder.

use chrono::SecondsFormat;
use log::trace;

use crate::model::Fields;
use crate::model::FileValue;
use crate::model::Value;

/// One named part of a multipart payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// The compound key, e.g. `person[addresses][0][street]`.
    pub key: String,
    /// The part content.
    pub value: PartValue,
}

/// The content of a multipart part.
#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    /// A textual value.
    Text(String),
    /// A binary file sent under its own file name.
    File(FileValue),
}

impl Part {
    fn text(key: String, text: impl Into<String>) -> Self {
        Self {
            key,
            value: PartValue::Text(text.into()),
        }
    }

    fn file(key: String, file: &FileValue) -> Self {
        Self {
            key,
            value: PartValue::File(file.clone()),
        }
    }

    /// Returns the text content, if this is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            PartValue::Text(text) => Some(text),
            PartValue::File(_) => None,
        }
    }

    /// Returns the file, if this is a file part.
    pub fn as_file(&self) -> Option<&FileValue> {
        match &self.value {
            PartValue::File(file) => Some(file),
            PartValue::Text(_) => None,
        }
    }
}

/// Flattens fields into ordered multipart parts.
///
/// Nested objects and arrays produce bracketed keys (`parent[child]`,
/// `list[0]`) at any depth. Dates are written as ISO-8601 UTC with
/// milliseconds, booleans as `"1"`/`"0"`, and other scalars as their string
/// form. `Null` values and empty containers produce no part.
///
/// # Example
///
/// ```
/// use formstate_lib::Fields;
/// use formstate_lib::payload::encode;
///
/// let mut fields = Fields::new();
/// fields.insert("foo".into(), "bar".into());
/// fields.insert("list".into(), vec!["x", "y"].into());
/// fields.insert("flag".into(), true.into());
///
/// let keys: Vec<_> = encode(&fields).into_iter().map(|p| p.key).collect();
/// assert_eq!(keys, ["foo", "list[0]", "list[1]", "flag"]);
/// ```
pub fn encode(fields: &Fields) -> Vec<Part> {
    let mut parts = Vec::new();
    encode_fields(&mut parts, fields, None);
    parts
}

fn encode_fields(parts: &mut Vec<Part>, fields: &Fields, parent: Option<&str>) {
    for (property, value) in fields {
        append(parts, key_for(parent, property), value);
    }
}

fn key_for(parent: Option<&str>, property: &str) -> String {
    match parent {
        Some(parent) => format!("{}[{}]", parent, property),
        None => property.to_string(),
    }
}

fn append(parts: &mut Vec<Part>, key: String, value: &Value) {
    trace!("Encoding multipart part {} ({})", key, value.type_name());

    match value {
        Value::Null => {}
        Value::Bool(b) => parts.push(Part::text(key, if *b { "1" } else { "0" })),
        Value::Int(n) => parts.push(Part::text(key, n.to_string())),
        Value::Float(n) => parts.push(Part::text(key, n.to_string())),
        Value::String(s) => parts.push(Part::text(key, s.clone())),
        Value::DateTime(dt) => parts.push(Part::text(key, dt.to_rfc3339_opts(SecondsFormat::Millis, true))),
        Value::File(file) => parts.push(Part::file(key, file)),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                append(parts, format!("{}[{}]", key, index), item);
            }
        }
        Value::Object(fields) => encode_fields(parts, fields, Some(&key)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    fn texts(parts: &[Part]) -> Vec<(&str, Option<&str>)> {
        parts.iter().map(|p| (p.key.as_str(), p.as_text())).collect()
    }

    #[test]
    fn test_scalars_and_lists_in_order() {
        let avatar = FileValue::new("me.png", b"png".to_vec());

        let mut fields = Fields::new();
        fields.insert("foo".into(), "bar".into());
        fields.insert("list".into(), vec!["x", "y"].into());
        fields.insert("flag".into(), true.into());
        fields.insert("avatar".into(), avatar.clone().into());

        let parts = encode(&fields);
        assert_eq!(
            texts(&parts),
            vec![
                ("foo", Some("bar")),
                ("list[0]", Some("x")),
                ("list[1]", Some("y")),
                ("flag", Some("1")),
                ("avatar", None),
            ]
        );
        assert_eq!(parts[4].as_file().map(FileValue::name), Some("me.png"));
        assert!(parts[4].as_file().unwrap().ptr_eq(&avatar));
    }

    #[test]
    fn test_false_is_zero() {
        let mut fields = Fields::new();
        fields.insert("subscribed".into(), false.into());

        assert_eq!(texts(&encode(&fields)), vec![("subscribed", Some("0"))]);
    }

    #[test]
    fn test_nested_objects_and_arrays() {
        let mut address = Fields::new();
        address.insert("street".into(), "Main St".into());
        address.insert("number".into(), 12.into());

        let mut person = Fields::new();
        person.insert("name".into(), "Jane".into());
        person.insert("addresses".into(), Value::Array(vec![Value::Object(address)]));

        let mut fields = Fields::new();
        fields.insert("person".into(), Value::Object(person));
        fields.insert("matrix".into(), Value::Array(vec![vec![1, 2].into(), vec![3].into()]));

        assert_eq!(
            texts(&encode(&fields)),
            vec![
                ("person[name]", Some("Jane")),
                ("person[addresses][0][street]", Some("Main St")),
                ("person[addresses][0][number]", Some("12")),
                ("matrix[0][0]", Some("1")),
                ("matrix[0][1]", Some("2")),
                ("matrix[1][0]", Some("3")),
            ]
        );
    }

    #[test]
    fn test_dates_are_iso_utc() {
        let when = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let mut fields = Fields::new();
        fields.insert("starts_at".into(), when.into());

        assert_eq!(
            texts(&encode(&fields)),
            vec![("starts_at", Some("2024-01-02T03:04:05.000Z"))]
        );
    }

    #[test]
    fn test_numbers_use_shortest_form() {
        let mut fields = Fields::new();
        fields.insert("whole".into(), 1.0.into());
        fields.insert("half".into(), 0.5.into());
        fields.insert("negative".into(), (-3).into());

        assert_eq!(
            texts(&encode(&fields)),
            vec![("whole", Some("1")), ("half", Some("0.5")), ("negative", Some("-3"))]
        );
    }

    #[test]
    fn test_null_and_empty_containers_are_skipped() {
        let mut fields = Fields::new();
        fields.insert("nothing".into(), Value::Null);
        fields.insert("list".into(), Value::Array(Vec::new()));
        fields.insert("object".into(), Value::Object(Fields::new()));
        fields.insert("name".into(), "".into());

        assert_eq!(texts(&encode(&fields)), vec![("name", Some(""))]);
    }

    #[test]
    fn test_file_lists() {
        let a = FileValue::new("a.txt", b"a".to_vec());
        let b = FileValue::new("b.txt", b"b".to_vec());

        let mut fields = Fields::new();
        fields.insert("attachments".into(), vec![a, b].into());

        let parts = encode(&fields);
        let names: Vec<_> = parts
            .iter()
            .map(|p| (p.key.as_str(), p.as_file().map(FileValue::name)))
            .collect();
        assert_eq!(names, vec![("attachments[0]", Some("a.txt")), ("attachments[1]", Some("b.txt"))]);
    }
}
