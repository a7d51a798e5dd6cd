//! Message container for a single field path

use serde::Deserialize;
use serde::Serialize;

/// The message(s) recorded for one field path.
///
/// Servers report either a bare message or a list of messages per path;
/// both shapes are accepted and read back as a list.
///
/// # Example
///
/// ```
/// use formstate_lib::validation::Messages;
///
/// let one = Messages::from("Value is required");
/// let many = Messages::from(vec!["Too short", "Must contain a digit"]);
///
/// assert_eq!(one.first(), Some("Value is required"));
/// assert_eq!(many.to_vec().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Messages {
    /// A single bare message.
    One(String),
    /// An ordered list of messages. May be empty.
    Many(Vec<String>),
}

impl Messages {
    /// Returns the first message, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(message) => Some(message.as_str()),
            Self::Many(messages) => messages.first().map(String::as_str),
        }
    }

    /// Returns all messages as an owned list.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(message) => vec![message.clone()],
            Self::Many(messages) => messages.clone(),
        }
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(messages) => messages.len(),
        }
    }

    /// Returns `true` if there is no active message.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts a JSON value into messages.
    ///
    /// Strings become [`Messages::One`], arrays become [`Messages::Many`].
    /// Non-string array entries and other scalars are kept as their JSON
    /// text; `null` yields an empty list.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::One(s.clone()),
            serde_json::Value::Array(items) => Self::Many(items.iter().map(json_text).collect()),
            serde_json::Value::Null => Self::Many(Vec::new()),
            other => Self::One(other.to_string()),
        }
    }
}

fn json_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl From<&str> for Messages {
    fn from(v: &str) -> Self {
        Messages::One(v.to_string())
    }
}

impl From<String> for Messages {
    fn from(v: String) -> Self {
        Messages::One(v)
    }
}

impl From<Vec<String>> for Messages {
    fn from(v: Vec<String>) -> Self {
        Messages::Many(v)
    }
}

impl From<Vec<&str>> for Messages {
    fn from(v: Vec<&str>) -> Self {
        Messages::Many(v.into_iter().map(str::to_string).collect())
    }
}
