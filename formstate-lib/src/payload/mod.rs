//! Request payloads
//!
//! A submission is sent as plain JSON unless one of its values contains a
//! file, in which case the fields are flattened into ordered multipart
//! parts.

mod multipart;

pub use multipart::*;

#[cfg(feature = "http")]
use crate::error::TransportError;
use crate::model::Fields;
use crate::model::Value;

/// The body handed to a [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Field values sent as a JSON object.
    Json(Fields),
    /// Flattened multipart parts, in encoding order.
    Multipart(Vec<Part>),
}

impl Payload {
    /// Builds the payload for the given fields.
    ///
    /// Picks [`Payload::Multipart`] when any value holds a file at any
    /// depth, and [`Payload::Json`] otherwise.
    pub fn from_fields(fields: Fields) -> Self {
        if fields.values().any(Value::contains_file) {
            Payload::Multipart(encode(&fields))
        } else {
            Payload::Json(fields)
        }
    }

    /// Returns `true` if this is a multipart payload.
    pub fn is_multipart(&self) -> bool {
        matches!(self, Payload::Multipart(_))
    }

    /// Returns the JSON fields, if this is a JSON payload.
    pub fn as_json(&self) -> Option<&Fields> {
        match self {
            Payload::Json(fields) => Some(fields),
            Payload::Multipart(_) => None,
        }
    }

    /// Returns the multipart parts, if this is a multipart payload.
    pub fn parts(&self) -> Option<&[Part]> {
        match self {
            Payload::Multipart(parts) => Some(parts),
            Payload::Json(_) => None,
        }
    }

    /// Flattens the payload into `key=value` pairs for a query string.
    ///
    /// Uses the same bracket keys as multipart encoding. File parts have no
    /// textual form and are skipped.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let parts = match self {
            Payload::Json(fields) => encode(fields),
            Payload::Multipart(parts) => parts.clone(),
        };

        parts
            .into_iter()
            .filter_map(|part| match part.value {
                PartValue::Text(text) => Some((part.key, text)),
                PartValue::File(_) => None,
            })
            .collect()
    }

    /// Converts a multipart payload into a reqwest form, preserving order.
    ///
    /// Returns `None` for JSON payloads. Fails with
    /// [`TransportError::InvalidMimeType`] when a file's MIME type does not
    /// parse.
    #[cfg(feature = "http")]
    pub fn to_multipart_form(&self) -> Option<Result<reqwest::multipart::Form, TransportError>> {
        self.parts().map(to_reqwest_form)
    }
}

#[cfg(feature = "http")]
fn to_reqwest_form(parts: &[Part]) -> Result<reqwest::multipart::Form, TransportError> {
    let mut form = reqwest::multipart::Form::new();

    for part in parts {
        form = match &part.value {
            PartValue::Text(text) => form.text(part.key.clone(), text.clone()),
            PartValue::File(file) => {
                let mut body = reqwest::multipart::Part::bytes(file.data().to_vec()).file_name(file.name().to_string());
                if let Some(mime) = file.mime_type() {
                    body = body.mime_str(mime).map_err(|_| TransportError::InvalidMimeType {
                        file: file.name().to_string(),
                        mime: mime.to_string(),
                    })?;
                }
                form.part(part.key.clone(), body)
            }
        };
    }

    Ok(form)
}
