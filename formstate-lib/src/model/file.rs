//! Binary file values

use std::sync::Arc;

use serde::Serialize;

/// A binary file attached to a form field.
///
/// The content is reference counted: cloning a `FileValue` (including the
/// deep copies the form takes of its initial values) shares the bytes
/// instead of copying them.
///
/// # Example
///
/// ```
/// use formstate_lib::FileValue;
///
/// let avatar = FileValue::new("avatar.png", b"\x89PNG".to_vec())
///     .with_mime_type("image/png");
///
/// assert_eq!(avatar.name(), "avatar.png");
/// assert_eq!(avatar.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileValue {
    /// The file name sent with the multipart part.
    name: String,
    /// The MIME type, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
    /// The file content.
    #[serde(skip)]
    data: Arc<[u8]>,
}

impl FileValue {
    /// Creates a new file from its name and content.
    pub fn new(name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime_type: None,
            data: data.into(),
        }
    }

    /// Sets the MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Returns the file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the MIME type, if known.
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Returns the file content.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the size of the content in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the file has no content.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if both values share the same content buffer.
    pub fn ptr_eq(&self, other: &FileValue) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}
