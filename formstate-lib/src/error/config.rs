//! Configuration error types

use crate::form::Method;

/// Errors caused by invalid use of the form API.
///
/// These are raised synchronously and always abort the call that produced
/// them; no form state is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The request method is not one of the supported verbs.
    #[error("`{method}` is not a valid request type, must be one of: {accepted}.", accepted = Method::accepted_list())]
    InvalidMethod { method: String },

    /// The field name collides with a form operation.
    #[error("Field name {field} isn't allowed to be used in a Form or Errors instance.")]
    ReservedFieldName { field: String },

    /// The initial data is neither field values nor field names.
    #[error("Form data must be an object of field values or an array of field names, got {kind}.")]
    InvalidData { kind: String },

    /// No transport was configured and no default is available.
    #[error("No http transport provided. Either pass a transport option, or enable the `http` feature.")]
    MissingTransport,
}

impl ConfigError {
    /// Creates a new invalid method error.
    pub fn invalid_method(method: impl Into<String>) -> Self {
        Self::InvalidMethod {
            method: method.into(),
        }
    }

    /// Creates a new invalid form data error.
    pub fn invalid_data(kind: impl Into<String>) -> Self {
        Self::InvalidData { kind: kind.into() }
    }

    /// Creates a new reserved field name error.
    pub fn reserved(field: impl Into<String>) -> Self {
        Self::ReservedFieldName {
            field: field.into(),
        }
    }
}
