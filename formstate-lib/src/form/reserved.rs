//! Reserved field names

use crate::error::ConfigError;

/// Field names that collide with form operations and cannot hold data.
pub const RESERVED_FIELD_NAMES: &[&str] = &[
    "__http",
    "__options",
    "__validateRequestType",
    "clear",
    "data",
    "delete",
    "errors",
    "getError",
    "getErrors",
    "hasError",
    "initial",
    "onFail",
    "only",
    "onSuccess",
    "patch",
    "populate",
    "post",
    "processing",
    "successful",
    "put",
    "reset",
    "submit",
    "withData",
    "withErrors",
    "withOptions",
];

/// Returns `true` if `field` is reserved.
pub fn is_reserved(field: &str) -> bool {
    RESERVED_FIELD_NAMES.contains(&field)
}

/// Fails with [`ConfigError::ReservedFieldName`] if `field` is reserved.
pub fn guard_against_reserved_field_name(field: &str) -> Result<(), ConfigError> {
    if is_reserved(field) {
        return Err(ConfigError::reserved(field));
    }
    Ok(())
}

/// Checks every name, failing on the first reserved one.
pub(crate) fn guard_all<'a>(fields: impl IntoIterator<Item = &'a str>) -> Result<(), ConfigError> {
    fields.into_iter().try_for_each(guard_against_reserved_field_name)
}
