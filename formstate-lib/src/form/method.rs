//! Request methods accepted by a form submission

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// The request verbs a form can be submitted with.
///
/// Parsing is case-sensitive and only accepts the lower-case names.
///
/// # Example
///
/// ```
/// use formstate_lib::Method;
///
/// assert_eq!("post".parse::<Method>().unwrap(), Method::Post);
/// assert!("connect".parse::<Method>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Delete,
    Head,
    Post,
    Put,
    Patch,
}

impl Method {
    /// Every accepted method, in the order they are listed in errors.
    pub const ALL: [Method; 6] = [
        Method::Get,
        Method::Delete,
        Method::Head,
        Method::Post,
        Method::Put,
        Method::Patch,
    ];

    /// Returns the lower-case name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Delete => "delete",
            Method::Head => "head",
            Method::Post => "post",
            Method::Put => "put",
            Method::Patch => "patch",
        }
    }

    /// Returns the accepted names formatted for error messages.
    pub(crate) fn accepted_list() -> String {
        Self::ALL
            .iter()
            .map(|m| format!("`{}`", m.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ConfigError::invalid_method(s))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_methods() {
        for method in Method::ALL {
            assert_eq!(method.as_str().parse::<Method>().unwrap(), method);
        }
    }

    #[test]
    fn test_reject_unknown_method() {
        let err = "options".parse::<Method>().unwrap_err();
        assert_eq!(err, ConfigError::invalid_method("options"));
        assert_eq!(
            err.to_string(),
            "`options` is not a valid request type, must be one of: `get`, `delete`, `head`, `post`, `put`, `patch`."
        );
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("POST".parse::<Method>().is_err());
    }
}
