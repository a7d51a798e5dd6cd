//! Transport trait and the default HTTP implementation

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::*;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::form::Method;
use crate::payload::Payload;

/// Sends form submissions.
///
/// The form decides between JSON and multipart payloads; the transport only
/// moves the payload and reports the outcome. A transport must not retry on
/// its own behalf.
///
/// On failure, servers reporting validation errors should be surfaced as
/// [`TransportError::Http`] with a body of the shape
/// `{"errors": {"field.path": ["message"]}}`.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use formstate_lib::Method;
/// use formstate_lib::error::TransportError;
/// use formstate_lib::payload::Payload;
/// use formstate_lib::transport::Transport;
///
/// struct Echo;
///
/// #[async_trait]
/// impl Transport for Echo {
///     async fn send(
///         &self,
///         _method: Method,
///         _url: &str,
///         payload: Payload,
///     ) -> Result<serde_json::Value, TransportError> {
///         Ok(serde_json::json!({ "multipart": payload.is_multipart() }))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `payload` to `url` with the given method.
    ///
    /// Resolves with the decoded response body.
    async fn send(&self, method: Method, url: &str, payload: Payload) -> Result<serde_json::Value, TransportError>;

    /// Sends a GET request.
    async fn get(&self, url: &str, payload: Payload) -> Result<serde_json::Value, TransportError> {
        self.send(Method::Get, url, payload).await
    }

    /// Sends a DELETE request.
    async fn delete(&self, url: &str, payload: Payload) -> Result<serde_json::Value, TransportError> {
        self.send(Method::Delete, url, payload).await
    }

    /// Sends a HEAD request.
    async fn head(&self, url: &str, payload: Payload) -> Result<serde_json::Value, TransportError> {
        self.send(Method::Head, url, payload).await
    }

    /// Sends a POST request.
    async fn post(&self, url: &str, payload: Payload) -> Result<serde_json::Value, TransportError> {
        self.send(Method::Post, url, payload).await
    }

    /// Sends a PUT request.
    async fn put(&self, url: &str, payload: Payload) -> Result<serde_json::Value, TransportError> {
        self.send(Method::Put, url, payload).await
    }

    /// Sends a PATCH request.
    async fn patch(&self, url: &str, payload: Payload) -> Result<serde_json::Value, TransportError> {
        self.send(Method::Patch, url, payload).await
    }
}

/// Default transport used when the options do not provide one.
#[cfg(feature = "http")]
pub(crate) fn default_transport() -> Result<std::sync::Arc<dyn Transport>, crate::error::ConfigError> {
    Ok(std::sync::Arc::new(HttpTransport::new()))
}

/// Default transport used when the options do not provide one.
#[cfg(not(feature = "http"))]
pub(crate) fn default_transport() -> Result<std::sync::Arc<dyn Transport>, crate::error::ConfigError> {
    Err(crate::error::ConfigError::MissingTransport)
}
