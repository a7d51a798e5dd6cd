//! reqwest-backed HttpTransport

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::StatusCode;
use url::Url;

use super::Transport;
use crate::error::TransportError;
use crate::form::Method;
use crate::payload::Payload;

/// The default transport, sending submissions over HTTP with reqwest.
///
/// JSON payloads go out as `application/json` bodies, multipart payloads as
/// `multipart/form-data`. For GET and HEAD the fields are flattened into the
/// query string instead.
///
/// Non-success responses become [`TransportError::Http`] with the decoded
/// JSON body, so the form can pick up `errors` from it.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use formstate_lib::transport::HttpTransport;
///
/// let transport = HttpTransport::builder()
///     .base_url("https://example.com/api/")?
///     .timeout(Duration::from_secs(30))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
    base_url: Option<Url>,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Creates a transport with a default reqwest client.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new builder for constructing a transport.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    /// Returns the base URL relative submission URLs are resolved against.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    fn resolve(&self, url: &str) -> Result<Url, TransportError> {
        let resolved = match &self.base_url {
            Some(base) => base.join(url),
            None => Url::parse(url),
        };
        resolved.map_err(|e| TransportError::InvalidUrl(format!("{}: {}", url, e)))
    }

    fn map_send_error(&self, error: reqwest::Error) -> TransportError {
        match self.timeout {
            Some(timeout) if error.is_timeout() => TransportError::Timeout(timeout),
            _ => TransportError::Network(error),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: Method, url: &str, payload: Payload) -> Result<serde_json::Value, TransportError> {
        let request = self.prepare(method, url, &payload)?;

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        decode(status, body)
    }
}

impl HttpTransport {
    fn prepare(&self, method: Method, url: &str, payload: &Payload) -> Result<RequestBuilder, TransportError> {
        let url = self.resolve(url)?;
        debug!("{} {} ({})", method, url, if payload.is_multipart() { "multipart" } else { "json" });

        let mut request = self.http_client.request(to_reqwest_method(method), url);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let request = match (payload, method) {
            (_, Method::Get | Method::Head) => request.query(&payload.query_pairs()),
            (Payload::Json(fields), _) => request.json(fields),
            (Payload::Multipart(_), _) => match payload.to_multipart_form() {
                Some(form) => request.multipart(form?),
                None => request,
            },
        };

        Ok(request)
    }
}

/// Maps a response status and raw body to the transport outcome.
///
/// Success bodies must be JSON, except an empty body which resolves to
/// `Null`. Failure bodies that are not JSON become `Null` data.
fn decode(status: StatusCode, body: String) -> Result<serde_json::Value, TransportError> {
    if status.is_success() {
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| TransportError::parse_with_body(e.to_string(), body))
    } else {
        debug!("Request failed with HTTP {}", status.as_u16());
        let data = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
        Err(TransportError::http(status.as_u16(), data))
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for constructing an [`HttpTransport`].
#[derive(Debug, Default)]
pub struct HttpTransportBuilder {
    base_url: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl HttpTransportBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL relative submission URLs are joined onto.
    pub fn base_url(mut self, url: &str) -> Result<Self, TransportError> {
        let parsed = Url::parse(url).map_err(|e| TransportError::InvalidUrl(format!("{}: {}", url, e)))?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`HttpTransport`].
    pub fn build(self) -> HttpTransport {
        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder();
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            builder.build().expect("Failed to build HTTP client")
        });

        HttpTransport {
            http_client,
            base_url: self.base_url,
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fields;
    use crate::model::FileValue;

    #[test]
    fn test_resolve_absolute_url() {
        let transport = HttpTransport::new();
        let url = transport.resolve("http://example.com/posts").unwrap();
        assert_eq!(url.as_str(), "http://example.com/posts");
    }

    #[test]
    fn test_resolve_against_base_url() {
        let transport = HttpTransport::builder()
            .base_url("http://example.com/api/")
            .unwrap()
            .build();
        let url = transport.resolve("posts/1").unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/posts/1");
    }

    #[test]
    fn test_relative_url_without_base_is_invalid() {
        let transport = HttpTransport::new();
        assert!(matches!(transport.resolve("posts"), Err(TransportError::InvalidUrl(_))));
    }

    fn search_payload() -> Payload {
        let mut fields = Fields::new();
        fields.insert("q".into(), "rust".into());
        fields.insert("tags".into(), vec!["a", "b"].into());
        Payload::from_fields(fields)
    }

    #[test]
    fn test_get_and_head_send_query_string() {
        let transport = HttpTransport::new();

        for method in [Method::Get, Method::Head] {
            let request = transport
                .prepare(method, "http://example.com/search", &search_payload())
                .unwrap()
                .build()
                .unwrap();

            assert_eq!(request.method().as_str(), method.to_string());
            assert_eq!(request.url().query(), Some("q=rust&tags%5B0%5D=a&tags%5B1%5D=b"));
            assert!(request.body().is_none());
        }
    }

    #[test]
    fn test_post_sends_json_body() {
        let transport = HttpTransport::new();
        let request = transport
            .prepare(Method::Post, "http://example.com/search", &search_payload())
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.url().query(), None);
        let content_type = request.headers().get(reqwest::header::CONTENT_TYPE).unwrap();
        assert_eq!(content_type.to_str().unwrap(), "application/json");
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(body).unwrap(),
            serde_json::json!({"q": "rust", "tags": ["a", "b"]})
        );
    }

    #[test]
    fn test_multipart_content_type() {
        let mut fields = Fields::new();
        fields.insert("avatar".into(), FileValue::new("me.png", b"png".to_vec()).into());

        let transport = HttpTransport::new();
        let request = transport
            .prepare(Method::Post, "http://example.com/upload", &Payload::from_fields(fields))
            .unwrap()
            .build()
            .unwrap();

        let content_type = request.headers().get(reqwest::header::CONTENT_TYPE).unwrap();
        assert!(content_type.to_str().unwrap().starts_with("multipart/form-data; boundary="));
    }

    #[test]
    fn test_decode_success_body() {
        let body = decode(StatusCode::OK, r#"{"id": 1}"#.to_string()).unwrap();
        assert_eq!(body, serde_json::json!({"id": 1}));
    }

    #[test]
    fn test_decode_empty_success_body() {
        assert_eq!(decode(StatusCode::NO_CONTENT, String::new()).unwrap(), serde_json::Value::Null);
        assert_eq!(decode(StatusCode::OK, "  \n".to_string()).unwrap(), serde_json::Value::Null);
    }

    #[test]
    fn test_decode_invalid_success_body() {
        let err = decode(StatusCode::OK, "<html>".to_string()).unwrap_err();
        assert!(matches!(err, TransportError::Parse { body: Some(ref body), .. } if body == "<html>"));
    }

    #[test]
    fn test_decode_failure_keeps_json_body() {
        let err = decode(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"errors": {"first_name": ["Value is required"]}}"#.to_string(),
        )
        .unwrap_err();

        assert_eq!(err.status_code(), Some(422));
        assert_eq!(
            err.validation_errors(),
            Some(&serde_json::json!({"first_name": ["Value is required"]}))
        );
    }

    #[test]
    fn test_decode_failure_with_non_json_body() {
        let err = decode(StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string()).unwrap_err();

        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.response().map(|r| &r.data), Some(&serde_json::Value::Null));
        assert!(err.validation_errors().is_none());
    }
}
