use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An outbound call, fully described so fakes can inspect it
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub bearer: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            bearer: None,
            headers: Vec::new(),
            body: None,
            timeout,
        }
    }

    pub fn post_json(url: impl Into<String>, body: Value, timeout: Duration) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            bearer: None,
            headers: Vec::new(),
            body: Some(body),
            timeout,
        }
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Status and raw body of a completed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The call never produced a status line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Connection error - {0}")]
    Connect(String),

    #[error("Network error - {0}")]
    Other(String),
}

/// The single seam between providers and the network
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, TransportError>;
}

/// Production transport backed by a shared reqwest client
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("chatgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, TransportError> {
        let timeout_secs = request.timeout.as_secs();

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        }
        .timeout(request.timeout);

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                TransportError::Timeout(timeout_secs)
            } else if e.is_connect() {
                TransportError::Connect(e.to_string())
            } else {
                TransportError::Other(e.to_string())
            }
        };

        let response = builder.send().await.map_err(map_err)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_err)?;

        Ok(HttpReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::post_json(
            "https://example.test/v1",
            json!({"a": 1}),
            Duration::from_secs(5),
        )
        .bearer("secret")
        .header("X-Title", "AI Chatbot");

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.bearer.as_deref(), Some("secret"));
        assert_eq!(request.headers, vec![("X-Title".to_string(), "AI Chatbot".to_string())]);
        assert_eq!(request.body, Some(json!({"a": 1})));
    }

    #[test]
    fn test_reply_success_range() {
        assert!(HttpReply::new(200, "").is_success());
        assert!(HttpReply::new(204, "").is_success());
        assert!(!HttpReply::new(429, "").is_success());
    }
}
