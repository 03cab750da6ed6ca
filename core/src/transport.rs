//! Network transports.
//!
//! A transport moves one [`HttpRequest`] across the wire and hands back the
//! raw [`HttpResponse`]. Status codes are data here; interpreting them is
//! the dispatcher's job. Dropping the returned future abandons the request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Sends a request and returns whatever the server answered.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `reqwest`-backed transport. Cheap to clone; clones share one pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized. Use
    /// [`ReqwestTransport::try_new`] to get that failure as an error.
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    pub fn try_new() -> Result<Self, TransportError> {
        build(Client::builder())
    }

    /// Transport whose requests fail with `Timeout` after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        build(Client::builder().timeout(timeout))
    }

    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn build(builder: reqwest::ClientBuilder) -> Result<ReqwestTransport, TransportError> {
    let http = builder
        .build()
        .map_err(|e| TransportError::Other(e.to_string()))?;
    Ok(ReqwestTransport { http })
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut rb = self.http.request(reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            rb = rb.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            rb = rb.body(body);
        }

        let resp = rb.send().await.map_err(from_reqwest)?;
        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_owned(), v.to_owned()))
            })
            .collect();
        let body = resp.text().await.map_err(from_reqwest)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Classify a `reqwest` failure into a [`TransportError`].
pub fn from_reqwest(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}
