//! Connection descriptor and its configuration surface.
//!
//! # Design
//! A `Connection` is built once by the caller and then only read. It holds
//! the host, static headers, the optional encryption password, and the
//! transport that carries requests. Clones share the transport, so one
//! connection can back any number of concurrent calls without locking.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::error::TransportError;
use crate::transport::{ReqwestTransport, Transport};

/// Serializable form of a connection, e.g. read from a JSON file or env.
#[derive(Clone, Default, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub encryption_password: Option<String>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl ConnectionConfig {
    /// Read `FETCHER_HOST`, `FETCHER_ENCRYPTION_PASSWORD` and
    /// `FETCHER_TIMEOUT_MS`. Returns `None` when no host is set.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let host = lookup("FETCHER_HOST")?;
        Some(Self {
            host,
            headers: HashMap::new(),
            encryption_password: lookup("FETCHER_ENCRYPTION_PASSWORD"),
            timeout_ms: lookup("FETCHER_TIMEOUT_MS").and_then(|v| v.parse().ok()),
        })
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("encryption_password", &self.encryption_password.as_ref().map(|_| "***"))
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Remote host, static headers and optional password shared by many calls.
#[derive(Clone)]
pub struct Connection {
    host: String,
    headers: Vec<(String, String)>,
    encryption_password: Option<String>,
    transport: Arc<dyn Transport>,
}

impl Connection {
    /// Connection to `host` over a default [`ReqwestTransport`].
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (TLS backend failure). Use
    /// [`Connection::try_new`] when that must surface as an error.
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_reqwest(host.into(), ReqwestTransport::new())
    }

    pub fn try_new(host: impl Into<String>) -> Result<Self, TransportError> {
        Ok(Self::with_reqwest(host.into(), ReqwestTransport::try_new()?))
    }

    fn with_reqwest(host: String, transport: ReqwestTransport) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            headers: Vec::new(),
            encryption_password: None,
            transport: Arc::new(transport),
        }
    }

    pub fn from_config(config: ConnectionConfig) -> Result<Self, TransportError> {
        let transport = match config.timeout_ms {
            Some(ms) => ReqwestTransport::with_timeout(Duration::from_millis(ms))?,
            None => ReqwestTransport::try_new()?,
        };
        let mut headers: Vec<_> = config.headers.into_iter().collect();
        headers.sort();

        Ok(Self {
            host: config.host.trim_end_matches('/').to_string(),
            headers,
            encryption_password: config.encryption_password,
            transport: Arc::new(transport),
        })
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_encryption_password(mut self, password: impl Into<String>) -> Self {
        self.encryption_password = Some(password.into());
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn encryption_password(&self) -> Option<&str> {
        self.encryption_password.as_deref()
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Absolute URL for `path` on this host.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("host", &self.host)
            .field(
                "headers",
                &self.headers.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .field("encryption_password", &self.encryption_password.as_ref().map(|_| "***"))
            .finish_non_exhaustive()
    }
}
