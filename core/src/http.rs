//! HTTP exchange described as plain data.
//!
//! # Design
//! The dispatcher builds an `HttpRequest` and parses an `HttpResponse`
//! without touching the network itself; a [`Transport`](crate::Transport)
//! performs the round-trip in between. Keeping both ends as owned data makes
//! every build/parse step deterministic and lets tests swap the network for
//! an in-memory transport.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP method of an endpoint. Only the five verbs the generator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing request: absolute URL, headers in send order, optional body.
///
/// `body` is already in wire form: JSON text, or the hex envelope when the
/// endpoint encrypts its request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// A received response, handed back by the transport untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
