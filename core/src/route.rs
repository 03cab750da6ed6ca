//! Endpoint descriptors and the path builder.
//!
//! A `RouteDescriptor` is a process-lifetime constant emitted once per
//! endpoint. Its path template uses `:name` segments, filled left to right
//! by [`build_path`] with percent-encoded values.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::http::HttpMethod;

/// Characters left as-is by `encodeURIComponent`; everything else is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Which directions of an endpoint pass through the encryption envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct EncryptionPolicy {
    pub request: bool,
    pub response: bool,
}

impl EncryptionPolicy {
    pub const NONE: Self = Self::new(false, false);

    pub const fn new(request: bool, response: bool) -> Self {
        Self { request, response }
    }
}

/// Method, path template and encryption policy of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RouteDescriptor {
    pub method: HttpMethod,
    pub path: &'static str,
    pub encrypted: EncryptionPolicy,
}

impl RouteDescriptor {
    pub const fn new(method: HttpMethod, path: &'static str, encrypted: EncryptionPolicy) -> Self {
        Self {
            method,
            path,
            encrypted,
        }
    }

    /// Placeholder names of the template, in substitution order.
    pub fn placeholders(&self) -> Vec<&'static str> {
        placeholders(self.path)
    }

    /// [`build_path`] bound to this descriptor's template.
    pub fn build_path(&self, params: &[&dyn fmt::Display]) -> String {
        build_path(self.path, params)
    }
}

impl fmt::Display for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Percent-encode one path component the way `encodeURIComponent` does.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Substitute `params` into the `:name` segments of `template`.
///
/// Parameter count is not checked against the template: placeholders
/// without a value are left in place and surplus values are dropped, so a
/// mismatch shows up as a server-side 404/400 rather than a local error.
pub fn build_path(template: &str, params: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len() + params.len() * 8);
    let mut values = params.iter();
    let mut rest = template;

    while let Some(idx) = rest.find("/:") {
        out.push_str(&rest[..=idx]);
        let after = &rest[idx + 2..];
        let name_len = placeholder_len(after);
        if name_len == 0 {
            out.push(':');
            rest = after;
            continue;
        }
        match values.next() {
            Some(value) => out.push_str(&encode_component(&value.to_string())),
            None => {
                out.push(':');
                out.push_str(&after[..name_len]);
            }
        }
        rest = &after[name_len..];
    }
    out.push_str(rest);
    out
}

/// Placeholder names of `template`, in order.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(idx) = rest.find("/:") {
        let after = &rest[idx + 2..];
        let name_len = placeholder_len(after);
        if name_len > 0 {
            names.push(&after[..name_len]);
        }
        rest = &after[name_len..];
    }
    names
}

fn placeholder_len(s: &str) -> usize {
    s.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len())
}
