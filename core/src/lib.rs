//! Invocation contract shared by generated API endpoint functions.
//!
//! # Overview
//! Every generated endpoint is a thin typed wrapper around one
//! [`RouteDescriptor`] (method, `:name` path template, encryption policy).
//! It builds its path with [`build_path`] and [`append_query`], then hands
//! the call to the dispatcher ([`fetch`] / [`dispatch`]), which performs the
//! exchange over the connection's [`Transport`] and applies the
//! [encryption envelope](encryption) where the policy asks for it.
//!
//! # Design
//! - [`Connection`] is immutable after construction and cheap to clone;
//!   concurrent calls share it without synchronization.
//! - The dispatcher is split into `build_request` / `parse_response` so
//!   both sides of the I/O boundary stay deterministic and testable.
//! - No retries, pooling policy or batching live here. Each call is one
//!   attempt that resolves to its output or a [`FetchError`].

pub mod connection;
pub mod encryption;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod query;
pub mod route;
pub mod transport;

pub use connection::{Connection, ConnectionConfig};
pub use error::{EncryptionError, FetchError, TransportError};
pub use fetcher::{build_request, dispatch, fetch, parse_response};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::{append_query, build_query};
pub use route::{build_path, encode_component, EncryptionPolicy, RouteDescriptor};
pub use transport::{ReqwestTransport, Transport};
