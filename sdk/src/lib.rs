//! Typed client for the sellers API.
//!
//! # Overview
//! `functional` holds one async function per endpoint, laid out along the
//! URL tree, each paired with a same-named module that carries the
//! endpoint's `METHOD`, `PATH`, `ENCRYPTED` policy, `ROUTE` descriptor,
//! payload type aliases and a `path(..)` helper. The metadata can be read
//! without performing a call, e.g. to build route tables or mocks.
//! `structures` holds the payload types the endpoints move.
//!
//! ```rust,no_run
//! use fetcher_core::Connection;
//! use sellers_sdk::functional::sellers::sales::articles::comments;
//! use sellers_sdk::structures::SaleArticleCommentStore;
//!
//! # async fn example() -> Result<(), fetcher_core::FetchError> {
//! let connection = Connection::new("https://api.example.com");
//! let input = SaleArticleCommentStore { body: "hi".into() };
//! let comment = comments::store(&connection, "general", 10, 55, &input).await?;
//! println!("stored comment {}", comment.id);
//! assert_eq!(comments::store::METHOD.as_str(), "POST");
//! # Ok(())
//! # }
//! ```

pub mod functional;
pub mod structures;

pub use fetcher_core::{Connection, FetchError};
