//! Payload types exchanged with the sellers API.
//!
//! These are plain serde values; the client never validates them beyond
//! what deserialization requires.

mod page;
mod sale_article_comment;
mod sale_entire_article;

pub use page::{Page, PageRequest, Pagination};
pub use sale_article_comment::{SaleArticleComment, SaleArticleCommentStore};
pub use sale_entire_article::{SaleEntireArticle, SaleEntireArticleSummary};
