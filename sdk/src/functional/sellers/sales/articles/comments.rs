//! Comments on sale articles.

use fetcher_core::{
    build_path, fetch, Connection, EncryptionPolicy, FetchError, HttpMethod, RouteDescriptor,
};

use crate::structures::{SaleArticleComment, SaleArticleCommentStore};

/// Store a new comment.
///
/// # Errors
/// `HttpStatus` with
/// - 400 when the input is not a valid comment,
/// - 401 when not logged in,
/// - 403 when the sale belongs to another seller,
/// - 404 when the article cannot be found.
pub async fn store(
    connection: &Connection,
    section: &str,
    sale_id: u64,
    article_id: u64,
    input: &store::Input,
) -> Result<store::Output, FetchError> {
    fetch(
        connection,
        store::ENCRYPTED,
        store::METHOD,
        &store::path(section, sale_id, article_id),
        Some(input),
    )
    .await
}

pub mod store {
    use super::*;

    pub type Input = SaleArticleCommentStore;
    pub type Output = SaleArticleComment;

    pub const METHOD: HttpMethod = HttpMethod::Post;
    pub const PATH: &str = "/sellers/:section/sales/:saleId/articles/:articleId/comments";
    pub const ENCRYPTED: EncryptionPolicy = EncryptionPolicy::NONE;
    pub const ROUTE: RouteDescriptor = RouteDescriptor::new(METHOD, PATH, ENCRYPTED);

    pub fn path(section: &str, sale_id: u64, article_id: u64) -> String {
        build_path(PATH, &[&section, &sale_id, &article_id])
    }
}
