//! Articles of a sale, read in full. Responses are encrypted.

use fetcher_core::{
    append_query, build_path, fetch, Connection, EncryptionPolicy, FetchError, HttpMethod,
    RouteDescriptor,
};

use crate::structures::{Page, PageRequest, SaleEntireArticle, SaleEntireArticleSummary};

/// List summaries of the sale's articles.
///
/// # Errors
/// `HttpStatus` 404 when the section or sale does not exist.
pub async fn index(
    connection: &Connection,
    section: &str,
    sale_id: u64,
    input: &index::Query,
) -> Result<index::Output, FetchError> {
    fetch::<(), _>(
        connection,
        index::ENCRYPTED,
        index::METHOD,
        &index::path(section, sale_id, input)?,
        None,
    )
    .await
}

pub mod index {
    use super::*;

    pub type Query = PageRequest;
    pub type Output = Page<SaleEntireArticleSummary>;

    pub const METHOD: HttpMethod = HttpMethod::Get;
    pub const PATH: &str = "/sellers/:section/sales/:saleId/entire";
    pub const ENCRYPTED: EncryptionPolicy = EncryptionPolicy::new(false, true);
    pub const ROUTE: RouteDescriptor = RouteDescriptor::new(METHOD, PATH, ENCRYPTED);

    pub fn path(section: &str, sale_id: u64, input: &Query) -> Result<String, FetchError> {
        append_query(build_path(PATH, &[&section, &sale_id]), input)
    }
}

/// Read one article with its comments.
///
/// # Errors
/// `HttpStatus` 404 when the article does not belong to the sale.
pub async fn at(
    connection: &Connection,
    section: &str,
    sale_id: u64,
    id: u64,
) -> Result<at::Output, FetchError> {
    fetch::<(), _>(
        connection,
        at::ENCRYPTED,
        at::METHOD,
        &at::path(section, sale_id, id),
        None,
    )
    .await
}

pub mod at {
    use super::*;

    pub type Output = SaleEntireArticle;

    pub const METHOD: HttpMethod = HttpMethod::Get;
    pub const PATH: &str = "/sellers/:section/sales/:saleId/entire/:id";
    pub const ENCRYPTED: EncryptionPolicy = EncryptionPolicy::new(false, true);
    pub const ROUTE: RouteDescriptor = RouteDescriptor::new(METHOD, PATH, ENCRYPTED);

    pub fn path(section: &str, sale_id: u64, id: u64) -> String {
        build_path(PATH, &[&section, &sale_id, &id])
    }
}
