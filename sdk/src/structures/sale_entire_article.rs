use serde::{Deserialize, Serialize};

use super::SaleArticleComment;

/// An article of a sale with its full body and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleEntireArticle {
    pub id: u64,
    pub writer: String,
    pub title: String,
    pub body: String,
    pub created_at: String,
    #[serde(default)]
    pub comments: Vec<SaleArticleComment>,
}

/// Listing row of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleEntireArticleSummary {
    pub id: u64,
    pub writer: String,
    pub title: String,
    pub created_at: String,
}

impl From<&SaleEntireArticle> for SaleEntireArticleSummary {
    fn from(article: &SaleEntireArticle) -> Self {
        Self {
            id: article.id,
            writer: article.writer.clone(),
            title: article.title.clone(),
            created_at: article.created_at.clone(),
        }
    }
}
