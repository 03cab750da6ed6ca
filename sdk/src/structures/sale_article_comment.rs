use serde::{Deserialize, Serialize};

/// A comment written on a sale article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleArticleComment {
    pub id: u64,
    pub body: String,
    pub created_at: String,
}

/// Content of a new comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleArticleCommentStore {
    pub body: String,
}
