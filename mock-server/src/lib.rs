//! In-memory sellers API used by end-to-end tests and local development.
//!
//! Routes are registered from the sdk's own endpoint metadata, so the
//! mock always serves exactly the method, path and encryption policy the
//! client was generated with. Error bodies are plain JSON
//! (`{"message": ..}`) regardless of policy.

use std::{
    cmp,
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{on, MethodFilter},
    Json, Router,
};
use fetcher_core::{encryption, EncryptionPolicy, HttpMethod};
use sellers_sdk::functional::sellers::sales::{articles::comments, entire};
use sellers_sdk::structures::{
    Page, PageRequest, SaleArticleComment, SaleArticleCommentStore, SaleEntireArticle,
    SaleEntireArticleSummary,
};
use serde::Serialize;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

const DEFAULT_LIMIT: u32 = 100;

/// Settings of a mock instance.
#[derive(Clone, Debug)]
pub struct MockConfig {
    /// Password for encrypted response bodies.
    pub encryption_password: String,
    /// Bearer token required on mutations; `None` accepts anonymous writes.
    pub auth_token: Option<String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            encryption_password: "mock-password".to_string(),
            auth_token: None,
        }
    }
}

/// Articles keyed by `(section, sale id)`.
pub type Db = Arc<RwLock<HashMap<(String, u64), Vec<SaleEntireArticle>>>>;

#[derive(Clone)]
struct AppState {
    config: Arc<MockConfig>,
    db: Db,
    next_comment_id: Arc<AtomicU64>,
}

/// Router with the seeded data set (see [`seed`]).
pub fn app(config: MockConfig) -> Router {
    app_with(config, seed())
}

pub fn app_with(config: MockConfig, db: Db) -> Router {
    let state = AppState {
        config: Arc::new(config),
        db,
        next_comment_id: Arc::new(AtomicU64::new(1)),
    };
    Router::new()
        .route(
            &axum_path(entire::index::PATH),
            on(method_filter(entire::index::METHOD), index_articles),
        )
        .route(
            &axum_path(entire::at::PATH),
            on(method_filter(entire::at::METHOD), get_article),
        )
        .route(
            &axum_path(comments::store::PATH),
            on(method_filter(comments::store::METHOD), store_comment),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}

/// Section `general`: sale 10 with 25 articles (ids 1..=25), sale 11 empty.
pub fn seed() -> Db {
    let articles = (1..=25)
        .map(|id| SaleEntireArticle {
            id,
            writer: format!("writer-{}", id % 3),
            title: format!("article {id}"),
            body: format!("body of article {id}"),
            created_at: format!("2024-01-{:02}T00:00:00Z", (id - 1) % 28 + 1),
            comments: Vec::new(),
        })
        .collect();

    let mut db = HashMap::new();
    db.insert(("general".to_string(), 10), articles);
    db.insert(("general".to_string(), 11), Vec::new());
    Arc::new(RwLock::new(db))
}

/// `/a/:b/c` → `/a/{b}/c`.
pub fn axum_path(template: &str) -> String {
    template
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() => format!("{{{name}}}"),
            _ => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn method_filter(method: HttpMethod) -> MethodFilter {
    match method {
        HttpMethod::Get => MethodFilter::GET,
        HttpMethod::Post => MethodFilter::POST,
        HttpMethod::Put => MethodFilter::PUT,
        HttpMethod::Patch => MethodFilter::PATCH,
        HttpMethod::Delete => MethodFilter::DELETE,
    }
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "message": message.into() });
    (status, Json(body)).into_response()
}

impl AppState {
    /// Serialize `value`, sealing it when the endpoint encrypts responses.
    fn reply<T: Serialize>(&self, policy: EncryptionPolicy, status: StatusCode, value: &T) -> Response {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => return error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };
        if !policy.response {
            return (status, [(header::CONTENT_TYPE, "application/json")], json).into_response();
        }
        match encryption::encrypt(&json, &self.config.encryption_password) {
            Ok(sealed) => (status, [(header::CONTENT_TYPE, "text/plain")], sealed).into_response(),
            Err(e) => error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let Some(token) = &self.config.auth_token else {
            return true;
        };
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|given| given == token)
    }
}

/// Read paging fields from raw pairs; `sort` may repeat.
fn page_request(pairs: Vec<(String, String)>) -> Result<PageRequest, String> {
    let mut req = PageRequest::default();
    for (key, value) in pairs {
        match key.as_str() {
            "page" => req.page = Some(value.parse().map_err(|_| format!("bad page: {value}"))?),
            "limit" => req.limit = Some(value.parse().map_err(|_| format!("bad limit: {value}"))?),
            "search" => req.search = Some(value),
            "sort" => req.sort.push(value),
            _ => {}
        }
    }
    Ok(req)
}

fn sort_rows(rows: &mut [SaleEntireArticleSummary], keys: &[String]) -> Result<(), String> {
    type Compare = fn(&SaleEntireArticleSummary, &SaleEntireArticleSummary) -> cmp::Ordering;

    // Stable sorts applied from the last key to the first.
    for key in keys.iter().rev() {
        let (desc, field) = match key.strip_prefix('-') {
            Some(field) => (true, field),
            None => (false, key.strip_prefix('+').unwrap_or(key)),
        };
        let compare: Compare = match field {
            "id" => |a, b| a.id.cmp(&b.id),
            "title" => |a, b| a.title.cmp(&b.title),
            "created_at" => |a, b| a.created_at.cmp(&b.created_at),
            other => return Err(format!("unknown sort key: {other}")),
        };
        if desc {
            rows.sort_by(|a, b| compare(b, a));
        } else {
            rows.sort_by(compare);
        }
    }
    Ok(())
}

async fn index_articles(
    State(state): State<AppState>,
    Path((section, sale_id)): Path<(String, u64)>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = match page_request(pairs) {
        Ok(query) => query,
        Err(msg) => return error(StatusCode::BAD_REQUEST, msg),
    };

    let db = state.db.read().await;
    let Some(articles) = db.get(&(section, sale_id)) else {
        return error(StatusCode::NOT_FOUND, "sale not found");
    };
    let mut rows: Vec<SaleEntireArticleSummary> = articles
        .iter()
        .filter(|a| {
            query
                .search
                .as_deref()
                .map_or(true, |needle| a.title.contains(needle))
        })
        .map(SaleEntireArticleSummary::from)
        .collect();
    drop(db);

    if let Err(msg) = sort_rows(&mut rows, &query.sort) {
        return error(StatusCode::BAD_REQUEST, msg);
    }
    let page = Page::paginate(
        rows,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(DEFAULT_LIMIT),
    );
    state.reply(entire::index::ENCRYPTED, StatusCode::OK, &page)
}

async fn get_article(
    State(state): State<AppState>,
    Path((section, sale_id, id)): Path<(String, u64, u64)>,
) -> Response {
    let db = state.db.read().await;
    let article = db
        .get(&(section, sale_id))
        .and_then(|articles| articles.iter().find(|a| a.id == id));
    match article {
        Some(article) => state.reply(entire::at::ENCRYPTED, StatusCode::OK, article),
        None => error(StatusCode::NOT_FOUND, "article not found"),
    }
}

async fn store_comment(
    State(state): State<AppState>,
    Path((section, sale_id, article_id)): Path<(String, u64, u64)>,
    headers: HeaderMap,
    Json(input): Json<SaleArticleCommentStore>,
) -> Response {
    if !state.authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "login required");
    }
    if input.body.trim().is_empty() {
        return error(StatusCode::BAD_REQUEST, "comment body is empty");
    }

    let mut db = state.db.write().await;
    let Some(article) = db
        .get_mut(&(section, sale_id))
        .and_then(|articles| articles.iter_mut().find(|a| a.id == article_id))
    else {
        return error(StatusCode::NOT_FOUND, "article not found");
    };

    let comment = SaleArticleComment {
        id: state.next_comment_id.fetch_add(1, Ordering::Relaxed),
        body: input.body,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    article.comments.push(comment.clone());
    drop(db);

    tracing::debug!(article_id, comment_id = comment.id, "stored comment");
    state.reply(comments::store::ENCRYPTED, StatusCode::CREATED, &comment)
}
