//! The generated client against the live mock server.
//!
//! # Design
//! Each test starts the mock on a random port and drives it through the
//! sdk's endpoint functions over `ReqwestTransport`, so path building,
//! query encoding, the encryption envelope and error mapping are checked
//! over real HTTP.

use fetcher_core::{Connection, ConnectionConfig, EncryptionError, FetchError, TransportError};
use mock_server::MockConfig;
use sellers_sdk::functional::sellers::sales::{articles::comments, entire};
use sellers_sdk::structures::{PageRequest, SaleArticleCommentStore};
use tokio::net::TcpListener;

const PASSWORD: &str = "e2e-secret";

async fn start(config: MockConfig) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener, config));
    format!("http://{addr}")
}

fn config() -> MockConfig {
    MockConfig {
        encryption_password: PASSWORD.to_string(),
        auth_token: None,
    }
}

#[tokio::test]
async fn comment_lifecycle() {
    let host = start(config()).await;
    let conn = Connection::new(host).with_encryption_password(PASSWORD);

    // Step 1: list the sale's articles, second page of ten.
    let query = PageRequest {
        page: Some(2),
        limit: Some(10),
        ..Default::default()
    };
    let page = entire::index(&conn, "general", 10, &query).await.unwrap();
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.data.first().map(|a| a.id), Some(11));

    // Step 2: comment on one of them.
    let article_id = page.data[0].id;
    let input = SaleArticleCommentStore {
        body: "hi".to_string(),
    };
    let comment = comments::store(&conn, "general", 10, article_id, &input)
        .await
        .unwrap();
    assert_eq!(comment.body, "hi");

    // Step 3: the article now carries the comment.
    let article = entire::at(&conn, "general", 10, article_id).await.unwrap();
    assert_eq!(article.comments, vec![comment]);
}

#[tokio::test]
async fn search_query_reaches_server() {
    let host = start(config()).await;
    let conn = Connection::new(host).with_encryption_password(PASSWORD);

    let query = PageRequest {
        search: Some("article 2".to_string()),
        sort: vec!["-id".to_string()],
        ..Default::default()
    };
    let page = entire::index(&conn, "general", 10, &query).await.unwrap();
    let ids: Vec<u64> = page.data.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![25, 24, 23, 22, 21, 20, 2]);
}

#[tokio::test]
async fn missing_article_is_404_with_server_body() {
    let host = start(config()).await;
    let conn = Connection::new(host).with_encryption_password(PASSWORD);

    let err = entire::at(&conn, "general", 10, 999).await.unwrap_err();
    match err {
        FetchError::HttpStatus { code, body, .. } => {
            assert_eq!(code, 404);
            assert_eq!(body, r#"{"message":"article not found"}"#);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn wrong_password_fails_authentication() {
    let host = start(config()).await;
    let conn = Connection::new(host).with_encryption_password("not-the-password");

    let err = entire::at(&conn, "general", 10, 1).await.unwrap_err();
    assert!(matches!(err, FetchError::Encryption(EncryptionError::Authentication)));
}

#[tokio::test]
async fn connection_headers_are_sent() {
    let host = start(MockConfig {
        auth_token: Some("t0k3n".to_string()),
        ..config()
    })
    .await;
    let input = SaleArticleCommentStore {
        body: "hi".to_string(),
    };

    let anonymous = Connection::new(host.clone());
    let err = comments::store(&anonymous, "general", 10, 1, &input)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));

    let config: ConnectionConfig = serde_json::from_value(serde_json::json!({
        "host": host,
        "headers": { "Authorization": "Bearer t0k3n" },
        "timeout_ms": 5000
    }))
    .unwrap();
    let authed = Connection::from_config(config).unwrap();
    let comment = comments::store(&authed, "general", 10, 1, &input).await.unwrap();
    assert_eq!(comment.body, "hi");
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let conn = Connection::new(format!("http://{addr}"));
    let err = entire::at(&conn, "general", 10, 1).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(TransportError::Connect(_))), "{err:?}");
}
