//! The dispatcher every generated endpoint delegates to.
//!
//! # Design
//! A call is split like any client operation in this crate: `build_request`
//! produces an [`HttpRequest`], the connection's transport executes it, and
//! `parse_response` consumes the [`HttpResponse`]. Both halves are pure, so
//! all encryption and status rules are testable without a network.
//!
//! The decoded output is returned as a `serde_json::Value`; [`fetch`]
//! deserializes it into the endpoint's declared output type. No schema
//! check happens beyond what that deserialization requires.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::connection::Connection;
use crate::encryption;
use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::route::EncryptionPolicy;

const CONTENT_TYPE: &str = "content-type";
const JSON: &str = "application/json";
const TEXT: &str = "text/plain";

/// Build the outgoing request, sealing `body` when `policy.request` is set.
pub fn build_request(
    connection: &Connection,
    policy: EncryptionPolicy,
    method: HttpMethod,
    path: &str,
    body: Option<&Value>,
) -> Result<HttpRequest, FetchError> {
    let (body, content_type) = match body {
        None => (None, None),
        Some(value) => {
            let json = serde_json::to_string(value)?;
            if policy.request {
                let password = encryption::require_password(connection.encryption_password())?;
                (Some(encryption::encrypt(&json, password)?), Some(TEXT))
            } else {
                (Some(json), Some(JSON))
            }
        }
    };

    // The endpoint owns the content type of its body; a caller's is dropped.
    let mut headers: Vec<(String, String)> = connection
        .headers()
        .iter()
        .filter(|(name, _)| content_type.is_none() || !name.eq_ignore_ascii_case(CONTENT_TYPE))
        .cloned()
        .collect();
    if let Some(content_type) = content_type {
        headers.push((CONTENT_TYPE.to_string(), content_type.to_string()));
    }

    Ok(HttpRequest {
        method,
        url: connection.url(path),
        headers,
        body,
    })
}

/// Check the status, open the envelope when `policy.response` is set, and
/// parse the body as JSON. An empty success body is `null`.
pub fn parse_response(
    connection: &Connection,
    policy: EncryptionPolicy,
    method: HttpMethod,
    path: &str,
    response: HttpResponse,
) -> Result<Value, FetchError> {
    if !response.is_success() {
        debug!(%method, path, status = response.status, "endpoint returned failure status");
        return Err(FetchError::HttpStatus {
            method,
            path: path.to_string(),
            code: response.status,
            body: response.body,
        });
    }
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }

    let text = if policy.response {
        let password = encryption::require_password(connection.encryption_password())?;
        encryption::decrypt(&response.body, password)?
    } else {
        response.body
    };
    Ok(serde_json::from_str(&text)?)
}

/// Perform one exchange and return the decoded body.
pub async fn dispatch(
    connection: &Connection,
    policy: EncryptionPolicy,
    method: HttpMethod,
    path: &str,
    body: Option<&Value>,
) -> Result<Value, FetchError> {
    let request = build_request(connection, policy, method, path, body)?;
    debug!(
        %method,
        path,
        encrypt_request = policy.request,
        encrypt_response = policy.response,
        has_body = request.body.is_some(),
        "dispatching request"
    );

    let response = connection.transport().send(request).await?;
    debug!(%method, path, status = response.status, "response received");

    parse_response(connection, policy, method, path, response)
}

/// Typed entry point used by generated endpoint functions.
pub async fn fetch<I, O>(
    connection: &Connection,
    policy: EncryptionPolicy,
    method: HttpMethod,
    path: &str,
    input: Option<&I>,
) -> Result<O, FetchError>
where
    I: Serialize + ?Sized,
    O: DeserializeOwned,
{
    let body = input.map(serde_json::to_value).transpose()?;
    let output = dispatch(connection, policy, method, path, body.as_ref()).await?;
    Ok(serde_json::from_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PATH: &str = "/sellers/general/sales/10/articles/55/comments";

    fn conn() -> Connection {
        Connection::new("http://localhost:3000").with_header("Authorization", "Bearer t")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn plain_body_is_json() {
        let body = json!({ "body": "hi" });
        let req = build_request(&conn(), EncryptionPolicy::NONE, HttpMethod::Post, PATH, Some(&body))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, format!("http://localhost:3000{PATH}"));
        assert_eq!(
            req.headers,
            vec![
                ("Authorization".to_string(), "Bearer t".to_string()),
                ("content-type".to_string(), "application/json".to_string()),
            ]
        );
        assert_eq!(req.body.as_deref(), Some(r#"{"body":"hi"}"#));
    }

    #[test]
    fn endpoint_content_type_replaces_callers() {
        let conn = conn()
            .with_header("Content-Type", "application/json")
            .with_encryption_password("pw");
        let body = json!({ "a": 1 });
        let req = build_request(
            &conn,
            EncryptionPolicy::new(true, false),
            HttpMethod::Post,
            PATH,
            Some(&body),
        )
        .unwrap();
        let content_types: Vec<_> = req
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .collect();
        assert_eq!(content_types.len(), 1);
        assert_eq!(content_types[0].1, "text/plain");
        assert!(req.headers.contains(&("Authorization".to_string(), "Bearer t".to_string())));
    }

    #[test]
    fn callers_content_type_kept_without_body() {
        let conn = conn().with_header("Content-Type", "application/xml");
        let req = build_request(&conn, EncryptionPolicy::NONE, HttpMethod::Get, PATH, None).unwrap();
        assert_eq!(
            req.headers.last(),
            Some(&("Content-Type".to_string(), "application/xml".to_string()))
        );
    }

    #[test]
    fn no_body_means_no_content_type() {
        let req = build_request(&conn(), EncryptionPolicy::NONE, HttpMethod::Get, PATH, None).unwrap();
        assert!(req.body.is_none());
        assert_eq!(req.headers.len(), 1);
    }

    #[test]
    fn encrypted_body_is_sealed_text() {
        let conn = conn().with_encryption_password("pw");
        let body = json!({ "body": "hi" });
        let policy = EncryptionPolicy::new(true, false);
        let req = build_request(&conn, policy, HttpMethod::Post, PATH, Some(&body)).unwrap();
        assert_eq!(
            req.headers.last(),
            Some(&("content-type".to_string(), "text/plain".to_string()))
        );
        let sealed = req.body.unwrap();
        assert_eq!(encryption::decrypt(&sealed, "pw").unwrap(), r#"{"body":"hi"}"#);
    }

    #[test]
    fn encrypted_body_without_password_fails() {
        let body = json!({});
        let err = build_request(
            &conn(),
            EncryptionPolicy::new(true, false),
            HttpMethod::Post,
            PATH,
            Some(&body),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FetchError::Encryption(crate::EncryptionError::MissingPassword)
        ));
    }

    #[test]
    fn request_policy_without_body_needs_no_password() {
        let req = build_request(&conn(), EncryptionPolicy::new(true, true), HttpMethod::Get, PATH, None);
        assert!(req.is_ok());
    }

    #[test]
    fn failure_status_keeps_body() {
        let response = HttpResponse {
            status: 403,
            headers: Vec::new(),
            body: "not your sale".to_string(),
        };
        let err = parse_response(&conn(), EncryptionPolicy::NONE, HttpMethod::Post, PATH, response)
            .unwrap_err();
        match err {
            FetchError::HttpStatus {
                method,
                path,
                code,
                body,
            } => {
                assert_eq!(method, HttpMethod::Post);
                assert_eq!(path, PATH);
                assert_eq!(code, 403);
                assert_eq!(body, "not your sale");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn failure_status_skips_decryption() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "plain error".to_string(),
        };
        let err = parse_response(
            &conn(),
            EncryptionPolicy::new(false, true),
            HttpMethod::Get,
            PATH,
            response,
        )
        .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn plain_response_is_parsed() {
        let value = parse_response(&conn(), EncryptionPolicy::NONE, HttpMethod::Get, PATH, ok(r#"{"id":1}"#))
            .unwrap();
        assert_eq!(value, json!({ "id": 1 }));
    }

    #[test]
    fn encrypted_response_is_opened() {
        let conn = conn().with_encryption_password("pw");
        let sealed = encryption::encrypt(r#"[1,2,3]"#, "pw").unwrap();
        let value = parse_response(
            &conn,
            EncryptionPolicy::new(false, true),
            HttpMethod::Get,
            PATH,
            ok(&sealed),
        )
        .unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn encrypted_response_without_password_fails() {
        let sealed = encryption::encrypt("{}", "pw").unwrap();
        let err = parse_response(
            &conn(),
            EncryptionPolicy::new(false, true),
            HttpMethod::Get,
            PATH,
            ok(&sealed),
        )
        .unwrap_err();
        assert!(matches!(err, FetchError::Encryption(_)));
    }

    #[test]
    fn plaintext_where_envelope_expected_is_rejected() {
        let conn = conn().with_encryption_password("pw");
        let err = parse_response(
            &conn,
            EncryptionPolicy::new(false, true),
            HttpMethod::Get,
            PATH,
            ok(r#"{"id":1}"#),
        )
        .unwrap_err();
        assert!(matches!(err, FetchError::Encryption(_)));
    }

    #[test]
    fn empty_body_is_null() {
        let value = parse_response(
            &conn(),
            EncryptionPolicy::new(false, true),
            HttpMethod::Delete,
            PATH,
            ok(""),
        )
        .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn invalid_json_is_serialization_error() {
        let err = parse_response(&conn(), EncryptionPolicy::NONE, HttpMethod::Get, PATH, ok("not json"))
            .unwrap_err();
        assert!(matches!(err, FetchError::Serialization(_)));
    }
}
