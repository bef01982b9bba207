use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Post, User, WallPage, DEFAULT_TOKEN};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn method_request(method: &str, query: &str) -> Request<String> {
    Request::builder()
        .uri(format!("/method/{method}?{query}"))
        .body(String::new())
        .unwrap()
}

fn authed(extra: &str) -> String {
    let base = format!("access_token={DEFAULT_TOKEN}&v=5.131&lang=ru");
    if extra.is_empty() {
        base
    } else {
        format!("{base}&{extra}")
    }
}

fn error_code(body: &Value) -> i64 {
    body["error"]["error_code"].as_i64().unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_token_is_auth_error() {
    let resp = app(DEFAULT_TOKEN)
        .oneshot(method_request("users.get", "v=5.131&user_ids=1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(error_code(&body), 5);
    assert!(body.get("response").is_none());
}

#[tokio::test]
async fn wrong_token_is_auth_error() {
    let resp = app(DEFAULT_TOKEN)
        .oneshot(method_request("users.get", "access_token=nope&v=5.131&user_ids=1"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(error_code(&body), 5);
}

#[tokio::test]
async fn error_echoes_request_params_without_token() {
    let resp = app(DEFAULT_TOKEN)
        .oneshot(method_request("no.such", &authed("")))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(error_code(&body), 3);
    let echoed = body["error"]["request_params"].as_array().unwrap();
    assert!(echoed.iter().all(|p| p["key"] != "access_token"));
    assert!(echoed.iter().any(|p| p["key"] == "v"));
}

#[tokio::test]
async fn missing_version_is_invalid_request() {
    let resp = app(DEFAULT_TOKEN)
        .oneshot(method_request(
            "users.get",
            &format!("access_token={DEFAULT_TOKEN}&user_ids=1"),
        ))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(error_code(&body), 8);
}

// --- users.get ---

#[tokio::test]
async fn users_get_returns_one_user_per_id() {
    let resp = app(DEFAULT_TOKEN)
        .oneshot(method_request("users.get", &authed("user_ids=1%2C2%2C3")))
        .await
        .unwrap();

    let body = body_json(resp).await;
    let users: Vec<User> = serde_json::from_value(body["response"].clone()).unwrap();
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn users_get_without_ids_is_param_error() {
    let resp = app(DEFAULT_TOKEN)
        .oneshot(method_request("users.get", &authed("")))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(error_code(&body), 100);
}

// --- test.* ---

#[tokio::test]
async fn broken_json_is_not_json() {
    let resp = app(DEFAULT_TOKEN)
        .oneshot(method_request("test.brokenJson", &authed("")))
        .await
        .unwrap();

    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<Value>(&bytes).is_err());
}

#[tokio::test]
async fn no_response_has_neither_key() {
    let resp = app(DEFAULT_TOKEN)
        .oneshot(method_request("test.noResponse", &authed("")))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert!(body.get("response").is_none());
    assert!(body.get("error").is_none());
}

// --- wall ---

#[tokio::test]
async fn wall_post_then_get() {
    use tower::Service;

    let mut app = app(DEFAULT_TOKEN).into_service();

    for text in ["first", "second"] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(method_request(
                "wall.post",
                &authed(&format!("owner_id=-7&message={text}")),
            ))
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert!(body["response"]["post_id"].as_i64().is_some());
    }

    // other walls are untouched
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(method_request("wall.get", &authed("owner_id=1")))
        .await
        .unwrap();
    let page: WallPage = serde_json::from_value(body_json(resp).await["response"].clone()).unwrap();
    assert_eq!(page.count, 0);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(method_request("wall.get", &authed("owner_id=-7&count=1")))
        .await
        .unwrap();
    let page: WallPage = serde_json::from_value(body_json(resp).await["response"].clone()).unwrap();
    assert_eq!(page.count, 2);
    assert_eq!(
        page.items,
        vec![Post {
            id: 2,
            owner_id: -7,
            text: "second".to_string(),
        }]
    );
}

#[tokio::test]
async fn wall_get_requires_numeric_owner() {
    let resp = app(DEFAULT_TOKEN)
        .oneshot(method_request("wall.get", &authed("owner_id=abc")))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(error_code(&body), 100);
}
