use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use orderdesk_core::{not_blank, Valid};
use serde::Deserialize;
use tower::ServiceExt;

#[derive(Debug, Deserialize, garde::Validate)]
#[serde(rename_all = "camelCase")]
struct NewThing {
    #[garde(custom(not_blank))]
    label: String,
    #[garde(length(min = 1))]
    item_ids: Vec<i32>,
}

fn app() -> Router {
    Router::new().route(
        "/things",
        post(|Valid(body): Valid<NewThing>| async move {
            Json(serde_json::json!({ "label": body.label, "count": body.item_ids.len() }))
        }),
    )
}

async fn post_json(body: &str) -> (StatusCode, serde_json::Value) {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/things")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn valid_body_passes_through() {
    let (status, body) = post_json(r#"{"label":"box","itemIds":[1,2]}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn blank_label_is_rejected_with_details() {
    let (status, body) = post_json(r#"{"label":"   ","itemIds":[1]}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "label");
    assert_eq!(body["details"][0]["message"], "must not be blank");
}

#[tokio::test]
async fn empty_list_is_rejected() {
    let (status, body) = post_json(r#"{"label":"box","itemIds":[]}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "item_ids");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (status, body) = post_json(r#"{"label": "#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[test]
fn not_blank_rule() {
    assert!(not_blank("x", &()).is_ok());
    assert!(not_blank(" \t\n", &()).is_err());
    assert!(not_blank("", &()).is_err());
}
