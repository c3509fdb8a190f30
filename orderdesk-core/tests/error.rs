use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use http_body_util::BodyExt;
use orderdesk_core::{error_chain, expose_error_details, ErrorReport, HttpError};
use tower::ServiceExt;

async fn error_parts(resp: Response) -> (StatusCode, serde_json::Value) {
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[derive(Debug)]
struct Outer(Inner);

#[derive(Debug)]
struct Inner;

impl std::fmt::Display for Outer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "insert failed")
    }
}

impl std::error::Error for Outer {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl std::fmt::Display for Inner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "violates foreign key constraint")
    }
}

impl std::error::Error for Inner {}

#[tokio::test]
async fn not_found_maps_to_404() {
    let response = HttpError::NotFound("Order 7 not found".into()).into_response();
    let (status, body) = error_parts(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order 7 not found");
}

#[tokio::test]
async fn bad_request_maps_to_400() {
    let response = HttpError::BadRequest("bad".into()).into_response();
    let (status, body) = error_parts(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad");
}

#[test]
fn error_chain_renders_sources() {
    let err = Outer(Inner);
    assert_eq!(
        error_chain(&err),
        "insert failed\ncaused by: violates foreign key constraint"
    );
}

#[tokio::test]
async fn server_error_hides_details_by_default() {
    let resp = HttpError::Server(ErrorReport::from_error(&Outer(Inner))).into_response();
    assert!(resp.extensions().get::<ErrorReport>().is_some());

    let (status, body) = error_parts(resp).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "insert failed");
    assert!(body.get("details").is_none());
}

fn failing_router() -> Router {
    Router::new()
        .route(
            "/fail",
            get(|| async { HttpError::Server(ErrorReport::from_error(&Outer(Inner))) }),
        )
        .route(
            "/missing",
            get(|| async { HttpError::NotFound("nope".into()) }),
        )
}

#[tokio::test]
async fn expose_layer_adds_details_to_server_errors() {
    let app = failing_router().layer(axum::middleware::from_fn(expose_error_details));

    let resp = app
        .oneshot(Request::builder().uri("/fail").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let (status, body) = error_parts(resp).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "insert failed");
    assert_eq!(
        body["details"],
        "insert failed\ncaused by: violates foreign key constraint"
    );
}

#[tokio::test]
async fn expose_layer_leaves_client_errors_alone() {
    let app = failing_router().layer(axum::middleware::from_fn(expose_error_details));

    let request = Request::builder()
        .uri("/missing")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(request).await.unwrap();
    let (status, body) = error_parts(resp).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "error": "nope" }));
}

#[tokio::test]
async fn panics_become_json_500() {
    async fn boom() -> &'static str {
        panic!("boom")
    }

    let app: Router = Router::new()
        .route("/boom", get(boom))
        .layer(orderdesk_core::catch_panic_layer());

    let resp = app
        .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let (status, body) = error_parts(resp).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}
