use axum::body::Body;
use axum::Router;
use bytes::Bytes;
use http::header::{HeaderName, CONTENT_TYPE};
use http::request::Builder;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tower::util::ServiceExt;

/// Drives an Axum `Router` in process, one `oneshot` call per request.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub fn get(&self, uri: &str) -> TestRequest {
        self.start(Method::GET, uri)
    }

    pub fn post(&self, uri: &str) -> TestRequest {
        self.start(Method::POST, uri)
    }

    pub fn put(&self, uri: &str) -> TestRequest {
        self.start(Method::PUT, uri)
    }

    pub fn delete(&self, uri: &str) -> TestRequest {
        self.start(Method::DELETE, uri)
    }

    fn start(&self, method: Method, uri: &str) -> TestRequest {
        TestRequest {
            router: self.router.clone(),
            builder: Request::builder().method(method).uri(uri),
            body: Body::empty(),
        }
    }
}

pub struct TestRequest {
    router: Router,
    builder: Builder,
    body: Body,
}

impl TestRequest {
    pub fn header(mut self, name: HeaderName, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// JSON body with a matching `Content-Type`.
    pub fn json(self, body: &impl Serialize) -> Self {
        let bytes = serde_json::to_vec(body).expect("test body serializes to JSON");
        self.header(CONTENT_TYPE, "application/json").body(bytes)
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    pub async fn send(self) -> TestResponse {
        let request = self.builder.body(self.body).expect("valid test request");
        let response = self
            .router
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("readable response body")
            .to_bytes();
        TestResponse { status, body }
    }
}

/// Status and body of a completed request, with chainable assertions.
pub struct TestResponse {
    status: StatusCode,
    body: Bytes,
}

impl TestResponse {
    pub fn assert_ok(self) -> Self {
        self.expect(StatusCode::OK)
    }

    pub fn assert_created(self) -> Self {
        self.expect(StatusCode::CREATED)
    }

    pub fn assert_bad_request(self) -> Self {
        self.expect(StatusCode::BAD_REQUEST)
    }

    pub fn assert_not_found(self) -> Self {
        self.expect(StatusCode::NOT_FOUND)
    }

    pub fn assert_server_error(self) -> Self {
        self.expect(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn expect(self, status: StatusCode) -> Self {
        assert_eq!(
            self.status,
            status,
            "unexpected status, body: {}",
            String::from_utf8_lossy(&self.body)
        );
        self
    }

    /// ```ignore
    /// resp.assert_json_path("[0].countofproducts", 2)
    ///     .assert_json_path("len()", 1);
    /// ```
    pub fn assert_json_path(self, path: &str, expected: impl Into<Value>) -> Self {
        let root = self.body_json();
        let actual = resolve_path(&root, path);
        let expected = expected.into();
        assert_eq!(actual, expected, "at {path:?} in {root}");
        self
    }

    pub fn json_path<T: DeserializeOwned>(&self, path: &str) -> T {
        let root = self.body_json();
        let value = resolve_path(&root, path);
        serde_json::from_value(value)
            .unwrap_or_else(|e| panic!("cannot read {path:?} from {root}: {e}"))
    }

    fn body_json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!("body is not JSON ({e}): {}", String::from_utf8_lossy(&self.body))
        })
    }
}

enum Step<'a> {
    Field(&'a str),
    Index(usize),
    Len,
}

fn steps(path: &str) -> Vec<Step<'_>> {
    let mut steps = Vec::new();
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        if segment == "len()" {
            steps.push(Step::Len);
            continue;
        }
        let mut parts = segment.split('[');
        if let Some(field) = parts.next().filter(|f| !f.is_empty()) {
            steps.push(Step::Field(field));
        }
        for index in parts {
            let index = index
                .strip_suffix(']')
                .and_then(|i| i.parse().ok())
                .unwrap_or_else(|| panic!("bad index in JSON path {path:?}"));
            steps.push(Step::Index(index));
        }
    }
    steps
}

/// Walk a path such as `[0].products[1].id` or `checks.len()` from `root`.
/// Missing fields and indices give `Null`.
pub fn resolve_path(root: &Value, path: &str) -> Value {
    steps(path)
        .into_iter()
        .fold(root.clone(), |current, step| match step {
            Step::Field(name) => current.get(name).cloned().unwrap_or(Value::Null),
            Step::Index(i) => current.get(i).cloned().unwrap_or(Value::Null),
            Step::Len => match &current {
                Value::Array(items) => items.len().into(),
                Value::Object(fields) => fields.len().into(),
                other => panic!("len() of a non-collection in {path:?}: {other}"),
            },
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use serde_json::json;

    #[test]
    fn resolves_nested_paths() {
        let root = json!([{ "id": 3, "products": [{ "id": 1 }, { "id": 4 }] }]);
        assert_eq!(resolve_path(&root, "[0].id"), json!(3));
        assert_eq!(resolve_path(&root, "[0].products[1].id"), json!(4));
        assert_eq!(resolve_path(&root, "[0].products.len()"), json!(2));
        assert_eq!(resolve_path(&root, "len()"), json!(1));
        assert_eq!(resolve_path(&root, "[5].id"), Value::Null);
    }

    #[tokio::test]
    async fn dispatches_in_process() {
        let app = TestApp::new(Router::new().route("/ping", get(|| async { "\"pong\"" })));
        app.get("/ping")
            .send()
            .await
            .assert_ok()
            .assert_json_path("", "pong");
        app.get("/nope").send().await.assert_not_found();
    }
}
