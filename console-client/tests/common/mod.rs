//! 测试用的进程内后端

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{any, get, post};
use axum::{Json, Router};
use console_client::{HttpClient, NotifyingGateway, RecordingNotifier};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 后端收到的一次请求
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct BackendState {
    pub requests: Arc<Mutex<Vec<Recorded>>>,
    pub hits: Arc<AtomicU64>,
}

impl BackendState {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }

    pub fn last(&self) -> Option<Recorded> {
        self.requests.lock().last().cloned()
    }

    fn record(&self, method: &Method, path: &str, query: HashMap<String, String>, body: &str) {
        let body = serde_json::from_str(body).unwrap_or(Value::Null);
        self.requests.lock().push(Recorded {
            method: method.to_string(),
            path: path.to_string(),
            query,
            body,
        });
    }
}

pub fn envelope(data: Value, msg: &str, errno: i64) -> Json<Value> {
    Json(json!({ "data": data, "msg": msg, "errno": errno }))
}

async fn user_list(
    State(state): State<BackendState>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Json<Value> {
    state.record(&method, "/user/list", query, &body);
    envelope(json!({ "list": [], "count": 0 }), "", 0)
}

async fn counter(State(state): State<BackendState>) -> Json<Value> {
    let hit = state.hits.fetch_add(1, Ordering::SeqCst) + 1;
    envelope(json!({ "hit": hit }), "", 0)
}

async fn status(Path(code): Path<u16>) -> impl IntoResponse {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": "boom" })))
}

async fn expired() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": ["session expired"] })),
    )
}

async fn plain_text_error() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")
}

async fn not_an_envelope() -> impl IntoResponse {
    (StatusCode::OK, "hello")
}

async fn business_fail() -> Json<Value> {
    envelope(Value::Null, "用户名已存在", 1002)
}

async fn business_fail_empty() -> Json<Value> {
    envelope(Value::Null, "", 5)
}

async fn login(
    State(state): State<BackendState>,
    method: Method,
    body: String,
) -> impl IntoResponse {
    state.record(&method, "/user/login", HashMap::new(), &body);
    (
        [(header::SET_COOKIE, "sid=abc123; Path=/")],
        envelope(json!({ "userName": "admin" }), "", 0),
    )
}

async fn whoami(headers: HeaderMap) -> Json<Value> {
    let logged_in = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|cookie| cookie.contains("sid=abc123"))
        .unwrap_or(false);
    if logged_in {
        envelope(json!("admin"), "", 0)
    } else {
        envelope(Value::Null, "not logged in", 401)
    }
}

pub fn backend_router(state: BackendState) -> Router {
    Router::new()
        .route("/user/list", post(user_list))
        .route("/user/login", post(login))
        .route("/activity/list", post(activity_list))
        .route("/whoami", post(whoami))
        .route("/counter", post(counter))
        .route("/status/{code}", any(status))
        .route("/expired", post(expired))
        .route("/plain-error", post(plain_text_error))
        .route("/not-envelope", post(not_an_envelope))
        .route("/business-fail", post(business_fail))
        .route("/business-fail-empty", post(business_fail_empty))
        .route("/health", get(|| async { "ok" }))
        .fallback(echo)
        .with_state(state)
}

async fn activity_list(
    State(state): State<BackendState>,
    method: Method,
    body: String,
) -> Json<Value> {
    state.record(&method, "/activity/list", HashMap::new(), &body);
    envelope(
        json!({
            "list": [{
                "id": 1,
                "name": "spring run",
                "startTime": "2023-04-01 08:00:00",
                "endTime": "2023-04-01 12:00:00",
                "place": "park",
                "min": 5,
                "max": 100,
                "money": 0,
                "banner": "",
                "status": 1,
                "introduction": "",
                "note": "",
                "content": "",
                "createTime": "2023-03-01 10:00:00",
                "updateTime": "2023-03-01 10:00:00",
                "isDelete": 0
            }],
            "count": 1
        }),
        "",
        0,
    )
}

/// 原样回显请求，用于检查方法、查询参数、请求体和请求头
async fn echo(
    State(state): State<BackendState>,
    uri: Uri,
    method: Method,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Json<Value> {
    let path = uri.path().to_string();
    state.record(&method, &path, query.clone(), &body);
    let client_header = headers
        .get("x-client")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    envelope(
        json!({
            "method": method.to_string(),
            "path": path,
            "query": query,
            "body": serde_json::from_str::<Value>(&body).unwrap_or(Value::Null),
            "xClient": client_header,
        }),
        "",
        0,
    )
}

/// 启动后端，返回 base_url
pub async fn spawn_backend(state: BackendState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = backend_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// 一个已经关闭的端口，用于模拟网络错误
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub struct Harness {
    pub state: BackendState,
    pub base_url: String,
    pub client: HttpClient,
    pub notifier: Arc<RecordingNotifier>,
    pub gateway: NotifyingGateway,
}

pub async fn harness() -> Harness {
    let state = BackendState::default();
    let base_url = spawn_backend(state.clone()).await;
    let client = HttpClient::new(base_url.clone()).unwrap();
    let notifier = Arc::new(RecordingNotifier::new());
    let gateway = NotifyingGateway::new(client.clone(), notifier.clone());
    Harness {
        state,
        base_url,
        client,
        notifier,
        gateway,
    }
}
