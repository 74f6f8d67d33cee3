//! 回环测试后端
//!
//! 用 axum 起一个真实的 HTTP 服务, 按 MealHub 后端的路径和
//! 响应形态应答, 记录每个接口的命中次数和请求体供断言。

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};

use mealhub::config::Config;

pub const TEST_TOKEN: &str = "token-abc";

pub struct MockBackend {
    pub profile_hits: AtomicUsize,
    pub recommend_hits: AtomicUsize,
    pub login_hits: AtomicUsize,
    pub logout_hits: AtomicUsize,
    pub delete_hits: AtomicUsize,
    pub update_hits: AtomicUsize,
    pub signup_hits: AtomicUsize,
    pub party_create_hits: AtomicUsize,

    /// 回源前的人为延迟, 并发合并测试用
    pub profile_delay_ms: AtomicU64,

    /// (状态码, 响应体)
    pub profile_response: Mutex<(u16, Value)>,
    pub recommend_response: Mutex<(u16, Value)>,
    pub login_response: Mutex<(u16, String)>,
    pub signup_response: Mutex<(u16, Value)>,
    pub party_create_response: Mutex<(u16, String)>,
    pub party_join_response: Mutex<(u16, String)>,

    pub recommend_bodies: Mutex<Vec<Value>>,
    pub skip_bodies: Mutex<Vec<Value>>,
    pub satisfy_bodies: Mutex<Vec<Value>>,
    pub update_bodies: Mutex<Vec<Value>>,
    pub signup_bodies: Mutex<Vec<Value>>,
    pub party_join_bodies: Mutex<Vec<Value>>,
}

impl MockBackend {
    fn new() -> Self {
        Self {
            profile_hits: AtomicUsize::new(0),
            recommend_hits: AtomicUsize::new(0),
            login_hits: AtomicUsize::new(0),
            logout_hits: AtomicUsize::new(0),
            delete_hits: AtomicUsize::new(0),
            update_hits: AtomicUsize::new(0),
            signup_hits: AtomicUsize::new(0),
            party_create_hits: AtomicUsize::new(0),
            profile_delay_ms: AtomicU64::new(0),
            profile_response: Mutex::new((200, json!({"id": 7, "gender": "male"}))),
            recommend_response: Mutex::new((
                200,
                json!({"recommendations": [{"menu_id": 5, "menu_name": "비빔밥"}]}),
            )),
            login_response: Mutex::new((200, TEST_TOKEN.to_string())),
            signup_response: Mutex::new((200, json!({}))),
            party_create_response: Mutex::new((200, "PARTY123".to_string())),
            party_join_response: Mutex::new((200, "joined".to_string())),
            recommend_bodies: Mutex::new(Vec::new()),
            skip_bodies: Mutex::new(Vec::new()),
            satisfy_bodies: Mutex::new(Vec::new()),
            update_bodies: Mutex::new(Vec::new()),
            signup_bodies: Mutex::new(Vec::new()),
            party_join_bodies: Mutex::new(Vec::new()),
        }
    }

    pub fn set_profile_response(&self, status: u16, body: Value) {
        *self.profile_response.lock().unwrap() = (status, body);
    }

    pub fn set_recommend_response(&self, status: u16, body: Value) {
        *self.recommend_response.lock().unwrap() = (status, body);
    }

    pub fn set_login_response(&self, status: u16, body: &str) {
        *self.login_response.lock().unwrap() = (status, body.to_string());
    }

    pub fn set_signup_response(&self, status: u16, body: Value) {
        *self.signup_response.lock().unwrap() = (status, body);
    }

    pub fn set_party_join_response(&self, status: u16, body: &str) {
        *self.party_join_response.lock().unwrap() = (status, body.to_string());
    }
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TEST_TOKEN))
        .unwrap_or(false)
}

async fn login(
    State(state): State<Arc<MockBackend>>,
    Json(_body): Json<Value>,
) -> (StatusCode, String) {
    state.login_hits.fetch_add(1, Ordering::SeqCst);
    let (status, body) = state.login_response.lock().unwrap().clone();
    (StatusCode::from_u16(status).unwrap(), body)
}

async fn signup(
    State(state): State<Arc<MockBackend>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.signup_hits.fetch_add(1, Ordering::SeqCst);
    state.signup_bodies.lock().unwrap().push(body);
    let (status, body) = state.signup_response.lock().unwrap().clone();
    (StatusCode::from_u16(status).unwrap(), Json(body))
}

async fn profile(
    State(state): State<Arc<MockBackend>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.profile_hits.fetch_add(1, Ordering::SeqCst);

    let delay = state.profile_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
    }

    if !bearer_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    let (status, body) = state.profile_response.lock().unwrap().clone();
    (StatusCode::from_u16(status).unwrap(), Json(body))
}

async fn update_profile(
    State(state): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.update_hits.fetch_add(1, Ordering::SeqCst);
    if !bearer_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    state.update_bodies.lock().unwrap().push(body);
    (StatusCode::OK, Json(json!({})))
}

async fn logout(State(state): State<Arc<MockBackend>>, headers: HeaderMap) -> StatusCode {
    state.logout_hits.fetch_add(1, Ordering::SeqCst);
    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    StatusCode::OK
}

async fn delete_account(State(state): State<Arc<MockBackend>>, headers: HeaderMap) -> StatusCode {
    state.delete_hits.fetch_add(1, Ordering::SeqCst);
    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    StatusCode::OK
}

async fn recommend(
    State(state): State<Arc<MockBackend>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.recommend_hits.fetch_add(1, Ordering::SeqCst);
    state.recommend_bodies.lock().unwrap().push(body);
    let (status, body) = state.recommend_response.lock().unwrap().clone();
    (StatusCode::from_u16(status).unwrap(), Json(body))
}

async fn skip_feedback(
    State(state): State<Arc<MockBackend>>,
    Json(body): Json<Value>,
) -> StatusCode {
    state.skip_bodies.lock().unwrap().push(body);
    StatusCode::OK
}

async fn satisfy_feedback(
    State(state): State<Arc<MockBackend>>,
    Json(body): Json<Value>,
) -> StatusCode {
    state.satisfy_bodies.lock().unwrap().push(body);
    StatusCode::OK
}

async fn party_create(State(state): State<Arc<MockBackend>>) -> (StatusCode, String) {
    state.party_create_hits.fetch_add(1, Ordering::SeqCst);
    let (status, body) = state.party_create_response.lock().unwrap().clone();
    (StatusCode::from_u16(status).unwrap(), body)
}

async fn party_join(
    State(state): State<Arc<MockBackend>>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    state.party_join_bodies.lock().unwrap().push(body);
    let (status, body) = state.party_join_response.lock().unwrap().clone();
    (StatusCode::from_u16(status).unwrap(), body)
}

/// 启动回环后端, 返回句柄和指向它的客户端配置
pub async fn spawn_backend() -> (Arc<MockBackend>, Config) {
    let state = Arc::new(MockBackend::new());

    let app = Router::new()
        .route("/backend/user/login", post(login))
        .route("/backend/user/signin", post(signup))
        .route("/backend/user/info", get(profile))
        .route("/backend/user/update", put(update_profile))
        .route("/backend/user/logout", post(logout))
        .route("/backend/delete", delete(delete_account))
        .route("/backend/party/create", post(party_create))
        .route("/backend/party/join", post(party_join))
        .route("/api/recommend/", post(recommend))
        .route("/api/feedback/skip", post(skip_feedback))
        .route("/api/feedback/satisfy", post(satisfy_feedback))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend died");
    });

    let config = Config {
        backend_base_url: format!("http://{}/backend", addr),
        api_base_url: format!("http://{}/api", addr),
        cache_ttl_secs: 1800,
    };

    (state, config)
}

/// 轮询等待一个即发即忘的上报落地
pub async fn wait_for<F: Fn() -> bool>(predicate: F) {
    for _ in 0..100 {
        if predicate() {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    panic!("condition not reached within timeout");
}
