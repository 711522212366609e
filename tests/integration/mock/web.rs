// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Local stand-ins for the search engines, web pages and the generation API

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use fresh_rag::AppConfig;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Queries containing this marker get an empty result page
pub const UNKNOWN_MARKER: &str = "1999";

pub struct FakeWebState {
    pub base_url: String,
    pub google_hits: AtomicUsize,
    pub ddg_hits: AtomicUsize,
    pub page_hits: AtomicUsize,
    pub google_queries: Mutex<Vec<String>>,
    pub google_down: AtomicBool,
    pub chat_requests: Mutex<Vec<Value>>,
    pub chat_auth: Mutex<Vec<String>>,
    pub chat_reply: Mutex<String>,
    pub chat_status: AtomicU16,
}

impl FakeWebState {
    pub fn google_hits(&self) -> usize {
        self.google_hits.load(Ordering::SeqCst)
    }

    pub fn last_chat_request(&self) -> Option<Value> {
        self.chat_requests.lock().unwrap().last().cloned()
    }

    pub fn set_reply(&self, reply: &str) {
        *self.chat_reply.lock().unwrap() = reply.to_string();
    }
}

pub struct FakeWeb {
    pub addr: SocketAddr,
    pub state: Arc<FakeWebState>,
    handle: JoinHandle<()>,
}

impl FakeWeb {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = Arc::new(FakeWebState {
            base_url: format!("http://{}", addr),
            google_hits: AtomicUsize::new(0),
            ddg_hits: AtomicUsize::new(0),
            page_hits: AtomicUsize::new(0),
            google_queries: Mutex::new(Vec::new()),
            google_down: AtomicBool::new(false),
            chat_requests: Mutex::new(Vec::new()),
            chat_auth: Mutex::new(Vec::new()),
            chat_reply: Mutex::new("Ответ без чисел.".to_string()),
            chat_status: AtomicU16::new(200),
        });

        let app = Router::new()
            .route("/search", get(google_results))
            .route("/html/", post(ddg_results))
            .route("/page/:id", get(page))
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.state.base_url
    }

    /// Config pointing every outbound client at this server
    pub fn app_config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.search.google_url = format!("{}/search", self.base_url());
        config.search.duckduckgo_url = format!("{}/html/", self.base_url());
        config.search.request_timeout_secs = 5;
        config.content.allow_private_hosts = true;
        config.content.timeout_secs = 5;
        config.retrieval.task_timeout_secs = 5;
        config.generation.base_url = format!("{}/v1", self.base_url());
        config.generation.api_key = Some("test-key".to_string());
        config
    }
}

impl Drop for FakeWeb {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn result_page(base: &str, ids: &[u32]) -> String {
    let mut anchors = vec![
        r#"<a href="/search?q=next&start=10">Next</a>"#.to_string(),
        r#"<a href="https://accounts.google.com/signin">Sign in</a>"#.to_string(),
    ];
    anchors.extend(
        ids.iter()
            .map(|id| format!(r#"<a href="{}/page/{}">Result {}</a>"#, base, id, id)),
    );
    format!("<html><body>{}</body></html>", anchors.join("\n"))
}

async fn google_results(
    State(state): State<Arc<FakeWebState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.google_hits.fetch_add(1, Ordering::SeqCst);
    let q = params.get("q").cloned().unwrap_or_default();
    state.google_queries.lock().unwrap().push(q.clone());

    if state.google_down.load(Ordering::SeqCst) {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    if q.contains(UNKNOWN_MARKER) {
        return Html(result_page(&state.base_url, &[])).into_response();
    }
    Html(result_page(&state.base_url, &[1, 2, 3, 4, 5, 6])).into_response()
}

async fn ddg_results(
    State(state): State<Arc<FakeWebState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Html<String> {
    state.ddg_hits.fetch_add(1, Ordering::SeqCst);
    if form.get("q").map_or(false, |q| q.contains(UNKNOWN_MARKER)) {
        return Html("<html><body>Ничего не найдено</body></html>".to_string());
    }
    let encoded = |id: u32| {
        url::form_urlencoded::byte_serialize(format!("{}/page/{}", state.base_url, id).as_bytes())
            .collect::<String>()
    };
    Html(format!(
        r#"<html><body>
            <a class="result__a" href="//duckduckgo.com/l/?uddg={}&rut=abc">One</a>
            <a class="result__a" href="//duckduckgo.com/l/?uddg={}&rut=def">Three</a>
            <a href="https://duckduckgo.com/settings">Settings</a>
        </body></html>"#,
        encoded(1),
        encoded(3)
    ))
}

fn article(title: &str) -> String {
    format!(
        r#"<html><head><title>{title}</title>
            <style>.ad {{ display: none }}</style>
            <script>trackVisitor("secret");</script></head>
        <body><h1>{title}</h1>
            <p>Национальный банк сообщил актуальные данные на 2024 год.
               Подробности опубликованы в официальном пресс-релизе.</p>
            <noscript>Включите JavaScript</noscript>
        </body></html>"#
    )
}

/// 1, 3, 5: articles · 2: server error · 4: image · 6: too short
async fn page(State(state): State<Arc<FakeWebState>>, Path(id): Path<u32>) -> Response {
    state.page_hits.fetch_add(1, Ordering::SeqCst);
    match id {
        1 | 3 | 5 => Html(article(&format!("Статья {}", id))).into_response(),
        2 => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        4 => ([(header::CONTENT_TYPE, "image/png")], vec![0u8, 1, 2, 3]).into_response(),
        6 => Html("<p>мало</p>".to_string()).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn chat_completions(
    State(state): State<Arc<FakeWebState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.chat_requests.lock().unwrap().push(body);
    if let Some(auth) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        state.chat_auth.lock().unwrap().push(auth.to_string());
    }

    let status = state.chat_status.load(Ordering::SeqCst);
    if status != 200 {
        let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (code, Json(json!({"detail": "unavailable"}))).into_response();
    }

    let reply = state.chat_reply.lock().unwrap().clone();
    Json(json!({
        "id": "chat-test",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": reply},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    }))
    .into_response()
}
