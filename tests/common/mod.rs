#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    extract::{Path as UrlPath, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use umami_pageviews::config::Config;
use umami_pageviews::models::{AuthToken, StatsOutcome};
use umami_pageviews::umami::AnalyticsApi;
use umami_pageviews::{FetchError, FetchResult};

/// Create `count` markdown posts named `Post-NN.md` plus a non-content file.
pub fn create_posts(dir: &Path, count: usize) -> PathBuf {
    let posts = dir.join("posts");
    fs::create_dir_all(&posts).unwrap();
    for i in 0..count {
        fs::write(posts.join(format!("Post-{i:02}.md")), "---\ntitle: test\n---\n").unwrap();
    }
    fs::write(posts.join("cover.png"), [0u8; 4]).unwrap();
    posts
}

/// Config pointing at a temp directory, with pacing kept at the default
/// interval but no real sleep.
pub fn test_config(posts_dir: &Path, output_file: &Path) -> Config {
    let mut config = Config::default();
    config.paths.posts_dir = posts_dir.to_path_buf();
    config.paths.output_file = output_file.to_path_buf();
    config.fetch.pacing_delay_ms = 0;
    config
}

#[derive(Debug, Clone)]
pub enum FakeStats {
    Views(u64),
    Status(u16),
    Transport,
}

/// In-memory [`AnalyticsApi`] recording every call it receives.
#[derive(Default)]
pub struct FakeApi {
    pub fail_auth: bool,
    pub responses: HashMap<String, FakeStats>,
    pub default_views: u64,
    pub auth_calls: Mutex<usize>,
    pub stats_calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new(default_views: u64) -> Self {
        Self {
            default_views,
            ..Self::default()
        }
    }

    pub fn with(mut self, pathname: &str, stats: FakeStats) -> Self {
        self.responses.insert(pathname.to_string(), stats);
        self
    }

    pub fn stats_calls(&self) -> Vec<String> {
        self.stats_calls.lock().unwrap().clone()
    }

    pub fn auth_calls(&self) -> usize {
        *self.auth_calls.lock().unwrap()
    }
}

#[async_trait]
impl AnalyticsApi for FakeApi {
    async fn authenticate(&self) -> FetchResult<AuthToken> {
        *self.auth_calls.lock().unwrap() += 1;
        if self.fail_auth {
            return Err(FetchError::authentication(reqwest::StatusCode::NOT_FOUND));
        }
        Ok(AuthToken {
            website_id: "site-1".to_string(),
            token: "tok-123".to_string(),
        })
    }

    async fn page_stats(&self, _auth: &AuthToken, pathname: &str) -> FetchResult<StatsOutcome> {
        self.stats_calls.lock().unwrap().push(pathname.to_string());
        match self.responses.get(pathname) {
            Some(FakeStats::Views(n)) => Ok(StatsOutcome::Views(*n)),
            Some(FakeStats::Status(status)) => Ok(StatsOutcome::NoData { status: *status }),
            Some(FakeStats::Transport) => Err(FetchError::io(
                pathname,
                std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset"),
            )),
            None => Ok(StatsOutcome::Views(self.default_views)),
        }
    }
}

/// A stats request as seen by the stub server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub website_id: String,
    pub params: HashMap<String, String>,
    pub share_token: Option<String>,
}

#[derive(Debug, Clone)]
pub enum StubReply {
    Json(Value),
    Status(u16),
}

#[derive(Default)]
pub struct StubState {
    pub auth_status: Option<u16>,
    /// Keyed by the raw `path` query value, or `/` when absent.
    pub replies: HashMap<String, StubReply>,
    pub share_requests: Mutex<Vec<String>>,
    pub stats_requests: Mutex<Vec<RecordedRequest>>,
}

pub struct StubServer {
    pub base_url: String,
    pub state: Arc<StubState>,
}

impl StubServer {
    pub fn stats_requests(&self) -> Vec<RecordedRequest> {
        self.state.stats_requests.lock().unwrap().clone()
    }

    pub fn share_requests(&self) -> Vec<String> {
        self.state.share_requests.lock().unwrap().clone()
    }
}

/// Serve the Umami share and stats endpoints on an ephemeral local port.
pub async fn spawn_stub(state: StubState) -> StubServer {
    let state = Arc::new(state);
    let app = Router::new()
        .route("/api/share/{share_id}", get(share))
        .route("/api/websites/{website_id}/stats", get(stats))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubServer {
        base_url: format!("http://{addr}"),
        state,
    }
}

async fn share(State(state): State<Arc<StubState>>, UrlPath(share_id): UrlPath<String>) -> Response {
    state.share_requests.lock().unwrap().push(share_id);
    if let Some(status) = state.auth_status {
        return StatusCode::from_u16(status).unwrap().into_response();
    }
    Json(json!({"websiteId": "site-1", "token": "tok-123"})).into_response()
}

async fn stats(
    State(state): State<Arc<StubState>>,
    UrlPath(website_id): UrlPath<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let key = params.get("path").cloned().unwrap_or_else(|| "/".to_string());
    state.stats_requests.lock().unwrap().push(RecordedRequest {
        website_id,
        params,
        share_token: headers
            .get("x-umami-share-token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    match state.replies.get(&key) {
        Some(StubReply::Json(body)) => Json(body.clone()).into_response(),
        Some(StubReply::Status(status)) => StatusCode::from_u16(*status).unwrap().into_response(),
        None => Json(json!({"pageviews": {"value": 1, "prev": 0}})).into_response(),
    }
}
