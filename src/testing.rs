//! In-process mock of the case-management server for tests.

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{post, MethodRouter};
use axum::Router;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub(crate) struct Hit {
    pub method: String,
    pub path: String,
    pub cookie: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

type Hits = Arc<Mutex<Vec<Hit>>>;

pub(crate) struct MockServer {
    pub base_url: String,
    hits: Hits,
}

async fn accept_login() -> impl IntoResponse {
    ([(header::SET_COOKIE, "session=abc123; Path=/")], "welcome")
}

/// Handler that kills the connection without answering, so the client sees
/// a transport error rather than an HTTP status.
pub(crate) async fn abort_connection() -> StatusCode {
    panic!("connection aborted by mock server")
}

async fn record(State(hits): State<Hits>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let header_str = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    hits.lock().unwrap().push(Hit {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        cookie: header_str(header::COOKIE),
        content_type: header_str(header::CONTENT_TYPE),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    });
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

impl MockServer {
    /// Serve `routes` plus a `/login` that always accepts and sets a session cookie.
    pub fn start(routes: Router) -> Self {
        Self::start_with_login(routes, post(accept_login))
    }

    pub fn start_with_login(routes: Router, login: MethodRouter) -> Self {
        let hits: Hits = Arc::new(Mutex::new(Vec::new()));
        let app = routes
            .route("/login", login)
            .layer(middleware::from_fn_with_state(Arc::clone(&hits), record));

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });
        let addr = rx.recv().unwrap();

        MockServer {
            base_url: format!("http://{}", addr),
            hits,
        }
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hits_for(&self, path: &str) -> Vec<Hit> {
        self.hits().into_iter().filter(|h| h.path == path).collect()
    }
}
