#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{Router, extract::Request, middleware::{self, Next}};
use notionlike_trading::{routes::create_router, state::AppState};

/// Every `METHOD /path` the test server received, in order.
#[derive(Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<String>>>);

impl RequestLog {
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| e.as_str() == entry).count()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

/// Serves `app` on an ephemeral local port and returns its base url.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// The reference backend with request logging.
pub async fn spawn_backend() -> (String, RequestLog) {
    let log = RequestLog::default();
    let recorder = log.clone();

    let app = create_router()
        .with_state(AppState::shared())
        .layer(middleware::from_fn(move |req: Request, next: Next| {
            let recorder = recorder.clone();
            async move {
                recorder
                    .0
                    .lock()
                    .unwrap()
                    .push(format!("{} {}", req.method(), req.uri().path()));
                next.run(req).await
            }
        }));

    (serve(app).await, log)
}
