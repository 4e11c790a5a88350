//! Local RidePATH feed server for client tests.
//!
//! Serves a fixed feed document alongside a broken endpoint and a
//! non-JSON one, on an ephemeral localhost port.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Feed document served at `/ridepath.json`.
pub const SAMPLE_FEED: &str = r#"{
    "results": [
        {
            "consideredStation": "HOB",
            "destinations": [
                {"label": "ToNY", "messages": [
                    {"target": "WTC", "secondsToArrival": "240", "arrivalTimeMessage": "4 min",
                     "lineColor": "65C100", "headSign": "World Trade Center",
                     "lastUpdated": "2024-03-15T10:00:00-04:00"},
                    {"target": "33S", "secondsToArrival": "600", "arrivalTimeMessage": "10 min",
                     "lineColor": "4D92FB", "headSign": "33rd Street",
                     "lastUpdated": "2024-03-15T10:00:00-04:00"}
                ]}
            ]
        },
        {
            "consideredStation": "JSQ",
            "destinations": [
                {"label": "ToNJ", "messages": [
                    {"target": "NWK", "secondsToArrival": 90, "arrivalTimeMessage": "2 min",
                     "lineColor": "D93A30", "headSign": "Newark",
                     "lastUpdated": "2024-03-15T10:01:00-04:00"}
                ]}
            ]
        }
    ]
}"#;

/// A feed server running on localhost until dropped.
pub struct MockFeedServer {
    base: String,
    down_hits: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl MockFeedServer {
    /// Start serving on an ephemeral port.
    ///
    /// Routes: `/ridepath.json` (the sample feed), `/down` (503) and
    /// `/garbage` (200 with an HTML body).
    pub async fn start() -> Self {
        let down_hits = Arc::new(AtomicUsize::new(0));
        let hits = down_hits.clone();

        let router = Router::new()
            .route(
                "/ridepath.json",
                get(|| async { ([(header::CONTENT_TYPE, "application/json")], SAMPLE_FEED) }),
            )
            .route(
                "/down",
                get(move || {
                    let hits = hits.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        (StatusCode::SERVICE_UNAVAILABLE, "maintenance")
                    }
                }),
            )
            .route("/garbage", get(|| async { "<html>not json</html>" }));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock feed server");
        let addr = listener.local_addr().expect("mock feed server address");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            base: format!("http://{addr}"),
            down_hits,
            task,
        }
    }

    /// Full URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// How many requests `/down` has answered.
    pub fn down_hits(&self) -> usize {
        self.down_hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockFeedServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
