//! A local stand-in for the YouTube Data API, for tests.
//!
//! Every request is recorded, then answered by a caller-supplied handler.

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode, body};
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

/// What the server saw of one request.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
}

impl RecordedRequest {
    /// The first value of query parameter `name`.
    pub(crate) fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value of query parameter `name`, in order.
    pub(crate) fn params(&self, name: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

pub(crate) struct MockYouTube {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockYouTube {
    /// Starts serving on a random localhost port.
    ///
    /// `handler` returns the status code and JSON body for each request.
    pub(crate) async fn start<H>(handler: H) -> Self
    where
        H: Fn(&RecordedRequest) -> (u16, serde_json::Value) + Send + Sync + 'static,
    {
        Self::start_raw(move |req| {
            let (status, body) = handler(req);
            (status, body.to_string())
        })
        .await
    }

    /// Like [`Self::start`], but the handler supplies the body verbatim.
    pub(crate) async fn start_raw<H>(handler: H) -> Self
    where
        H: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind to localhost");
        let addr = listener.local_addr().expect("get local address");
        let handler = Arc::new(handler);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((conn, _)) = listener.accept().await {
                let handler = Arc::clone(&handler);
                let log = Arc::clone(&log);
                let service = service_fn(move |req: Request<body::Incoming>| {
                    let handler = Arc::clone(&handler);
                    let log = Arc::clone(&log);
                    async move {
                        let recorded = RecordedRequest {
                            path: req.uri().path().to_string(),
                            query: form_urlencoded::parse(
                                req.uri().query().unwrap_or("").as_bytes(),
                            )
                            .into_owned()
                            .collect(),
                        };
                        let (status, body) = handler(&recorded);
                        log.lock().unwrap().push(recorded);

                        let mut response = Response::new(Full::<Bytes>::from(body));
                        *response.status_mut() =
                            StatusCode::from_u16(status).expect("valid status code");
                        response
                            .headers_mut()
                            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                        Ok::<_, Infallible>(response)
                    }
                });
                tokio::spawn(async move {
                    let conn = hyper_util::rt::TokioIo::new(conn);
                    let _ = hyper::server::conn::http1::Builder::new()
                        .serve_connection(conn, service)
                        .await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All requests received so far, oldest first.
    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Received requests whose path ends in `/{endpoint}`.
    pub(crate) fn requests_to(&self, endpoint: &str) -> Vec<RecordedRequest> {
        let suffix = format!("/{endpoint}");
        self.requests()
            .into_iter()
            .filter(|r| r.path.ends_with(&suffix))
            .collect()
    }
}

/// The JSON for one `videos.list` item.
pub(crate) fn video_item(id: &str, statistics: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "kind": "youtube#video",
        "id": id,
        "snippet": {
            "title": format!("Video {id}"),
            "publishedAt": "2024-05-01T12:00:00Z"
        },
        "contentDetails": { "duration": "PT10M5S" },
        "statistics": statistics
    })
}

/// The JSON for one `playlistItems.list` item.
pub(crate) fn playlist_item(video_id: &str) -> serde_json::Value {
    serde_json::json!({
        "kind": "youtube#playlistItem",
        "contentDetails": { "videoId": video_id, "videoPublishedAt": "2024-05-01T12:00:00Z" }
    })
}
