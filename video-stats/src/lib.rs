//! Extracts metadata and statistics for every video a YouTube channel has uploaded.
//!
//! See [`fetch_channel_video_records`] for the whole flow, or the methods on
//! [`YouTubeClient`] for the individual steps.

use crate::config::MAX_PAGE_SIZE;
use tracing::instrument;

pub mod batch;
pub mod config;
pub mod error;
pub mod record;
pub mod youtube_api;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use record::VideoRecord;
pub use youtube_api::YouTubeClient;

/// Request sizing for [`fetch_channel_video_records`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// `maxResults` per `playlistItems.list` page, 1 to 50.
    pub page_size: u32,
    /// Video ids per `videos.list` request, 1 to 50.
    pub batch_size: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            batch_size: MAX_PAGE_SIZE as usize,
        }
    }
}

impl From<&Config> for ExtractOptions {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            batch_size: config.batch_size,
        }
    }
}

/// Fetches metadata and statistics for every video uploaded by a channel.
///
/// Resolves `channel_handle` to the channel's uploads playlist, collects every video id in
/// it, then fetches the videos in batches. The first error at any stage is returned and no
/// partial results are kept.
#[instrument(skip(yt), err)]
pub async fn fetch_channel_video_records(
    yt: &YouTubeClient,
    channel_handle: &str,
    options: ExtractOptions,
) -> Result<Vec<VideoRecord>> {
    let playlist_id = yt.resolve_uploads_playlist(channel_handle).await?;
    tracing::info!(playlist_id, "resolved uploads playlist");

    let video_ids = yt.collect_video_ids(&playlist_id, options.page_size).await?;
    tracing::info!(videos = video_ids.len(), "collected video ids");

    let records = yt
        .extract_video_data(&video_ids, options.batch_size)
        .await?;
    tracing::info!(records = records.len(), "extracted video data");

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube_api::test_server::{MockYouTube, playlist_item, video_item};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn handler(req: &youtube_api::test_server::RecordedRequest) -> (u16, serde_json::Value) {
        match req.path.as_str() {
            "/channels" => (
                200,
                json!({
                    "items": [{
                        "id": "UCX6OQ3DkcsbYNE6H8uQQuVA",
                        "contentDetails": {
                            "relatedPlaylists": { "uploads": "UUX6OQ3DkcsbYNE6H8uQQuVA" }
                        }
                    }]
                }),
            ),
            "/playlistItems" => match req.param("pageToken") {
                None => (
                    200,
                    json!({
                        "items": [playlist_item("vid1"), playlist_item("vid2")],
                        "nextPageToken": "page2"
                    }),
                ),
                Some(_) => (200, json!({ "items": [playlist_item("vid3")] })),
            },
            "/videos" => {
                let items: Vec<_> = req
                    .param("id")
                    .unwrap_or("")
                    .split(',')
                    .map(|id| {
                        let stats = if id == "vid3" {
                            json!({ "viewCount": "7", "likeCount": "3" })
                        } else {
                            json!({ "viewCount": "100", "likeCount": "9", "commentCount": "4" })
                        };
                        video_item(id, stats)
                    })
                    .collect();
                (200, json!({ "items": items }))
            }
            other => (404, json!({ "error": { "code": 404, "message": other } })),
        }
    }

    #[tokio::test]
    async fn channel_to_records() {
        let server = MockYouTube::start(handler).await;
        let yt = YouTubeClient::with_http_client(
            "key".to_string(),
            server.base_url(),
            reqwest::Client::builder().no_proxy().build().unwrap(),
        );

        let records = fetch_channel_video_records(
            &yt,
            "MrBeast",
            ExtractOptions {
                page_size: 2,
                batch_size: 2,
            },
        )
        .await
        .unwrap();

        let got: Vec<&str> = records.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(got, vec!["vid1", "vid2", "vid3"]);
        assert_eq!(records[0].comment_count.as_deref(), Some("4"));
        assert_eq!(records[2].comment_count, None);

        let playlist_requests = server.requests_to("playlistItems");
        assert_eq!(playlist_requests.len(), 2);
        assert!(
            playlist_requests
                .iter()
                .all(|r| r.param("playlistId") == Some("UUX6OQ3DkcsbYNE6H8uQQuVA"))
        );

        let batches: Vec<String> = server
            .requests_to("videos")
            .iter()
            .filter_map(|r| r.param("id").map(String::from))
            .collect();
        assert_eq!(batches, vec!["vid1,vid2".to_string(), "vid3".to_string()]);

        let paths: Vec<String> = server.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec!["/channels", "/playlistItems", "/playlistItems", "/videos", "/videos"]
        );
    }

    #[tokio::test]
    async fn unknown_channel_stops_before_listing() {
        let server = MockYouTube::start(|_| {
            (
                200,
                json!({ "pageInfo": { "totalResults": 0, "resultsPerPage": 5 } }),
            )
        })
        .await;
        let yt = YouTubeClient::with_http_client(
            "key".to_string(),
            server.base_url(),
            reqwest::Client::builder().no_proxy().build().unwrap(),
        );
        let err = fetch_channel_video_records(&yt, "ghost", ExtractOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(server.requests().len(), 1);
    }

    #[test]
    fn options_follow_config() {
        let config = Config::from_lookup(|name| match name {
            "PAGE_SIZE" => Some("25".to_string()),
            "BATCH_SIZE" => Some("10".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(
            ExtractOptions::from(&config),
            ExtractOptions {
                page_size: 25,
                batch_size: 10
            }
        );
        assert_eq!(
            ExtractOptions::default(),
            ExtractOptions {
                page_size: 50,
                batch_size: 50
            }
        );
    }
}
