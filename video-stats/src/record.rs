//! The flattened per-video output of an extraction.

use crate::youtube_api::videos::Video;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Metadata and statistics for one video.
///
/// Serializes with the same keys the API uses (`publishedAt`, `viewCount`, ...), plus
/// `video_id`. Counts stay decimal strings as the API sends them and are `None` where the API
/// left them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: Timestamp,
    pub duration: String,
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

impl From<Video> for VideoRecord {
    fn from(video: Video) -> Self {
        Self {
            video_id: video.id,
            title: video.snippet.title,
            published_at: video.snippet.published_at,
            duration: video.content_details.duration,
            view_count: video.statistics.view_count,
            like_count: video.statistics.like_count,
            comment_count: video.statistics.comment_count,
        }
    }
}
