//! YouTube Data API v3 client, limited to what channel video extraction needs.
//!
//! Three read-only endpoints are used, all authenticated with an API key:
//!
//! 1. `channels.list` maps a channel handle to the channel's uploads playlist
//!    ([`YouTubeClient::resolve_uploads_playlist`]).
//! 2. `playlistItems.list` pages through that playlist for video ids
//!    ([`YouTubeClient::collect_video_ids`], or lazily via
//!    [`YouTubeClient::list_playlist_video_ids`]).
//! 3. `videos.list` fetches snippet, content details and statistics for up to 50 ids at a
//!    time ([`YouTubeClient::extract_video_data`]).
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use youtube_video_stats::{Config, YouTubeClient};
//!
//! # async fn example() -> youtube_video_stats::Result<()> {
//! # let config = Config::from_env().unwrap();
//! let client = YouTubeClient::new(&config);
//! let playlist = client.resolve_uploads_playlist("MrBeast").await?;
//! let ids = client.collect_video_ids(&playlist, 50).await?;
//! for record in client.extract_video_data(&ids, 50).await? {
//!     println!("{}: {:?} views", record.title, record.view_count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod client;
pub mod playlist_items;
pub mod types;
pub mod videos;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::YouTubeClient;
pub use types::{PageInfo, PagedStream};

pub use channels::{Channel, ChannelContentDetails, RelatedPlaylists};
pub use playlist_items::{PlaylistItem, PlaylistItemContentDetails};
pub use videos::{Video, VideoContentDetails, VideoSnippet, VideoStatistics};
