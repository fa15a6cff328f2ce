//! Core YouTube API client functionality.

use crate::batch::batch;
use crate::config::{Config, MAX_PAGE_SIZE};
use crate::record::VideoRecord;
use crate::youtube_api::{
    channels::ChannelListResponse, playlist_items::PlaylistItemListResponse, types::PagedStream,
    videos::VideoListResponse,
};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use tokio_stream::{Stream, StreamExt};
use tracing::instrument;

/// Client for the read-only YouTube Data API v3 endpoints used to extract channel video data.
///
/// Requests are authenticated with an API key rather than OAuth, so only public data is
/// reachable. Every method issues its requests one after the other and returns the first
/// failure as-is; nothing is retried.
#[derive(Clone)]
pub struct YouTubeClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl YouTubeClient {
    /// Creates a client from process configuration.
    ///
    /// The underlying HTTP client enforces [`Config::request_timeout`] on every request.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed, which only happens when the TLS
    /// backend fails to initialise.
    pub fn new(config: &Config) -> Self {
        let client = Self::http_client_builder(config)
            .build()
            .expect("building reqwest client should not fail");
        Self::with_http_client(config.api_key.clone(), config.api_base_url.clone(), client)
    }

    fn http_client_builder(config: &Config) -> reqwest::ClientBuilder {
        reqwest::ClientBuilder::new().timeout(config.request_timeout)
    }

    /// Creates a client that sends its requests through an existing [`reqwest::Client`].
    ///
    /// `base_url` is the API root, e.g. [`DEFAULT_API_BASE_URL`](crate::config::DEFAULT_API_BASE_URL).
    pub fn with_http_client(
        api_key: String,
        base_url: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            client,
        }
    }

    /// Looks up the uploads playlist of the channel with the given handle.
    ///
    /// The uploads playlist is the system-generated playlist holding every video the channel
    /// has published. Uses `channels.list` with `forHandle`. If several channels match, the
    /// first one wins.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no channel has that handle, plus the usual transport and remote
    /// failures.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self), ret, err)]
    pub async fn resolve_uploads_playlist(&self, channel_handle: &str) -> Result<String> {
        let channels: ChannelListResponse = self
            .get(
                "channels",
                &[("part", "contentDetails"), ("forHandle", channel_handle)],
            )
            .await?;

        let channel = channels
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound {
                handle: channel_handle.to_string(),
            })?;

        tracing::debug!(channel_id = channel.id, "resolved channel handle");

        Ok(channel.content_details.related_playlists.uploads)
    }

    /// Returns a stream of the id of every video in a playlist, in playlist order.
    ///
    /// Pages of `page_size` items are fetched from `playlistItems.list` as the stream is
    /// consumed. `page_size` must be between 1 and [`MAX_PAGE_SIZE`]; otherwise the stream
    /// yields a single [`Error::InvalidArgument`] without contacting the API.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    #[instrument(skip(self))]
    pub fn list_playlist_video_ids<'a>(
        &'a self,
        playlist_id: &'a str,
        page_size: u32,
    ) -> impl Stream<Item = Result<String>> + use<'a> {
        PagedStream::new(move |page_token| async move {
            check_size("page size", page_size as usize, MAX_PAGE_SIZE as usize)?;
            let page = self
                .list_playlist_items_internal(playlist_id, page_size, page_token)
                .await?;
            let ids = page
                .items
                .into_iter()
                .map(|item| item.content_details.video_id)
                .collect::<VecDeque<_>>();
            Ok::<_, Error>((ids, page.next_page_token))
        })
    }

    /// Collects the id of every video in a playlist, in playlist order.
    ///
    /// Makes one `playlistItems.list` request per page. Duplicates are kept. If any page fails
    /// the whole collection fails, and none of the ids gathered so far are returned.
    #[instrument(skip(self), err)]
    pub async fn collect_video_ids(
        &self,
        playlist_id: &str,
        page_size: u32,
    ) -> Result<Vec<String>> {
        let ids: Vec<String> = self
            .list_playlist_video_ids(playlist_id, page_size)
            .collect::<Result<_>>()
            .await?;
        tracing::debug!(videos = ids.len(), "collected playlist video ids");
        Ok(ids)
    }

    /// Fetches snippet, content details and statistics for the given videos.
    ///
    /// Ids are sent to `videos.list` in groups of `batch_size`, one request per group, so an
    /// empty `video_ids` makes no requests. Within a group, records come back in whatever
    /// order the API returns them, and ids the API doesn't know are skipped. Any failed
    /// request fails the whole extraction.
    ///
    /// `batch_size` must be between 1 and 50, the most ids `videos.list` accepts at once.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self, video_ids), fields(videos = video_ids.len()), err)]
    pub async fn extract_video_data(
        &self,
        video_ids: &[String],
        batch_size: usize,
    ) -> Result<Vec<VideoRecord>> {
        check_size("batch size", batch_size, MAX_PAGE_SIZE as usize)?;

        let mut records = Vec::with_capacity(video_ids.len());
        for ids in batch(video_ids, batch_size) {
            let videos = self.list_videos_internal(ids).await?;
            records.extend(videos.items.into_iter().map(VideoRecord::from));
        }
        Ok(records)
    }

    async fn list_playlist_items_internal(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<String>,
    ) -> Result<PlaylistItemListResponse> {
        let max_results_string = max_results.to_string();
        let mut query_params = vec![
            ("playlistId", playlist_id),
            ("maxResults", max_results_string.as_str()),
            ("part", "contentDetails"),
        ];

        if let Some(ref token) = page_token {
            query_params.push(("pageToken", token.as_str()));
        }

        let page: PlaylistItemListResponse = self.get("playlistItems", &query_params).await?;

        tracing::debug!(
            total_results = page.page_info.as_ref().map(|p| p.total_results),
            returned_items = page.items.len(),
            has_next_page = page.next_page_token.is_some(),
            "fetched playlist items"
        );

        Ok(page)
    }

    async fn list_videos_internal(&self, ids: &[String]) -> Result<VideoListResponse> {
        let id_list = ids.join(",");
        let query_params = [
            ("part", "contentDetails"),
            ("part", "snippet"),
            ("part", "statistics"),
            ("id", id_list.as_str()),
        ];

        let videos: VideoListResponse = self.get("videos", &query_params).await?;

        tracing::debug!(
            requested = ids.len(),
            returned_items = videos.items.len(),
            "fetched video details"
        );

        Ok(videos)
    }

    /// Sends a GET to `{base_url}/{endpoint}` with the API key added to `query_params`.
    ///
    /// This is the one place where transport, status, and payload failures are turned
    /// into [`Error`]s.
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    async fn get<R: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query_params: &[(&str, &str)],
    ) -> Result<R> {
        let url = format!("{}/{}", self.base_url, endpoint);

        // without_url: the request url carries the API key
        let transport = |source: reqwest::Error| Error::Transport {
            endpoint,
            source: source.without_url(),
        };

        let response = self
            .client
            .get(&url)
            .query(query_params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(Error::Remote {
                endpoint,
                status,
                body,
            });
        }

        let body = response.text().await.map_err(transport)?;

        serde_json::from_str(&body).map_err(|source| Error::MalformedResponse { endpoint, source })
    }
}

fn check_size(name: &'static str, value: usize, max: usize) -> Result<()> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidArgument { name, value, max })
    }
}
