use eyre::Context;
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_video_stats::{Config, ExtractOptions, YouTubeClient, fetch_channel_video_records};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // a missing .env is fine; the variables may come from the real environment
    let dotenv = dotenvy::dotenv();

    // stdout carries the JSON, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => tracing::debug!("no .env file found"),
        Err(e) => return Err(eyre::Report::new(e).wrap_err("load .env file")),
    }

    let config = Config::from_env().context("read configuration from environment")?;
    tracing::debug!(?config, "starting extraction");

    let yt = YouTubeClient::new(&config);
    let records = fetch_channel_video_records(
        &yt,
        &config.channel_handle,
        ExtractOptions::from(&config),
    )
    .await
    .with_context(|| format!("extract video data for channel {:?}", config.channel_handle))?;

    let json = serde_json::to_string_pretty(&records).context("serialize video records")?;
    println!("{json}");

    Ok(())
}
