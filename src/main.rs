#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![warn(clippy::perf)]
#![warn(clippy::complexity)]
#![warn(clippy::style)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use download::AssetKind;
use tracing::{info, warn};
use url::Url;

pub mod artwork;
pub mod download;
pub mod error;
pub mod hls;
pub mod music;
pub mod util;

/// Resolves the full-resolution artwork and motion video behind a music
/// store album page
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Album / playlist page URL to inspect
    url: Url,

    /// Network timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Directory downloaded assets are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Print resolved URLs without downloading anything
    #[arg(long)]
    no_download: bool,

    /// Open downloaded assets in the platform viewer
    #[arg(long)]
    open: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let client = util::init_http_client(Duration::from_secs(args.timeout));

    let page_url = music::normalize_page_url(args.url.clone());
    if !music::PAGE_URL_REGEX.is_match(page_url.as_str()) {
        warn!("{page_url} does not look like a music store page, trying anyway");
    }

    info!("Inspecting {page_url}");
    let Some(server_data) = music::page::fetch_server_data(&client, &page_url).await? else {
        println!("No artwork assets were discovered.");
        return Ok(());
    };

    let image_url = server_data
        .container_artwork()
        .and_then(|art| artwork::image_url(&art.url, art.width, art.height));

    let video_url = match server_data.playlist_url() {
        Some(raw) => match Url::parse(raw) {
            Ok(playlist_url) => hls::resolve_video_url(&client, &playlist_url).await?,
            Err(e) => {
                warn!("Motion artwork carries an unparsable playlist URL {raw:?}: {e}");
                None
            }
        },
        None => None,
    };

    if image_url.is_none() && video_url.is_none() {
        println!("No artwork assets were discovered.");
        return Ok(());
    }

    if !args.no_download {
        tokio::fs::create_dir_all(&args.output_dir)
            .await
            .with_context(|| {
                format!("Creating output directory {}", args.output_dir.display())
            })?;
    }

    let artist = server_data.artist_name();
    let album = server_data.album_name();

    if let Some(url) = &image_url {
        println!("image_url: {url}");
        handle_asset(&client, &args, url, artist, album, AssetKind::Image).await;
    }

    if let Some(url) = &video_url {
        println!("video_url: {url}");
        handle_asset(&client, &args, url, artist, album, AssetKind::Video).await;
    }

    Ok(())
}

/// Downloads one resolved asset and, when asked, hands it to the platform
/// viewer. Download failures are reported but never abort the other asset.
async fn handle_asset(
    client: &reqwest::Client,
    args: &Args,
    url: &Url,
    artist: Option<&str>,
    album: Option<&str>,
    kind: AssetKind,
) {
    if args.no_download {
        return;
    }

    let name = download::file_name(artist, album, kind, download::extension_for(url));
    let path = args.output_dir.join(name);

    match download::save_url(client, url, &path).await {
        Ok(()) => {
            println!("Downloaded: {}", path.display());
            if args.open {
                util::open_in_viewer(&path.display().to_string());
            }
        }
        Err(e) => warn!("Failed to download {kind:?} asset: {e:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount(server: &MockServer, route: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn page_to_both_assets() {
        let server = MockServer::start().await;

        let master = "#EXTM3U\n\
            #EXT-X-STREAM-INF:BANDWIDTH=800000\n\
            m1.m3u8\n\
            #EXT-X-STREAM-INF:BANDWIDTH=2000000\n\
            m2.m3u8\n";
        let media = "#EXTM3U\n\
            #EXT-X-VERSION:3\n\
            #EXT-X-TARGETDURATION:6\n\
            #EXTINF:5.0,\n\
            https://cdn.example/a -- b.ts\n\
            #EXT-X-ENDLIST\n";
        let payload = serde_json::json!([{
            "data": { "sections": [
                {
                    "containerArtwork": {
                        "dictionary": {
                            "width": 300, "height": 300, "url": "https://img/{w}x{h}.{f}"
                        }
                    },
                    "items": []
                },
                {
                    "items": [ { "videoArtwork": { "dictionary": {
                        "motionDetailSquare": {
                            "video": format!("{}/master.m3u8", server.uri())
                        }
                    } } } ]
                }
            ] }
        }]);
        let html = format!(
            "<html><body><div id=\"serialized-server-data\">{payload}</div></body></html>"
        );

        mount(&server, "/page", html).await;
        mount(&server, "/master.m3u8", master.to_string()).await;
        mount(&server, "/m2.m3u8", media.to_string()).await;

        let client = reqwest::Client::new();
        let page_url = Url::parse(&format!("{}/page", server.uri())).unwrap();

        let data = music::page::fetch_server_data(&client, &page_url)
            .await
            .unwrap()
            .unwrap();

        let art = data.container_artwork().unwrap();
        let image = artwork::image_url(&art.url, art.width, art.height).unwrap();
        assert_eq!(image.as_str(), "https://img/300x300.jpg");

        let playlist = Url::parse(data.playlist_url().unwrap()).unwrap();
        let video = hls::resolve_video_url(&client, &playlist)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(video.as_str(), "https://cdn.example/ab.ts");
    }
}
