use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_stream::StreamExt;
use tracing::debug;
use url::Url;

/// What a resolved asset URL is about to be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Video,
}

/// Picks a file extension from the URL shape. Artwork image URLs commonly
/// carry a trailing crop suffix after `.jpg`, hence the `.jpg/` check.
#[must_use]
pub fn extension_for(url: &Url) -> &'static str {
    let s = url.as_str();
    if s.ends_with(".mp4") {
        "mp4"
    } else if s.ends_with(".jpg") || s.contains(".jpg/") {
        "jpg"
    } else {
        "bin"
    }
}

/// Builds an `"Artist - Album"` style file name for a downloaded asset,
/// falling back to a generic stem when the page gave us no names. Video
/// assets get a `_video` suffix so the pair can land in one directory.
#[must_use]
pub fn file_name(
    artist: Option<&str>,
    album: Option<&str>,
    kind: AssetKind,
    extension: &str,
) -> String {
    let stem = match (artist, album) {
        (Some(artist), Some(album)) => format!("{} - {}", sanitize(artist), sanitize(album)),
        (None, Some(album)) => sanitize(album),
        (Some(artist), None) => sanitize(artist),
        (None, None) => String::from("artwork"),
    };

    match kind {
        AssetKind::Video => format!("{stem}_video.{extension}"),
        AssetKind::Image => format!("{stem}.{extension}"),
    }
}

/// Strips filesystem-hostile characters and stray edge dots/whitespace.
fn sanitize(name: &str) -> String {
    name.replace(['<', '>', ':', '"', '/', '\\', '|', '?', '*'], "_")
        .trim()
        .trim_matches('.')
        .to_string()
}

/// Streams `url` into `path`.
///
/// # Errors
/// Errors on transport failure, non-2xx status or file I/O failure.
pub async fn save_url(client: &reqwest::Client, url: &Url, path: &Path) -> Result<()> {
    let res = client
        .get(url.clone())
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .with_context(|| format!("Downloading {url}"))?;

    let mut stream = res.bytes_stream();
    let mut file = File::create(path)
        .await
        .with_context(|| format!("Creating {}", path.display()))?;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.with_context(|| format!("Downloading {url}"))?;
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Writing {}", path.display()))?;
    }
    file.flush().await?;

    debug!("Saved {url} to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_from_url_shape() {
        let mp4 = Url::parse("https://cdn.example/ab.mp4").unwrap();
        let jpg = Url::parse("https://img/300x300.jpg").unwrap();
        let cropped = Url::parse("https://img/300x300.jpg/crop").unwrap();
        let other = Url::parse("https://cdn.example/ab.ts").unwrap();

        assert_eq!(extension_for(&mp4), "mp4");
        assert_eq!(extension_for(&jpg), "jpg");
        assert_eq!(extension_for(&cropped), "jpg");
        assert_eq!(extension_for(&other), "bin");
    }

    #[test]
    fn file_name_from_metadata() {
        assert_eq!(
            file_name(Some("Artist"), Some("Album"), AssetKind::Image, "jpg"),
            "Artist - Album.jpg"
        );
        assert_eq!(
            file_name(Some("Artist"), Some("Album"), AssetKind::Video, "mp4"),
            "Artist - Album_video.mp4"
        );
        assert_eq!(
            file_name(None, Some("Album"), AssetKind::Image, "jpg"),
            "Album.jpg"
        );
        assert_eq!(
            file_name(Some("Artist"), None, AssetKind::Image, "jpg"),
            "Artist.jpg"
        );
        assert_eq!(file_name(None, None, AssetKind::Video, "mp4"), "artwork_video.mp4");
    }

    #[test]
    fn sanitizes_hostile_names() {
        assert_eq!(
            file_name(Some("AC/DC"), Some("Back: in Black?"), AssetKind::Image, "jpg"),
            "AC_DC - Back_ in Black_.jpg"
        );
        assert_eq!(
            file_name(None, Some("  dotted. "), AssetKind::Image, "jpg"),
            "dotted.jpg"
        );
    }

    #[tokio::test]
    async fn saves_a_body_to_disk() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ab.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"motion artwork".to_vec()))
            .mount(&server)
            .await;

        let dir = std::env::temp_dir().join("artgrab-test-download");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let target = dir.join("ab.mp4");

        let client = reqwest::Client::new();
        let url = Url::parse(&format!("{}/ab.mp4", server.uri())).unwrap();
        save_url(&client, &url, &target).await.unwrap();

        let written = tokio::fs::read(&target).await.unwrap();
        assert_eq!(written, b"motion artwork");
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
