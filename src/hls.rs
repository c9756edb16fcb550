use m3u8_rs::{MasterPlaylist, MediaPlaylist};
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::{Error, Result};

/// Literal token the motion-artwork feed uses to split one segment URL over
/// several fragments. Fragments re-join with nothing in between.
const SEGMENT_URI_SEPARATOR: &str = " -- ";

/// Fetches a playlist document as text.
///
/// # Errors
/// Any transport failure or non-2xx status becomes [`Error::Fetch`] with the
/// offending URL attached. No retries happen at this layer; that policy
/// belongs to the caller.
#[instrument(skip(client))]
pub async fn fetch_playlist(client: &reqwest::Client, url: &Url) -> Result<String> {
    let res = client
        .get(url.clone())
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|source| Error::Fetch {
            url: url.clone(),
            source,
        })?;

    res.text().await.map_err(|source| Error::Fetch {
        url: url.clone(),
        source,
    })
}

/// Walks an HLS playlist chain down to a directly playable video URL.
///
/// Fetches the master playlist, follows its *last* variant (the feed lists
/// renditions in ascending quality, so last is best) and reconstructs the
/// single-file URL from that variant's *first* media segment.
///
/// Returns `Ok(None)` when the chain is intact but empty: a master with no
/// variants or a media playlist with no segments.
///
/// # Errors
/// [`Error::Fetch`] for transport failures, [`Error::MalformedMaster`] /
/// [`Error::MalformedMedia`] for documents that do not parse and
/// [`Error::MalformedSegmentUri`] when the re-joined segment URI is not a
/// URL.
#[instrument(skip(client))]
pub async fn resolve_video_url(
    client: &reqwest::Client,
    master_url: &Url,
) -> Result<Option<Url>> {
    let body = fetch_playlist(client, master_url).await?;
    let master = parse_master(&body, master_url)?;

    let Some(variant) = master.variants.last() else {
        info!("Master playlist declares no variant streams");
        return Ok(None);
    };
    info!(
        "Available renditions: {}",
        master
            .variants
            .iter()
            .map(|v| v
                .resolution
                .map_or("unknown resolution".to_string(), |r| r.to_string()))
            .collect::<Vec<String>>()
            .join(", ")
    );

    let variant_url = master_url
        .join(&variant.uri)
        .map_err(|_| Error::MalformedMaster {
            url: master_url.clone(),
        })?;
    debug!("Selected variant playlist: {variant_url}");

    let body = fetch_playlist(client, &variant_url).await?;
    let media = parse_media(&body, &variant_url)?;

    let Some(segment) = media.segments.first() else {
        info!("Media playlist declares no segments");
        return Ok(None);
    };

    let joined = rejoin_segment_uri(&segment.uri);
    segment_url(&joined, &variant_url).map(Some)
}

fn parse_master(text: &str, url: &Url) -> Result<MasterPlaylist> {
    m3u8_rs::parse_master_playlist_res(text.as_bytes()).map_err(|_| Error::MalformedMaster {
        url: url.clone(),
    })
}

fn parse_media(text: &str, url: &Url) -> Result<MediaPlaylist> {
    m3u8_rs::parse_media_playlist_res(text.as_bytes()).map_err(|_| Error::MalformedMedia {
        url: url.clone(),
    })
}

/// Re-joins a segment URI the feed delivered split on [`SEGMENT_URI_SEPARATOR`].
///
/// A URI without the separator passes through unchanged.
fn rejoin_segment_uri(raw: &str) -> String {
    raw.split(SEGMENT_URI_SEPARATOR).collect()
}

/// Parses a segment URI, resolving it against the playlist that declared it
/// when relative.
fn segment_url(uri: &str, base: &Url) -> Result<Url> {
    match Url::parse(uri) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            base.join(uri).map_err(|_| Error::MalformedSegmentUri {
                uri: uri.to_string(),
            })
        }
        Err(_) => Err(Error::MalformedSegmentUri {
            uri: uri.to_string(),
        }),
    }
}
