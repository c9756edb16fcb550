use thiserror::Error;
use url::Url;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the resolution pipeline.
///
/// "Nothing found" is never an error here: callers get `Ok(None)` when a
/// page simply has no artwork, a master playlist declares no variants or a
/// media playlist declares no segments.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (timeout, DNS, non-2xx status) with the
    /// offending URL attached. Retrying, if wanted, is the caller's call.
    #[error("request for {url} failed")]
    Fetch {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    /// The master playlist document did not parse.
    #[error("malformed master playlist at {url}")]
    MalformedMaster { url: Url },

    /// The selected variant's document did not parse as a media playlist.
    #[error("malformed media playlist at {url}")]
    MalformedMedia { url: Url },

    /// The first media segment's URI did not yield a valid URL, even after
    /// re-joining and resolving against the playlist URL.
    #[error("segment uri {uri:?} is not a valid url")]
    MalformedSegmentUri { uri: String },

    /// The page HTML carries no serialized server data element.
    #[error("no serialized server data found at {url}")]
    ServerDataMissing { url: Url },

    /// The serialized server data element did not decode.
    #[error("decoding serialized server data failed")]
    ServerData(#[from] serde_json::Error),
}
