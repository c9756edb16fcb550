//! Plumbing for the music store's web pages: page-URL recognition and
//! normalization, page fetching and the decoded server-data model.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

pub mod page;
pub mod structs;

/// Matches canonical store page URLs, e.g.
/// `https://music.apple.com/us/album/some-album/1440857781`.
pub static PAGE_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https://(?:beta\.)?music\.apple\.com/").unwrap());

/// Rewrites a `beta.`-host page URL to its production counterpart; the beta
/// frontend serves the same serialized data but is flakier about it.
#[must_use]
pub fn normalize_page_url(mut url: Url) -> Url {
    if let Some(stripped) = url.host_str().and_then(|h| h.strip_prefix("beta.")) {
        if !stripped.is_empty() {
            let host = stripped.to_string();
            url.set_host(Some(&host)).ok();
        }
    }
    url
}
