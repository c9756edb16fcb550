use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{debug, instrument};
use url::Url;

use crate::error::{Error, Result};
use crate::music::structs::ServerData;

/// Element the store's web app serializes its page state into.
const SERVER_DATA_ELEMENT_ID: &str = "serialized-server-data";

static SERVER_DATA_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(&format!("#{SERVER_DATA_ELEMENT_ID}")).unwrap());

/// Fetches a store page and decodes the server data embedded in it.
///
/// Returns `Ok(None)` when the element is present but its entry list is
/// empty.
///
/// # Errors
/// [`Error::Fetch`] on transport failure, [`Error::ServerDataMissing`] when
/// the page has no server data element and [`Error::ServerData`] when its
/// JSON does not decode.
#[instrument(skip(client))]
pub async fn fetch_server_data(
    client: &reqwest::Client,
    page_url: &Url,
) -> Result<Option<ServerData>> {
    let res = client
        .get(page_url.clone())
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|source| Error::Fetch {
            url: page_url.clone(),
            source,
        })?;

    let html = res.text().await.map_err(|source| Error::Fetch {
        url: page_url.clone(),
        source,
    })?;

    extract_server_data(&html, page_url)
}

/// Scrapes the server data element out of page HTML and decodes its JSON.
pub fn extract_server_data(html: &str, page_url: &Url) -> Result<Option<ServerData>> {
    let document = Html::parse_document(html);
    let Some(element) = document.select(&SERVER_DATA_SELECTOR).next() else {
        return Err(Error::ServerDataMissing {
            url: page_url.clone(),
        });
    };

    let json = element.text().collect::<String>();
    debug!("Server data payload: {} bytes", json.len());

    let entries: Vec<ServerData> = serde_json::from_str(&json)?;
    Ok(entries.into_iter().next())
}
