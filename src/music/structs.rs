use serde::Deserialize;

/// One entry of the serialized server data array a store page embeds.
///
/// Only the slice of the payload the resolver consumes is modeled; the real
/// thing carries far more.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerData {
    pub data: PageData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageData {
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default)]
    pub container_artwork: Option<ContainerArtwork>,
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContainerArtwork {
    pub dictionary: ArtworkSpec,
}

/// Templated artwork descriptor: a `{w}`/`{h}`/`{f}` URL template plus the
/// pixel dimensions the page advertises for it.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtworkSpec {
    pub width: u32,
    pub height: u32,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub video_artwork: Option<VideoArtwork>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle_links: Vec<SubtitleLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoArtwork {
    pub dictionary: VideoArtworkDictionary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoArtworkDictionary {
    /// Square motion artwork carries the playlist URL; some payloads use the
    /// non-square `motionDetail` key instead.
    #[serde(rename = "motionDetailSquare", alias = "motionDetail", default)]
    pub motion_detail: Option<MotionDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MotionDetail {
    #[serde(default)]
    pub video: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtitleLink {
    #[serde(default)]
    pub title: Option<String>,
}

impl ServerData {
    /// Artwork spec of the first section that carries one, in document
    /// order.
    #[must_use]
    pub fn container_artwork(&self) -> Option<&ArtworkSpec> {
        self.data
            .sections
            .iter()
            .find_map(|section| section.container_artwork.as_ref())
            .map(|artwork| &artwork.dictionary)
    }

    /// Playlist URL string behind the first item, across sections in
    /// document order, whose motion artwork carries one.
    #[must_use]
    pub fn playlist_url(&self) -> Option<&str> {
        self.data
            .sections
            .iter()
            .flat_map(|section| &section.items)
            .filter_map(|item| item.video_artwork.as_ref())
            .find_map(|artwork| artwork.dictionary.motion_detail.as_ref()?.video.as_deref())
    }

    /// First subtitle-link title across items; the page uses it for the
    /// artist name.
    #[must_use]
    pub fn artist_name(&self) -> Option<&str> {
        self.data
            .sections
            .iter()
            .flat_map(|section| &section.items)
            .find_map(|item| item.subtitle_links.first()?.title.as_deref())
    }

    /// First item title across sections; the page uses it for the album
    /// name.
    #[must_use]
    pub fn album_name(&self) -> Option<&str> {
        self.data
            .sections
            .iter()
            .flat_map(|section| &section.items)
            .find_map(|item| item.title.as_deref())
    }
}
