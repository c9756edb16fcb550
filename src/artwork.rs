use url::Url;

const WIDTH_TOKEN: &str = "{w}";
const HEIGHT_TOKEN: &str = "{h}";
const FORMAT_TOKEN: &str = "{f}";

/// Builds the still-image artwork URL from a templated URL string.
///
/// Templates look like `https://host/….../{w}x{h}bb.{f}`. A template missing
/// any of the three tokens means the page has no usable artwork, so `None`
/// is returned rather than an error. The format token is always substituted
/// with `jpg`.
#[must_use]
pub fn image_url(template: &str, width: u32, height: u32) -> Option<Url> {
    if !template.contains(WIDTH_TOKEN)
        || !template.contains(HEIGHT_TOKEN)
        || !template.contains(FORMAT_TOKEN)
    {
        return None;
    }

    let resolved = template
        .replace(WIDTH_TOKEN, &width.to_string())
        .replace(HEIGHT_TOKEN, &height.to_string())
        .replace(FORMAT_TOKEN, "jpg");

    Url::parse(&resolved).ok()
}
