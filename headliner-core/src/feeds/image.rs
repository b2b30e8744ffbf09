use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static IMG_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<img\b([^>]*)>").expect("valid img tag pattern")
});

static SRC_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)(?:^|\s)src\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid src attribute pattern")
});

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImageExtractError {
    #[error("<img> tag has no src attribute")]
    MissingSource,
    #[error("unsupported image source '{0}'")]
    UnsupportedSource(String),
}

/// Finds the `src` of the first `<img>` in a feed summary.
///
/// `Ok(None)` means the markup has no image at all. An image that cannot be
/// used (no `src`, inline `data:` or `javascript:` source) is an error so the
/// caller decides whether to skip it.
pub fn extract_image_url(
    html: &str,
) -> Result<Option<String>, ImageExtractError> {
    let Some(tag) = IMG_TAG.captures(html) else {
        return Ok(None);
    };
    let attributes = tag.get(1).map_or("", |m| m.as_str());

    let src = SRC_ATTR
        .captures(attributes)
        .and_then(|caps| {
            caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))
        })
        .map(|m| m.as_str().trim())
        .ok_or(ImageExtractError::MissingSource)?;

    let lowered = src.to_ascii_lowercase();
    if lowered.starts_with("data:") || lowered.starts_with("javascript:") {
        return Err(ImageExtractError::UnsupportedSource(src.to_string()));
    }

    Ok(Some(src.replace("&amp;", "&")))
}
