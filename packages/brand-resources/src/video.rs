//! Turning pasted video links into embeddable URLs.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;

lazy_static! {
    static ref YOUTUBE_ID: Regex = Regex::new(
        r"(?i)(?:youtube(?:-nocookie)?\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|live/|v/)|youtu\.be/)([A-Za-z0-9_-]{11})"
    )
    .expect("YouTube pattern is valid");
    static ref VIMEO_ID: Regex =
        Regex::new(r"(?i)vimeo\.com/(?:video/)?(\d+)").expect("Vimeo pattern is valid");
}

/// The platform a video URL points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    YouTube(String),
    Vimeo(String),
    Other,
}

impl VideoSource {
    pub fn detect(url: &str) -> Self {
        if let Some(caps) = YOUTUBE_ID.captures(url) {
            return VideoSource::YouTube(caps[1].to_string());
        }
        if let Some(caps) = VIMEO_ID.captures(url) {
            return VideoSource::Vimeo(caps[1].to_string());
        }
        VideoSource::Other
    }
}

/// Normalize a pasted link to its embeddable form.
///
/// YouTube (watch, short links, shorts, live, embed) becomes
/// `https://www.youtube.com/embed/<id>`, Vimeo becomes
/// `https://player.vimeo.com/video/<id>`. Other http(s) links pass through.
pub fn normalize_video_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required("video URL"));
    }

    let parsed = url::Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl {
        field: "video URL",
        value: trimmed.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidUrl {
            field: "video URL",
            value: trimmed.to_string(),
        });
    }

    Ok(match VideoSource::detect(trimmed) {
        VideoSource::YouTube(id) => format!("https://www.youtube.com/embed/{}", id),
        VideoSource::Vimeo(id) => format!("https://player.vimeo.com/video/{}", id),
        VideoSource::Other => trimmed.to_string(),
    })
}
