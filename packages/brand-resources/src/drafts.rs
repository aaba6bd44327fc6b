//! Form drafts for each content family.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::form::Draft;
use crate::models::{AboutMe, GalleryImage, Metric, Project, SocialLink, TextSlide, Video};
use crate::video::normalize_video_url;

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

fn require_http_url(value: &str, field: &'static str) -> Result<(), ValidationError> {
    require(value, field)?;
    match url::Url::parse(value.trim()) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}

fn optional_http_url(value: &Option<String>, field: &'static str) -> Result<(), ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => require_http_url(v, field),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutMeDraft {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub order_index: i64,
    pub is_active: bool,
}

impl Default for AboutMeDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            image_url: None,
            order_index: 0,
            is_active: true,
        }
    }
}

impl From<&AboutMe> for AboutMeDraft {
    fn from(item: &AboutMe) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            image_url: item.image_url.clone(),
            order_index: item.order_index,
            is_active: item.is_active,
        }
    }
}

impl Draft for AboutMeDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.title, "title")?;
        optional_http_url(&self.image_url, "image URL")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageDraft {
    pub title: Option<String>,
    pub image_url: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub order_index: i64,
}

impl From<&GalleryImage> for GalleryImageDraft {
    fn from(item: &GalleryImage) -> Self {
        Self {
            title: item.title.clone(),
            image_url: item.image_url.clone(),
            kind: item.kind.clone(),
            order_index: item.order_index,
        }
    }
}

impl Draft for GalleryImageDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require_http_url(&self.image_url, "image URL")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSlideDraft {
    pub title: String,
    pub body: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub order_index: i64,
    pub is_active: bool,
}

impl Default for TextSlideDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: None,
            kind: None,
            order_index: 0,
            is_active: true,
        }
    }
}

impl From<&TextSlide> for TextSlideDraft {
    fn from(item: &TextSlide) -> Self {
        Self {
            title: item.title.clone(),
            body: item.body.clone(),
            kind: item.kind.clone(),
            order_index: item.order_index,
            is_active: item.is_active,
        }
    }
}

impl Draft for TextSlideDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.title, "title")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDraft {
    pub label: String,
    pub value: String,
    pub icon_class: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub order_index: i64,
}

impl From<&Metric> for MetricDraft {
    fn from(item: &Metric) -> Self {
        Self {
            label: item.label.clone(),
            value: item.value.clone(),
            icon_class: item.icon_class.clone(),
            kind: item.kind.clone(),
            order_index: item.order_index,
        }
    }
}

impl Draft for MetricDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.label, "label")?;
        require(&self.value, "value")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub order_index: i64,
    pub is_active: bool,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            date: None,
            image_url: None,
            kind: None,
            order_index: 0,
            is_active: true,
        }
    }
}

impl From<&Project> for ProjectDraft {
    fn from(item: &Project) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            date: item.date.clone(),
            image_url: item.image_url.clone(),
            kind: item.kind.clone(),
            order_index: item.order_index,
            is_active: item.is_active,
        }
    }
}

impl Draft for ProjectDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.title, "title")?;
        optional_http_url(&self.image_url, "image URL")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinkDraft {
    pub influencer_id: String,
    pub platform: String,
    pub url: String,
    pub icon_class: Option<String>,
    pub order_index: i64,
}

impl From<&SocialLink> for SocialLinkDraft {
    fn from(item: &SocialLink) -> Self {
        Self {
            influencer_id: item.influencer_id.clone().unwrap_or_default(),
            platform: item.platform.clone(),
            url: item.url.clone(),
            icon_class: item.icon_class.clone(),
            order_index: item.order_index,
        }
    }
}

impl Draft for SocialLinkDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.influencer_id, "project")?;
        require(&self.platform, "platform")?;
        require_http_url(&self.url, "link")
    }

    fn normalize(mut self) -> Result<Self, ValidationError> {
        self.url = self.url.trim().to_string();
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDraft {
    pub influencer_id: String,
    pub title: Option<String>,
    pub url: String,
    pub order_index: i64,
}

impl From<&Video> for VideoDraft {
    fn from(item: &Video) -> Self {
        Self {
            influencer_id: item.influencer_id.clone().unwrap_or_default(),
            title: item.title.clone(),
            url: item.url.clone(),
            order_index: item.order_index,
        }
    }
}

impl Draft for VideoDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.influencer_id, "project")?;
        require_http_url(&self.url, "video URL")
    }

    fn normalize(mut self) -> Result<Self, ValidationError> {
        self.url = normalize_video_url(&self.url)?;
        Ok(self)
    }
}
