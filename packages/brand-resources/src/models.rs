//! Content families of the brand site.
//!
//! All wire names are camelCase. Optional fields stay optional because the
//! admin screens create records with partial data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::{default_active, deserialize_id, ResourceItem};
use crate::resource::{DeletePolicy, Resource, ResourceDef};

// ============================================================================
// Biography
// ============================================================================

/// A biography slide ("sobre mí").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutMe {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub order_index: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An image in the public gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub image_url: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub order_index: i64,
}

/// Rotating headline on the landing page ("portada").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSlide {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub order_index: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

// ============================================================================
// Metrics
// ============================================================================

/// A social-media metric tile (followers, views, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub icon_class: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub order_index: i64,
}

// ============================================================================
// Projects and their children
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub order_index: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub influencer_id: Option<String>,
    #[serde(default)]
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub icon_class: Option<String>,
    #[serde(default)]
    pub order_index: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub influencer_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Always the embeddable form, see [`crate::video::normalize_video_url`].
    pub url: String,
    #[serde(default)]
    pub order_index: i64,
}

/// A project with its children inlined, from `GET /projects/:id/relations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWithRelations {
    #[serde(flatten)]
    pub project: Project,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub videos: Vec<Video>,
}

// ============================================================================
// ResourceItem / Resource impls
// ============================================================================

macro_rules! resource_item {
    ($ty:ty, kind: $kind:ident, active: $active:ident) => {
        impl ResourceItem for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn order_index(&self) -> i64 {
                self.order_index
            }
            fn is_active(&self) -> bool {
                self.$active
            }
            fn kind(&self) -> Option<&str> {
                self.$kind.as_deref()
            }
        }
    };
    ($ty:ty, kind: $kind:ident) => {
        impl ResourceItem for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn order_index(&self) -> i64 {
                self.order_index
            }
            fn kind(&self) -> Option<&str> {
                self.$kind.as_deref()
            }
        }
    };
    ($ty:ty, active: $active:ident) => {
        impl ResourceItem for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn order_index(&self) -> i64 {
                self.order_index
            }
            fn is_active(&self) -> bool {
                self.$active
            }
        }
    };
    ($ty:ty) => {
        impl ResourceItem for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn order_index(&self) -> i64 {
                self.order_index
            }
        }
    };
}

resource_item!(AboutMe, active: is_active);
resource_item!(GalleryImage, kind: kind);
resource_item!(TextSlide, kind: kind, active: is_active);
resource_item!(Metric, kind: kind);
resource_item!(Project, kind: kind, active: is_active);
resource_item!(SocialLink);
resource_item!(Video);

impl Resource for AboutMe {
    fn definition() -> ResourceDef {
        ResourceKind::AboutMe.definition()
    }
}

impl Resource for GalleryImage {
    fn definition() -> ResourceDef {
        ResourceKind::Gallery.definition()
    }
}

impl Resource for TextSlide {
    fn definition() -> ResourceDef {
        ResourceKind::TextSlides.definition()
    }
}

impl Resource for Metric {
    fn definition() -> ResourceDef {
        ResourceKind::Metrics.definition()
    }
}

impl Resource for Project {
    fn definition() -> ResourceDef {
        ResourceKind::Projects.definition()
    }
}

impl Resource for SocialLink {
    fn definition() -> ResourceDef {
        ResourceKind::SocialLinks.definition()
    }
}

impl Resource for Video {
    fn definition() -> ResourceDef {
        ResourceKind::Videos.definition()
    }
}

// ============================================================================
// Resource catalogue
// ============================================================================

/// Every collection the admin screens manage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    AboutMe,
    Gallery,
    Projects,
    SocialLinks,
    Videos,
    Metrics,
    TextSlides,
}

impl ResourceKind {
    pub fn variants() -> &'static [ResourceKind] {
        &[
            ResourceKind::AboutMe,
            ResourceKind::Gallery,
            ResourceKind::Projects,
            ResourceKind::SocialLinks,
            ResourceKind::Videos,
            ResourceKind::Metrics,
            ResourceKind::TextSlides,
        ]
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ResourceKind::AboutMe => "aboutme",
            ResourceKind::Gallery => "gallery",
            ResourceKind::Projects => "projects",
            ResourceKind::SocialLinks => "social-links",
            ResourceKind::Videos => "videos",
            ResourceKind::Metrics => "metrics",
            ResourceKind::TextSlides => "text-slides",
        }
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        match self {
            ResourceKind::AboutMe | ResourceKind::Projects | ResourceKind::TextSlides => {
                DeletePolicy::Soft
            }
            ResourceKind::Gallery
            | ResourceKind::SocialLinks
            | ResourceKind::Videos
            | ResourceKind::Metrics => DeletePolicy::Hard,
        }
    }

    /// Child collections are listed per parent project.
    pub fn is_child(&self) -> bool {
        matches!(self, ResourceKind::SocialLinks | ResourceKind::Videos)
    }

    pub fn definition(&self) -> ResourceDef {
        ResourceDef::new(self.slug(), self.slug(), self.delete_policy())
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::variants().iter().copied().find(|k| k.slug() == slug)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}
