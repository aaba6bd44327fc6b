//! Content layer for the brand site and its admin screens.
//!
//! Every screen follows the same shape: fetch a collection, render it, edit
//! through a form, delete, maybe upload an image. [`ResourceStore`] is that
//! shape, bound to one collection.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use brand_api_client::ApiClient;
//! use brand_resources::{models::Project, drafts::ProjectDraft, ResourceStore, Resource};
//!
//! let api = Arc::new(ApiClient::new("https://api.example.com"));
//! let projects = ResourceStore::<Project>::open(api, Project::definition(), Some("brand")).await;
//!
//! let created = projects
//!     .create(&ProjectDraft { title: "Launch".into(), ..Default::default() })
//!     .await?;
//! projects.remove(&created.id).await?; // soft delete for projects
//! ```

pub mod children;
pub mod drafts;
pub mod error;
pub mod form;
pub mod item;
pub mod models;
pub mod registry;
pub mod reorder;
pub mod resource;
pub mod store;
pub mod upload;
pub mod video;

pub use children::{fetch_with_relations, ChildStore};
pub use error::{ResourceError, Result, ValidationError};
pub use form::{Draft, FormController, FormState};
pub use item::{Record, ResourceItem};
pub use models::ResourceKind;
pub use registry::{SharedStore, StoreRegistry};
pub use reorder::{move_item, plan_move, Direction, SwapPlan};
pub use resource::{DeletePolicy, Resource, ResourceDef};
pub use store::{upload_image, ResourceState, ResourceStore};
pub use upload::{image_from_path, validate_image, FileSelection};
pub use video::{normalize_video_url, VideoSource};
