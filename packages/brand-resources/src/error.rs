//! Error types for resource stores and forms.

use brand_api_client::ApiError;
use thiserror::Error;

/// Result type for resource operations.
pub type Result<T> = std::result::Result<T, ResourceError>;

/// Client-side validation failures, caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} is not a valid URL: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("Unsupported file type {0}. Use JPEG, PNG, GIF or WebP.")]
    UnsupportedFileType(String),

    #[error("File is too large ({size} bytes, limit {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("File is empty")]
    EmptyFile,

    #[error("Nothing to submit")]
    NothingToSubmit,
}

#[derive(Debug, Clone, Error)]
pub enum ResourceError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No {resource} with id {id}")]
    NotFound { resource: String, id: String },

    #[error("Store for {0} has been closed")]
    Closed(String),

    /// Second step of a reorder swap failed after the first one was saved.
    /// Both items now share an orderIndex; nothing is rolled back.
    #[error("Moved {moved_id} but could not update {neighbor_id}: {source}")]
    PartialSwap {
        moved_id: String,
        neighbor_id: String,
        #[source]
        source: Box<ResourceError>,
    },
}

impl ResourceError {
    /// Text for the blocking alert shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ResourceError::Api(err) => err.message(),
            ResourceError::Validation(err) => err.to_string(),
            ResourceError::NotFound { .. } => {
                "This item no longer exists. Reload the list and try again.".to_string()
            }
            ResourceError::Closed(_) => "This view has been closed.".to_string(),
            ResourceError::PartialSwap { source, .. } => format!(
                "The new order was only partially saved: {}. Reload the list before reordering again.",
                source.user_message()
            ),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ResourceError::Validation(_))
    }
}
