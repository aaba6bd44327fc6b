//! Image upload side-channel: validation and file selection state.

use std::path::Path;

use brand_api_client::UploadFile;

use crate::error::{ResourceError, Result, ValidationError};
use crate::store::ResourceStore;
use crate::item::ResourceItem;

pub const UPLOAD_PATH: &str = "/upload/image";
pub const UPLOAD_FIELD: &str = "image";

pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// 5 MiB
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub fn validate_image(file: &UploadFile) -> std::result::Result<(), ValidationError> {
    let content_type = file.content_type.trim().to_ascii_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
        return Err(ValidationError::UnsupportedFileType(file.content_type.clone()));
    }
    if file.is_empty() {
        return Err(ValidationError::EmptyFile);
    }
    if file.len() > MAX_IMAGE_BYTES {
        return Err(ValidationError::FileTooLarge {
            size: file.len(),
            max: MAX_IMAGE_BYTES,
        });
    }
    Ok(())
}

/// Build an [`UploadFile`] from bytes, guessing the content type from the name.
pub fn image_from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> UploadFile {
    let file_name = file_name.into();
    let content_type = mime_guess::from_path(&file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    UploadFile::new(file_name, content_type, bytes)
}

/// Read a file from disk as an [`UploadFile`].
pub async fn image_from_path(path: impl AsRef<Path>) -> std::io::Result<UploadFile> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(image_from_bytes(file_name, bytes))
}

/// The file input of an image form.
///
/// Uploading consumes the selection whatever the outcome, so a rejected or
/// failed file never lingers in the input.
#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    file: Option<UploadFile>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, file: UploadFile) {
        self.file = Some(file);
    }

    pub fn selected(&self) -> Option<&UploadFile> {
        self.file.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_none()
    }

    pub fn clear(&mut self) {
        self.file = None;
    }

    pub async fn upload<T: ResourceItem>(&mut self, store: &ResourceStore<T>) -> Result<String> {
        let file = self
            .file
            .take()
            .ok_or(ResourceError::Validation(ValidationError::Required("image")))?;
        store.upload_image(file).await
    }
}
