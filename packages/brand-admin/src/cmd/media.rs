use std::path::Path;

use anyhow::{Context, Result};
use brand_resources::{image_from_path, normalize_video_url, upload_image, VideoSource};

use crate::context::AppContext;

pub async fn upload(ctx: &AppContext, path: &Path) -> Result<()> {
    let file = image_from_path(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    ctx.print_info(&format!(
        "Uploading {} ({}, {} bytes) to {}",
        file.file_name,
        file.content_type,
        file.len(),
        ctx.base_url
    ));

    let url = upload_image(ctx.api.as_ref(), file).await?;
    ctx.print_success("Uploaded");
    println!("{}", url);
    Ok(())
}

pub fn video_url(ctx: &AppContext, url: &str) -> Result<()> {
    let normalized = normalize_video_url(url)?;
    match VideoSource::detect(url) {
        VideoSource::Other => ctx.print_warning("Unrecognised host, link kept as-is"),
        source => tracing::debug!(?source, "Detected video host"),
    }
    println!("{}", normalized);
    Ok(())
}
