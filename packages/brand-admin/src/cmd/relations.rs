use anyhow::{bail, Result};
use brand_resources::{fetch_with_relations, ChildStore, Record, ResourceKind};
use serde_json::Value;

use super::{print_json, print_records};
use crate::context::AppContext;

pub async fn children(ctx: &AppContext, kind: ResourceKind, parent_id: &str) -> Result<()> {
    if !kind.is_child() {
        bail!("{} is not listed per project; use social-links or videos", kind);
    }

    let children = ChildStore::<Record>::new(ctx.api.clone(), kind.definition(), parent_id);
    children.refresh().await?;

    let items = children.items();
    ctx.print_header(&format!("{} of {} ({})", kind, parent_id, items.len()));
    print_records(&items);
    Ok(())
}

pub async fn relations(ctx: &AppContext, kind: ResourceKind, id: &str) -> Result<()> {
    let def = kind.definition();
    let full: Value = fetch_with_relations(ctx.api.as_ref(), &def, id).await?;
    print_json(&full)
}
