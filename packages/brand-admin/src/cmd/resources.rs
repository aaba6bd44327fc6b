use anyhow::Result;
use brand_resources::{move_item, DeletePolicy, Direction, Record, ResourceKind, ResourceStore};

use super::{parse_data, print_json, print_records};
use crate::context::AppContext;

fn store(ctx: &AppContext, kind: ResourceKind) -> ResourceStore<Record> {
    ResourceStore::new(ctx.api.clone(), kind.definition())
}

pub async fn list(ctx: &AppContext, kind: ResourceKind, filter: Option<&str>, all: bool) -> Result<()> {
    let store = store(ctx, kind);
    store.list(filter).await?;

    let items = if all {
        store.sorted_by_order()
    } else {
        store.active_sorted()
    };

    ctx.print_header(&format!("{} ({})", kind, items.len()));
    print_records(&items);
    Ok(())
}

pub async fn create(ctx: &AppContext, kind: ResourceKind, data: &str) -> Result<()> {
    let body = parse_data(data)?;
    let created = store(ctx, kind).create(&body).await?;

    ctx.print_success(&format!("Created {} {}", kind, created.id));
    print_json(&serde_json::to_value(&created)?)
}

pub async fn update(ctx: &AppContext, kind: ResourceKind, id: &str, data: &str) -> Result<()> {
    let body = parse_data(data)?;
    let updated = store(ctx, kind).update(id, &body).await?;

    ctx.print_success(&format!("Updated {} {}", kind, updated.id));
    print_json(&serde_json::to_value(&updated)?)
}

pub async fn delete(ctx: &AppContext, kind: ResourceKind, id: &str) -> Result<()> {
    let prompt = match kind.delete_policy() {
        DeletePolicy::Hard => format!("Permanently delete {} {}?", kind, id),
        DeletePolicy::Soft => format!("Hide {} {} (it stays in the database)?", kind, id),
    };
    if !ctx.confirm(&prompt)? {
        ctx.print_warning("Cancelled");
        return Ok(());
    }

    store(ctx, kind).remove(id).await?;
    ctx.print_success(&format!("Deleted {} {}", kind, id));
    Ok(())
}

pub async fn move_one(ctx: &AppContext, kind: ResourceKind, id: &str, direction: Direction) -> Result<()> {
    let store = store(ctx, kind);
    store.list(None).await?;

    match move_item(&store, id, direction).await? {
        Some(plan) => {
            ctx.print_success(&format!(
                "Moved {} to position {} (swapped with {})",
                plan.moved_id, plan.neighbor_from, plan.neighbor_id
            ));
            print_records(&store.active_sorted());
        }
        None => {
            let edge = match direction {
                Direction::Up => "top",
                Direction::Down => "bottom",
            };
            ctx.print_info(&format!(
                "Nothing to do: {} is at the {} or shares its position with the next item",
                id, edge
            ));
        }
    }
    Ok(())
}
