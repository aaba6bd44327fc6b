//! Move an item up or down a curated sequence by swapping `orderIndex`
//! values with its neighbour.
//!
//! A move is two PATCHes: the mover takes the neighbour's index, then the
//! neighbour takes the mover's old index. Both run under the store's
//! mutation lock. If the second PATCH fails the two items are left sharing
//! an index and [`ResourceError::PartialSwap`] is returned; nothing is
//! rolled back.

use serde_json::json;
use tracing::{info, warn};

use crate::error::{ResourceError, Result};
use crate::item::ResourceItem;
use crate::store::ResourceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("unknown direction '{}', expected up or down", other)),
        }
    }
}

/// The two writes a move needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPlan {
    pub moved_id: String,
    pub moved_from: i64,
    pub neighbor_id: String,
    pub neighbor_from: i64,
}

/// Work out the swap for moving `id` within `items`.
///
/// `items` is sorted by `orderIndex` first. Returns `Ok(None)` when the move
/// would fall off either end, or when the neighbour already shares the
/// item's `orderIndex` (swapping equal values changes nothing).
pub fn plan_move<T: ResourceItem>(items: &[T], id: &str, direction: Direction) -> Result<Option<SwapPlan>> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|i| i.order_index());

    let position = sorted
        .iter()
        .position(|i| i.id() == id)
        .ok_or_else(|| ResourceError::NotFound {
            resource: "item".to_string(),
            id: id.to_string(),
        })?;

    let neighbor = match direction {
        Direction::Up if position == 0 => return Ok(None),
        Direction::Down if position + 1 == sorted.len() => return Ok(None),
        Direction::Up => sorted[position - 1],
        Direction::Down => sorted[position + 1],
    };
    let mover = sorted[position];
    if mover.order_index() == neighbor.order_index() {
        return Ok(None);
    }

    Ok(Some(SwapPlan {
        moved_id: mover.id().to_string(),
        moved_from: mover.order_index(),
        neighbor_id: neighbor.id().to_string(),
        neighbor_from: neighbor.order_index(),
    }))
}

/// Move `id` one step among the store's active items.
///
/// Returns the executed plan, or `None` when nothing would change (no request
/// is sent).
pub async fn move_item<T: ResourceItem>(
    store: &ResourceStore<T>,
    id: &str,
    direction: Direction,
) -> Result<Option<SwapPlan>> {
    store.ensure_open()?;
    let _guard = store.lock_mutations().await;

    let visible: Vec<T> = store.items().into_iter().filter(|i| i.is_active()).collect();
    let plan = match plan_move(&visible, id, direction)? {
        Some(plan) => plan,
        None => return Ok(None),
    };

    store
        .patch_locked(&plan.moved_id, json!({ "orderIndex": plan.neighbor_from }))
        .await?;

    if let Err(e) = store
        .patch_locked(&plan.neighbor_id, json!({ "orderIndex": plan.moved_from }))
        .await
    {
        warn!(
            resource = %store.definition().name,
            moved_id = %plan.moved_id,
            neighbor_id = %plan.neighbor_id,
            error = %e,
            "Reorder left two items sharing an orderIndex"
        );
        return Err(ResourceError::PartialSwap {
            moved_id: plan.moved_id,
            neighbor_id: plan.neighbor_id,
            source: Box::new(e),
        });
    }

    info!(
        resource = %store.definition().name,
        moved_id = %plan.moved_id,
        neighbor_id = %plan.neighbor_id,
        ?direction,
        "Reordered items"
    );
    Ok(Some(plan))
}
