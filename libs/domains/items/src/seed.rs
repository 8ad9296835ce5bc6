use tracing::info;

use crate::error::ItemResult;
use crate::models::{Item, NewItem};
use crate::service::ItemOperations;

/// Items loaded by [`seed_sample_items`]
pub fn sample_items() -> Vec<NewItem> {
    vec![
        NewItem::new("itemA", 10000, 10),
        NewItem::new("itemB", 20000, 20),
    ]
}

/// Save the sample items through the configured service.
///
/// Meant for local runs so the listing page is not empty on first start.
pub async fn seed_sample_items<S: ItemOperations + ?Sized>(service: &S) -> ItemResult<Vec<Item>> {
    let mut saved = Vec::new();
    for input in sample_items() {
        saved.push(service.save(input).await?);
    }
    info!(count = saved.len(), "Seeded sample items");
    Ok(saved)
}
