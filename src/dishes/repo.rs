use uuid::Uuid;

use super::{dto::{DishFilter, LikeOp}, repo_types::Dish};
use crate::store::{to_document, Collection, DocumentStore, Filter, Stored};

const LIKES: &str = "likes";

/// Dish `id` as seen by its owner.
pub fn owned(id: Uuid, username: &str) -> Filter {
    Filter::by_id(id).eq("username", username)
}

pub async fn insert(store: &dyn DocumentStore, dish: &Dish) -> anyhow::Result<Uuid> {
    store.insert_one(Collection::Dishes, to_document(dish)?).await
}

/// Owner's dishes in insertion order, narrowed by non-empty category filters.
pub async fn list_for_owner(
    store: &dyn DocumentStore,
    username: &str,
    narrow: &DishFilter,
) -> anyhow::Result<Vec<Stored>> {
    let mut filter = Filter::all().eq("username", username);
    if let Some(category) = narrow.category.as_deref().filter(|s| !s.is_empty()) {
        filter = filter.eq("category", category);
    }
    if let Some(subcategory) = narrow.subcategory.as_deref().filter(|s| !s.is_empty()) {
        filter = filter.eq("subcategory", subcategory);
    }
    store.find(Collection::Dishes, &filter).await
}

/// New likes count, or `None` when the caller owns no such dish.
pub async fn adjust_likes(
    store: &dyn DocumentStore,
    id: Uuid,
    username: &str,
    op: LikeOp,
) -> anyhow::Result<Option<i64>> {
    store
        .increment(Collection::Dishes, &owned(id, username), LIKES, op.delta())
        .await
}

pub async fn delete_owned(
    store: &dyn DocumentStore,
    id: Uuid,
    username: &str,
) -> anyhow::Result<bool> {
    store.delete_one(Collection::Dishes, &owned(id, username)).await
}
