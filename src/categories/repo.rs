use uuid::Uuid;

use super::repo_types::Category;
use crate::store::{to_document, Collection, DocumentStore, Filter, Stored};

pub fn owned(id: Uuid, username: &str) -> Filter {
    Filter::by_id(id).eq("username", username)
}

pub async fn insert(store: &dyn DocumentStore, category: &Category) -> anyhow::Result<Uuid> {
    store
        .insert_one(Collection::Categories, to_document(category)?)
        .await
}

/// Every category regardless of owner; the menu structure is shared.
pub async fn list_all(store: &dyn DocumentStore) -> anyhow::Result<Vec<Stored>> {
    store.find(Collection::Categories, &Filter::all()).await
}

pub async fn delete_owned(
    store: &dyn DocumentStore,
    id: Uuid,
    username: &str,
) -> anyhow::Result<bool> {
    store
        .delete_one(Collection::Categories, &owned(id, username))
        .await
}
