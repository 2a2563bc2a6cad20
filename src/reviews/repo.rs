use uuid::Uuid;

use super::repo_types::Review;
use crate::store::{to_document, Collection, DocumentStore, Filter, Stored};

pub async fn insert(store: &dyn DocumentStore, review: &Review) -> anyhow::Result<Uuid> {
    store
        .insert_one(Collection::Reviews, to_document(review)?)
        .await
}

pub async fn list_by_author(
    store: &dyn DocumentStore,
    username: &str,
) -> anyhow::Result<Vec<Stored>> {
    store
        .find(Collection::Reviews, &Filter::all().eq("username", username))
        .await
}
