use serde_json::Value;
use uuid::Uuid;

use super::repo_types::Account;
use crate::store::{from_document, to_document, Collection, DocumentStore, Filter, Stored};

const CREDENTIAL: &str = "password_hash";

pub fn by_username(username: &str) -> Filter {
    Filter::all().eq("username", username)
}

impl Account {
    /// Earliest account registered under `username`.
    pub async fn find_by_username(
        store: &dyn DocumentStore,
        username: &str,
    ) -> anyhow::Result<Option<Account>> {
        store
            .find_one(Collection::Users, &by_username(username))
            .await?
            .map(|s| from_document(s.body))
            .transpose()
    }

    /// Inserts without a uniqueness check.
    pub async fn create(store: &dyn DocumentStore, account: &Account) -> anyhow::Result<Uuid> {
        store
            .insert_one(Collection::Users, to_document(account)?)
            .await
    }

    /// Stored profile with the credential hash removed.
    pub async fn profile(store: &dyn DocumentStore, username: &str) -> anyhow::Result<Option<Value>> {
        Ok(store
            .find_one(Collection::Users, &by_username(username))
            .await?
            .map(|Stored { id, mut body }| {
                body.remove(CREDENTIAL);
                Stored { id, body }.into_json()
            }))
    }
}
