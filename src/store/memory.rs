use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Collection, Document, DocumentStore, Filter, Stored};

/// In-process store with the same matching and ordering rules as Postgres.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Stored>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: Collection, body: Document) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(Stored { id, body });
        Ok(id)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> anyhow::Result<Option<Stored>> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d.id, &d.body)))
            .cloned())
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> anyhow::Result<Vec<Stored>> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| filter.matches(d.id, &d.body))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn replace_one(
        &self,
        collection: Collection,
        filter: &Filter,
        body: Document,
    ) -> anyhow::Result<bool> {
        let mut guard = self.collections.write().await;
        let Some(doc) = guard
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| filter.matches(d.id, &d.body)))
        else {
            return Ok(false);
        };
        doc.body = body;
        Ok(true)
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> anyhow::Result<bool> {
        let mut guard = self.collections.write().await;
        let Some(docs) = guard.get_mut(&collection) else {
            return Ok(false);
        };
        match docs.iter().position(|d| filter.matches(d.id, &d.body)) {
            Some(idx) => {
                docs.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn increment(
        &self,
        collection: Collection,
        filter: &Filter,
        field: &str,
        delta: i64,
    ) -> anyhow::Result<Option<i64>> {
        let mut guard = self.collections.write().await;
        let Some(doc) = guard
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| filter.matches(d.id, &d.body)))
        else {
            return Ok(None);
        };
        let current = doc.body.get(field).and_then(Value::as_i64).unwrap_or(0);
        let next = current + delta;
        doc.body.insert(field.to_string(), Value::from(next));
        Ok(Some(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: Value) -> Document {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn find_keeps_insertion_order() {
        let store = MemoryStore::new();
        for name in ["a", "b", "c"] {
            store
                .insert_one(Collection::Dishes, doc(json!({"name": name, "username": "u"})))
                .await
                .unwrap();
        }
        store
            .insert_one(Collection::Dishes, doc(json!({"name": "x", "username": "v"})))
            .await
            .unwrap();

        let found = store
            .find(Collection::Dishes, &Filter::all().eq("username", "u"))
            .await
            .unwrap();
        let names: Vec<_> = found.iter().map(|s| s.body["name"].clone()).collect();
        assert_eq!(names, vec![json!("a"), json!("b"), json!("c")]);
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = MemoryStore::new();
        store
            .insert_one(Collection::DemoMenu, doc(json!({"name": "demo"})))
            .await
            .unwrap();
        assert!(store
            .find(Collection::Dishes, &Filter::all())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn replace_and_delete_report_matches() {
        let store = MemoryStore::new();
        let id = store
            .insert_one(Collection::Categories, doc(json!({"name": "old"})))
            .await
            .unwrap();

        assert!(store
            .replace_one(Collection::Categories, &Filter::by_id(id), doc(json!({"name": "new"})))
            .await
            .unwrap());
        assert!(!store
            .replace_one(
                Collection::Categories,
                &Filter::by_id(Uuid::new_v4()),
                doc(json!({}))
            )
            .await
            .unwrap());

        let got = store
            .find_one(Collection::Categories, &Filter::by_id(id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(got.body["name"], json!("new"));

        assert!(store
            .delete_one(Collection::Categories, &Filter::by_id(id))
            .await
            .unwrap());
        assert!(!store
            .delete_one(Collection::Categories, &Filter::by_id(id))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn increment_has_no_floor() {
        let store = MemoryStore::new();
        let id = store
            .insert_one(Collection::Dishes, doc(json!({"likes": 0})))
            .await
            .unwrap();
        let v = store
            .increment(Collection::Dishes, &Filter::by_id(id), "likes", -1)
            .await
            .unwrap();
        assert_eq!(v, Some(-1));
        let none = store
            .increment(Collection::Dishes, &Filter::by_id(Uuid::new_v4()), "likes", 1)
            .await
            .unwrap();
        assert_eq!(none, None);
    }
}
