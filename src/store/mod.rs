//! Document persistence.
//!
//! Resources are schemaless JSON documents grouped into named collections and
//! addressed by a generated id. Writes replace whole documents; there is no
//! versioning, so concurrent read-modify-write cycles resolve last-writer-wins.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use anyhow::Context;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

pub use postgres::PgDocumentStore;

pub type Document = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Categories,
    Reviews,
    Dishes,
    DemoUser,
    DemoMenu,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Categories => "categories",
            Collection::Reviews => "reviews",
            Collection::Dishes => "dishes",
            Collection::DemoUser => "demo_user",
            Collection::DemoMenu => "demo_menu",
        }
    }
}

/// Equality filter: optional id plus top-level field matches.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    id: Option<Uuid>,
    fields: Document,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            fields: Document::new(),
        }
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn fields(&self) -> &Document {
        &self.fields
    }

    pub fn matches(&self, id: Uuid, body: &Document) -> bool {
        if self.id.is_some_and(|want| want != id) {
            return false;
        }
        self.fields
            .iter()
            .all(|(k, v)| body.get(k).is_some_and(|have| have == v))
    }
}

/// A document together with its key.
#[derive(Debug, Clone, PartialEq)]
pub struct Stored {
    pub id: Uuid,
    pub body: Document,
}

impl Stored {
    /// Client-facing JSON: the body with its key under `_id`.
    pub fn into_json(self) -> Value {
        let mut body = self.body;
        body.insert("_id".into(), Value::String(self.id.to_string()));
        Value::Object(body)
    }
}

pub fn to_document<T: Serialize>(record: &T) -> anyhow::Result<Document> {
    match serde_json::to_value(record).context("serialize document")? {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("expected a JSON object, got {other}"),
    }
}

pub fn from_document<T: DeserializeOwned>(body: Document) -> anyhow::Result<T> {
    serde_json::from_value(Value::Object(body)).context("deserialize document")
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_one(&self, collection: Collection, body: Document) -> anyhow::Result<Uuid>;

    /// First match in insertion order.
    async fn find_one(&self, collection: Collection, filter: &Filter)
        -> anyhow::Result<Option<Stored>>;

    /// All matches in insertion order.
    async fn find(&self, collection: Collection, filter: &Filter) -> anyhow::Result<Vec<Stored>>;

    /// Replaces the body of the first match. Returns whether anything matched.
    async fn replace_one(
        &self,
        collection: Collection,
        filter: &Filter,
        body: Document,
    ) -> anyhow::Result<bool>;

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> anyhow::Result<bool>;

    /// Adds `delta` to an integer field of the first match in a single write,
    /// treating a missing field as zero. Returns the new value, or `None` if
    /// nothing matched.
    async fn increment(
        &self,
        collection: Collection,
        filter: &Filter,
        field: &str,
        delta: i64,
    ) -> anyhow::Result<Option<i64>>;
}
