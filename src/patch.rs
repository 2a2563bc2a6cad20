//! Sparse merge followed by whole-document replace.
//!
//! Shared by the account, category and dish update endpoints. Only fields in a
//! resource's allow-list can change; anything else in the payload is ignored.

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{
    assets::encode_upload,
    error::AppError,
    form::FormPayload,
    store::{from_document, to_document, Collection, DocumentStore, Filter},
};

pub trait Patchable: Serialize + DeserializeOwned + Send {
    type Field: Copy + Send + Sync + 'static;

    const COLLECTION: Collection;
    /// Fields a payload may overwrite.
    const FIELDS: &'static [Self::Field];
    /// Form part carrying a replacement asset, if the kind has one.
    const ASSET_PART: Option<&'static str>;

    fn field_name(field: Self::Field) -> &'static str;
    fn set_field(&mut self, field: Self::Field, value: String);
    fn set_asset(&mut self, asset: Option<String>);
}

/// Overlays allowed payload fields onto `record`. Returns how many changed.
pub fn merge_fields<R: Patchable>(record: &mut R, payload: &FormPayload) -> usize {
    let mut merged = 0;
    for &field in R::FIELDS {
        if let Some(value) = payload.field(R::field_name(field)) {
            record.set_field(field, value.to_string());
            merged += 1;
        }
    }
    merged
}

pub fn merge_asset<R: Patchable>(record: &mut R, payload: &FormPayload) {
    let Some(part) = R::ASSET_PART else {
        return;
    };
    if let Some(asset) = encode_upload(part, payload.upload(part)).into_stored() {
        record.set_asset(asset);
    }
}

/// Fetches the first document matching `filter`, merges `payload` into it and
/// writes it back under the same key.
pub async fn apply_partial_update<R: Patchable>(
    store: &dyn DocumentStore,
    filter: &Filter,
    payload: &FormPayload,
) -> Result<(), AppError> {
    let current = store
        .find_one(R::COLLECTION, filter)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut record: R = from_document(current.body)?;
    let merged = merge_fields(&mut record, payload);
    merge_asset(&mut record, payload);

    let body = to_document(&record)?;
    // the document may have been deleted since it was read
    if !store
        .replace_one(R::COLLECTION, &Filter::by_id(current.id), body)
        .await?
    {
        return Err(AppError::NotFound);
    }
    debug!(
        collection = R::COLLECTION.as_str(),
        id = %current.id,
        merged,
        "document replaced"
    );
    Ok(())
}
