use serde::{Deserialize, Serialize};

use crate::{form::FormPayload, patch::{merge_fields, Patchable}, store::{Collection, Document}};

/// Category document in the `categories` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub username: String, // owner
    pub name: Option<String>,
    pub subcategories: Option<String>,
    pub description: Option<String>,
    pub photo: Option<String>, // base64
    #[serde(flatten)]
    pub extra: Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Name,
    Subcategories,
    Description,
}

impl Category {
    pub fn from_form(username: String, form: &FormPayload) -> Self {
        let mut category = Category {
            username,
            name: None,
            subcategories: None,
            description: None,
            photo: None,
            extra: Document::new(),
        };
        merge_fields(&mut category, form);
        category
    }
}

impl Patchable for Category {
    type Field = CategoryField;

    const COLLECTION: Collection = Collection::Categories;
    const FIELDS: &'static [CategoryField] = &[
        CategoryField::Name,
        CategoryField::Subcategories,
        CategoryField::Description,
    ];
    const ASSET_PART: Option<&'static str> = Some("photo");

    fn field_name(field: CategoryField) -> &'static str {
        match field {
            CategoryField::Name => "name",
            CategoryField::Subcategories => "subcategories",
            CategoryField::Description => "description",
        }
    }

    fn set_field(&mut self, field: CategoryField, value: String) {
        match field {
            CategoryField::Name => self.name = Some(value),
            CategoryField::Subcategories => self.subcategories = Some(value),
            CategoryField::Description => self.description = Some(value),
        }
    }

    fn set_asset(&mut self, asset: Option<String>) {
        self.photo = asset;
    }
}
