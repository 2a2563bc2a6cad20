use serde::{Deserialize, Serialize};

use crate::{form::FormPayload, patch::Patchable, store::{Collection, Document}};

/// Dish document in the `dishes` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    pub username: String, // owner
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub weight: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub takeaway: Option<String>,
    pub here: Option<String>,
    pub units: Option<String>,
    pub label: Option<String>,
    pub photo: Option<String>, // base64
    #[serde(default)]
    pub likes: i64,
    #[serde(flatten)]
    pub extra: Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DishField {
    Name,
    Price,
    Description,
    Weight,
    Category,
    Subcategory,
    Takeaway,
    Here,
    Units,
    Label,
}

impl Dish {
    /// New dish owned by `username`, with zero likes and no photo.
    pub fn from_form(username: String, form: &FormPayload) -> Self {
        let mut dish = Dish {
            username,
            name: None,
            price: None,
            description: None,
            weight: None,
            category: None,
            subcategory: None,
            takeaway: None,
            here: None,
            units: None,
            label: None,
            photo: None,
            likes: 0,
            extra: Document::new(),
        };
        crate::patch::merge_fields(&mut dish, form);
        dish
    }
}

impl Patchable for Dish {
    type Field = DishField;

    const COLLECTION: Collection = Collection::Dishes;
    const FIELDS: &'static [DishField] = &[
        DishField::Name,
        DishField::Price,
        DishField::Description,
        DishField::Weight,
        DishField::Category,
        DishField::Subcategory,
        DishField::Takeaway,
        DishField::Here,
        DishField::Units,
        DishField::Label,
    ];
    const ASSET_PART: Option<&'static str> = Some("photo");

    fn field_name(field: DishField) -> &'static str {
        match field {
            DishField::Name => "name",
            DishField::Price => "price",
            DishField::Description => "description",
            DishField::Weight => "weight",
            DishField::Category => "category",
            DishField::Subcategory => "subcategory",
            DishField::Takeaway => "takeaway",
            DishField::Here => "here",
            DishField::Units => "units",
            DishField::Label => "label",
        }
    }

    fn set_field(&mut self, field: DishField, value: String) {
        let slot = match field {
            DishField::Name => &mut self.name,
            DishField::Price => &mut self.price,
            DishField::Description => &mut self.description,
            DishField::Weight => &mut self.weight,
            DishField::Category => &mut self.category,
            DishField::Subcategory => &mut self.subcategory,
            DishField::Takeaway => &mut self.takeaway,
            DishField::Here => &mut self.here,
            DishField::Units => &mut self.units,
            DishField::Label => &mut self.label,
        };
        *slot = Some(value);
    }

    fn set_asset(&mut self, asset: Option<String>) {
        self.photo = asset;
    }
}
