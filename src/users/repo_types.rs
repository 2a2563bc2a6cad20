use serde::{Deserialize, Serialize};

use crate::{patch::Patchable, store::{Collection, Document}};

/// Account document in the `users` collection, keyed by `username`.
///
/// `password_hash` is the login credential. The profile `password` field is
/// free-form restaurant data and never affects authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password_hash: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub schedule: Option<String>,
    pub contacts: Option<String>,
    pub useful_info: Option<String>,
    pub name: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
    pub languages: Option<String>,
    pub currency: Option<String>,
    pub subscription: Option<String>,
    pub logo: Option<String>, // base64
    #[serde(flatten)]
    pub extra: Document,
}

impl Account {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            kind: None,
            schedule: None,
            contacts: None,
            useful_info: None,
            name: None,
            login: None,
            password: None,
            languages: None,
            currency: None,
            subscription: None,
            logo: None,
            extra: Document::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountField {
    Kind,
    Schedule,
    Contacts,
    UsefulInfo,
    Name,
    Login,
    Password,
    Languages,
    Currency,
    Subscription,
}

impl Patchable for Account {
    type Field = AccountField;

    const COLLECTION: Collection = Collection::Users;
    const FIELDS: &'static [AccountField] = &[
        AccountField::Kind,
        AccountField::Schedule,
        AccountField::Contacts,
        AccountField::UsefulInfo,
        AccountField::Name,
        AccountField::Login,
        AccountField::Password,
        AccountField::Languages,
        AccountField::Currency,
        AccountField::Subscription,
    ];
    const ASSET_PART: Option<&'static str> = Some("logo");

    fn field_name(field: AccountField) -> &'static str {
        match field {
            AccountField::Kind => "type",
            AccountField::Schedule => "schedule",
            AccountField::Contacts => "contacts",
            AccountField::UsefulInfo => "useful_info",
            AccountField::Name => "name",
            AccountField::Login => "login",
            AccountField::Password => "password",
            AccountField::Languages => "languages",
            AccountField::Currency => "currency",
            AccountField::Subscription => "subscription",
        }
    }

    fn set_field(&mut self, field: AccountField, value: String) {
        let slot = match field {
            AccountField::Kind => &mut self.kind,
            AccountField::Schedule => &mut self.schedule,
            AccountField::Contacts => &mut self.contacts,
            AccountField::UsefulInfo => &mut self.useful_info,
            AccountField::Name => &mut self.name,
            AccountField::Login => &mut self.login,
            AccountField::Password => &mut self.password,
            AccountField::Languages => &mut self.languages,
            AccountField::Currency => &mut self.currency,
            AccountField::Subscription => &mut self.subscription,
        };
        *slot = Some(value);
    }

    fn set_asset(&mut self, asset: Option<String>) {
        self.logo = asset;
    }
}
