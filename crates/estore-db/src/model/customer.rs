use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

/// A repair-shop customer. Name and primary phone are required; everything
/// else is optional contact detail.
#[derive(
    Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize, Deserialize,
)]
#[diesel(table_name = schema::customer)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub phone_secondary: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::customer)]
pub struct NewCustomer<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub phone_secondary: Option<&'a str>,
    pub email: Option<&'a str>,
    pub address: Option<&'a str>,
}

/// Create payload: a customer before the store has assigned its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerData {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub phone_secondary: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl CustomerData {
    #[must_use]
    pub fn as_insert(&self) -> NewCustomer<'_> {
        NewCustomer {
            name: &self.name,
            phone: &self.phone,
            phone_secondary: self.phone_secondary.as_deref(),
            email: self.email.as_deref(),
            address: self.address.as_deref(),
        }
    }
}
