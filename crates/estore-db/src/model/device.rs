use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

/// A device model the shop services. `device_type` is a free-text category
/// used for exact-match filtering; neither field is unique.
#[derive(
    Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize, Deserialize,
)]
#[diesel(table_name = schema::device)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i32,
    pub name: String,
    pub device_type: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::device)]
pub struct NewDevice<'a> {
    pub name: &'a str,
    pub device_type: &'a str,
}

/// Create payload: a device before the store has assigned its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceData {
    pub name: String,
    pub device_type: String,
}

impl DeviceData {
    #[must_use]
    pub fn as_insert(&self) -> NewDevice<'_> {
        NewDevice {
            name: &self.name,
            device_type: &self.device_type,
        }
    }
}
