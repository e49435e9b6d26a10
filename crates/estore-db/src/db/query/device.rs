//! Query builder functions for devices.

use diesel::prelude::*;

use crate::db::query::text_match::contains_pattern;
use crate::db::schema::device;

/// ## Summary
/// Returns a query to select all devices.
#[must_use]
pub fn all() -> device::BoxedQuery<'static, diesel::pg::Pg> {
    device::table.into_boxed()
}

/// ## Summary
/// Returns a query to find a device by ID.
#[must_use]
pub fn by_id(id: i32) -> device::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(device::id.eq(id))
}

/// ## Summary
/// Returns a query matching devices whose name contains `name`
/// (case-sensitive substring).
#[must_use]
pub fn by_name(name: &str) -> device::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(device::name.like(contains_pattern(name)))
}

/// ## Summary
/// Returns a query matching devices whose type equals `device_type` exactly.
#[must_use]
pub fn by_type(device_type: &str) -> device::BoxedQuery<'_, diesel::pg::Pg> {
    all().filter(device::device_type.eq(device_type))
}
