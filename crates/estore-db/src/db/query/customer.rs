//! Query builder functions for customers.

use diesel::prelude::*;

use crate::db::query::text_match::contains_pattern;
use crate::db::schema::customer;

/// ## Summary
/// Returns a query to select all customers.
#[must_use]
pub fn all() -> customer::BoxedQuery<'static, diesel::pg::Pg> {
    customer::table.into_boxed()
}

/// ## Summary
/// Returns a query to find a customer by ID.
#[must_use]
pub fn by_id(id: i32) -> customer::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(customer::id.eq(id))
}

/// ## Summary
/// Returns a query matching customers whose name, primary phone, or email
/// contains `query` (case-sensitive substring).
#[must_use]
pub fn by_query(query: &str) -> customer::BoxedQuery<'static, diesel::pg::Pg> {
    let pattern = contains_pattern(query);
    all().filter(
        customer::name
            .like(pattern.clone())
            .or(customer::phone.like(pattern.clone()))
            .or(customer::email.like(pattern)),
    )
}
