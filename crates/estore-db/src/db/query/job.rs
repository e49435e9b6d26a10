//! Query builder functions for jobs.

use diesel::prelude::*;

use crate::db::schema::job;

/// ## Summary
/// Returns a query to select all jobs.
#[must_use]
pub fn all() -> job::BoxedQuery<'static, diesel::pg::Pg> {
    job::table.into_boxed()
}

/// ## Summary
/// Returns a query to find a job by ID.
#[must_use]
pub fn by_id(id: i32) -> job::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(job::id.eq(id))
}
