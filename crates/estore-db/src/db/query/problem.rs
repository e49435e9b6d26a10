//! Query builder functions for problems.

use diesel::prelude::*;

use crate::db::schema::problem;

/// ## Summary
/// Returns a query to select all problems.
#[must_use]
pub fn all() -> problem::BoxedQuery<'static, diesel::pg::Pg> {
    problem::table.into_boxed()
}

/// ## Summary
/// Returns a query to find a problem by ID.
#[must_use]
pub fn by_id(id: i32) -> problem::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(problem::id.eq(id))
}

/// ## Summary
/// Returns a query for all problems scoped to a device.
#[must_use]
pub fn of_device(device_id: i32) -> problem::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(problem::device_id.eq(device_id))
}

/// ## Summary
/// Returns a query for the problems attached to a job.
#[must_use]
pub fn attached_to_job(job_id: i32) -> problem::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(problem::job_id.eq(job_id))
}

/// ## Summary
/// Returns a query for all problems currently attached to some job.
#[must_use]
pub fn attached() -> problem::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(problem::job_id.is_not_null())
}

/// ## Summary
/// Returns a query for the problems named by `ids`.
#[must_use]
pub fn by_ids(ids: &[i32]) -> problem::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(problem::id.eq_any(ids.to_vec()))
}
