//! Data access layer for the estore repair-shop backend: the repository
//! contract, its Postgres implementation, and the validation rules applied
//! before any store mutation.

pub mod error;
pub mod repo;
pub mod validate;
