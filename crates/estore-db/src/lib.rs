//! Persistence layer for the estore repair-shop backend: diesel schema,
//! entity models, boxed query builders, and the connection pool.

pub mod db;
pub mod error;
pub mod model;
