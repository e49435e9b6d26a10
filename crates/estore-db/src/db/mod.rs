pub mod connection;
pub mod migrations;
pub mod query;
pub mod schema;
