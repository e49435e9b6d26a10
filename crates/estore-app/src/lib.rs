pub mod app;
pub mod config;
pub mod error;
pub mod repo_handler;
