//! Shared configuration, constants, and base error types for the estore
//! repair-shop backend.

pub mod config;
pub mod constants;
pub mod error;
