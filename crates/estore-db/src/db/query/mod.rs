pub mod customer;
pub mod device;
pub mod job;
pub mod problem;
pub mod text_match;
