pub mod builder;
pub mod config;
pub mod constants;
pub mod extent;
pub mod profile;
