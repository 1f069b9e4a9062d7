//! Common utilities shared across the crate

pub mod env_loader;
pub mod time;

pub use env_loader::EnvLoader;
