//! Feature integration tests

pub mod affectors;
pub mod parameters;
#[cfg(feature = "serde-support")]
pub mod serde_config;
pub mod technique;
