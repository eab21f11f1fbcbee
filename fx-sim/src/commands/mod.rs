//! Command implementations

pub mod run;
pub mod template;
pub mod validate;

use anyhow::{Context, Result};
use fx_particles::TechniqueConfig;
use std::fs;
use std::path::Path;

/// Read and parse a technique description
pub fn load_config(path: &Path) -> Result<TechniqueConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    TechniqueConfig::from_json(&json)
        .with_context(|| format!("Failed to parse technique description {}", path.display()))
}
