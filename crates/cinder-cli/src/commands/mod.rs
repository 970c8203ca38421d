//! CLI command implementations

pub mod check;
pub mod format;
pub mod list;
pub mod simulate;

use anyhow::{Context, Result};
use cinder_script::{load_scripts, LoadOutcome, Registries};

/// Load a script file against the built-in registries
pub fn load(file: &str) -> Result<LoadOutcome> {
    load_scripts(file, &Registries::builtin()).with_context(|| format!("Failed to load {file}"))
}
