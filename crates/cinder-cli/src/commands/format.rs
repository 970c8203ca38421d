//! Canonical rewrite command

use super::load;
use anyhow::{Context, Result};
use cinder_script::save_scripts_string;

pub fn run(file: &str, output: Option<&str>) -> Result<()> {
    let outcome = load(file)?;
    let text = save_scripts_string(&outcome.collection);
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("Failed to write {path}"))?;
            log::info!("Wrote {} particle system(s) to {path}", outcome.collection.len());
        }
        None => print!("{text}"),
    }
    Ok(())
}
