//! Particle system listing command

use super::load;
use anyhow::Result;
use cinder_script::ParticleScriptCollection;
use std::fmt::Write as _;

pub fn run(file: &str) -> Result<()> {
    let outcome = load(file)?;
    print!("{}", listing(&outcome.collection));
    Ok(())
}

fn listing(collection: &ParticleScriptCollection) -> String {
    let mut out = String::new();
    for script in collection {
        let _ = writeln!(out, "{}", script.name);
        for emitter in &script.emitters {
            let _ = writeln!(out, "  emitter  {}", emitter.name());
        }
        for affector in &script.affectors {
            let _ = writeln!(out, "  affector {}", affector.name());
        }
    }
    out
}
