//! Script check command

use super::load;
use anyhow::Result;
use cinder_script::LoadOutcome;
use std::fmt::Write as _;

pub fn run(file: &str) -> Result<()> {
    let outcome = load(file)?;
    print!("{}", report(&outcome));
    Ok(())
}

fn report(outcome: &LoadOutcome) -> String {
    let mut out = String::new();
    for script in &outcome.collection {
        let _ = writeln!(
            out,
            "{}: quota {}, {} emitter(s), {} affector(s)",
            script.name,
            script.quota,
            script.emitters.len(),
            script.affectors.len()
        );
    }
    if outcome.warnings.is_empty() {
        let _ = writeln!(out, "OK, no warnings");
    } else {
        let _ = writeln!(out, "{} warning(s):", outcome.warnings.len());
        for warning in &outcome.warnings {
            let _ = writeln!(out, "  [{:?}] {}", warning.kind, warning);
        }
    }
    out
}
