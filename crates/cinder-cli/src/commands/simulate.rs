//! Reference simulation command

use super::load;
use anyhow::{bail, Result};
use cinder_particles::{ParticleRng, RateEmission, TimedEmitter};
use cinder_script::{build_emission, ActivationConfig, FileResolver};
use std::path::Path;

pub struct SimulateArgs {
    pub file: String,
    pub system: String,
    pub seconds: f32,
    pub step: f32,
    pub seed: u32,
    pub config: Option<String>,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if args.step <= 0.0 || !args.step.is_finite() {
        bail!("--step must be a positive number of seconds");
    }
    let outcome = load(&args.file)?;
    let script = outcome.collection.require(&args.system)?;
    let config = match &args.config {
        Some(path) => ActivationConfig::load_from_file(path)?,
        None => ActivationConfig::load(),
    };
    // ColourImage images resolve relative to the script
    let root = Path::new(&args.file).parent().unwrap_or(Path::new("."));
    let mut emitters = build_emission(script, &FileResolver::new(root), &config)?;
    let names: Vec<&str> = script.emitters.iter().map(|e| e.name()).collect();

    println!(
        "Simulating {} ({} emitter(s)) for {}s in {}s steps",
        script.name,
        emitters.len(),
        args.seconds,
        args.step
    );
    for sample in simulate(&mut emitters, args.seconds, args.step, args.seed)? {
        let counts: Vec<String> = names
            .iter()
            .zip(&sample.emitters)
            .map(|(name, (alive, emitting))| {
                let state = if *emitting { "emitting" } else { "waiting" };
                format!("{name}: {alive} ({state})")
            })
            .collect();
        println!("t={:>6.2}s  {}", sample.time, counts.join(", "));
    }
    Ok(())
}

/// Live particle count and emitting flag per emitter at one point in time
#[derive(Debug, Clone, PartialEq)]
struct Sample {
    time: f64,
    emitters: Vec<(usize, bool)>,
}

/// Tick every emitter on a shared clock, sampling about once per simulated
/// second and after the last step
fn simulate(
    emitters: &mut [TimedEmitter<RateEmission>],
    seconds: f32,
    step: f32,
    seed: u32,
) -> Result<Vec<Sample>> {
    let mut rng = ParticleRng::new(seed);
    let steps = ((seconds / step).round() as usize).max(1);
    let every = ((1.0 / step).round() as usize).max(1);
    let mut samples = Vec::new();
    for i in 0..steps {
        let now = i as f64 * f64::from(step);
        for emitter in emitters.iter_mut() {
            emitter.tick(now, step, &mut rng)?;
        }
        if (i + 1) % every == 0 || i + 1 == steps {
            samples.push(Sample {
                time: (i + 1) as f64 * f64::from(step),
                emitters: emitters
                    .iter()
                    .map(|e| (e.inner().alive_count(), e.is_emitting()))
                    .collect(),
            });
        }
    }
    Ok(samples)
}
