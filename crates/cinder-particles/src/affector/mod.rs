//! Affectors: per-frame particle modifiers declared in a script
//!
//! Every variant is a plain parameter record. Variants parse and write their
//! own attribute lines and implement [`ParticleInfluencer`] so the emission
//! loop can run them in script order.

mod colour;
mod motion;
mod transform;

pub use colour::{ColourFader, ColourFader2, ColourImage, ColourInterpolator, ColourStage, MAX_STAGES};
pub use motion::{DeflectorPlane, DirectionRandomiser, ForceApplication, LinearForce};
pub use transform::{Rotator, Scaler};

use crate::custom::CustomAffector;
use crate::influencer::ParticleInfluencer;
use crate::particle::Particle;
use crate::rand::ParticleRng;
use cinder_core::{AttributeWriter, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Affector {
    ColourFader(ColourFader),
    ColourFader2(ColourFader2),
    ColourInterpolator(ColourInterpolator),
    ColourImage(ColourImage),
    DeflectorPlane(DeflectorPlane),
    DirectionRandomiser(DirectionRandomiser),
    LinearForce(LinearForce),
    Rotator(Rotator),
    Scaler(Scaler),
    Custom(CustomAffector),
}

/// Script names of the built-in affectors
pub const BUILTIN_AFFECTORS: [&str; 9] = [
    "ColourFader",
    "ColourFader2",
    "ColourInterpolator",
    "ColourImage",
    "DeflectorPlane",
    "DirectionRandomiser",
    "LinearForce",
    "Rotator",
    "Scaler",
];

impl Affector {
    /// A built-in affector with default parameters, by script name
    pub fn builtin(name: &str) -> Option<Self> {
        Some(match name {
            "ColourFader" => Affector::ColourFader(ColourFader::default()),
            "ColourFader2" => Affector::ColourFader2(ColourFader2::default()),
            "ColourInterpolator" => Affector::ColourInterpolator(ColourInterpolator::default()),
            "ColourImage" => Affector::ColourImage(ColourImage::default()),
            "DeflectorPlane" => Affector::DeflectorPlane(DeflectorPlane::default()),
            "DirectionRandomiser" => Affector::DirectionRandomiser(DirectionRandomiser::default()),
            "LinearForce" => Affector::LinearForce(LinearForce::default()),
            "Rotator" => Affector::Rotator(Rotator::default()),
            "Scaler" => Affector::Scaler(Scaler::default()),
            _ => return None,
        })
    }

    /// Script name, as written after `affector`
    pub fn name(&self) -> &str {
        match self {
            Affector::ColourFader(_) => "ColourFader",
            Affector::ColourFader2(_) => "ColourFader2",
            Affector::ColourInterpolator(_) => "ColourInterpolator",
            Affector::ColourImage(_) => "ColourImage",
            Affector::DeflectorPlane(_) => "DeflectorPlane",
            Affector::DirectionRandomiser(_) => "DirectionRandomiser",
            Affector::LinearForce(_) => "LinearForce",
            Affector::Rotator(_) => "Rotator",
            Affector::Scaler(_) => "Scaler",
            Affector::Custom(c) => c.name(),
        }
    }

    /// Parse one attribute line. `Ok(false)` means the attribute is not
    /// part of this affector's vocabulary.
    pub fn parse(&mut self, args: &[&str], line: usize) -> Result<bool> {
        if args.is_empty() {
            return Ok(false);
        }
        match self {
            Affector::ColourFader(a) => a.parse(args, line),
            Affector::ColourFader2(a) => a.parse(args, line),
            Affector::ColourInterpolator(a) => a.parse(args, line),
            Affector::ColourImage(a) => a.parse(args, line),
            Affector::DeflectorPlane(a) => a.parse(args, line),
            Affector::DirectionRandomiser(a) => a.parse(args, line),
            Affector::LinearForce(a) => a.parse(args, line),
            Affector::Rotator(a) => a.parse(args, line),
            Affector::Scaler(a) => a.parse(args, line),
            Affector::Custom(c) => c.kind.schema.parse(&mut c.params, args, line),
        }
    }

    /// Write the attribute lines of this affector, without the section header
    pub fn write_attributes(&self, w: &mut AttributeWriter) {
        match self {
            Affector::ColourFader(a) => a.write(w),
            Affector::ColourFader2(a) => a.write(w),
            Affector::ColourInterpolator(a) => a.write(w),
            Affector::ColourImage(a) => a.write(w),
            Affector::DeflectorPlane(a) => a.write(w),
            Affector::DirectionRandomiser(a) => a.write(w),
            Affector::LinearForce(a) => a.write(w),
            Affector::Rotator(a) => a.write(w),
            Affector::Scaler(a) => a.write(w),
            Affector::Custom(c) => c.kind.schema.write(&c.params, w),
        }
    }
}

impl ParticleInfluencer for Affector {
    fn name(&self) -> &str {
        Affector::name(self)
    }

    fn initialize(&self, particle: &mut Particle, rng: &mut ParticleRng) -> Result<()> {
        match self {
            Affector::ColourImage(a) => a.initialize(particle),
            Affector::Rotator(a) => a.initialize(particle, rng),
            Affector::Custom(c) => c.kind.behavior.initialize(&c.params, particle, rng)?,
            _ => {}
        }
        Ok(())
    }

    fn update(&self, particle: &mut Particle, dt: f32, rng: &mut ParticleRng) -> Result<()> {
        match self {
            Affector::ColourFader(a) => a.update(particle, dt),
            Affector::ColourFader2(a) => a.update(particle, dt),
            Affector::ColourInterpolator(a) => a.update(particle),
            Affector::ColourImage(a) => a.update(particle)?,
            Affector::DeflectorPlane(a) => a.update(particle, dt),
            Affector::DirectionRandomiser(a) => a.update(particle, dt, rng),
            Affector::LinearForce(a) => a.update(particle, dt),
            Affector::Rotator(a) => a.update(particle, dt),
            Affector::Scaler(a) => a.update(particle, dt),
            Affector::Custom(c) => c.kind.behavior.update(&c.params, particle, dt, rng)?,
        }
        Ok(())
    }

    fn reset(&self, particle: &mut Particle) -> Result<()> {
        if let Affector::Custom(c) = self {
            c.kind.behavior.reset(&c.params, particle)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom::{AttributeKind, CustomAffectorBehavior, CustomAffectorKind, CustomParams, CustomSchema};
    use cinder_core::tokens::tokenize;
    use cinder_core::Vec3;
    use std::sync::Arc;

    #[test]
    fn builtin_names_round_trip() {
        for name in BUILTIN_AFFECTORS {
            let affector = Affector::builtin(name).unwrap();
            assert_eq!(affector.name(), name);
        }
        assert!(Affector::builtin("Foo").is_none());
    }

    #[test]
    fn written_attributes_reparse_to_same_affector() {
        let mut original = Affector::builtin("LinearForce").unwrap();
        original.parse(&["force_vector", "1", "2.5", "-3"], 1).unwrap();
        original.parse(&["force_application", "average"], 2).unwrap();

        let mut w = AttributeWriter::new();
        original.write_attributes(&mut w);
        let text = w.finish();

        let mut reparsed = Affector::builtin("LinearForce").unwrap();
        for line in text.lines() {
            assert!(reparsed.parse(&tokenize(line), 1).unwrap());
        }
        assert_eq!(reparsed, original);
    }

    #[test]
    fn unknown_attribute_is_not_handled() {
        let mut scaler = Affector::builtin("Scaler").unwrap();
        assert!(!scaler.parse(&["speed", "1"], 1).unwrap());
    }

    struct Drag;

    impl CustomAffectorBehavior for Drag {
        fn update(
            &self,
            params: &CustomParams,
            particle: &mut Particle,
            dt: f32,
            _rng: &mut ParticleRng,
        ) -> Result<()> {
            let k = params.float("factor").unwrap_or(0.0);
            particle.velocity = particle.velocity * (1.0 - k * dt);
            Ok(())
        }
    }

    #[test]
    fn custom_affector_runs_its_behavior() {
        let kind = Arc::new(CustomAffectorKind::new(
            CustomSchema::new("Drag").with_attribute("factor", AttributeKind::Float),
            Arc::new(Drag),
        ));
        let mut affector = Affector::Custom(CustomAffector::new(kind));
        assert!(affector.parse(&["factor", "0.5"], 1).unwrap());
        assert_eq!(affector.name(), "Drag");

        let mut p = Particle::with_life(1.0);
        p.velocity = Vec3::new(4.0, 0.0, 0.0);
        affector
            .update(&mut p, 1.0, &mut ParticleRng::new(1))
            .unwrap();
        assert_eq!(p.velocity, Vec3::new(2.0, 0.0, 0.0));
    }
}
