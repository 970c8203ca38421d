//! Cinder Particles - emitters, affectors and the per-particle contract
//!
//! Provides the simulation side of a particle script:
//! - `Particle` state, a swap-remove `ParticlePool` and a seedable RNG
//! - The `ParticleInfluencer` contract (initialize / update / reset)
//! - Emitter shapes with emission geometry descriptors for the host engine
//! - The built-in affectors and host-defined custom kinds
//! - `TimedEmitter`, a duration / repeat-delay scheduler over any continuous
//!   emission process, and `RateEmission` as a reference process

pub mod affector;
pub mod custom;
pub mod emission;
pub mod emitter;
pub mod influencer;
pub mod particle;
pub mod pixels;
pub mod rand;
pub mod timed;

pub use affector::Affector;
pub use custom::{
    AttributeKind, AttributeSpec, CustomAffector, CustomAffectorBehavior, CustomAffectorKind,
    CustomParams, CustomSchema, CustomShape, CustomShapeKind, ParamValue,
};
pub use emission::RateEmission;
pub use emitter::{EmissionGeometry, EmissionSchedule, EmissionVolume, Emitter, EmitterCommon, EmitterShape};
pub use influencer::ParticleInfluencer;
pub use particle::{Particle, ParticlePool};
pub use pixels::{PixelFormat, PixelRow};
pub use rand::ParticleRng;
pub use timed::{ContinuousEmission, TimedEmitter};
