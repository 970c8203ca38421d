//! Translation of a parsed script into per-emitter setups for a host engine
//!
//! Activation is the only step that touches assets. Materials and ColourImage
//! pixel rows come from a [`MaterialResolver`] supplied by the host.

use crate::config::ActivationConfig;
use crate::document::{BillboardOrigin, BillboardRotation, BillboardType, DirectionType, ParticleScript};
use cinder_core::{CinderError, Color, Result, Vec3};
use cinder_particles::affector::{Affector, ColourImage};
use cinder_particles::{
    EmissionGeometry, EmissionSchedule, Emitter, ParticleInfluencer, PixelRow, RateEmission,
    TimedEmitter,
};
use glam::{Mat3, Quat};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// A constructed material as reported by the host
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialHandle {
    pub name: String,
    /// Uniform the particle texture is bound to
    pub texture_uniform: String,
}

/// Host services used while activating a script
pub trait MaterialResolver {
    fn resolve_material(&self, name: &str) -> Result<MaterialHandle>;

    fn load_pixels(&self, path: &str) -> Result<Arc<PixelRow>>;
}

/// Resolves nothing. Scripts fall back to sprites, and ColourImage affectors
/// fail to activate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl MaterialResolver for NullResolver {
    fn resolve_material(&self, name: &str) -> Result<MaterialHandle> {
        Err(CinderError::Material(format!("No material {name}")))
    }

    fn load_pixels(&self, path: &str) -> Result<Arc<PixelRow>> {
        Err(CinderError::Material(format!("No image loader for {path}")))
    }
}

/// Decodes ColourImage images from disk relative to `root`. Has no
/// materials.
#[derive(Debug, Clone)]
pub struct FileResolver {
    pub root: PathBuf,
}

impl FileResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl MaterialResolver for FileResolver {
    fn resolve_material(&self, name: &str) -> Result<MaterialHandle> {
        NullResolver.resolve_material(name)
    }

    fn load_pixels(&self, path: &str) -> Result<Arc<PixelRow>> {
        let full = self.root.join(path);
        let img = image::open(&full).map_err(|e| {
            CinderError::Material(format!("Failed to load image {}: {}", full.display(), e))
        })?;
        Ok(Arc::new(PixelRow::from_image(&img)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MaterialBinding {
    /// Plain textured sprite
    Sprite(String),
    Material(MaterialHandle),
}

/// Host billboard modes a script billboard type maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillboardMode {
    Camera,
    OrientedCommon,
    OrientedSelf,
    Velocity,
}

/// Where on the quad a particle's position sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionPoint {
    Center,
    EdgeTop,
    EdgeBottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Point,
    Tri,
}

/// Everything a host needs to build one emitter
pub struct EmitterSetup {
    pub name: String,
    pub material: MaterialBinding,
    pub quota: usize,
    pub life_min: f32,
    pub life_max: f32,
    pub emission_rate: f32,
    pub colour_start: Color,
    pub colour_end: Color,
    /// Spawn initializers followed by the script's affectors, in run order
    pub influencers: Vec<Box<dyn ParticleInfluencer>>,
    pub geometry: EmissionGeometry,
    pub position: Vec3,
    pub rotation: Quat,
    pub schedule: Option<EmissionSchedule>,
    /// `None` leaves the host default in place
    pub billboard_mode: Option<BillboardMode>,
    pub emission_point: EmissionPoint,
    pub mesh: MeshKind,
    pub common_direction: Vec3,
    pub common_up_vector: Vec3,
    pub direction_type: DirectionType,
    pub particles_per_emission: u32,
}

impl fmt::Debug for EmitterSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let influencers: Vec<&str> = self.influencers.iter().map(|i| i.name()).collect();
        f.debug_struct("EmitterSetup")
            .field("name", &self.name)
            .field("material", &self.material)
            .field("quota", &self.quota)
            .field("emission_rate", &self.emission_rate)
            .field("influencers", &influencers)
            .field("geometry", &self.geometry)
            .field("position", &self.position)
            .field("schedule", &self.schedule)
            .finish_non_exhaustive()
    }
}

impl EmitterSetup {
    /// Reference emission process for this setup, gated by its schedule
    pub fn into_emission(self) -> TimedEmitter<RateEmission> {
        let emission = RateEmission::new(
            self.quota,
            self.emission_rate,
            self.life_min,
            self.life_max,
            self.influencers,
        )
        .with_origin(self.position);
        TimedEmitter::new(emission, self.schedule)
    }
}

/// Build one setup per emitter of `script`, in script order
pub fn activate(
    script: &ParticleScript,
    resolver: &dyn MaterialResolver,
    config: &ActivationConfig,
) -> Result<Vec<EmitterSetup>> {
    log::info!("Activating particle system {}", script.name);
    let material = bind_material(script, resolver, config);
    let affectors = bind_affectors(&script.affectors, resolver, config)?;
    let billboard_mode = billboard_mode(script.billboard_type);
    let emission_point = emission_point(script.billboard_origin);
    if script.billboard_rotation == BillboardRotation::Vertex {
        log::warn!("Billboard rotation type {} not supported", script.billboard_rotation);
    }
    let mesh = if script.point_rendering {
        MeshKind::Point
    } else {
        MeshKind::Tri
    };

    let setups = script
        .emitters
        .iter()
        .map(|emitter| {
            log::info!("Creating emitter {}", emitter.name());
            let mut influencers = emitter.common.spawn_influencers(script.particle_size);
            influencers.extend(
                affectors
                    .iter()
                    .cloned()
                    .map(|a| Box::new(a) as Box<dyn ParticleInfluencer>),
            );
            EmitterSetup {
                name: emitter.name().to_string(),
                material: material.clone(),
                quota: usize::try_from(script.quota).unwrap_or(0),
                life_min: emitter.common.time_to_live_min,
                life_max: emitter.common.time_to_live_max,
                emission_rate: emitter.common.emission_rate,
                colour_start: emitter.common.colour_range_start,
                colour_end: emitter.common.colour_range_end,
                influencers,
                geometry: emitter.geometry(),
                position: emitter.common.position,
                rotation: look_rotation(emitter.common.direction),
                schedule: emitter.common.schedule(),
                billboard_mode,
                emission_point,
                mesh,
                common_direction: script.common_direction,
                common_up_vector: script.common_up_vector,
                direction_type: script.direction_type,
                particles_per_emission: 1,
            }
        })
        .collect();
    Ok(setups)
}

/// Activate every script emitter as a ready-to-run emission process
pub fn build_emission(
    script: &ParticleScript,
    resolver: &dyn MaterialResolver,
    config: &ActivationConfig,
) -> Result<Vec<TimedEmitter<RateEmission>>> {
    Ok(activate(script, resolver, config)?
        .into_iter()
        .map(EmitterSetup::into_emission)
        .collect())
}

fn bind_material(
    script: &ParticleScript,
    resolver: &dyn MaterialResolver,
    config: &ActivationConfig,
) -> MaterialBinding {
    if let Some(texture) = &script.texture {
        log::debug!("Sprite: {texture}");
        return MaterialBinding::Sprite(texture.clone());
    }
    let Some(name) = &script.material_name else {
        log::error!(
            "No material for {}, using {}",
            script.name,
            config.default_sprite
        );
        return MaterialBinding::Sprite(config.default_sprite.clone());
    };
    match resolver.resolve_material(name) {
        Ok(handle) => MaterialBinding::Material(handle),
        Err(e) => {
            log::error!("No material found for {name} ({e}), using {}", config.default_sprite);
            MaterialBinding::Sprite(config.default_sprite.clone())
        }
    }
}

/// Clone the script affectors, binding ColourImage pixel rows. Each image
/// is loaded once.
fn bind_affectors(
    affectors: &[Affector],
    resolver: &dyn MaterialResolver,
    config: &ActivationConfig,
) -> Result<Vec<Affector>> {
    let mut loaded: HashMap<String, Arc<PixelRow>> = HashMap::new();
    affectors
        .iter()
        .map(|affector| -> Result<Affector> {
            let mut bound = affector.clone();
            if let Affector::ColourImage(ColourImage {
                image: Some(image),
                pixels,
            }) = &mut bound
            {
                let path = config.image_path(image);
                let row = match loaded.get(&path) {
                    Some(row) => row.clone(),
                    None => {
                        let row = resolver.load_pixels(&path)?;
                        loaded.insert(path, row.clone());
                        row
                    }
                };
                *pixels = Some(row);
            }
            Ok(bound)
        })
        .collect()
}

fn billboard_mode(billboard_type: BillboardType) -> Option<BillboardMode> {
    match billboard_type {
        BillboardType::Point => Some(BillboardMode::Camera),
        BillboardType::OrientedCommon => {
            log::warn!("Unsupported billboard type {billboard_type}");
            Some(BillboardMode::OrientedCommon)
        }
        BillboardType::PerpendicularCommon => {
            log::warn!("Unsupported billboard type {billboard_type}");
            None
        }
        BillboardType::OrientedSelf => Some(BillboardMode::OrientedSelf),
        BillboardType::PerpendicularSelf => Some(BillboardMode::Velocity),
    }
}

fn emission_point(origin: BillboardOrigin) -> EmissionPoint {
    match origin {
        BillboardOrigin::TopCenter => EmissionPoint::EdgeTop,
        BillboardOrigin::BottomCenter => EmissionPoint::EdgeBottom,
        BillboardOrigin::Center => EmissionPoint::Center,
        other => {
            log::warn!("Unsupported particle emission origin {other}");
            EmissionPoint::Center
        }
    }
}

/// Rotation whose local +Z faces `direction`, with +Y as the up hint
pub fn look_rotation(direction: Vec3) -> Quat {
    let z = glam::Vec3::new(direction.x, direction.y, direction.z)
        .try_normalize()
        .unwrap_or(glam::Vec3::Z);
    let x = glam::Vec3::Y
        .cross(z)
        .try_normalize()
        .unwrap_or(glam::Vec3::X);
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// Setup for a single emitter, for hosts that activate emitters one by one
pub fn activate_emitter(
    script: &ParticleScript,
    emitter: &Emitter,
    resolver: &dyn MaterialResolver,
    config: &ActivationConfig,
) -> Result<EmitterSetup> {
    let mut single = script.clone();
    single.emitters = vec![emitter.clone()];
    activate(&single, resolver, config)?
        .pop()
        .ok_or_else(|| CinderError::UnknownScript(script.name.clone()))
}
