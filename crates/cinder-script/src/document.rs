//! The particle script document model

use cinder_core::{Vec2, Vec3};
use cinder_particles::{Affector, Emitter};
use std::fmt;

macro_rules! script_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Case-insensitive match against the script spelling
            pub fn parse(value: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(value))
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

script_enum!(
    /// How particle quads face the camera
    BillboardType {
        Point => "point",
        OrientedCommon => "oriented_common",
        OrientedSelf => "oriented_self",
        PerpendicularCommon => "perpendicular_common",
        PerpendicularSelf => "perpendicular_self",
    }
);

script_enum!(
    /// Anchor of the quad relative to the particle position
    BillboardOrigin {
        TopLeft => "top_left",
        TopCenter => "top_center",
        TopRight => "top_right",
        CenterLeft => "center_left",
        Center => "center",
        CenterRight => "center_right",
        BottomLeft => "bottom_left",
        BottomCenter => "bottom_center",
        BottomRight => "bottom_right",
    }
);

script_enum!(
    BillboardRotation {
        Vertex => "vertex",
        Texcoord => "texcoord",
    }
);

script_enum!(
    /// How a mesh emitter derives particle direction from surface normals
    DirectionType {
        Normal => "normal",
        NormalNegate => "normalnegate",
        Random => "random",
        RandomNegate => "randomnegate",
    }
);

/// One named particle system
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleScript {
    pub name: String,
    /// Maximum live particles
    pub quota: i32,
    pub particle_size: Vec2,
    pub material_name: Option<String>,
    pub texture: Option<String>,
    pub sorted: bool,
    pub cull_each: bool,
    pub local_space: bool,
    pub iteration_interval: f32,
    pub nonvisible_update_timeout: f32,
    pub billboard_type: BillboardType,
    pub billboard_origin: BillboardOrigin,
    pub billboard_rotation: BillboardRotation,
    pub common_direction: Vec3,
    pub common_up_vector: Vec3,
    pub point_rendering: bool,
    pub accurate_facing: bool,
    pub direction_type: DirectionType,
    pub emitters: Vec<Emitter>,
    pub affectors: Vec<Affector>,
}

impl ParticleScript {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quota: 10,
            particle_size: Vec2::new(100.0, 100.0),
            material_name: None,
            texture: None,
            sorted: false,
            cull_each: false,
            local_space: false,
            iteration_interval: 0.0,
            nonvisible_update_timeout: 0.0,
            billboard_type: BillboardType::Point,
            billboard_origin: BillboardOrigin::Center,
            billboard_rotation: BillboardRotation::Texcoord,
            common_direction: Vec3::UNIT_Z,
            common_up_vector: Vec3::UNIT_Y,
            point_rendering: false,
            accurate_facing: false,
            direction_type: DirectionType::Normal,
            emitters: Vec::new(),
            affectors: Vec::new(),
        }
    }

    pub fn add_emitter(&mut self, emitter: Emitter) -> &mut Emitter {
        self.emitters.push(emitter);
        let last = self.emitters.len() - 1;
        &mut self.emitters[last]
    }

    pub fn add_affector(&mut self, affector: Affector) -> &mut Affector {
        self.affectors.push(affector);
        let last = self.affectors.len() - 1;
        &mut self.affectors[last]
    }
}
