//! Emitter shapes and the emission geometry they hand to the host engine

use crate::custom::CustomShape;
use cinder_core::tokens::{self, AttributeWriter};
use cinder_core::{Result, Vec2, Vec3};

/// The volume a host engine should emit from
#[derive(Debug, Clone, PartialEq)]
pub enum EmissionVolume {
    Point,
    /// Unit box, scaled by the geometry's local scale
    Box,
    /// Unit cylinder of radius 0.5, scaled by the geometry's local scale
    Cylinder,
    /// Unit sphere of radius 0.5, scaled by the geometry's local scale
    Sphere,
    Torus { inner_radius: f32, outer_radius: f32 },
    /// A host-defined volume, named after its kind
    Custom(String),
}

/// Geometry descriptor of one emitter
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionGeometry {
    pub volume: EmissionVolume,
    pub local_scale: Vec3,
    /// Emit from a random point in the volume rather than its origin
    pub random_emission_point: bool,
}

impl EmissionGeometry {
    pub fn point() -> Self {
        Self {
            volume: EmissionVolume::Point,
            local_scale: Vec3::ONE,
            random_emission_point: false,
        }
    }

    pub fn new(volume: EmissionVolume, local_scale: Vec3) -> Self {
        Self {
            volume,
            local_scale,
            random_emission_point: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EmitterShape {
    Point,
    Box { size: Vec3 },
    Cylinder { size: Vec3 },
    Ring { size: Vec3, inner_size: Vec2 },
    Ellipsoid { size: Vec3 },
    HollowEllipsoid { size: Vec3, inner_size: Vec3 },
    Custom(CustomShape),
}

/// Script names of the built-in shapes
pub const BUILTIN_SHAPES: [&str; 6] = [
    "Point",
    "Box",
    "Cylinder",
    "Ring",
    "Ellipsoid",
    "HollowEllipsoid",
];

impl EmitterShape {
    /// A built-in shape with default dimensions, by script name
    pub fn builtin(name: &str) -> Option<Self> {
        let size = Vec3::ONE;
        Some(match name {
            "Point" => EmitterShape::Point,
            "Box" => EmitterShape::Box { size },
            "Cylinder" => EmitterShape::Cylinder { size },
            "Ring" => EmitterShape::Ring {
                size,
                inner_size: Vec2::ZERO,
            },
            "Ellipsoid" => EmitterShape::Ellipsoid { size },
            "HollowEllipsoid" => EmitterShape::HollowEllipsoid {
                size,
                inner_size: Vec3::new(0.5, 0.5, 0.5),
            },
            _ => return None,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            EmitterShape::Point => "Point",
            EmitterShape::Box { .. } => "Box",
            EmitterShape::Cylinder { .. } => "Cylinder",
            EmitterShape::Ring { .. } => "Ring",
            EmitterShape::Ellipsoid { .. } => "Ellipsoid",
            EmitterShape::HollowEllipsoid { .. } => "HollowEllipsoid",
            EmitterShape::Custom(c) => c.name(),
        }
    }

    pub fn size(&self) -> Option<Vec3> {
        match self {
            EmitterShape::Box { size }
            | EmitterShape::Cylinder { size }
            | EmitterShape::Ring { size, .. }
            | EmitterShape::Ellipsoid { size }
            | EmitterShape::HollowEllipsoid { size, .. } => Some(*size),
            EmitterShape::Point | EmitterShape::Custom(_) => None,
        }
    }

    fn size_mut(&mut self) -> Option<&mut Vec3> {
        match self {
            EmitterShape::Box { size }
            | EmitterShape::Cylinder { size }
            | EmitterShape::Ring { size, .. }
            | EmitterShape::Ellipsoid { size }
            | EmitterShape::HollowEllipsoid { size, .. } => Some(size),
            EmitterShape::Point | EmitterShape::Custom(_) => None,
        }
    }

    /// Parse a shape-specific attribute line
    pub fn parse(&mut self, args: &[&str], line: usize) -> Result<bool> {
        let Some(&name) = args.first() else {
            return Ok(false);
        };
        if let EmitterShape::Custom(c) = self {
            return c.kind.schema.parse(&mut c.params, args, line);
        }
        if let Some(size) = self.size_mut() {
            let slot = match name {
                "width" => Some(&mut size.x),
                "height" => Some(&mut size.y),
                "depth" => Some(&mut size.z),
                _ => None,
            };
            if let Some(slot) = slot {
                *slot = tokens::single_f32(args, line)?;
                return Ok(true);
            }
        }
        let slot = match (self, name) {
            (EmitterShape::Ring { inner_size, .. }, "inner_width") => &mut inner_size.x,
            (EmitterShape::Ring { inner_size, .. }, "inner_height") => &mut inner_size.y,
            (EmitterShape::HollowEllipsoid { inner_size, .. }, "inner_width") => &mut inner_size.x,
            (EmitterShape::HollowEllipsoid { inner_size, .. }, "inner_height") => &mut inner_size.y,
            (EmitterShape::HollowEllipsoid { inner_size, .. }, "inner_depth") => &mut inner_size.z,
            _ => return Ok(false),
        };
        *slot = tokens::single_f32(args, line)?;
        Ok(true)
    }

    pub fn write(&self, w: &mut AttributeWriter) {
        if let EmitterShape::Custom(c) = self {
            c.kind.schema.write(&c.params, w);
            return;
        }
        if let Some(size) = self.size() {
            w.float("width", size.x);
            w.float("height", size.y);
            w.float("depth", size.z);
        }
        match self {
            EmitterShape::Ring { inner_size, .. } => {
                w.float("inner_width", inner_size.x);
                w.float("inner_height", inner_size.y);
            }
            EmitterShape::HollowEllipsoid { inner_size, .. } => {
                w.float("inner_width", inner_size.x);
                w.float("inner_height", inner_size.y);
                w.float("inner_depth", inner_size.z);
            }
            _ => {}
        }
    }

    /// Describe the emission volume for the host engine
    pub fn geometry(&self) -> EmissionGeometry {
        match self {
            EmitterShape::Point => EmissionGeometry::point(),
            EmitterShape::Box { size } => EmissionGeometry::new(EmissionVolume::Box, *size),
            EmitterShape::Cylinder { size } => EmissionGeometry::new(
                EmissionVolume::Cylinder,
                Vec3::new(size.x, size.y, size.z.max(0.1)),
            ),
            // Only the ring width and inner width shape the torus
            EmitterShape::Ring { size, inner_size } => EmissionGeometry::new(
                EmissionVolume::Torus {
                    inner_radius: ((1.0 - inner_size.x) * size.x) / 2.0,
                    outer_radius: size.y / 2.0,
                },
                Vec3::ONE,
            ),
            EmitterShape::Ellipsoid { size } => EmissionGeometry::new(EmissionVolume::Sphere, *size),
            EmitterShape::HollowEllipsoid { size, inner_size } => EmissionGeometry::new(
                EmissionVolume::Torus {
                    inner_radius: inner_size.x / size.x / 2.0,
                    outer_radius: 0.5,
                },
                *size,
            ),
            EmitterShape::Custom(c) => c.geometry(),
        }
    }
}
