//! Emitters: common emission parameters plus a shape

mod shape;

pub use shape::{EmissionGeometry, EmissionVolume, EmitterShape, BUILTIN_SHAPES};

use crate::influencer::{
    AngleDeviation, DirectionVelocity, InitialColour, InitialSize, ParticleInfluencer,
};
use cinder_core::tokens::{self, AttributeWriter};
use cinder_core::{Color, Result, Vec2, Vec3};

/// Parameters every emitter understands regardless of shape
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterCommon {
    /// Maximum deviation from `direction`, in degrees
    pub angle: f32,
    pub direction: Vec3,
    pub position: Vec3,
    pub velocity_min: f32,
    pub velocity_max: f32,
    pub time_to_live_min: f32,
    pub time_to_live_max: f32,
    /// Particles per second
    pub emission_rate: f32,
    pub colour_range_start: Color,
    pub colour_range_end: Color,
    pub duration_min: f32,
    pub duration_max: f32,
    /// Duration fields only apply once one of them has been set
    pub duration_set: bool,
    pub repeat_delay_min: f32,
    pub repeat_delay_max: f32,
}

impl Default for EmitterCommon {
    fn default() -> Self {
        Self {
            angle: 0.0,
            direction: Vec3::UNIT_X,
            position: Vec3::ZERO,
            velocity_min: 1.0,
            velocity_max: 1.0,
            time_to_live_min: 5.0,
            time_to_live_max: 5.0,
            emission_rate: 10.0,
            colour_range_start: Color::WHITE,
            colour_range_end: Color::WHITE,
            duration_min: 0.0,
            duration_max: 0.0,
            duration_set: false,
            repeat_delay_min: 0.0,
            repeat_delay_max: 0.0,
        }
    }
}

/// Duration and repeat-delay ranges for timed emission, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionSchedule {
    pub duration_min: f32,
    pub duration_max: f32,
    pub repeat_delay_min: f32,
    pub repeat_delay_max: f32,
}

impl EmitterCommon {
    /// Parse one of the common attribute lines
    pub fn parse(&mut self, args: &[&str], line: usize) -> Result<bool> {
        let Some(&name) = args.first() else {
            return Ok(false);
        };
        match name {
            "angle" => self.angle = tokens::single_f32(args, line)?,
            "colour" => {
                let colour = tokens::parse_colour(args, line)?;
                self.colour_range_start = colour;
                self.colour_range_end = colour;
            }
            "colour_range_start" => self.colour_range_start = tokens::parse_colour(args, line)?,
            "colour_range_end" => self.colour_range_end = tokens::parse_colour(args, line)?,
            "direction" => self.direction = tokens::parse_vec3(args, line)?,
            "emission_rate" => self.emission_rate = tokens::single_f32(args, line)?,
            "position" => self.position = tokens::parse_vec3(args, line)?,
            "velocity" => {
                let v = tokens::single_f32(args, line)?;
                self.velocity_min = v;
                self.velocity_max = v;
            }
            "velocity_min" => self.velocity_min = tokens::single_f32(args, line)?,
            "velocity_max" => self.velocity_max = tokens::single_f32(args, line)?,
            "time_to_live" => {
                let t = tokens::single_f32(args, line)?;
                self.time_to_live_min = t;
                self.time_to_live_max = t;
            }
            "time_to_live_min" => self.time_to_live_min = tokens::single_f32(args, line)?,
            "time_to_live_max" => self.time_to_live_max = tokens::single_f32(args, line)?,
            "duration" => {
                let d = tokens::single_f32(args, line)?;
                self.duration_min = d;
                self.duration_max = d;
                self.duration_set = true;
            }
            "duration_min" => {
                self.duration_min = tokens::single_f32(args, line)?;
                self.duration_set = true;
            }
            "duration_max" => {
                self.duration_max = tokens::single_f32(args, line)?;
                self.duration_set = true;
            }
            "repeat_delay" => {
                let d = tokens::single_f32(args, line)?;
                self.repeat_delay_min = d;
                self.repeat_delay_max = d;
            }
            "repeat_delay_min" => self.repeat_delay_min = tokens::single_f32(args, line)?,
            "repeat_delay_max" => self.repeat_delay_max = tokens::single_f32(args, line)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn write(&self, w: &mut AttributeWriter) {
        w.float("angle", self.angle);
        if self.colour_range_start == self.colour_range_end {
            w.colour("colour", &self.colour_range_start);
        } else {
            w.colour("colour_range_start", &self.colour_range_start);
            w.colour("colour_range_end", &self.colour_range_end);
        }
        w.vec3("direction", &self.direction);
        w.float("emission_rate", self.emission_rate);
        w.vec3("position", &self.position);
        write_range(w, "velocity", self.velocity_min, self.velocity_max);
        write_range(w, "time_to_live", self.time_to_live_min, self.time_to_live_max);
        if self.duration_set {
            write_range(w, "duration", self.duration_min, self.duration_max);
        }
        if self.repeat_delay_min != 0.0 || self.repeat_delay_max != 0.0 {
            write_range(w, "repeat_delay", self.repeat_delay_min, self.repeat_delay_max);
        }
    }

    /// Timed emission parameters, when a positive duration was set
    pub fn schedule(&self) -> Option<EmissionSchedule> {
        (self.duration_set && (self.duration_min > 0.0 || self.duration_max > 0.0)).then_some(
            EmissionSchedule {
                duration_min: self.duration_min,
                duration_max: self.duration_max,
                repeat_delay_min: self.repeat_delay_min,
                repeat_delay_max: self.repeat_delay_max,
            },
        )
    }

    /// The spawn-time initializers, in the order they run
    pub fn spawn_influencers(&self, particle_size: Vec2) -> Vec<Box<dyn ParticleInfluencer>> {
        vec![
            Box::new(InitialColour {
                range_start: self.colour_range_start,
                range_end: self.colour_range_end,
            }),
            Box::new(InitialSize {
                size: particle_size,
            }),
            Box::new(DirectionVelocity {
                direction: self.direction,
                velocity_min: self.velocity_min,
                velocity_max: self.velocity_max,
            }),
            Box::new(AngleDeviation::from_degrees(self.angle)),
        ]
    }
}

/// `name` when both ends agree, otherwise `name_min` and `name_max`
fn write_range(w: &mut AttributeWriter, name: &str, min: f32, max: f32) {
    if min == max {
        w.float(name, min);
    } else {
        w.float(&format!("{name}_min"), min);
        w.float(&format!("{name}_max"), max);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Emitter {
    pub common: EmitterCommon,
    pub shape: EmitterShape,
}

impl Emitter {
    pub fn new(shape: EmitterShape) -> Self {
        Self {
            common: EmitterCommon::default(),
            shape,
        }
    }

    pub fn name(&self) -> &str {
        self.shape.name()
    }

    /// Common attributes first, then the shape's own
    pub fn parse(&mut self, args: &[&str], line: usize) -> Result<bool> {
        if self.common.parse(args, line)? {
            return Ok(true);
        }
        self.shape.parse(args, line)
    }

    pub fn write_attributes(&self, w: &mut AttributeWriter) {
        self.common.write(w);
        self.shape.write(w);
    }

    pub fn geometry(&self) -> EmissionGeometry {
        self.shape.geometry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinder_core::tokens::tokenize;

    fn reparse(emitter: &Emitter) -> Emitter {
        let mut w = AttributeWriter::new();
        emitter.write_attributes(&mut w);
        let mut copy = Emitter::new(
            EmitterShape::builtin(emitter.name()).unwrap_or(EmitterShape::Point),
        );
        for line in w.finish().lines() {
            assert!(copy.parse(&tokenize(line), 1).unwrap(), "unhandled {line}");
        }
        copy
    }

    #[test]
    fn defaults_follow_legacy_values() {
        let common = EmitterCommon::default();
        assert_eq!(common.direction, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!((common.velocity_min, common.velocity_max), (1.0, 1.0));
        assert_eq!((common.time_to_live_min, common.time_to_live_max), (5.0, 5.0));
        assert_eq!(common.emission_rate, 10.0);
        assert!(!common.duration_set);
        assert!(common.schedule().is_none());
    }

    #[test]
    fn colour_sets_both_ends() {
        let mut common = EmitterCommon::default();
        common.parse(&["colour", "1", "0", "0"], 1).unwrap();
        assert_eq!(common.colour_range_start, Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(common.colour_range_end, Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn ranges_round_trip() {
        let mut emitter = Emitter::new(EmitterShape::builtin("Cylinder").unwrap());
        for line in [
            "velocity_min 2",
            "velocity_max 3.5",
            "time_to_live_min 1",
            "time_to_live_max 4",
            "duration_min 0.5",
            "duration_max 1.5",
            "repeat_delay 2",
            "colour_range_start 1 0 0",
            "colour_range_end 0 0 1 0.5",
            "angle 15",
            "width 10",
        ] {
            assert!(emitter.parse(&tokenize(line), 1).unwrap());
        }
        assert_eq!(reparse(&emitter), emitter);
    }

    #[test]
    fn repeat_delay_survives_without_duration() {
        let mut emitter = Emitter::new(EmitterShape::Point);
        emitter.parse(&["repeat_delay", "3"], 1).unwrap();
        assert_eq!(reparse(&emitter), emitter);
    }

    #[test]
    fn schedule_requires_positive_duration() {
        let mut common = EmitterCommon::default();
        common.parse(&["duration", "0"], 1).unwrap();
        assert!(common.duration_set);
        assert!(common.schedule().is_none());

        common.parse(&["duration_max", "2"], 2).unwrap();
        common.parse(&["repeat_delay", "1"], 3).unwrap();
        let schedule = common.schedule().unwrap();
        assert_eq!(schedule.duration_max, 2.0);
        assert_eq!(schedule.repeat_delay_min, 1.0);
    }

    #[test]
    fn spawn_influencers_run_in_order() {
        let common = EmitterCommon::default();
        let names: Vec<_> = common
            .spawn_influencers(Vec2::new(100.0, 100.0))
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["InitialColour", "InitialSize", "DirectionVelocity", "AngleDeviation"]
        );
    }

    #[test]
    fn shape_attributes_follow_common_ones() {
        let mut emitter = Emitter::new(EmitterShape::builtin("Ring").unwrap());
        assert!(emitter.parse(&["inner_height", "0.25"], 1).unwrap());
        assert!(emitter.parse(&["emission_rate", "30"], 2).unwrap());
        assert!(!emitter.parse(&["spin", "1"], 3).unwrap());
        assert_eq!(emitter.common.emission_rate, 30.0);
    }
}
