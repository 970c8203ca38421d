//! Colour affectors

use crate::particle::Particle;
use crate::pixels::PixelRow;
use cinder_core::tokens::{self, AttributeWriter};
use cinder_core::{CinderError, Color, Result};
use std::sync::Arc;

/// Adds a constant RGBA rate per second, unclamped
#[derive(Debug, Clone, PartialEq)]
pub struct ColourFader {
    pub adjustment: Color,
}

impl Default for ColourFader {
    fn default() -> Self {
        Self {
            adjustment: Color::new(0.0, 0.0, 0.0, 0.0),
        }
    }
}

impl ColourFader {
    pub(crate) fn parse(&mut self, args: &[&str], line: usize) -> Result<bool> {
        let slot = match args[0] {
            "red" => &mut self.adjustment.r,
            "green" | "green1" => &mut self.adjustment.g,
            "blue" | "blue1" => &mut self.adjustment.b,
            "alpha" | "alpha1" => &mut self.adjustment.a,
            _ => return Ok(false),
        };
        *slot = tokens::single_f32(args, line)?;
        Ok(true)
    }

    pub(crate) fn write(&self, w: &mut AttributeWriter) {
        w.float("red", self.adjustment.r);
        w.float("green", self.adjustment.g);
        w.float("blue", self.adjustment.b);
        w.float("alpha", self.adjustment.a);
    }

    pub(crate) fn update(&self, p: &mut Particle, dt: f32) {
        let a = &self.adjustment;
        p.color = Color::new(
            p.color.r + a.r * dt,
            p.color.g + a.g * dt,
            p.color.b + a.b * dt,
            p.color.a + a.a * dt,
        );
    }
}

/// Two-stage fader switching adjustments after `state_change` seconds
#[derive(Debug, Clone, PartialEq)]
pub struct ColourFader2 {
    /// Components x, y, z, w
    pub adjustment1: [f32; 4],
    pub adjustment2: [f32; 4],
    pub state_change: f32,
}

impl Default for ColourFader2 {
    fn default() -> Self {
        Self {
            adjustment1: [0.0; 4],
            adjustment2: [0.0; 4],
            state_change: 1.0,
        }
    }
}

impl ColourFader2 {
    pub(crate) fn parse(&mut self, args: &[&str], line: usize) -> Result<bool> {
        let slot = match args[0] {
            "red1" => &mut self.adjustment1[0],
            "green1" => &mut self.adjustment1[1],
            "blue1" => &mut self.adjustment1[2],
            "alpha1" => &mut self.adjustment1[3],
            "red2" => &mut self.adjustment2[0],
            "green2" => &mut self.adjustment2[1],
            "blue2" => &mut self.adjustment2[2],
            "alpha2" => &mut self.adjustment2[3],
            "state_change" => &mut self.state_change,
            _ => return Ok(false),
        };
        *slot = tokens::single_f32(args, line)?;
        Ok(true)
    }

    pub(crate) fn write(&self, w: &mut AttributeWriter) {
        for (i, channel) in ["red1", "green1", "blue1", "alpha1"].iter().enumerate() {
            w.float(channel, self.adjustment1[i]);
        }
        for (i, channel) in ["red2", "green2", "blue2", "alpha2"].iter().enumerate() {
            w.float(channel, self.adjustment2[i]);
        }
        w.float("state_change", self.state_change);
    }

    pub(crate) fn update(&self, p: &mut Particle, dt: f32) {
        let c = p.color;
        let next = if p.alive_for() > self.state_change {
            // Second stage feeds w into blue and z into alpha
            let [x, y, z, w] = self.adjustment2;
            Color::new(c.r + x * dt, c.g + y * dt, c.b + w * dt, c.a + z * dt)
        } else {
            let [x, y, z, w] = self.adjustment1;
            Color::new(c.r + x * dt, c.g + y * dt, c.b + z * dt, c.a + w * dt)
        };
        p.color = next.clamped();
    }
}

pub const MAX_STAGES: usize = 6;

/// One keyframe of a colour interpolator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColourStage {
    /// Fraction of particle life
    pub time: f32,
    pub colour: Color,
}

impl Default for ColourStage {
    fn default() -> Self {
        Self {
            time: 1.0,
            colour: Color::new(0.5, 0.5, 0.5, 0.0),
        }
    }
}

/// Keyframed colour over the particle's life fraction. Only stages named in
/// the script take part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColourInterpolator {
    pub stages: [Option<ColourStage>; MAX_STAGES],
}

impl ColourInterpolator {
    pub fn with_stages(stages: &[(f32, Color)]) -> Self {
        let mut interpolator = Self::default();
        for (slot, (time, colour)) in interpolator.stages.iter_mut().zip(stages) {
            *slot = Some(ColourStage {
                time: *time,
                colour: *colour,
            });
        }
        interpolator
    }

    pub(crate) fn parse(&mut self, args: &[&str], line: usize) -> Result<bool> {
        let name = args[0];
        let (index, is_time) = if let Some(rest) = name.strip_prefix("time") {
            (rest, true)
        } else if let Some(rest) = name.strip_prefix("colour") {
            (rest, false)
        } else {
            return Ok(false);
        };
        let Ok(index) = index.parse::<usize>() else {
            return Ok(false);
        };
        if index >= MAX_STAGES {
            return Err(CinderError::structural(
                line,
                format!("{name} is beyond the last colour stage ({})", MAX_STAGES - 1),
            ));
        }
        if is_time {
            let time = tokens::single_f32(args, line)?;
            self.stages[index].get_or_insert_with(ColourStage::default).time = time;
        } else {
            let colour = tokens::parse_colour(args, line)?;
            self.stages[index].get_or_insert_with(ColourStage::default).colour = colour;
        }
        Ok(true)
    }

    pub(crate) fn write(&self, w: &mut AttributeWriter) {
        for (i, stage) in self.stages.iter().enumerate() {
            if let Some(stage) = stage {
                w.colour(&format!("colour{i}"), &stage.colour);
                w.float(&format!("time{i}"), stage.time);
            }
        }
    }

    /// Colour at a given life fraction, or None without stages
    pub fn colour_at(&self, fraction: f32) -> Option<Color> {
        let mut stages: Vec<ColourStage> = self.stages.iter().flatten().copied().collect();
        stages.sort_by(|a, b| a.time.total_cmp(&b.time));
        let first = stages.first()?;
        let last = stages.last()?;
        if fraction <= first.time {
            return Some(first.colour);
        }
        if fraction >= last.time {
            return Some(last.colour);
        }
        stages.windows(2).find_map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            (fraction >= a.time && fraction < b.time).then(|| {
                let t = (fraction - a.time) / (b.time - a.time);
                a.colour.lerp(b.colour, t)
            })
        })
    }

    pub(crate) fn update(&self, p: &mut Particle) {
        if let Some(colour) = self.colour_at(p.alive_fraction()) {
            p.color = colour;
        }
    }
}

/// Cycles particle colour through the top row of an image, one pixel per
/// frame
#[derive(Debug, Clone, Default)]
pub struct ColourImage {
    pub image: Option<String>,
    /// Bound when the script is activated
    pub pixels: Option<Arc<PixelRow>>,
}

impl PartialEq for ColourImage {
    fn eq(&self, other: &Self) -> bool {
        self.image == other.image
    }
}

impl ColourImage {
    pub fn bind(&mut self, pixels: Arc<PixelRow>) {
        self.pixels = Some(pixels);
    }

    pub(crate) fn parse(&mut self, args: &[&str], line: usize) -> Result<bool> {
        if args[0] != "image" {
            return Ok(false);
        }
        self.image = Some(tokens::single(args, line)?.to_string());
        Ok(true)
    }

    pub(crate) fn write(&self, w: &mut AttributeWriter) {
        if let Some(image) = &self.image {
            w.line("image", image);
        }
    }

    pub(crate) fn initialize(&self, p: &mut Particle) {
        p.image_cursor = 0;
    }

    pub(crate) fn update(&self, p: &mut Particle) -> Result<()> {
        let Some(row) = &self.pixels else {
            return Ok(());
        };
        if row.width == 0 {
            return Ok(());
        }
        if p.image_cursor >= row.width {
            p.image_cursor = 0;
        }
        p.color = row.colour_at(p.image_cursor)?;
        p.image_cursor += 1;
        Ok(())
    }
}
