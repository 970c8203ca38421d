//! Host-defined emitter shapes and affectors
//!
//! A custom kind is a declarative attribute schema plus a behavior. The
//! parser uses the schema to read and write attribute lines, so new kinds
//! need no parser changes. Schemas can be written in code or loaded from
//! TOML:
//!
//! ```toml
//! name = "Vortex"
//!
//! [[attributes]]
//! name = "strength"
//! kind = "float"
//! ```

use crate::emitter::EmissionGeometry;
use crate::particle::Particle;
use crate::rand::ParticleRng;
use cinder_core::tokens::{self, AttributeWriter};
use cinder_core::{Color, Result, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The value type of one custom attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Float,
    Vec3,
    Colour,
    Bool,
    Text,
}

impl AttributeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeKind::Float => "float",
            AttributeKind::Vec3 => "vec3",
            AttributeKind::Colour => "colour",
            AttributeKind::Bool => "bool",
            AttributeKind::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub name: String,
    pub kind: AttributeKind,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Vec3(Vec3),
    Colour(Color),
    Bool(bool),
    Text(String),
}

/// Attribute values of one custom entity, in the order they were set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomParams {
    values: Vec<(String, ParamValue)>,
}

impl CustomParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, keeping the position of an earlier value with the same name
    pub fn set(&mut self, name: &str, value: ParamValue) {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name) {
            Some(ParamValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<Vec3> {
        match self.get(name) {
            Some(ParamValue::Vec3(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn colour(&self, name: &str) -> Option<Color> {
        match self.get(name) {
            Some(ParamValue::Colour(c)) => Some(*c),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.get(name) {
            Some(ParamValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(ParamValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Name and attribute vocabulary of a custom kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomSchema {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeSpec>,
}

impl CustomSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, kind: AttributeKind) -> Self {
        self.attributes.push(AttributeSpec::new(name, kind));
        self
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn get_attribute(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Parse one attribute line into `params`. Returns false for names
    /// outside the schema.
    pub fn parse(&self, params: &mut CustomParams, args: &[&str], line: usize) -> Result<bool> {
        let Some(attribute) = args.first().and_then(|name| self.get_attribute(name)) else {
            return Ok(false);
        };
        let value = match attribute.kind {
            AttributeKind::Float => ParamValue::Float(tokens::single_f32(args, line)?),
            AttributeKind::Vec3 => ParamValue::Vec3(tokens::parse_vec3(args, line)?),
            AttributeKind::Colour => ParamValue::Colour(tokens::parse_colour(args, line)?),
            AttributeKind::Bool => ParamValue::Bool(tokens::single_bool(args, line)?),
            AttributeKind::Text => ParamValue::Text(tokens::single(args, line)?.to_string()),
        };
        params.set(&attribute.name, value);
        Ok(true)
    }

    pub fn write(&self, params: &CustomParams, w: &mut AttributeWriter) {
        for (name, value) in params.iter() {
            match value {
                ParamValue::Float(v) => w.float(name, *v),
                ParamValue::Vec3(v) => w.vec3(name, v),
                ParamValue::Colour(c) => w.colour(name, c),
                ParamValue::Bool(b) => w.flag(name, *b),
                ParamValue::Text(s) => w.line(name, s),
            }
        }
    }
}

/// Builds the emission volume of a custom shape from its parameters
pub type GeometryBuilder = fn(&CustomParams) -> EmissionGeometry;

#[derive(Debug)]
pub struct CustomShapeKind {
    pub schema: CustomSchema,
    pub geometry: GeometryBuilder,
}

impl CustomShapeKind {
    pub fn new(schema: CustomSchema, geometry: GeometryBuilder) -> Self {
        Self { schema, geometry }
    }
}

/// A custom emitter shape: its kind and the values parsed for it
#[derive(Debug, Clone)]
pub struct CustomShape {
    pub kind: Arc<CustomShapeKind>,
    pub params: CustomParams,
}

impl CustomShape {
    pub fn new(kind: Arc<CustomShapeKind>) -> Self {
        Self {
            kind,
            params: CustomParams::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.kind.schema.name
    }

    pub fn geometry(&self) -> EmissionGeometry {
        (self.kind.geometry)(&self.params)
    }
}

impl PartialEq for CustomShape {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.params == other.params
    }
}

/// Per-particle behavior of a custom affector
pub trait CustomAffectorBehavior: Send + Sync {
    fn initialize(
        &self,
        _params: &CustomParams,
        _particle: &mut Particle,
        _rng: &mut ParticleRng,
    ) -> Result<()> {
        Ok(())
    }

    fn update(
        &self,
        _params: &CustomParams,
        _particle: &mut Particle,
        _dt: f32,
        _rng: &mut ParticleRng,
    ) -> Result<()> {
        Ok(())
    }

    fn reset(&self, _params: &CustomParams, _particle: &mut Particle) -> Result<()> {
        Ok(())
    }
}

pub struct CustomAffectorKind {
    pub schema: CustomSchema,
    pub behavior: Arc<dyn CustomAffectorBehavior>,
}

impl CustomAffectorKind {
    pub fn new(schema: CustomSchema, behavior: Arc<dyn CustomAffectorBehavior>) -> Self {
        Self { schema, behavior }
    }
}

impl fmt::Debug for CustomAffectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomAffectorKind")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct CustomAffector {
    pub kind: Arc<CustomAffectorKind>,
    pub params: CustomParams,
}

impl CustomAffector {
    pub fn new(kind: Arc<CustomAffectorKind>) -> Self {
        Self {
            kind,
            params: CustomParams::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.kind.schema.name
    }
}

impl PartialEq for CustomAffector {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.params == other.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vortex() -> CustomSchema {
        CustomSchema::new("Vortex")
            .with_attribute("strength", AttributeKind::Float)
            .with_attribute("axis", AttributeKind::Vec3)
            .with_attribute("tint", AttributeKind::Colour)
            .with_attribute("clockwise", AttributeKind::Bool)
            .with_attribute("label", AttributeKind::Text)
    }

    #[test]
    fn schema_parses_each_kind() {
        let schema = vortex();
        let mut params = CustomParams::new();
        assert!(schema.parse(&mut params, &["strength", "2.5"], 1).unwrap());
        assert!(schema.parse(&mut params, &["axis", "0", "1", "0"], 2).unwrap());
        assert!(schema.parse(&mut params, &["tint", "1", "0", "0"], 3).unwrap());
        assert!(schema.parse(&mut params, &["clockwise", "true"], 4).unwrap());
        assert!(schema.parse(&mut params, &["label", "swirl"], 5).unwrap());
        assert!(!schema.parse(&mut params, &["unknown", "1"], 6).unwrap());

        assert_eq!(params.float("strength"), Some(2.5));
        assert_eq!(params.vec3("axis"), Some(Vec3::UNIT_Y));
        assert_eq!(params.colour("tint"), Some(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(params.flag("clockwise"), Some(true));
        assert_eq!(params.text("label"), Some("swirl"));
    }

    #[test]
    fn later_values_replace_in_place() {
        let schema = vortex();
        let mut params = CustomParams::new();
        schema.parse(&mut params, &["strength", "1"], 1).unwrap();
        schema.parse(&mut params, &["label", "a"], 2).unwrap();
        schema.parse(&mut params, &["strength", "3"], 3).unwrap();
        let names: Vec<_> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["strength", "label"]);
        assert_eq!(params.float("strength"), Some(3.0));
    }

    #[test]
    fn written_params_parse_back() {
        let schema = vortex();
        let mut params = CustomParams::new();
        params.set("axis", ParamValue::Vec3(Vec3::new(0.5, 1.0, 0.0)));
        params.set("strength", ParamValue::Float(0.125));

        let mut w = AttributeWriter::new();
        schema.write(&params, &mut w);
        let text = w.finish();

        let mut reparsed = CustomParams::new();
        for line in text.lines() {
            let args = tokens::tokenize(line);
            assert!(schema.parse(&mut reparsed, &args, 1).unwrap());
        }
        assert_eq!(reparsed, params);
    }

    #[test]
    fn schema_loads_from_toml() {
        let schema = CustomSchema::from_toml(
            r#"
name = "Vortex"

[[attributes]]
name = "strength"
kind = "float"

[[attributes]]
name = "axis"
kind = "vec3"
"#,
        )
        .unwrap();
        assert_eq!(schema.name, "Vortex");
        assert_eq!(schema.attributes.len(), 2);
        assert_eq!(
            schema.get_attribute("axis").map(|a| a.kind),
            Some(AttributeKind::Vec3)
        );
    }
}
