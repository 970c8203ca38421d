//! Name-keyed constructor tables for emitter shapes and affectors
//!
//! The parser never decides which kinds exist. It asks the [`Registries`]
//! it was built with, so a host can add shapes and affectors by handing the
//! parser a table of its own.

use cinder_particles::affector::{Affector, BUILTIN_AFFECTORS};
use cinder_particles::emitter::{EmitterShape, BUILTIN_SHAPES};
use cinder_particles::{CustomAffector, CustomAffectorKind, CustomShape, CustomShapeKind};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub type EmitterConstructor = Arc<dyn Fn() -> EmitterShape + Send + Sync>;
pub type AffectorConstructor = Arc<dyn Fn() -> Affector + Send + Sync>;

/// Emitter shapes, matched case-insensitively. A name that does not match
/// as written is retried with its internal whitespace removed, so
/// `hollow ellipsoid` finds `HollowEllipsoid`.
#[derive(Clone, Default)]
pub struct EmitterRegistry {
    constructors: HashMap<String, EmitterConstructor>,
    names: Vec<String>,
}

impl EmitterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for name in BUILTIN_SHAPES {
            registry.register(
                name,
                Arc::new(move || EmitterShape::builtin(name).unwrap_or(EmitterShape::Point)),
            );
        }
        registry
    }

    /// Register a constructor, replacing any existing one with the same name
    pub fn register(&mut self, name: &str, constructor: EmitterConstructor) {
        let key = name.to_lowercase();
        if self.constructors.insert(key, constructor).is_none() {
            self.names.push(name.to_string());
        }
    }

    /// Construct a fresh shape for a script-level name
    pub fn create(&self, name: &str) -> Option<EmitterShape> {
        let name = name.trim();
        self.constructors
            .get(&name.to_lowercase())
            .or_else(|| self.constructors.get(&strip_spaces(name).to_lowercase()))
            .map(|constructor| constructor())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.create(name).is_some()
    }

    /// Registered names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl fmt::Debug for EmitterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmitterRegistry")
            .field("names", &self.names)
            .finish()
    }
}

/// Affectors, matched exactly once internal whitespace is removed
/// (`Colour Fader` finds `ColourFader`)
#[derive(Clone, Default)]
pub struct AffectorRegistry {
    constructors: HashMap<String, AffectorConstructor>,
    names: Vec<String>,
}

impl AffectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for name in BUILTIN_AFFECTORS {
            if let Some(prototype) = Affector::builtin(name) {
                registry.register(name, Arc::new(move || prototype.clone()));
            }
        }
        registry
    }

    pub fn register(&mut self, name: &str, constructor: AffectorConstructor) {
        let key = strip_spaces(name);
        if self.constructors.insert(key.clone(), constructor).is_none() {
            self.names.push(key);
        }
    }

    pub fn create(&self, name: &str) -> Option<Affector> {
        self.constructors
            .get(&strip_spaces(name))
            .map(|constructor| constructor())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(&strip_spaces(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl fmt::Debug for AffectorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AffectorRegistry")
            .field("names", &self.names)
            .finish()
    }
}

/// The emitter and affector tables a parser resolves section names against
#[derive(Debug, Clone, Default)]
pub struct Registries {
    pub emitters: EmitterRegistry,
    pub affectors: AffectorRegistry,
}

impl Registries {
    /// Tables holding only the built-in kinds
    pub fn builtin() -> Self {
        Self {
            emitters: EmitterRegistry::builtin(),
            affectors: AffectorRegistry::builtin(),
        }
    }

    pub fn with_emitter(
        mut self,
        name: &str,
        constructor: impl Fn() -> EmitterShape + Send + Sync + 'static,
    ) -> Self {
        self.emitters.register(name, Arc::new(constructor));
        self
    }

    pub fn with_affector(
        mut self,
        name: &str,
        constructor: impl Fn() -> Affector + Send + Sync + 'static,
    ) -> Self {
        self.affectors.register(name, Arc::new(constructor));
        self
    }

    /// Register a declaratively described emitter shape under its schema name
    pub fn register_custom_emitter(&mut self, kind: Arc<CustomShapeKind>) -> &mut Self {
        let name = kind.schema.name.clone();
        log::debug!("Registering custom emitter {name}");
        self.emitters.register(
            &name,
            Arc::new(move || EmitterShape::Custom(CustomShape::new(kind.clone()))),
        );
        self
    }

    pub fn register_custom_affector(&mut self, kind: Arc<CustomAffectorKind>) -> &mut Self {
        let name = kind.schema.name.clone();
        log::debug!("Registering custom affector {name}");
        self.affectors.register(
            &name,
            Arc::new(move || Affector::Custom(CustomAffector::new(kind.clone()))),
        );
        self
    }
}

fn strip_spaces(name: &str) -> String {
    name.split_whitespace().collect()
}
