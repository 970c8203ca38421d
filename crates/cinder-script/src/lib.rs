//! Cinder Script - the particle script format
//!
//! This crate turns script text into a [`ParticleScriptCollection`] and
//! back, and translates scripts into emitter setups for a host engine.

pub mod activate;
mod collection;
pub mod config;
mod document;
mod parser;
pub mod registry;
mod writer;

pub use activate::{
    activate, build_emission, EmitterSetup, FileResolver, MaterialBinding, MaterialHandle,
    MaterialResolver, NullResolver,
};
pub use collection::ParticleScriptCollection;
pub use config::ActivationConfig;
pub use document::{
    BillboardOrigin, BillboardRotation, BillboardType, DirectionType, ParticleScript,
};
pub use parser::{LoadOutcome, LoadWarning, ScriptParser, WarningKind};
pub use registry::Registries;
pub use writer::ScriptWriter;

use cinder_core::Result;
use std::fs;
use std::path::Path;

/// Load scripts from a file
pub fn load_scripts<P: AsRef<Path>>(path: P, registries: &Registries) -> Result<LoadOutcome> {
    let content = fs::read_to_string(path)?;
    load_scripts_string(&content, registries)
}

/// Load scripts from script text
pub fn load_scripts_string(content: &str, registries: &Registries) -> Result<LoadOutcome> {
    ScriptParser::new(registries).parse_str(content)
}

/// Save a collection to a file
pub fn save_scripts<P: AsRef<Path>>(path: P, collection: &ParticleScriptCollection) -> Result<()> {
    collection.write_file(path)
}

/// Save a collection to script text
pub fn save_scripts_string(collection: &ParticleScriptCollection) -> String {
    ScriptWriter::new().write_collection(collection)
}
