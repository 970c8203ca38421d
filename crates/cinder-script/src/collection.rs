//! Ordered, name-keyed set of particle scripts

use crate::document::ParticleScript;
use crate::parser::{LoadOutcome, ScriptParser};
use crate::registry::Registries;
use crate::writer::ScriptWriter;
use cinder_core::{CinderError, Result};
use std::fs;
use std::path::Path;

/// Scripts in document order. Inserting a duplicate name replaces the
/// earlier script in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleScriptCollection {
    scripts: Vec<ParticleScript>,
}

impl ParticleScriptCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a script, returning the one it replaced
    pub fn insert(&mut self, script: ParticleScript) -> Option<ParticleScript> {
        match self.position(&script.name) {
            Some(i) => Some(std::mem::replace(&mut self.scripts[i], script)),
            None => {
                self.scripts.push(script);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParticleScript> {
        self.scripts.iter().find(|s| s.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ParticleScript> {
        self.scripts.iter_mut().find(|s| s.name == name)
    }

    /// Look up a script, failing with [`CinderError::UnknownScript`]
    pub fn require(&self, name: &str) -> Result<&ParticleScript> {
        self.get(name)
            .ok_or_else(|| CinderError::UnknownScript(name.to_string()))
    }

    pub fn remove(&mut self, name: &str) -> Option<ParticleScript> {
        let i = self.position(name)?;
        Some(self.scripts.remove(i))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.scripts.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticleScript> {
        self.scripts.iter()
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub fn clear(&mut self) {
        self.scripts.clear();
    }

    /// Parse script text with the given registries, merging the scripts into
    /// this collection
    pub fn load_str(&mut self, content: &str, registries: &Registries) -> Result<LoadOutcome> {
        let outcome = ScriptParser::new(registries).parse_str(content)?;
        for script in outcome.collection.iter() {
            self.insert(script.clone());
        }
        Ok(outcome)
    }

    pub fn load_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        registries: &Registries,
    ) -> Result<LoadOutcome> {
        let content = fs::read_to_string(path)?;
        self.load_str(&content, registries)
    }

    pub fn write_string(&self) -> String {
        ScriptWriter::new().write_collection(self)
    }

    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.write_string())?;
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.scripts.iter().position(|s| s.name == name)
    }
}

impl<'a> IntoIterator for &'a ParticleScriptCollection {
    type Item = &'a ParticleScript;
    type IntoIter = std::slice::Iter<'a, ParticleScript>;

    fn into_iter(self) -> Self::IntoIter {
        self.scripts.iter()
    }
}
