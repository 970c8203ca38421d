//! Regenerates script text from the document model

use crate::collection::ParticleScriptCollection;
use crate::document::ParticleScript;
use cinder_core::AttributeWriter;

/// Writes scripts in document order. Output is canonical rather than a copy
/// of the input: unknown attributes and comments are gone, but reparsing it
/// yields the same model.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptWriter;

impl ScriptWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_collection(&self, collection: &ParticleScriptCollection) -> String {
        let mut w = AttributeWriter::new();
        for (i, script) in collection.iter().enumerate() {
            if i > 0 {
                w.blank();
            }
            self.write_into(script, &mut w);
        }
        w.finish()
    }

    pub fn write_script(&self, script: &ParticleScript) -> String {
        let mut w = AttributeWriter::new();
        self.write_into(script, &mut w);
        w.finish()
    }

    fn write_into(&self, script: &ParticleScript, w: &mut AttributeWriter) {
        w.open(format!("particle_system {}", script.name));
        if let Some(material) = &script.material_name {
            w.line("material", material);
        }
        if let Some(texture) = &script.texture {
            w.line("texture", texture);
        }
        w.float("particle_width", script.particle_size.x);
        w.float("particle_height", script.particle_size.y);
        w.line("quota", script.quota);
        w.flag("cull_each", script.cull_each);
        w.flag("sorted", script.sorted);
        w.line("direction_type", script.direction_type);
        w.flag("local_space", script.local_space);
        w.float("iteration_interval", script.iteration_interval);
        w.float("nonvisible_update_timeout", script.nonvisible_update_timeout);
        w.line("billboard_type", script.billboard_type);
        w.line("billboard_origin", script.billboard_origin);
        w.line("billboard_rotation_type", script.billboard_rotation);
        w.flag("point_rendering", script.point_rendering);
        w.flag("accurate_facing", script.accurate_facing);
        w.vec3("common_direction", &script.common_direction);
        w.vec3("common_up_vector", &script.common_up_vector);

        for emitter in &script.emitters {
            w.blank();
            w.open(format!("emitter {}", emitter.name()));
            emitter.write_attributes(w);
            w.close();
        }
        for affector in &script.affectors {
            w.blank();
            w.open(format!("affector {}", affector.name()));
            affector.write_attributes(w);
            w.close();
        }
        w.close();
    }
}
