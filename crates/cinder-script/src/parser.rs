//! Line-oriented parser for particle scripts
//!
//! Input is read one trimmed line at a time. Sections nest three levels
//! deep (`particle_system`, then `emitter` or `affector`) and open either
//! with a trailing `{` or with `{` alone on the next non-blank line. A line
//! ending in `}` closes the innermost open section.
//!
//! Structural problems abort the load. Anything outside the known
//! vocabulary, and malformed numbers, are recorded as [`LoadWarning`]s and
//! skipped.

use crate::collection::ParticleScriptCollection;
use crate::document::{BillboardOrigin, BillboardRotation, BillboardType, DirectionType, ParticleScript};
use crate::registry::Registries;
use cinder_core::tokens::{self, tokenize};
use cinder_core::{CinderError, Result};
use cinder_particles::{Affector, Emitter, EmitterShape};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// Attribute name outside the section's vocabulary
    UnknownAttribute,
    /// Emitter shape or affector name missing from the registries
    UnknownSectionEntity,
    /// Malformed numeric arguments; the line was skipped
    NumberFormat,
    /// Known attribute with a value it does not accept
    UnsupportedValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadWarning {
    pub line: usize,
    pub kind: WarningKind,
    pub message: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Result of a successful load: the scripts and everything that was skipped
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub collection: ParticleScriptCollection,
    pub warnings: Vec<LoadWarning>,
}

impl LoadOutcome {
    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &LoadWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }
}

/// Parses script text against a set of emitter and affector registries
pub struct ScriptParser<'a> {
    registries: &'a Registries,
}

impl<'a> ScriptParser<'a> {
    pub fn new(registries: &'a Registries) -> Self {
        Self { registries }
    }

    pub fn parse_str(&self, content: &str) -> Result<LoadOutcome> {
        let mut run = Run::new(self.registries);
        let mut last_line = 0;
        for (index, raw) in content.lines().enumerate() {
            last_line = index + 1;
            run.line(raw, last_line)?;
        }
        run.finish(last_line)
    }
}

enum Section {
    Outer,
    System(ParticleScript),
    Emitter(ParticleScript, Emitter),
    /// `None` when the affector name was not registered; its body is skipped
    Affector(ParticleScript, Option<Affector>),
}

impl Section {
    fn describe(&self) -> String {
        match self {
            Section::Outer => "document".to_string(),
            Section::System(script) => format!("particle_system {}", script.name),
            Section::Emitter(script, emitter) => {
                format!("emitter {} in particle_system {}", emitter.name(), script.name)
            }
            Section::Affector(script, _) => format!("affector in particle_system {}", script.name),
        }
    }
}

/// A section header seen on the current line
enum Opened {
    System(ParticleScript),
    Emitter(Emitter),
    Affector(Option<Affector>),
}

#[derive(Default)]
struct Warnings(Vec<LoadWarning>);

impl Warnings {
    fn push(&mut self, line: usize, kind: WarningKind, message: String) {
        log::warn!("Line {line}: {message}");
        self.0.push(LoadWarning {
            line,
            kind,
            message,
        });
    }
}

struct Run<'a> {
    registries: &'a Registries,
    section: Section,
    expect_brace: bool,
    skip_to_brace: bool,
    collection: ParticleScriptCollection,
    warnings: Warnings,
}

impl<'a> Run<'a> {
    fn new(registries: &'a Registries) -> Self {
        Self {
            registries,
            section: Section::Outer,
            expect_brace: false,
            skip_to_brace: false,
            collection: ParticleScriptCollection::new(),
            warnings: Warnings::default(),
        }
    }

    fn line(&mut self, raw: &str, line: usize) -> Result<()> {
        let mut text = raw.trim();
        if text.is_empty() || text.starts_with("//") {
            return Ok(());
        }

        let opens = text.ends_with('{');
        if opens {
            text = text[..text.len() - 1].trim_end();
        }

        if self.expect_brace {
            if !opens || !text.is_empty() {
                return Err(CinderError::structural(line, "Expected opening brace"));
            }
            self.expect_brace = false;
            return Ok(());
        }

        if opens {
            if text.is_empty() {
                return Err(CinderError::structural(line, "Unexpected opening brace"));
            }
            return self.statement(text, line, true);
        }

        if let Some(rest) = text.strip_suffix('}') {
            let rest = rest.trim_end();
            if !rest.is_empty() {
                self.statement(rest, line, false)?;
                if self.expect_brace {
                    return Err(CinderError::structural(line, "Expected opening brace"));
                }
            }
            return self.close(line);
        }

        self.statement(text, line, false)
    }

    /// Run one statement, turning recoverable errors into warnings
    fn statement(&mut self, text: &str, line: usize, opens: bool) -> Result<()> {
        if self.skip_to_brace || matches!(self.section, Section::Affector(_, None)) {
            return Ok(());
        }
        match self.dispatch(&tokenize(text), line, opens) {
            Ok(()) => Ok(()),
            Err(err) if err.is_recoverable() => {
                if opens {
                    return Err(CinderError::structural(line, "Unexpected opening brace"));
                }
                let resync = matches!(err, CinderError::Format { .. })
                    && matches!(self.section, Section::Emitter(..) | Section::Affector(..));
                self.warnings.push(line, WarningKind::NumberFormat, err.to_string());
                self.skip_to_brace |= resync;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn dispatch(&mut self, args: &[&str], line: usize, opens: bool) -> Result<()> {
        let opened = match &mut self.section {
            Section::Outer => Some(Opened::System(open_system(args, line)?)),
            Section::System(script) => {
                system_statement(self.registries, script, args, line, &mut self.warnings)?
            }
            Section::Emitter(_, emitter) => {
                if !emitter.parse(args, line)? {
                    self.warnings.push(
                        line,
                        WarningKind::UnknownAttribute,
                        format!("Unknown emitter attribute '{}' in {}", args[0], emitter.name()),
                    );
                    self.skip_to_brace = true;
                }
                None
            }
            Section::Affector(_, Some(affector)) => {
                if !affector.parse(args, line)? {
                    self.warnings.push(
                        line,
                        WarningKind::UnknownAttribute,
                        format!("Unknown affector attribute '{}' in {}", args[0], affector.name()),
                    );
                    self.skip_to_brace = true;
                }
                None
            }
            Section::Affector(_, None) => None,
        };

        match opened {
            Some(opened) => {
                let parent = std::mem::replace(&mut self.section, Section::Outer);
                self.section = match (parent, opened) {
                    (Section::Outer, Opened::System(script)) => Section::System(script),
                    (Section::System(script), Opened::Emitter(emitter)) => {
                        Section::Emitter(script, emitter)
                    }
                    (Section::System(script), Opened::Affector(affector)) => {
                        Section::Affector(script, affector)
                    }
                    (parent, _) => parent,
                };
                self.expect_brace = !opens;
                Ok(())
            }
            None if opens => Err(CinderError::structural(line, "Unexpected opening brace")),
            None => Ok(()),
        }
    }

    fn close(&mut self, line: usize) -> Result<()> {
        self.skip_to_brace = false;
        self.section = match std::mem::replace(&mut self.section, Section::Outer) {
            Section::Outer => {
                return Err(CinderError::structural(line, "Unexpected closing brace"));
            }
            Section::System(script) => {
                log::debug!(
                    "Closed particle system {} ({} emitters, {} affectors)",
                    script.name,
                    script.emitters.len(),
                    script.affectors.len()
                );
                self.collection.insert(script);
                Section::Outer
            }
            Section::Emitter(mut script, emitter) => {
                script.emitters.push(emitter);
                Section::System(script)
            }
            Section::Affector(mut script, affector) => {
                script.affectors.extend(affector);
                Section::System(script)
            }
        };
        Ok(())
    }

    fn finish(self, last_line: usize) -> Result<LoadOutcome> {
        if self.expect_brace {
            return Err(CinderError::structural(
                last_line,
                "Expected opening brace before end of input",
            ));
        }
        if !matches!(self.section, Section::Outer) {
            return Err(CinderError::structural(
                last_line,
                format!("Missing closing brace for {}", self.section.describe()),
            ));
        }
        Ok(LoadOutcome {
            collection: self.collection,
            warnings: self.warnings.0,
        })
    }
}

fn open_system(args: &[&str], line: usize) -> Result<ParticleScript> {
    match args {
        ["particle_system", name] => {
            let name = name.trim_matches('"');
            if name.is_empty() {
                return Err(CinderError::structural(
                    line,
                    "Expected single particle_system name",
                ));
            }
            log::info!("Found particle system {name}");
            Ok(ParticleScript::new(name))
        }
        ["particle_system", ..] => Err(CinderError::structural(
            line,
            "Expected single particle_system name",
        )),
        _ => Err(CinderError::structural(
            line,
            format!("Unexpected section name '{}'", args.join(" ")),
        )),
    }
}

fn system_statement(
    registries: &Registries,
    script: &mut ParticleScript,
    args: &[&str],
    line: usize,
    warnings: &mut Warnings,
) -> Result<Option<Opened>> {
    match args[0] {
        "emitter" => {
            let name = args[1..].join(" ");
            if name.is_empty() {
                return Err(CinderError::structural(line, "Expected emitter name"));
            }
            let shape = registries.emitters.create(&name).unwrap_or_else(|| {
                warnings.push(
                    line,
                    WarningKind::UnknownSectionEntity,
                    format!("Unknown emitter shape '{name}', using Point"),
                );
                EmitterShape::Point
            });
            log::info!("Creating emitter {name}");
            Ok(Some(Opened::Emitter(Emitter::new(shape))))
        }
        "affector" => {
            let name = args[1..].join(" ");
            if name.is_empty() {
                return Err(CinderError::structural(line, "Expected affector name"));
            }
            let affector = registries.affectors.create(&name);
            if affector.is_none() {
                warnings.push(
                    line,
                    WarningKind::UnknownSectionEntity,
                    format!("Unknown affector '{name}', section skipped"),
                );
            } else {
                log::info!("Creating affector {name}");
            }
            Ok(Some(Opened::Affector(affector)))
        }
        _ => {
            script_attribute(script, args, line, warnings)?;
            Ok(None)
        }
    }
}

fn script_attribute(
    script: &mut ParticleScript,
    args: &[&str],
    line: usize,
    warnings: &mut Warnings,
) -> Result<()> {
    match args[0] {
        "quota" => script.quota = tokens::single_i32(args, line)?,
        "material" => script.material_name = Some(tokens::single(args, line)?.to_string()),
        "texture" => script.texture = Some(tokens::single(args, line)?.to_string()),
        "particle_width" => script.particle_size.x = tokens::single_f32(args, line)?,
        "particle_height" => script.particle_size.y = tokens::single_f32(args, line)?,
        "cull_each" => script.cull_each = tokens::single_bool(args, line)?,
        "sorted" => script.sorted = tokens::single_bool(args, line)?,
        "local_space" => script.local_space = tokens::single_bool(args, line)?,
        "point_rendering" => script.point_rendering = tokens::single_bool(args, line)?,
        "accurate_facing" => script.accurate_facing = tokens::single_bool(args, line)?,
        "iteration_interval" => script.iteration_interval = tokens::single_f32(args, line)?,
        "nonvisible_update_timeout" => {
            script.nonvisible_update_timeout = tokens::single_f32(args, line)?
        }
        "common_direction" => script.common_direction = tokens::parse_vec3(args, line)?,
        "common_up_vector" => script.common_up_vector = tokens::parse_vec3(args, line)?,
        "renderer" => {
            let renderer = tokens::single(args, line)?;
            if !renderer.eq_ignore_ascii_case("billboard") {
                return Err(CinderError::structural(
                    line,
                    format!("Unsupported renderer '{renderer}', only billboard is supported"),
                ));
            }
        }
        "direction_type" => {
            let value = tokens::single(args, line)?;
            match DirectionType::parse(value) {
                Some(direction_type) => script.direction_type = direction_type,
                None => warnings.push(
                    line,
                    WarningKind::UnsupportedValue,
                    format!("Unknown direction_type '{value}'"),
                ),
            }
        }
        name => match name.strip_prefix("billboard_") {
            Some(param) => billboard_attribute(script, param, args, line, warnings)?,
            None => warnings.push(
                line,
                WarningKind::UnknownAttribute,
                format!("Unknown particle_system attribute '{name}'"),
            ),
        },
    }
    Ok(())
}

fn billboard_attribute(
    script: &mut ParticleScript,
    param: &str,
    args: &[&str],
    line: usize,
    warnings: &mut Warnings,
) -> Result<()> {
    if !matches!(param, "type" | "origin" | "rotation_type" | "rotation") {
        warnings.push(
            line,
            WarningKind::UnknownAttribute,
            format!("Unknown billboard parameter '{param}'"),
        );
        return Ok(());
    }
    let value = tokens::single(args, line)?;
    let known = match param {
        "type" => BillboardType::parse(value).map(|v| script.billboard_type = v),
        "origin" => BillboardOrigin::parse(value).map(|v| script.billboard_origin = v),
        _ => BillboardRotation::parse(value).map(|v| script.billboard_rotation = v),
    };
    if known.is_none() {
        warnings.push(
            line,
            WarningKind::UnsupportedValue,
            format!("Unknown {} value '{value}'", args[0]),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinder_core::{Color, Vec2, Vec3};
    use cinder_particles::affector::ColourFader;
    use cinder_particles::{EmitterCommon, Particle, ParticleRng};

    fn parse(text: &str) -> Result<LoadOutcome> {
        ScriptParser::new(&Registries::builtin()).parse_str(text)
    }

    fn structural_line(err: CinderError) -> usize {
        match err {
            CinderError::Structural { line, .. } => line,
            other => panic!("expected structural error, got {other}"),
        }
    }

    #[test]
    fn minimal_system_with_point_emitter() {
        let outcome = parse(
            r#"
particle_system "fx1"
{
    quota 50
    emitter point
    {
    }
}
"#,
        )
        .unwrap();

        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.collection.len(), 1);
        let script = outcome.collection.get("fx1").unwrap();
        assert_eq!(script.quota, 50);
        assert_eq!(script.emitters.len(), 1);
        assert_eq!(script.emitters[0].shape, EmitterShape::Point);
        assert_eq!(script.emitters[0].common, EmitterCommon::default());
        assert!(script.affectors.is_empty());
    }

    #[test]
    fn braces_may_trail_the_header() {
        let outcome = parse(
            "particle_system sparks {\n\temitter Box {\n\t\twidth 4\n\t}\n}\n",
        )
        .unwrap();
        let script = outcome.collection.get("sparks").unwrap();
        assert_eq!(script.emitters[0].shape.size(), Some(Vec3::new(4.0, 1.0, 1.0)));
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let outcome = parse(
            "// effects\n\nparticle_system a\n{\n    // quota 5\n\n    quota 7\n}\n",
        )
        .unwrap();
        assert_eq!(outcome.collection.get("a").unwrap().quota, 7);
    }

    #[test]
    fn colour_range_bounds_initial_colour() {
        let outcome = parse(
            "particle_system fx\n{\n  emitter Point\n  {\n    colour_range_start 1 0 0\n    colour_range_end 0 0 1\n  }\n}\n",
        )
        .unwrap();
        let emitter = &outcome.collection.get("fx").unwrap().emitters[0];
        assert_eq!(emitter.common.colour_range_start, Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(emitter.common.colour_range_end, Color::new(0.0, 0.0, 1.0, 1.0));

        let influencers = emitter.common.spawn_influencers(Vec2::new(100.0, 100.0));
        let mut rng = ParticleRng::new(42);
        for _ in 0..1000 {
            let mut particle = Particle::with_life(1.0);
            influencers[0].initialize(&mut particle, &mut rng).unwrap();
            let c = particle.color;
            assert!((0.0..=1.0).contains(&c.r));
            assert_eq!(c.g, 0.0);
            assert!((0.0..=1.0).contains(&c.b));
            assert_eq!(c.a, 1.0);
        }
    }

    #[test]
    fn missing_emitter_closing_brace_is_structural() {
        let err = parse("particle_system fx\n{\n  emitter Point\n  {\n    angle 5\n}\n").unwrap_err();
        assert_eq!(structural_line(err), 6);
    }

    #[test]
    fn missing_opening_brace_is_structural() {
        let err = parse("particle_system fx\n  quota 5\n}\n").unwrap_err();
        assert_eq!(structural_line(err), 2);

        let err = parse("particle_system fx\n").unwrap_err();
        assert_eq!(structural_line(err), 1);
    }

    #[test]
    fn stray_braces_are_structural() {
        assert_eq!(structural_line(parse("}\n").unwrap_err()), 1);
        assert_eq!(
            structural_line(parse("particle_system fx {\n  {\n}\n").unwrap_err()),
            2
        );
        assert_eq!(
            structural_line(parse("particle_system fx {\n  quota 5 {\n}\n").unwrap_err()),
            2
        );
    }

    #[test]
    fn particle_system_needs_exactly_one_name() {
        assert_eq!(structural_line(parse("particle_system\n{\n}\n").unwrap_err()), 1);
        assert_eq!(
            structural_line(parse("particle_system a b\n{\n}\n").unwrap_err()),
            1
        );
        assert_eq!(structural_line(parse("system a\n{\n}\n").unwrap_err()), 1);
    }

    #[test]
    fn wrong_argument_count_is_structural() {
        let err = parse("particle_system fx {\n  quota 5 6\n}\n").unwrap_err();
        assert_eq!(structural_line(err), 2);

        let err = parse("particle_system fx {\n  emitter Point {\n    angle\n  }\n}\n").unwrap_err();
        assert_eq!(structural_line(err), 3);
    }

    #[test]
    fn unknown_affector_is_dropped_with_warning() {
        let outcome = parse(
            "particle_system fx\n{\n  affector Foo\n  {\n    bar 1\n  }\n  affector Scaler\n  {\n    rate 3\n  }\n}\n",
        )
        .unwrap();
        let script = outcome.collection.get("fx").unwrap();
        assert_eq!(script.affectors.len(), 1);
        assert_eq!(script.affectors[0].name(), "Scaler");

        let unknown: Vec<_> = outcome
            .warnings_of(WarningKind::UnknownSectionEntity)
            .collect();
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].line, 3);
        assert!(unknown[0].message.contains("Foo"));
        // The body of the dropped section is not reported line by line
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn unknown_emitter_shape_falls_back_to_point() {
        let outcome = parse(
            "particle_system fx {\n  emitter Spiral {\n    emission_rate 40\n  }\n}\n",
        )
        .unwrap();
        let emitter = &outcome.collection.get("fx").unwrap().emitters[0];
        assert_eq!(emitter.shape, EmitterShape::Point);
        assert_eq!(emitter.common.emission_rate, 40.0);
        assert_eq!(
            outcome.warnings_of(WarningKind::UnknownSectionEntity).count(),
            1
        );
    }

    #[test]
    fn multi_word_section_names_resolve() {
        let outcome = parse(
            "particle_system fx {\n  emitter Hollow Ellipsoid {\n  }\n  affector Colour Fader {\n    red -0.5\n  }\n}\n",
        )
        .unwrap();
        let script = outcome.collection.get("fx").unwrap();
        assert_eq!(script.emitters[0].name(), "HollowEllipsoid");
        assert_eq!(
            script.affectors[0],
            Affector::ColourFader(ColourFader {
                adjustment: Color::new(-0.5, 0.0, 0.0, 0.0),
            })
        );
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn unknown_emitter_attribute_skips_rest_of_section() {
        let outcome = parse(
            "particle_system fx {\n  emitter Point {\n    angle 10\n    spin 4\n    angle 20\n  }\n  quota 3\n}\n",
        )
        .unwrap();
        let script = outcome.collection.get("fx").unwrap();
        assert_eq!(script.emitters[0].common.angle, 10.0);
        assert_eq!(script.quota, 3);
        let unknown: Vec<_> = outcome.warnings_of(WarningKind::UnknownAttribute).collect();
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].line, 4);
    }

    #[test]
    fn unknown_system_attribute_does_not_skip() {
        let outcome = parse("particle_system fx {\n  glow 1\n  quota 3\n}\n").unwrap();
        assert_eq!(outcome.collection.get("fx").unwrap().quota, 3);
        assert_eq!(outcome.warnings_of(WarningKind::UnknownAttribute).count(), 1);
    }

    #[test]
    fn bad_numbers_are_skipped() {
        let outcome = parse(
            "particle_system fx {\n  quota lots\n  particle_width 5\n  emitter Point {\n    angle wide\n    emission_rate 8\n  }\n}\n",
        )
        .unwrap();
        let script = outcome.collection.get("fx").unwrap();
        assert_eq!(script.quota, 10);
        assert_eq!(script.particle_size.x, 5.0);
        assert_eq!(script.emitters[0].common.emission_rate, 8.0);
        let lines: Vec<_> = outcome
            .warnings_of(WarningKind::NumberFormat)
            .map(|w| w.line)
            .collect();
        assert_eq!(lines, vec![2, 5]);
    }

    #[test]
    fn short_vector_resyncs_at_closing_brace() {
        let outcome = parse(
            "particle_system fx {\n  emitter Point {\n    direction 0 1\n    emission_rate 8\n  }\n  quota 4\n}\n",
        )
        .unwrap();
        let script = outcome.collection.get("fx").unwrap();
        assert_eq!(script.emitters[0].common.direction, Vec3::UNIT_X);
        assert_eq!(script.emitters[0].common.emission_rate, 10.0);
        assert_eq!(script.quota, 4);
        assert_eq!(outcome.warnings_of(WarningKind::NumberFormat).count(), 1);
    }

    #[test]
    fn document_attributes() {
        let outcome = parse(
            "particle_system fx {
  material Smoke/Dark
  texture smoke.png
  particle_width 20
  particle_height 30
  cull_each true
  sorted TRUE
  local_space false
  iteration_interval 0.5
  nonvisible_update_timeout 2
  renderer billboard
  billboard_type oriented_self
  billboard_origin bottom_center
  billboard_rotation_type vertex
  direction_type RandomNegate
  common_direction 0 1 0
  common_up_vector 0 0 1
  point_rendering true
  accurate_facing true
}
",
        )
        .unwrap();
        assert!(outcome.warnings.is_empty());
        let s = outcome.collection.get("fx").unwrap();
        assert_eq!(s.material_name.as_deref(), Some("Smoke/Dark"));
        assert_eq!(s.texture.as_deref(), Some("smoke.png"));
        assert_eq!(s.particle_size, Vec2::new(20.0, 30.0));
        assert!(s.cull_each && s.sorted && !s.local_space);
        assert_eq!(s.iteration_interval, 0.5);
        assert_eq!(s.nonvisible_update_timeout, 2.0);
        assert_eq!(s.billboard_type, BillboardType::OrientedSelf);
        assert_eq!(s.billboard_origin, BillboardOrigin::BottomCenter);
        assert_eq!(s.billboard_rotation, BillboardRotation::Vertex);
        assert_eq!(s.direction_type, DirectionType::RandomNegate);
        assert_eq!(s.common_direction, Vec3::UNIT_Y);
        assert_eq!(s.common_up_vector, Vec3::UNIT_Z);
        assert!(s.point_rendering && s.accurate_facing);
    }

    #[test]
    fn only_billboard_renderer_is_accepted() {
        let err = parse("particle_system fx {\n  renderer mesh\n}\n").unwrap_err();
        assert_eq!(structural_line(err), 2);
    }

    #[test]
    fn unknown_enum_values_keep_current_setting() {
        let outcome = parse(
            "particle_system fx {\n  direction_type sideways\n  billboard_type flat\n  billboard_size 3\n}\n",
        )
        .unwrap();
        let s = outcome.collection.get("fx").unwrap();
        assert_eq!(s.direction_type, DirectionType::Normal);
        assert_eq!(s.billboard_type, BillboardType::Point);
        assert_eq!(outcome.warnings_of(WarningKind::UnsupportedValue).count(), 2);
        assert_eq!(outcome.warnings_of(WarningKind::UnknownAttribute).count(), 1);
    }

    #[test]
    fn duplicate_names_keep_the_last_definition() {
        let outcome = parse(
            "particle_system a {\n  quota 1\n}\nparticle_system b {\n}\nparticle_system a {\n  quota 2\n}\n",
        )
        .unwrap();
        assert_eq!(outcome.collection.names(), vec!["a", "b"]);
        assert_eq!(outcome.collection.get("a").unwrap().quota, 2);
    }

    #[test]
    fn sections_keep_script_order() {
        let outcome = parse(
            "particle_system fx {\n  emitter Ring {\n  }\n  affector Rotator {\n  }\n  emitter Box {\n  }\n  affector LinearForce {\n  }\n}\n",
        )
        .unwrap();
        let s = outcome.collection.get("fx").unwrap();
        let emitters: Vec<_> = s.emitters.iter().map(|e| e.name()).collect();
        let affectors: Vec<_> = s.affectors.iter().map(|a| a.name()).collect();
        assert_eq!(emitters, vec!["Ring", "Box"]);
        assert_eq!(affectors, vec!["Rotator", "LinearForce"]);
    }

    #[test]
    fn attribute_before_closing_brace_is_applied() {
        let outcome = parse("particle_system fx {\n  quota 9 }\n").unwrap();
        assert_eq!(outcome.collection.get("fx").unwrap().quota, 9);
    }

    #[test]
    fn empty_input_yields_empty_collection() {
        let outcome = parse("").unwrap();
        assert!(outcome.collection.is_empty());
        assert!(outcome.warnings.is_empty());
    }
}
