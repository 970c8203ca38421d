//! Token parsing and number formatting for the line-oriented script format
//!
//! Every attribute line is split on whitespace; `args[0]` is the attribute
//! name and `args[1..]` its values. Parsers in this module take the whole
//! token slice so error messages can name the attribute.

use crate::error::{CinderError, Result};
use crate::types::{Color, Vec3};
use std::fmt::{self, Display, Write as _};

/// Split a trimmed line on runs of whitespace
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

pub fn parse_f32(value: &str, line: usize) -> Result<f32> {
    value.parse::<f32>().map_err(|_| CinderError::NumberFormat {
        line,
        value: value.to_string(),
    })
}

pub fn parse_i32(value: &str, line: usize) -> Result<i32> {
    value.parse::<i32>().map_err(|_| CinderError::NumberFormat {
        line,
        value: value.to_string(),
    })
}

/// `true` (any case) is true, everything else is false
pub fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// The single value of an attribute line, or a structural error naming it
pub fn single<'a>(args: &[&'a str], line: usize) -> Result<&'a str> {
    match args {
        [_, value] => Ok(value),
        _ => Err(CinderError::structural(
            line,
            format!("Expected single {} value", attribute_name(args)),
        )),
    }
}

pub fn single_f32(args: &[&str], line: usize) -> Result<f32> {
    parse_f32(single(args, line)?, line)
}

pub fn single_i32(args: &[&str], line: usize) -> Result<i32> {
    parse_i32(single(args, line)?, line)
}

pub fn single_bool(args: &[&str], line: usize) -> Result<bool> {
    Ok(parse_bool(single(args, line)?))
}

/// Three numeric values after the attribute name; extra values are ignored
pub fn parse_vec3(args: &[&str], line: usize) -> Result<Vec3> {
    if args.len() < 4 {
        return Err(CinderError::format(
            line,
            format!("Expected 3 {} values", attribute_name(args)),
        ));
    }
    Ok(Vec3::new(
        parse_f32(args[1], line)?,
        parse_f32(args[2], line)?,
        parse_f32(args[3], line)?,
    ))
}

/// RGB (alpha 1) or RGBA values after the attribute name
pub fn parse_colour(args: &[&str], line: usize) -> Result<Color> {
    if args.len() < 4 {
        return Err(CinderError::format(
            line,
            format!("Expected at least 3 {} values", attribute_name(args)),
        ));
    }
    let r = parse_f32(args[1], line)?;
    let g = parse_f32(args[2], line)?;
    let b = parse_f32(args[3], line)?;
    let a = match args.get(4) {
        Some(a) => parse_f32(a, line)?,
        None => 1.0,
    };
    Ok(Color::new(r, g, b, a))
}

fn attribute_name<'a>(args: &[&'a str]) -> &'a str {
    args.first().copied().unwrap_or("attribute")
}

/// Single-decimal fixed point when exact, otherwise the shortest decimal
/// that parses back to the same value.
pub fn format_f32(value: f32) -> String {
    let fixed = format!("{value:.1}");
    if fixed.parse::<f32>().ok() == Some(value) {
        return fixed;
    }
    let shortest = format!("{value}");
    if shortest.contains('.') || !value.is_finite() {
        shortest
    } else {
        format!("{shortest}.0")
    }
}

pub fn format_vec3(v: &Vec3) -> String {
    format!("{} {} {}", format_f32(v.x), format_f32(v.y), format_f32(v.z))
}

pub fn format_colour(c: &Color) -> String {
    format!(
        "{} {} {} {}",
        format_f32(c.r),
        format_f32(c.g),
        format_f32(c.b),
        format_f32(c.a)
    )
}

/// Indented line sink for script text. One tab per nesting level.
#[derive(Debug, Default)]
pub struct AttributeWriter {
    out: String,
    depth: usize,
}

impl AttributeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `<name> <value>` at the current depth
    pub fn line(&mut self, name: &str, value: impl Display) {
        self.indent();
        // Writing to a String cannot fail
        let _ = writeln!(self.out, "{name} {value}");
    }

    pub fn float(&mut self, name: &str, value: f32) {
        self.line(name, format_f32(value));
    }

    pub fn vec3(&mut self, name: &str, value: &Vec3) {
        self.line(name, format_vec3(value));
    }

    pub fn colour(&mut self, name: &str, value: &Color) {
        self.line(name, format_colour(value));
    }

    pub fn flag(&mut self, name: &str, value: bool) {
        self.line(name, value);
    }

    /// Write a section header and its opening brace, then nest
    pub fn open(&mut self, header: impl Display) {
        self.indent();
        let _ = writeln!(self.out, "{header}");
        self.indent();
        self.out.push_str("{\n");
        self.depth += 1;
    }

    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.out.push_str("}\n");
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push('\t');
        }
    }
}

impl fmt::Display for AttributeWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_collapses_whitespace() {
        assert_eq!(
            tokenize("colour_range_start \t 1  0 0"),
            vec!["colour_range_start", "1", "0", "0"]
        );
    }

    #[test]
    fn colour_alpha_defaults_to_one() {
        let c = parse_colour(&["colour", "1", "0", "0"], 1).unwrap();
        assert_eq!(c, Color::new(1.0, 0.0, 0.0, 1.0));
        let c = parse_colour(&["colour", "1", "0", "0", "0.5"], 1).unwrap();
        assert!((c.a - 0.5).abs() < 1e-6);
    }

    #[test]
    fn short_vector_is_format_error() {
        let err = parse_vec3(&["direction", "0", "1"], 7).unwrap_err();
        assert!(matches!(err, CinderError::Format { line: 7, .. }));
    }

    #[test]
    fn bad_number_names_value() {
        let err = single_f32(&["angle", "ten"], 3).unwrap_err();
        match err {
            CinderError::NumberFormat { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "ten");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn extra_values_on_single_attribute_are_structural() {
        let err = single(&["quota", "10", "20"], 2).unwrap_err();
        assert!(matches!(err, CinderError::Structural { line: 2, .. }));
    }

    #[test]
    fn bool_parsing_is_lenient() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("true"));
        assert!(!parse_bool("yes"));
    }

    #[test]
    fn format_prefers_one_decimal() {
        assert_eq!(format_f32(10.0), "10.0");
        assert_eq!(format_f32(-0.5), "-0.5");
        assert_eq!(format_f32(0.25), "0.25");
        assert_eq!("0.25".parse::<f32>().unwrap(), 0.25);
    }

    #[test]
    fn writer_indents_sections() {
        let mut w = AttributeWriter::new();
        w.open("particle_system fx");
        w.line("quota", 10);
        w.close();
        assert_eq!(w.finish(), "particle_system fx\n{\n\tquota 10\n}\n");
    }
}
