//! Cinder Core - Foundational types for Cinder particle scripts
//!
//! This crate provides the core types that all other Cinder crates depend on:
//! - `Vec2`, `Vec3`, `Color` - Numeric primitives
//! - Token parsing and number formatting for the script format
//! - `AttributeWriter` - Indented attribute line sink used by the writer
//! - Error types and Result alias

mod error;
pub mod tokens;
mod types;

pub use error::{CinderError, Result};
pub use tokens::AttributeWriter;
pub use types::{Color, Vec2, Vec3};
