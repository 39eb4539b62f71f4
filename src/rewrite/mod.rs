//! Import rewriting engine
//!
//! - **mapping**: immutable entity key -> aliased path table
//! - **pattern**: relative entity import detection and substitution
//! - **discover**: recursive entity file discovery
//! - **file**: single-file read / rewrite / conditional write

pub mod discover;
pub mod file;
pub mod mapping;
pub mod pattern;

pub use discover::discover_entity_files;
pub use file::{FileRewrite, Rewriter, WriteMode};
pub use mapping::EntityMapping;
