//! CLI commands for entity-imports
//!
//! - **rewrite**: rewrite relative entity imports to aliased paths (default)
//! - **mappings**: list the entity mapping table
//!
//! All commands accept `&RewriteContext` built once in main.rs.

pub mod mappings;
pub mod rewrite;

pub use mappings::run_mappings;
pub use rewrite::{RewriteOptions, run_rewrite};
