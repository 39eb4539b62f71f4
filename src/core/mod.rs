//! Core building blocks shared by all entity-imports commands
//!
//! - **config**: optional entity-imports.toml parsing and validation
//! - **context**: build-once run context (base dir, config, mapping table)
//! - **error**: error types with exit codes and contextual help

pub mod config;
pub mod context;
pub mod error;
