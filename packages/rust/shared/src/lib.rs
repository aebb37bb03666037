//! Shared types, error model, and configuration for the glossary generator.
//!
//! This crate is the foundation depended on by the core and CLI crates.
//! It provides:
//! - [`GlossaryError`]: the unified error type
//! - Domain types ([`Glossary`], [`GlossaryEntry`])
//! - Configuration ([`AppConfig`], [`LinkOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, LinkOptions, LinkStrategy, LinkingConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{GlossaryError, Result};
pub use types::{Glossary, GlossaryEntry};
