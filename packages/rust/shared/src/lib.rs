//! Shared types, error model, and configuration for JuiceScout.
//!
//! This crate is the foundation depended on by all other JuiceScout crates.
//! It provides:
//! - [`MigrationError`] — the unified error type
//! - Domain types ([`Category`], [`Question`], [`Answer`], [`CategoryMapping`], [`Article`])
//! - Configuration ([`AppConfig`], [`DestinationConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DestinationConfig, DestinationSection, SourceSection, config_dir,
    config_file_path, init_config, load_config, load_config_from, parse_base_url,
    resolve_api_key,
};
pub use error::{MigrationError, Result};
pub use types::{Answer, Article, Category, CategoryMapping, Question};
