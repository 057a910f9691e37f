//! Shared types, error model, and configuration for RepoSnap.
//!
//! This crate is the foundation depended on by all other RepoSnap crates.
//! It provides:
//! - [`RepoSnapError`] — the unified error type
//! - Domain types ([`TargetSpec`], [`ExtensionSet`], [`FileEntry`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ExtensionsConfig, config_dir, config_file_path, load_config, load_config_from,
};
pub use error::{RepoSnapError, Result};
pub use types::{
    ABSENCE_MARKER, CONFIG_EXTENSIONS, DOC_EXTENSIONS, ExtensionSet, FileEntry,
    PROGRAMMING_EXTENSIONS, TargetKind, TargetSpec,
};
