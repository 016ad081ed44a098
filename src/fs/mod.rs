//! Filesystem module.
//!
//! Provides:
//! - Path and directory management
//! - Filename sanitization and manipulation

pub mod naming;
pub mod paths;

pub use naming::{part_path, sanitize_component, with_index_suffix};
pub use paths::ensure_parent_dir;
