//! Sift: a criterion algebra for diffing, merging, and routing entity queries.
//!
//! ## Crate layout
//! - `core`: values, criteria and their algebra, shapes, grammar, and config.
//! - `primitives`: the value-kind registry shared by every layer.
//! - `error`: the public error type with a stable kind taxonomy.
//! - `shell`: line-oriented command interpreter behind the `sift_shell`
//!   binary (feature `shell`).
//!
//! The `prelude` module carries the vocabulary most callers need.

pub use sift_core as core;
pub use sift_primitives as primitives;

pub mod error;
#[cfg(feature = "shell")]
pub mod shell;

pub use error::{Error, ErrorKind};

use crate::core::{config::SiftConfig, criterion::Criterion};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse criterion text.
pub fn parse(text: &str) -> Result<Criterion, Error> {
    Ok(crate::core::grammar::parse(text)?)
}

/// Parse and validate TOML configuration text.
pub fn load_config(text: &str) -> Result<SiftConfig, Error> {
    Ok(SiftConfig::from_toml_str(text)?)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error, ErrorKind,
        core::{config::SiftConfig, prelude::*},
        load_config, parse,
    };
}
