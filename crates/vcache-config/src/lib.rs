//! # vcache Config
//!
//! Configuration for the vcache facade: store connection parameters and
//! cache defaults, loaded in layers from TOML files and environment
//! variables.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
