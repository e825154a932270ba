//! # vcache Core
//!
//! Error definitions, result aliases and tracing setup shared by the
//! vcache crates.

pub mod error;
pub mod result;
pub mod telemetry;

pub use error::*;
pub use result::*;
