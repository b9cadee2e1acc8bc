//! # Config Crate
//!
//! Defaults and limits for the OpenSCAD CST to AST pipeline. Every value a
//! node builder falls back to when an argument is absent lives here, so that
//! the generator never scatters literals through its builders.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_FA, DEFAULT_FN, DEFAULT_FS};
//!
//! // `sphere(5)` carries the OpenSCAD resolution defaults
//! let resolution = (DEFAULT_FN, DEFAULT_FA, DEFAULT_FS);
//! assert_eq!(resolution, (0.0, 12.0, 2.0));
//! ```
//!
//! ```rust
//! use config::limits::GeneratorLimits;
//!
//! let limits = GeneratorLimits::new(64).expect("depth is positive");
//! assert_eq!(limits.max_depth, 64);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Every default is defined once
//! - **OpenSCAD Compatible**: Defaults match the OpenSCAD manual
//! - **Validated Limits**: Tunables are checked at construction time

pub mod constants;
pub mod limits;

#[cfg(test)]
mod tests;
