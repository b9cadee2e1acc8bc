//! # Configuration Constants
//!
//! Defaults applied by the AST node builders and the limits guarding the
//! recursive CST walk.
//!
//! ## Categories
//!
//! - **Resolution**: `$fn`, `$fa`, `$fs` defaults
//! - **Primitives**: Sizes used when a primitive call omits its arguments
//! - **Transforms**: Defaults for color, extrusion and offset operations
//! - **Limits**: Recursion and stack growth bounds

// =============================================================================
// RESOLUTION CONSTANTS (OpenSCAD $fn, $fa, $fs)
// =============================================================================

/// Default value for $fn (fragment count override).
///
/// When $fn > 0 it fixes the fragment count of circular shapes. When
/// $fn = 0 the count is derived from $fa and $fs downstream.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_FN;
///
/// let user_fn: Option<f64> = None;
/// assert_eq!(user_fn.unwrap_or(DEFAULT_FN), 0.0);
/// ```
pub const DEFAULT_FN: f64 = 0.0;

/// Default value for $fa (minimum fragment angle in degrees).
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_FA;
///
/// let max_from_angle = 360.0 / DEFAULT_FA;
/// assert_eq!(max_from_angle, 30.0);
/// ```
pub const DEFAULT_FA: f64 = 12.0;

/// Default value for $fs (minimum fragment size).
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_FS;
///
/// assert!(DEFAULT_FS > 0.0);
/// ```
pub const DEFAULT_FS: f64 = 2.0;

// =============================================================================
// PRIMITIVE CONSTANTS
// =============================================================================

/// Edge length of `cube()` when no size is given.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_CUBE_SIZE;
///
/// assert_eq!(DEFAULT_CUBE_SIZE, 1.0);
/// ```
pub const DEFAULT_CUBE_SIZE: f64 = 1.0;

/// Edge length of `square()` when no size is given.
pub const DEFAULT_SQUARE_SIZE: f64 = 1.0;

/// Radius of `sphere()` and `circle()` when neither `r` nor `d` is given.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_RADIUS;
///
/// let r: Option<f64> = None;
/// assert_eq!(r.unwrap_or(DEFAULT_RADIUS), 1.0);
/// ```
pub const DEFAULT_RADIUS: f64 = 1.0;

/// Height of `cylinder()` when `h` is omitted.
pub const DEFAULT_CYLINDER_HEIGHT: f64 = 1.0;

/// Font size of `text()` when `size` is omitted.
pub const DEFAULT_TEXT_SIZE: f64 = 10.0;

/// Letter spacing factor of `text()`.
pub const DEFAULT_TEXT_SPACING: f64 = 1.0;

/// Horizontal alignment of `text()`.
pub const DEFAULT_TEXT_HALIGN: &str = "left";

/// Vertical alignment of `text()`.
pub const DEFAULT_TEXT_VALIGN: &str = "baseline";

/// Writing direction of `text()`.
pub const DEFAULT_TEXT_DIRECTION: &str = "ltr";

/// Language tag of `text()`.
pub const DEFAULT_TEXT_LANGUAGE: &str = "en";

/// Script of `text()`.
pub const DEFAULT_TEXT_SCRIPT: &str = "latin";

/// Default convexity hint for polyhedra, polygons and extrusions.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_CONVEXITY;
///
/// let user_convexity: Option<u32> = None;
/// assert_eq!(user_convexity.unwrap_or(DEFAULT_CONVEXITY), 1);
/// ```
pub const DEFAULT_CONVEXITY: u32 = 1;

// =============================================================================
// TRANSFORM CONSTANTS
// =============================================================================

/// Mirror plane normal used by `mirror()` without arguments.
pub const DEFAULT_MIRROR_NORMAL: [f64; 3] = [1.0, 0.0, 0.0];

/// Alpha appended to three-component colors.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_ALPHA;
///
/// let rgb = [1.0, 0.0, 0.0];
/// let rgba = [rgb[0], rgb[1], rgb[2], DEFAULT_ALPHA];
/// assert_eq!(rgba[3], 1.0);
/// ```
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Color used by `color()` without arguments.
pub const DEFAULT_COLOR: [f64; 4] = [1.0, 1.0, 1.0, DEFAULT_ALPHA];

/// Offset distance used by `offset()` when neither `r` nor `delta` is given.
pub const DEFAULT_OFFSET_DELTA: f64 = 1.0;

/// Height of `linear_extrude()` when omitted.
pub const DEFAULT_EXTRUDE_HEIGHT: f64 = 100.0;

/// Number of slices for `linear_extrude()`.
pub const DEFAULT_EXTRUDE_SLICES: u32 = 1;

/// Sweep angle of `rotate_extrude()` in degrees.
pub const DEFAULT_REVOLVE_ANGLE: f64 = 360.0;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum nesting depth of statements and expressions.
///
/// Deeper input is reported as "too deeply nested" instead of recursing
/// until the stack overflows.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_RECURSION_DEPTH;
///
/// let current_depth = 500;
/// assert!(current_depth < MAX_RECURSION_DEPTH);
/// ```
pub const MAX_RECURSION_DEPTH: usize = 1000;

/// Remaining stack below which `stacker` allocates a new segment.
///
/// # Example
///
/// ```rust
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
///
/// assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
/// ```
pub const STACKER_RED_ZONE_BYTES: usize = 128 * 1024;

/// Size of each stack segment allocated by `stacker`.
pub const STACKER_STACK_SIZE_BYTES: usize = 4 * 1024 * 1024;
