//! # Tests for Config Constants
//!
//! Sanity checks on defaults and limit validation.

use crate::constants::*;
use crate::limits::{ConfigError, GeneratorLimits};

// =============================================================================
// RESOLUTION TESTS
// =============================================================================

#[test]
fn test_default_fn_is_zero() {
    // $fn = 0 defers to $fa/$fs
    assert_eq!(DEFAULT_FN, 0.0);
}

#[test]
fn test_default_fa_matches_openscad() {
    assert_eq!(DEFAULT_FA, 12.0);
}

#[test]
fn test_default_fs_matches_openscad() {
    assert_eq!(DEFAULT_FS, 2.0);
}

// =============================================================================
// PRIMITIVE TESTS
// =============================================================================

#[test]
fn test_primitive_defaults_are_unit_sized() {
    assert_eq!(DEFAULT_CUBE_SIZE, 1.0);
    assert_eq!(DEFAULT_SQUARE_SIZE, 1.0);
    assert_eq!(DEFAULT_RADIUS, 1.0);
    assert_eq!(DEFAULT_CYLINDER_HEIGHT, 1.0);
}

#[test]
fn test_default_convexity_is_one() {
    assert_eq!(DEFAULT_CONVEXITY, 1);
}

// =============================================================================
// TRANSFORM TESTS
// =============================================================================

#[test]
fn test_default_color_is_opaque_white() {
    assert_eq!(DEFAULT_COLOR, [1.0, 1.0, 1.0, 1.0]);
    assert_eq!(DEFAULT_COLOR[3], DEFAULT_ALPHA);
}

#[test]
fn test_default_mirror_normal_is_unit_x() {
    let [x, y, z] = DEFAULT_MIRROR_NORMAL;
    assert_eq!((x, y, z), (1.0, 0.0, 0.0));
}

#[test]
fn test_revolve_angle_is_full_turn() {
    assert_eq!(DEFAULT_REVOLVE_ANGLE, 360.0);
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_red_zone_smaller_than_segment() {
    assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
}

#[test]
fn test_default_limits_use_max_recursion_depth() {
    assert_eq!(GeneratorLimits::default().max_depth, MAX_RECURSION_DEPTH);
}

#[test]
fn test_zero_depth_rejected() {
    let err = GeneratorLimits::new(0).unwrap_err();
    assert_eq!(err, ConfigError::InvalidDepth(0));
    assert_eq!(err.to_string(), "max_depth must be at least 1: 0");
}
