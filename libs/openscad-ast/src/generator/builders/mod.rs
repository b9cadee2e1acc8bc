//! # Node Builders
//!
//! One builder per family of OpenSCAD modules. Each maps a bound call onto
//! one AST variant, owning that family's positional slots, defaults and
//! exclusivity rules.
//!
//! | Family    | Calls                                                          |
//! |-----------|----------------------------------------------------------------|
//! | primitive | cube sphere cylinder polyhedron circle square polygon text     |
//! | transform | translate rotate scale mirror multmatrix color offset resize   |
//! |           | linear_extrude rotate_extrude                                  |
//! | csg       | union difference intersection hull minkowski                   |
//! | module    | children echo assert                                           |

mod csg;
mod modules;
mod primitives;
mod shared;
mod transforms;

pub use csg::CsgBuilder;
pub use modules::ModuleBuilder;
pub use primitives::PrimitiveBuilder;
pub use transforms::TransformBuilder;
