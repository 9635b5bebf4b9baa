//! Spatial math building blocks for rigid-body transforms: vectors, quaternions and position + orientation frames.
//!
//! All math uses a single scalar type ([`Scalar`]) and a single tolerance ([`PRECISION`]).
//! Degenerate inputs (zero-length vectors, coincident quaternions, gimbal poles) never fail,
//! they resolve to fixed fallback values instead.
//!
//! When the `degenerate_logging` feature is enabled, every such fallback is reported at verbose level.

#[cfg(feature = "degenerate_logging")]
pub(crate) const LOG_CAT : rigid_logging::LogCategory = rigid_logging::LogCategory::new("Math");

pub use rigid_base::{EnumCountT, EnumFromIndexT, EnumFromNameT};

mod scalar;
pub use scalar::*;

mod vec3;
pub use vec3::*;

mod axis_order;
pub use axis_order::*;

mod quat;
pub use quat::*;

mod transform;
pub use transform::*;
