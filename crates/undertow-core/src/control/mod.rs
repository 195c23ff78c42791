//! Per-role control logic layered on top of [`KinematicBody`](crate::kinematics::KinematicBody).
//!
//! - [`helm`]: player commands for vessels
//! - [`launch`]: the reload gate and torpedo construction
//! - [`targeting`]: nearest-vessel selection at launch time
//! - [`homing`]: per-tick guidance for torpedoes

pub mod helm;
pub mod homing;
pub mod launch;
pub mod targeting;

pub use helm::{apply_helm, HelmBinding, HelmCommand, KeyCode};
pub use homing::{GuidanceState, HomingController};
pub use launch::{launch, LaunchPolicy};
pub use targeting::{nearest_vessel, select_nearest};
