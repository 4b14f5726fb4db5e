// Action binding and input-state synchronization core for a two-handed XR
// controller runtime

pub mod core;
pub mod input;

pub use crate::core::{Path, Pose};
pub use crate::input::{ActionRuntime, XrError, XrResult};
