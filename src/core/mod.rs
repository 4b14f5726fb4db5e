// Core utilities shared by the input subsystem: pose math, handles, path
// interning and the two-call buffer protocol

pub mod buffer;
pub mod handle;
pub mod math;
pub mod path;

pub use handle::{Arena, Handle};
pub use math::Pose;
pub use path::{Path, PathInterner};
