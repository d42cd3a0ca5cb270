// extensions/mod.rs
//
// Optional extension modules for OrreryEngine.
// These are decoupled from core Entity/Scene: games opt in by creating these systems.

pub mod easing;
pub mod transform;
pub mod tween;

pub use easing::{Easing, lerp, ease, ease_vec3};
pub use transform::{TransformGraph, LocalTransform};
pub use tween::{TweenState, Tween, TweenId, TweenTarget};
