//! Maplist Animation System
//!
//! Spring physics and eased tweens for height transitions.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Tweens**: Timed single-value transitions with easing functions
//! - **Scheduler**: Central tick loop that advances all active animations
//! - **Interruptible**: Springs inherit velocity when retargeted

pub mod easing;
pub mod scheduler;
pub mod spring;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{AnimationScheduler, SpringId, TweenId};
pub use spring::{Spring, SpringConfig};
pub use tween::Tween;
