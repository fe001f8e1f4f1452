//! Motion sensor implementations
//!
//! - Parallax-style PIR modules: digital output, high while motion is seen

pub mod pir;

pub use pir::{MotionTracker, ParallaxPir};
