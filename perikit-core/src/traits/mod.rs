//! Driver-facing traits
//!
//! These traits describe what each class of peripheral can do, independent
//! of the part number behind it.

pub mod button;
pub mod led;
pub mod moisture;
pub mod motion;
pub mod range;
pub mod switch;

pub use button::Button;
pub use led::RgbLed;
pub use moisture::MoistureSensor;
pub use motion::MotionSensor;
pub use range::RangeFinder;
pub use switch::Switchable;
