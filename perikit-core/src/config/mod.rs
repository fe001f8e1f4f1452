//! Configuration types
//!
//! Board-agnostic driver settings, persisted as postcard binary data with a
//! magic/version header and CRC.

pub mod store;
pub mod types;

pub use store::*;
pub use types::*;
