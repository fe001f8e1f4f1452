//! Logging shims
//!
//! Expand to `defmt` calls when the `defmt` feature is enabled and to an
//! empty block otherwise. Arguments are not evaluated when logging is off,
//! so only pass values the caller uses anyway.

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);
    }};
}
