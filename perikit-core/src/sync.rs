//! Interrupt-safe shared state
//!
//! Driver state touched both by the owning task and by a port's edge
//! notification lives in a [`Shared`] cell. Every access runs inside a
//! critical section, so a notification can never observe a half-written
//! update.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Critical-section protected state
///
/// Closures passed to [`Shared::with`] / [`Shared::with_mut`] must not call
/// back into the same cell, and should stay short: interrupts are masked
/// while they run.
pub struct Shared<T> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<T>>,
}

impl<T> Shared<T> {
    /// Wrap `value`
    ///
    /// This is a const fn, allowing static initialization.
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Access state immutably
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.lock(|cell| f(&cell.borrow()))
    }

    /// Access state mutably
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

impl<T: Copy> Shared<T> {
    /// Copy the current value out
    pub fn get(&self) -> T {
        self.with(|v| *v)
    }

    /// Replace the current value
    pub fn set(&self, value: T) {
        self.with_mut(|v| *v = value);
    }
}
