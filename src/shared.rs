//! One chip shared between several contexts.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::lms6002d::Lms6002d;

/// A driver behind a blocking mutex.
///
/// Every closure passed to [`lock`](Self::lock) has the chip to itself, so a
/// calibration run inside one closure cannot be interleaved with an enable
/// toggle from another context.
pub struct SharedLms6002d<M: RawMutex, T, D> {
    inner: Mutex<M, RefCell<Lms6002d<T, D>>>,
}

impl<M: RawMutex, T, D> SharedLms6002d<M, T, D> {
    pub const fn new(lms: Lms6002d<T, D>) -> Self {
        SharedLms6002d {
            inner: Mutex::new(RefCell::new(lms)),
        }
    }

    /// Runs `f` with exclusive access to the driver.
    ///
    /// Panics if called again from inside `f`.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Lms6002d<T, D>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn into_inner(self) -> Lms6002d<T, D> {
        self.inner.into_inner().into_inner()
    }
}
