//! Mutex helpers shared by the parse cache and the logger.
//!
//! A poisoned mutex in this crate only ever guards a cache or an output
//! sink. Stale cache entries are still valid colors and a half-written log
//! line is harmless, so every lock recovers from poison instead of
//! propagating a panic into palette generation.

use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, recovering from poison if necessary.
///
/// # Example
///
/// ```rust
/// use std::sync::Mutex;
/// use hueforge::sync::lock_recover;
///
/// let mutex = Mutex::new(42);
/// let guard = lock_recover(&mutex);
/// assert_eq!(*guard, 42);
/// ```
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Same as [`lock_recover`], but logs where the poison was recovered.
#[inline]
pub fn lock_recover_logged<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|e| {
        log::warn!(target: "hueforge::sync", "mutex poison recovered at: {context}");
        e.into_inner()
    })
}
