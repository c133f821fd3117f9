pub mod format;
pub mod logger;

pub use format::*;
pub use logger::*;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock view state, recovering it if a previous holder panicked
pub(crate) fn lock_state<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
