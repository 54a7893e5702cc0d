//! # Synchronization Utilities
//!
//! Poison-tolerant lock helpers used for the two pieces of shared state in
//! this crate: the process-wide [`Configuration`](crate::config::Configuration)
//! holder and the field tables of [`ObjectRef`](crate::value::ObjectRef) nodes.
//!
//! ## Poison Handling
//!
//! A test that panics while a lock is held poisons it. Assertion failures are
//! *expected* panics in test suites, so refusing to read the configuration or
//! an object node afterwards would turn one failing test into a cascade of
//! unrelated ones. All access therefore recovers the inner data:
//!
//! | Scenario | Function |
//! |----------|----------|
//! | `RwLock` read | [`read_recover`] |
//! | `RwLock` write | [`write_recover`] |
//! | `Mutex` lock | [`lock_recover`] |
//!
//! Recovery is logged at `debug` level so poison sources can be traced with
//! `RUST_LOG=fluent_errors=debug`.
//!
//! ```rust
//! use std::sync::RwLock;
//! use fluent_errors::sync::read_recover;
//!
//! let lock = RwLock::new(vec![1, 2, 3]);
//! let guard = read_recover(&lock);
//! assert_eq!(guard.len(), 3);
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lock a mutex, recovering from poison if necessary.
///
/// # Panics
///
/// This function never panics. It always recovers from poison.
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| {
        log::debug!("mutex poison recovered");
        e.into_inner()
    })
}

/// Acquire a read lock on an `RwLock`, recovering from poison if necessary.
#[inline]
pub fn read_recover<T>(rwlock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    rwlock.read().unwrap_or_else(|e| {
        log::debug!("rwlock poison recovered on read");
        PoisonError::into_inner(e)
    })
}

/// Acquire a write lock on an `RwLock`, recovering from poison if necessary.
#[inline]
pub fn write_recover<T>(rwlock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    rwlock.write().unwrap_or_else(|e| {
        log::debug!("rwlock poison recovered on write");
        PoisonError::into_inner(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_lock_recover_normal_operation() {
        let mutex = Mutex::new(42);
        let guard = lock_recover(&mutex);
        assert_eq!(*guard, 42);
    }

    #[test]
    fn test_lock_recover_after_poison() {
        let mutex = Mutex::new(42);
        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = mutex.lock().unwrap();
            panic!("assertion failed while holding the lock");
        }));
        assert!(mutex.lock().is_err(), "Mutex should be poisoned");

        let guard = lock_recover(&mutex);
        assert_eq!(*guard, 42);
    }

    #[test]
    fn test_read_recover_after_write_poison() {
        let rwlock = RwLock::new(String::from("representation"));
        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = rwlock.write().unwrap();
            panic!("intentional panic during write");
        }));

        let guard = read_recover(&rwlock);
        assert_eq!(guard.as_str(), "representation");
    }

    #[test]
    fn test_write_recover_after_read_poison() {
        let rwlock = RwLock::new(1);
        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = rwlock.read().unwrap();
            panic!("intentional panic during read");
        }));

        *write_recover(&rwlock) = 2;
        assert_eq!(*read_recover(&rwlock), 2);
    }

    #[test]
    fn test_concurrent_access_after_poison() {
        let lock = Arc::new(RwLock::new(0));
        {
            let l = Arc::clone(&lock);
            let _ = panic::catch_unwind(AssertUnwindSafe(move || {
                let _guard = l.write().unwrap();
                panic!("poison it");
            }));
        }

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let l = Arc::clone(&lock);
                thread::spawn(move || {
                    *write_recover(&l) += 1;
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(*read_recover(&lock), 4);
    }
}
