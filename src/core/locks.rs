//! Per-location mutual exclusion for the read-modify-write of open intervals.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Hands out one mutex per location id. Calls for different locations never
/// share a mutex.
#[derive(Debug, Default)]
pub struct LocationLocks {
    inner: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl LocationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mutex guarding `location_id`, created on first use.
    pub fn lock_for(&self, location_id: i64) -> Arc<Mutex<()>> {
        // A panic while holding the map lock cannot leave the map half-updated.
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(map.entry(location_id).or_default())
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_location_shares_one_mutex() {
        let locks = LocationLocks::new();
        let a = locks.lock_for(5);
        let b = locks.lock_for(5);
        let c = locks.lock_for(6);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(locks.len(), 2);
    }

    #[test]
    fn other_locations_stay_available_while_one_is_held() {
        let locks = LocationLocks::new();
        let held = locks.lock_for(1);
        let _guard = held.lock().unwrap();
        let other = locks.lock_for(2);
        assert!(other.try_lock().is_ok());
        assert!(locks.lock_for(1).try_lock().is_err());
    }
}
