//! Per-key guards so concurrent misses compute a result once.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use courier_cache::CacheKey;

#[derive(Debug, Default)]
pub(crate) struct FlightTable {
    slots: Mutex<HashMap<CacheKey, Arc<Mutex<()>>>>,
}

impl FlightTable {
    fn slots(&self) -> MutexGuard<'_, HashMap<CacheKey, Arc<Mutex<()>>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `work` while holding the guard for `key`.
    ///
    /// Callers for the same key run one at a time; `work` should re-check
    /// the cache so later callers pick up the first caller's result. The
    /// guard leaves the table once its last holder finishes, including when
    /// `work` panics.
    pub(crate) fn run<T>(&self, key: CacheKey, work: impl FnOnce() -> T) -> T {
        let flight = self.join(key);
        let _turn = flight.turn();
        work()
    }

    fn join(&self, key: CacheKey) -> Flight<'_> {
        let slot = Arc::clone(self.slots().entry(key).or_default());
        Flight {
            table: self,
            key,
            slot: Some(slot),
        }
    }

    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> usize {
        self.slots().len()
    }
}

/// A caller's share of a slot. Dropping it removes the slot once no other
/// caller holds it.
struct Flight<'t> {
    table: &'t FlightTable,
    key: CacheKey,
    slot: Option<Arc<Mutex<()>>>,
}

impl Flight<'_> {
    fn turn(&self) -> Option<MutexGuard<'_, ()>> {
        self.slot
            .as_deref()
            .map(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        let mut slots = self.table.slots();
        // Release this share under the table lock so a concurrent holder
        // cannot count it.
        drop(self.slot.take());
        if slots
            .get(&self.key)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            slots.remove(&self.key);
        }
    }
}
