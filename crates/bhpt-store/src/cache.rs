//! Process-wide, load-once dataset cache.
//!
//! Each model has one slot. The first `get` for a model loads it under that
//! slot's lock; later calls, including ones racing the first, read the same
//! `Arc`. A failed load leaves the slot empty so the next call retries.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use bhpt_core::{ModelKind, SurrogateDataset};

use crate::error::Result;
use crate::provider::{DatasetProvider, DatasetSource};

#[derive(Default)]
struct Slot {
    value: OnceLock<Arc<SurrogateDataset>>,
    init: Mutex<()>,
}

pub struct DatasetCache<S = DatasetProvider> {
    source: S,
    slots: [Slot; 2],
}

fn slot_index(model: ModelKind) -> usize {
    match model {
        ModelKind::Sur1dq1e4 => 0,
        ModelKind::Sur2dq1e3 => 1,
    }
}

impl<S: DatasetSource> DatasetCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            slots: Default::default(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The loaded dataset for `model`, loading it on first use.
    pub fn get(&self, model: ModelKind) -> Result<Arc<SurrogateDataset>> {
        let slot = &self.slots[slot_index(model)];
        if let Some(dataset) = slot.value.get() {
            tracing::debug!("{model} dataset cache hit");
            return Ok(Arc::clone(dataset));
        }

        let _guard = slot.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(dataset) = slot.value.get() {
            return Ok(Arc::clone(dataset));
        }
        let dataset = Arc::new(self.source.load(model)?);
        let _ = slot.value.set(Arc::clone(&dataset));
        Ok(dataset)
    }

    pub fn is_loaded(&self, model: ModelKind) -> bool {
        self.slots[slot_index(model)].value.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    use bhpt_core::testkit;

    use crate::error::StoreError;

    struct Counting {
        loads: AtomicUsize,
        failures_left: AtomicUsize,
    }

    impl Counting {
        fn new(failures: usize) -> Self {
            Self {
                loads: AtomicUsize::new(0),
                failures_left: AtomicUsize::new(failures),
            }
        }
    }

    impl DatasetSource for Counting {
        fn load(&self, model: ModelKind) -> Result<SurrogateDataset> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            if self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(StoreError::Download("offline".to_string()));
            }
            Ok(testkit::dataset(model)?)
        }
    }

    #[test]
    fn test_concurrent_first_access_loads_once() {
        let cache = DatasetCache::new(Counting::new(0));
        let handles: Vec<Arc<SurrogateDataset>> = thread::scope(|s| {
            let workers: Vec<_> = (0..8)
                .map(|_| s.spawn(|| cache.get(ModelKind::Sur2dq1e3).unwrap()))
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });
        assert_eq!(cache.source().loads.load(Ordering::SeqCst), 1);
        for h in &handles[1..] {
            assert!(Arc::ptr_eq(&handles[0], h));
        }
        assert!(cache.is_loaded(ModelKind::Sur2dq1e3));
        assert!(!cache.is_loaded(ModelKind::Sur1dq1e4));
    }

    #[test]
    fn test_models_have_separate_slots() {
        let cache = DatasetCache::new(Counting::new(0));
        let one = cache.get(ModelKind::Sur1dq1e4).unwrap();
        let two = cache.get(ModelKind::Sur2dq1e3).unwrap();
        assert_eq!(one.model(), ModelKind::Sur1dq1e4);
        assert_eq!(two.model(), ModelKind::Sur2dq1e3);
        cache.get(ModelKind::Sur1dq1e4).unwrap();
        assert_eq!(cache.source().loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let cache = DatasetCache::new(Counting::new(1));
        let err = cache.get(ModelKind::Sur1dq1e4).unwrap_err();
        assert!(matches!(err, StoreError::Download(_)));
        assert!(!cache.is_loaded(ModelKind::Sur1dq1e4));
        cache.get(ModelKind::Sur1dq1e4).unwrap();
        assert_eq!(cache.source().loads.load(Ordering::SeqCst), 2);
    }
}
