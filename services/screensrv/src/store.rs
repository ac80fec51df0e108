//! Latest screen position
//!
//! Single-slot cell shared by the link loop (sole writer) and the HTTP
//! handlers (readers). The lock is held only for the copy in or out.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

/// Position value with the time it was last written
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PositionSample {
    /// Percentage of the configured range, two decimals
    pub position: f64,
    /// `None` until the first valid frame arrives
    pub updated_at: Option<DateTime<Utc>>,
}

/// Thread-safe holder of the last normalized reading
#[derive(Debug, Default)]
pub struct PositionStore {
    sample: Mutex<PositionSample>,
}

impl PositionStore {
    /// Store starting at `0.0`
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, position: f64) {
        let sample = PositionSample {
            position,
            updated_at: Some(Utc::now()),
        };
        *self.sample.lock() = sample;
    }

    pub fn get(&self) -> f64 {
        self.sample.lock().position
    }

    /// Time of the last successful write
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.sample.lock().updated_at
    }

    /// Value and timestamp read under the same lock
    pub fn snapshot(&self) -> PositionSample {
        *self.sample.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_default_is_zero() {
        let store = PositionStore::new();
        assert_eq!(store.get(), 0.0);
        assert!(store.snapshot().updated_at.is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let store = PositionStore::new();
        store.set(37.31);
        store.set(50.0);
        assert_eq!(store.get(), 50.0);
        assert!(store.snapshot().updated_at.is_some());
    }

    #[test]
    fn test_updated_at_tracks_writes() {
        let store = PositionStore::new();
        assert!(store.updated_at().is_none());

        let before = Utc::now();
        store.set(12.5);
        let first = store.updated_at().unwrap_or_else(|| panic!("no timestamp after set"));
        assert!(first >= before);

        store.set(12.5);
        let second = store.updated_at().unwrap_or_else(|| panic!("no timestamp after set"));
        assert!(second >= first);
        assert_eq!(store.snapshot().updated_at, Some(second));
    }

    #[test]
    fn test_concurrent_readers_see_written_values() {
        let store = Arc::new(PositionStore::new());
        let values: Vec<f64> = (0..=100).map(f64::from).collect();

        let writer = {
            let store = Arc::clone(&store);
            let values = values.clone();
            std::thread::spawn(move || {
                for v in values {
                    store.set(v);
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        let v = store.get();
                        assert!(v == v.trunc() && (0.0..=100.0).contains(&v));
                    }
                })
            })
            .collect();

        writer.join().unwrap_or_else(|_| panic!("writer panicked"));
        for reader in readers {
            reader.join().unwrap_or_else(|_| panic!("reader panicked"));
        }
        assert_eq!(store.get(), 100.0);
    }
}
