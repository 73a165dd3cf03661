//! Fetch cache: an explicit `(source, period)` → table mapping with an
//! injectable policy, wrapped around any `TableSource`.
//!
//! The pipeline stays cache-agnostic: it only ever sees a `TableSource`,
//! and whether that source memoizes is the caller's wiring decision.
//! Errors are never cached; a failed period is retried on the next call.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::data::TableSource;
use crate::domain::{RawTable, Year};
use crate::error::DataError;

/// Cache behavior for repeated period fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Pass every call through to the inner source.
    Off,
    /// Keep results for the lifetime of the wrapper.
    #[default]
    Memory,
    /// Keep results up to the given age, then refetch.
    Ttl(Duration),
}

struct CacheEntry {
    stored_at: Instant,
    table: RawTable,
}

pub struct CachedTableSource<S> {
    inner: S,
    mode: CacheMode,
    entries: Mutex<HashMap<(String, Year), CacheEntry>>,
}

impl<S: TableSource> CachedTableSource<S> {
    pub fn new(inner: S, mode: CacheMode) -> Self {
        Self {
            inner,
            mode,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lookup(&self, key: &(String, Year)) -> Option<RawTable> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(key)?;
        match self.mode {
            CacheMode::Off => None,
            CacheMode::Memory => Some(entry.table.clone()),
            CacheMode::Ttl(ttl) => (entry.stored_at.elapsed() <= ttl).then(|| entry.table.clone()),
        }
    }
}

impl<S: TableSource> TableSource for CachedTableSource<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn fetch_period_table(&self, period: Year) -> Result<RawTable, DataError> {
        let key = (self.inner.name().to_string(), period);
        if let Some(table) = self.lookup(&key) {
            return Ok(table);
        }

        let table = self.inner.fetch_period_table(period)?;
        if self.mode != CacheMode::Off {
            if let Ok(mut entries) = self.entries.lock() {
                entries.insert(
                    key,
                    CacheEntry {
                        stored_at: Instant::now(),
                        table: table.clone(),
                    },
                );
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts fetches; fails for periods before 2000.
    struct CountingSource {
        calls: AtomicUsize,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TableSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        fn fetch_period_table(&self, period: Year) -> Result<RawTable, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if period < 2000 {
                return Err(DataError::Unavailable(format!("no data for {period}")));
            }
            Ok(RawTable {
                source: "counting".to_string(),
                period: period.to_string(),
                headers: vec!["Date".to_string()],
                records: vec![RawRecord {
                    period: period.to_string(),
                    cells: vec!["2025-01-02".to_string()],
                }],
            })
        }
    }

    #[test]
    fn memory_mode_fetches_once_per_period() {
        let cached = CachedTableSource::new(CountingSource::new(), CacheMode::Memory);
        let first = cached.fetch_period_table(2025).unwrap();
        let second = cached.fetch_period_table(2025).unwrap();
        assert_eq!(first, second);
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 1);

        cached.fetch_period_table(2024).unwrap();
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn off_mode_always_passes_through() {
        let cached = CachedTableSource::new(CountingSource::new(), CacheMode::Off);
        cached.fetch_period_table(2025).unwrap();
        cached.fetch_period_table(2025).unwrap();
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn expired_ttl_refetches() {
        let cached =
            CachedTableSource::new(CountingSource::new(), CacheMode::Ttl(Duration::ZERO));
        cached.fetch_period_table(2025).unwrap();
        cached.fetch_period_table(2025).unwrap();
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 2);

        let cached =
            CachedTableSource::new(CountingSource::new(), CacheMode::Ttl(Duration::from_secs(60)));
        cached.fetch_period_table(2025).unwrap();
        cached.fetch_period_table(2025).unwrap();
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn errors_are_not_cached() {
        let cached = CachedTableSource::new(CountingSource::new(), CacheMode::Memory);
        assert!(cached.fetch_period_table(1990).is_err());
        assert!(cached.fetch_period_table(1990).is_err());
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 2);
    }
}
