//! Gram matrix cache
//!
//! Kernelized models evaluate the Gram matrix of their training data against
//! itself on every gradient and loss call. The cache keeps the last computed
//! matrix together with a fingerprint of the data it was computed from, so
//! repeated calls on the same training set reuse it and a different training
//! set triggers a recomputation.

use crate::core::{Matrix, Result};
use log::debug;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

/// Identity of a data matrix: its shape and a hash of its entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Fingerprint {
    rows: usize,
    cols: usize,
    hash: u64,
}

impl Fingerprint {
    fn of(data: &Matrix) -> Self {
        let mut hasher = DefaultHasher::new();
        for value in data.iter() {
            value.to_bits().hash(&mut hasher);
        }
        Self {
            rows: data.nrows(),
            cols: data.ncols(),
            hash: hasher.finish(),
        }
    }
}

struct CachedGram {
    fingerprint: Fingerprint,
    matrix: Arc<Matrix>,
}

/// Computation in flight: the data it is for and the thread running it
#[derive(Clone, Copy, PartialEq, Eq)]
struct Pending {
    fingerprint: Fingerprint,
    owner: ThreadId,
}

#[derive(Default)]
struct Entry {
    cached: Option<CachedGram>,
    pending: Option<Pending>,
}

/// Whether a Gram matrix is currently held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Uninitialized,
    Cached,
}

/// Cache holding at most one Gram matrix
///
/// The lock only guards the lookup and the insertion; the matrix is computed
/// with the lock released. A caller that finds a computation for the same
/// data in flight on another thread waits for its result, so concurrent
/// callers sharing a model compute the matrix once. Rayon worker threads
/// never wait and compute the matrix themselves: the computation they would
/// wait for may be queued behind them on the same pool.
#[derive(Default)]
pub struct GramCache {
    entry: Mutex<Entry>,
    ready: Condvar,
    hits: AtomicU64,
    misses: AtomicU64,
    recomputations: AtomicU64,
}

impl GramCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the Gram matrix cached for `data`, computing it on a miss
    ///
    /// A cached matrix computed from different data is replaced. Errors from
    /// `compute` are returned and leave the cache unchanged.
    pub fn get_or_try_insert_with<F>(&self, data: &Matrix, compute: F) -> Result<Arc<Matrix>>
    where
        F: FnOnce() -> Result<Matrix>,
    {
        let fingerprint = Fingerprint::of(data);
        let current = thread::current().id();
        let mut entry = self.lock();

        loop {
            if let Some(cached) = entry.cached.as_ref() {
                if cached.fingerprint == fingerprint {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Ok(Arc::clone(&cached.matrix));
                }
            }
            let in_flight_elsewhere = entry
                .pending
                .is_some_and(|p| p.fingerprint == fingerprint && p.owner != current);
            if !in_flight_elsewhere || rayon::current_thread_index().is_some() {
                break;
            }
            entry = self
                .ready
                .wait(entry)
                .unwrap_or_else(PoisonError::into_inner);
        }

        if let Some(cached) = entry.cached.as_ref() {
            debug!(
                "Training data changed ({}x{} -> {}x{}), recomputing Gram matrix",
                cached.fingerprint.rows, cached.fingerprint.cols, fingerprint.rows, fingerprint.cols
            );
            self.recomputations.fetch_add(1, Ordering::Relaxed);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let pending = Pending {
            fingerprint,
            owner: current,
        };
        entry.pending = Some(pending);
        drop(entry);

        let _guard = PendingGuard {
            cache: self,
            pending,
        };
        let matrix = Arc::new(compute()?);
        self.lock().cached = Some(CachedGram {
            fingerprint,
            matrix: Arc::clone(&matrix),
        });
        Ok(matrix)
    }

    /// Currently cached Gram matrix, if any
    pub fn get(&self) -> Option<Arc<Matrix>> {
        self.lock()
            .cached
            .as_ref()
            .map(|cached| Arc::clone(&cached.matrix))
    }

    /// Drop the cached matrix
    pub fn invalidate(&self) {
        if self.lock().cached.take().is_some() {
            debug!("Gram cache invalidated");
        }
    }

    /// Current cache state
    pub fn state(&self) -> CacheState {
        if self.lock().cached.is_some() {
            CacheState::Cached
        } else {
            CacheState::Uninitialized
        }
    }

    /// Get cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let stats = self.stats();
        let total = stats.hits + stats.misses;
        if total == 0 {
            0.0
        } else {
            stats.hits as f64 / total as f64
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            recomputations: self.recomputations.load(Ordering::Relaxed),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Entry> {
        self.entry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the in-flight marker and wakes waiters, on success, error or panic
struct PendingGuard<'a> {
    cache: &'a GramCache,
    pending: Pending,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut entry = self.cache.lock();
        if entry.pending == Some(self.pending) {
            entry.pending = None;
        }
        drop(entry);
        self.cache.ready.notify_all();
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Misses caused by a change of training data
    pub recomputations: u64,
}
