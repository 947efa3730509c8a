//! Memoization of arithmetic results.
//!
//! Entries are keyed by `operator;base64(lhs bytes);base64(rhs bytes)`. Neither the sign flag
//! nor the capacity is part of the key, only the raw buffer, so operands with the same bytes
//! share an entry. Eviction is strictly by insertion order: a hit does not refresh an entry.
//!
//! The process holds one default [`Memo`] behind a mutex, driven by [`enable_cache`],
//! [`disable_cache`] and [`cache_stats`]. The lock is taken once per lookup or store and never
//! across a computation. Independent instances can be built with [`Memo::new`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use indexmap::IndexMap;
use lazy_static::lazy_static;

use crate::UnlimInt;
use crate::unlim_num_constants::DEFAULT_CACHE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheOp {
    Add,
    Sub,
    Mul,
    DivMod,
    Pow,
}

impl CacheOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CacheOp::Add => "+",
            CacheOp::Sub => "-",
            CacheOp::Mul => "*",
            CacheOp::DivMod => "/%",
            CacheOp::Pow => "^",
        }
    }
}

#[derive(Debug, Clone)]
pub enum CachedResult {
    Value(UnlimInt),
    DivMod { quotient: UnlimInt, remainder: UnlimInt },
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub op: CacheOp,
    pub lhs: UnlimInt,
    pub rhs: UnlimInt,
    pub result: CachedResult,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    /// `None` means unlimited.
    pub max_size: Option<usize>,
    /// Percentage of lookups that hit. NaN until the first lookup.
    pub hit_rate: f64,
}

#[derive(Debug)]
pub struct Memo {
    enabled: bool,
    max_size: Option<usize>,
    entries: IndexMap<String, CacheEntry>,
    hits: u64,
    misses: u64,
}

impl Default for Memo {
    fn default() -> Self {
        Memo {
            enabled: false,
            max_size: Some(DEFAULT_CACHE_SIZE),
            entries: IndexMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl Memo {
    /// A disabled cache with the default maximum size.
    pub fn new() -> Self {
        Memo::default()
    }

    pub fn enable(&mut self, max_size: Option<usize>) {
        tracing::debug!(?max_size, "enabling result cache");
        self.enabled = true;
        self.max_size = max_size;
    }

    /// Stops interception. With `clear`, also drops all entries and resets the counters.
    pub fn disable(&mut self, clear: bool) {
        tracing::debug!(clear, "disabling result cache");
        self.enabled = false;
        if clear {
            self.entries.clear();
            self.hits = 0;
            self.misses = 0;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn key(op: CacheOp, lhs: &UnlimInt, rhs: &UnlimInt) -> String {
        format!(
            "{};{};{}",
            op.symbol(),
            STANDARD.encode(lhs.as_bytes()),
            STANDARD.encode(rhs.as_bytes())
        )
    }

    /// Counts a hit or a miss. Returns `None` without counting while disabled.
    pub fn lookup(&mut self, op: CacheOp, lhs: &UnlimInt, rhs: &UnlimInt) -> Option<CachedResult> {
        if !self.enabled {
            return None;
        }
        match self.entries.get(&Memo::key(op, lhs, rhs)) {
            Some(entry) => {
                self.hits += 1;
                Some(entry.result.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts (or overwrites in place) and evicts the oldest entry once over the limit.
    pub fn store(&mut self, op: CacheOp, lhs: &UnlimInt, rhs: &UnlimInt, result: CachedResult) {
        if !self.enabled {
            return;
        }
        let entry = CacheEntry { op, lhs: lhs.clone(), rhs: rhs.clone(), result };
        self.entries.insert(Memo::key(op, lhs, rhs), entry);

        if let Some(max_size) = self.max_size {
            if self.entries.len() > max_size {
                if let Some((key, _)) = self.entries.shift_remove_index(0) {
                    tracing::debug!(%key, "evicted oldest cache entry");
                }
            }
        }
    }

    pub fn contains(&self, op: CacheOp, lhs: &UnlimInt, rhs: &UnlimInt) -> bool {
        self.entries.contains_key(&Memo::key(op, lhs, rhs))
    }

    /// Entries from oldest to newest, which is also the eviction order.
    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
            max_size: self.max_size,
            hit_rate: self.hits as f64 / (self.hits + self.misses) as f64 * 100.0,
        }
    }
}

lazy_static! {
    static ref CACHE: Mutex<Memo> = Mutex::new(Memo::default());
}

// the map is consistent after every call, so a poisoned lock is still usable
fn default_cache() -> MutexGuard<'static, Memo> {
    CACHE.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn enable_cache(max_size: Option<usize>) {
    default_cache().enable(max_size);
}

pub fn disable_cache(clear: bool) {
    default_cache().disable(clear);
}

pub fn cache_stats() -> CacheStats {
    default_cache().stats()
}

/// Snapshot of the default cache, oldest entry first.
pub fn cache_entries() -> Vec<CacheEntry> {
    default_cache().entries().cloned().collect()
}

pub(crate) fn lookup_value(op: CacheOp, lhs: &UnlimInt, rhs: &UnlimInt) -> Option<UnlimInt> {
    match default_cache().lookup(op, lhs, rhs)? {
        CachedResult::Value(value) => Some(value),
        CachedResult::DivMod { .. } => None,
    }
}

pub(crate) fn lookup_div_rem(lhs: &UnlimInt, rhs: &UnlimInt) -> Option<(UnlimInt, UnlimInt)> {
    match default_cache().lookup(CacheOp::DivMod, lhs, rhs)? {
        CachedResult::DivMod { quotient, remainder } => Some((quotient, remainder)),
        CachedResult::Value(_) => None,
    }
}

pub(crate) fn store_value(op: CacheOp, lhs: &UnlimInt, rhs: &UnlimInt, result: &UnlimInt) {
    let mut cache = default_cache();
    if cache.is_enabled() {
        cache.store(op, lhs, rhs, CachedResult::Value(result.clone()));
    }
}

pub(crate) fn store_div_rem(lhs: &UnlimInt, rhs: &UnlimInt, quotient: &UnlimInt, remainder: &UnlimInt) {
    let mut cache = default_cache();
    if cache.is_enabled() {
        let result = CachedResult::DivMod {
            quotient: quotient.clone(),
            remainder: remainder.clone(),
        };
        cache.store(CacheOp::DivMod, lhs, rhs, result);
    }
}
