//! The default cache is shared by the whole process, so every test here holds `LOCK`
//! while it enables the cache.

use std::sync::{Mutex, MutexGuard};
use std::thread;

use lazy_static::lazy_static;
use proptest::prelude::*;

use unlim_int::{cache_entries, cache_stats, disable_cache, enable_cache, CacheOp, UnlimInt};

lazy_static! {
    static ref LOCK: Mutex<()> = Mutex::new(());
}

fn lock() -> MutexGuard<'static, ()> {
    let guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    disable_cache(true);
    guard
}

fn n(value: i32) -> UnlimInt {
    UnlimInt::from_number(value)
}

// Property: FIFO eviction and hit/miss accounting on the default cache
proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]
    #[test]
    fn test_cache_fifo(size in 1usize..20) {
        let _guard = lock();
        enable_cache(Some(size));

        let rhs = n(1000);
        let operands: Vec<UnlimInt> = (1..=size as i32 + 1).map(UnlimInt::from_number).collect();
        for lhs in &operands {
            lhs.cadd(&rhs);
        }
        let stats = cache_stats();
        prop_assert_eq!(stats.size, size);
        prop_assert_eq!(stats.misses, size as u64 + 1);
        prop_assert_eq!(stats.hits, 0);

        // newest entry is still there, the first one was evicted
        operands[size].cadd(&rhs);
        prop_assert_eq!(cache_stats().hits, 1);
        operands[0].cadd(&rhs);
        let stats = cache_stats();
        prop_assert_eq!(stats.hits, 1);
        prop_assert_eq!(stats.misses, size as u64 + 2);

        disable_cache(true);
    }
}

#[test]
fn test_hit_rate_before_lookups() {
    let _guard = lock();
    enable_cache(None);
    let stats = cache_stats();
    assert!(stats.hit_rate.is_nan());
    assert_eq!(stats.max_size, None);
    disable_cache(true);
}

#[test]
fn test_arithmetic_uses_cache() {
    let _guard = lock();
    enable_cache(Some(100));

    let a = n(9);
    let b = n(4);
    a.cadd(&b);
    a.cadd(&b);
    a.csub(&b);
    let stats = cache_stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.size, 2);

    // the key ignores the sign, so the cached sign wins
    let hit = n(-9).cadd(&b);
    assert!(!hit.is_negative());
    assert_eq!(hit.to_number().unwrap(), 13);

    let big = UnlimInt::from_big_int(0x7777_7777_7777);
    let first = big.div_rem(&n(10)).unwrap();
    let hits_before = cache_stats().hits;
    let second = big.div_rem(&n(10)).unwrap();
    assert_eq!(cache_stats().hits, hits_before + 1);
    assert_eq!(first, second);

    disable_cache(true);
}

#[test]
fn test_division_records_powers_of_two() {
    let _guard = lock();
    enable_cache(None);

    // 10 * 2^43 is the largest multiple below the dividend
    let big = UnlimInt::from_big_int(0x7777_7777_7777);
    big.div_rem(&n(10)).unwrap();

    let entries = cache_entries();
    let first_sub = entries.iter().position(|e| e.op == CacheOp::Sub).unwrap();
    let first_pow = entries.iter().position(|e| e.op == CacheOp::Pow).unwrap();
    assert!(first_sub < first_pow);
    assert_eq!(entries[first_pow].lhs.to_number().unwrap(), 2);
    assert_eq!(entries[first_pow].rhs.to_number().unwrap(), 43);
    assert!(entries.iter().filter(|e| e.op == CacheOp::DivMod).count() > 1);
    assert_eq!(cache_stats().size, entries.len());

    let before = cache_stats();
    let power = n(2).cpow(&n(43)).unwrap();
    let after = cache_stats();
    assert_eq!(after.hits, before.hits + 1);
    assert_eq!(after.misses, before.misses);
    assert_eq!(power.to_big_int().unwrap(), 1 << 43);

    disable_cache(true);
}

#[test]
fn test_cache_is_shared_across_threads() {
    let _guard = lock();
    enable_cache(Some(100));

    let worker = thread::spawn(|| {
        n(9).cadd(&n(4));
        cache_stats()
    });
    let seen_by_worker = worker.join().unwrap();
    assert_eq!(seen_by_worker.misses, 1);
    assert_eq!(seen_by_worker.size, 1);

    n(9).cadd(&n(4));
    let stats = cache_stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);

    disable_cache(false);
    let stopped = thread::spawn(|| {
        n(9).cadd(&n(4));
        cache_stats()
    })
    .join()
    .unwrap();
    assert_eq!(stopped.hits, 1);
    assert_eq!(stopped.size, 1);

    disable_cache(true);
}

#[test]
fn test_cached_results_match_uncached() {
    let _guard = lock();
    let a = UnlimInt::from_hex("c0ffee1234567890abcdef").unwrap();
    let b = UnlimInt::from_hex("beef").unwrap();
    let plain = (a.div_rem(&b).unwrap(), a.to_string_radix(10).unwrap());

    enable_cache(Some(10_000));
    let first = (a.div_rem(&b).unwrap(), a.to_string_radix(10).unwrap());
    let second = (a.div_rem(&b).unwrap(), a.to_string_radix(10).unwrap());
    let stats = cache_stats();
    disable_cache(true);

    assert_eq!(plain, first);
    assert_eq!(first, second);
    assert!(stats.hits > 0);
    assert!(stats.size > 0);
}
