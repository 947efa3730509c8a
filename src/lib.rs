//! Unlim Int \
//! This crate provides:
//! - [`UnlimInt`]: arbitrary-precision integers kept as an explicit little-endian bit buffer and a
//!   separate sign flag. Arithmetic works bit by bit on magnitudes; the sign flag is carried along.
//! - A memoization cache for `+`, `-`, `*`, `^` and division, see [`enable_cache`].

mod arith;
mod compare;
mod errors;
mod memo;
mod ops;
mod radix;
mod unlim_int;
mod unlim_num_cache;
mod unlim_num_constants;

pub use arith::Operator;
pub use errors::{Result, UnlimIntError};
pub use memo::{
    cache_entries, cache_stats, disable_cache, enable_cache,
    CacheEntry, CacheOp, CacheStats, CachedResult, Memo,
};
pub use unlim_int::UnlimInt;
pub use unlim_num_constants::DEFAULT_CACHE_SIZE;

#[cfg(test)]
mod tests {
    use crate::UnlimInt;

    #[test]
    fn it_works() {
        let a: UnlimInt = "10000000000000".parse().unwrap();
        let b: UnlimInt = "900000000000".parse().unwrap();
        assert_eq!(a.to_string(), "10000000000000");
        assert_eq!((&a + &b).to_string(), "10900000000000");
        assert_eq!((&a - &b).to_string(), "9100000000000");
        assert_eq!((&a * &b).to_string(), "9000000000000000000000000");
        assert_eq!(a.div(&b).unwrap().to_string(), "11");
        assert_eq!(a.rem(&b).unwrap().to_string(), "100000000000");
        assert_eq!((&a << 10).to_string(), "10240000000000000");
        assert_eq!((&a >> 10).to_string(), "9765625000");
    }
}
