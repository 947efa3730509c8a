//! # UnlimInt
//! Arbitrary-precision integers stored as a little-endian bit buffer plus an independent sign flag.
//!
//! Bit `i` lives in byte `i / 8` at position `i % 8` and weighs `2^i`. The capacity may be larger
//! than the bits the magnitude needs; the extra high bits are always zero.
//!
//! Arithmetic and comparison only look at magnitudes. The sign flag is carried, never computed:
//! a sum or a difference takes the sign of its left operand.
//!
//! # Example
//! ```
//! use unlim_int::UnlimInt;
//!
//! let a = UnlimInt::from_number(5);
//! let b = UnlimInt::from_big_int(3);
//! assert_eq!(a.cadd(&b).to_number().unwrap(), 8);
//! assert_eq!(a.csub(&b).to_number().unwrap(), 2);
//! assert_eq!(a.cmul(&b).to_number().unwrap(), 15);
//! assert_eq!(a.div(&b).unwrap().to_number().unwrap(), 1);
//! assert_eq!(a.rem(&b).unwrap().to_number().unwrap(), 2);
//! ```

use std::fmt::Display;

use crate::errors::{Result, UnlimIntError};
use crate::unlim_num_cache::small_value;
use crate::unlim_num_constants::*;

macro_rules! bytes_for_bits {
    ($bits: expr) => {
        ($bits + 7) / 8
    };
}

#[derive(Debug, Clone)]
pub struct UnlimInt {
    pub(crate) buf: Vec<u8>,
    pub(crate) size: usize,
    pub(crate) negative: bool,
}

// 构造
impl UnlimInt {
    /// A zero of `size` bits.
    pub fn new(size: usize, negative: bool) -> Self {
        UnlimInt { buf: vec![0; bytes_for_bits!(size)], size, negative }
    }

    /// Exactly as many bits as `magnitude` needs. Bypasses the small value table,
    /// which is itself built from this.
    pub(crate) fn from_magnitude(magnitude: u64, negative: bool) -> Self {
        let size = (u64::BITS - magnitude.leading_zeros()) as usize;
        let buf = magnitude.to_le_bytes()[..bytes_for_bits!(size)].to_vec();
        UnlimInt { buf, size, negative }
    }

    /// Starts from a full 64-bit buffer and trims it down.
    pub(crate) fn from_wide(magnitude: u64, negative: bool) -> Self {
        let mut result = UnlimInt::new(BIG_INT_BITS, negative);
        result.buf.copy_from_slice(&magnitude.to_le_bytes());
        result.trim();
        result
    }

    /// Capacity is `ceil(log2(|value| + 1))`, the sign comes from `value`.
    pub fn from_number(value: i32) -> Self {
        let magnitude = value.unsigned_abs() as u64;
        let negative = value < 0;
        small_value(magnitude, negative)
            .unwrap_or_else(|| UnlimInt::from_magnitude(magnitude, negative))
    }

    /// 64-bit capacity, then trimmed.
    pub fn from_big_int(value: i64) -> Self {
        UnlimInt::from_wide(value.unsigned_abs(), value < 0)
    }

    /// Raw little-endian bytes; the capacity is `bytes.len() * 8`. Bytes carry no sign,
    /// so it must be given.
    pub fn from_buffer(bytes: &[u8], negative: bool) -> Self {
        UnlimInt { buf: bytes.to_vec(), size: bytes.len() * 8, negative }
    }
}

macro_rules! impl_number_to_unlim_int {
    ($($i: ty),*) => {
    $(
    impl From<$i> for UnlimInt {
        fn from(val: $i) -> Self {
            UnlimInt::from_number(val as i32)
        }
    }
    )*
    };
}

impl_number_to_unlim_int!(i8, i16, i32, u8, u16);

impl From<u32> for UnlimInt {
    fn from(val: u32) -> Self {
        small_value(val as u64, false).unwrap_or_else(|| UnlimInt::from_magnitude(val as u64, false))
    }
}

impl From<i64> for UnlimInt {
    fn from(val: i64) -> Self {
        UnlimInt::from_big_int(val)
    }
}

impl From<u64> for UnlimInt {
    fn from(val: u64) -> Self {
        UnlimInt::from_wide(val, false)
    }
}

// 访问位缓冲区
impl UnlimInt {
    pub fn capacity(&self) -> usize {
        self.size
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Owned copy of the raw buffer.
    pub fn to_buffer(&self) -> Vec<u8> {
        self.buf.clone()
    }

    /// Bits past the buffer read as zero.
    pub fn get_bit(&self, index: usize) -> bool {
        self.buf
            .get(index / 8)
            .map_or(false, |byte| *byte & (1u8 << (index % 8)) != 0)
    }

    pub fn get_byte(&self, index: usize) -> Option<u8> {
        self.buf.get(index).copied()
    }

    pub fn set_bit(&mut self, index: usize, value: bool) -> Result<()> {
        if index >= self.size {
            return Err(UnlimIntError::IndexOutOfRange { index, size: self.size });
        }
        self.put_bit(index, value);
        Ok(())
    }

    /// `set_bit` for indices the caller already knows to be in range.
    #[inline(always)]
    pub(crate) fn put_bit(&mut self, index: usize, value: bool) {
        debug_assert!(index < self.size);
        let mask = 1u8 << (index % 8);
        if value {
            self.buf[index / 8] |= mask;
        } else {
            self.buf[index / 8] &= !mask;
        }
    }

    /// Zeroes the unused high bits of the last byte.
    pub(crate) fn clear_tail(&mut self) {
        let used = self.size % 8;
        if used != 0 {
            if let Some(last) = self.buf.last_mut() {
                *last &= (1u8 << used) - 1;
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        self.buf.iter().all(|byte| *byte == 0)
    }

    /// Index of the highest set bit plus one, zero for zero.
    pub fn trimmed_size(&self) -> usize {
        self.msb().map_or(0, |i| i + 1)
    }

    /// Swaps in `result`'s buffer and capacity. The sign flag stays.
    pub(crate) fn replace_storage(&mut self, result: UnlimInt) -> &mut Self {
        self.buf = result.buf;
        self.size = result.size;
        self
    }
}

// 改变容量
impl UnlimInt {
    /// Copy with exactly `size` bits: zero-extended or cut down.
    pub fn ctrim_to(&self, size: usize) -> UnlimInt {
        let mut buf = vec![0; bytes_for_bits!(size)];
        let kept = buf.len().min(self.buf.len());
        buf[..kept].copy_from_slice(&self.buf[..kept]);
        let mut result = UnlimInt { buf, size, negative: self.negative };
        result.clear_tail();
        result
    }

    /// Grows to `size` bits. Smaller sizes are ignored, so nothing is ever cut off.
    pub fn trim_to(&mut self, size: usize) -> &mut Self {
        if size < self.size {
            return self;
        }
        let trimmed = self.ctrim_to(size);
        self.replace_storage(trimmed)
    }

    /// Zero-extends to `size` bits; a no-op when `size` is not larger.
    pub fn expand(&mut self, size: usize) -> &mut Self {
        if size < self.size {
            return self;
        }
        self.buf.resize(bytes_for_bits!(size), 0);
        self.size = size;
        self
    }

    pub fn cexpand(&self, size: usize) -> UnlimInt {
        let mut result = self.clone();
        result.expand(size);
        result
    }

    /// Shrinks the capacity to the trimmed size.
    pub fn trim(&mut self) -> &mut Self {
        let size = self.trimmed_size();
        if size == self.size {
            return self;
        }
        self.buf.truncate(bytes_for_bits!(size));
        self.size = size;
        self
    }

    pub fn ctrim(&self) -> UnlimInt {
        self.ctrim_to(self.trimmed_size())
    }

    /// Flips the sign flag in place.
    pub fn negate(&mut self) -> &mut Self {
        self.negative = !self.negative;
        self
    }

    pub fn cnegate(&self) -> UnlimInt {
        let mut result = self.clone();
        result.negate();
        result
    }
}

// 导出
impl UnlimInt {
    /// Magnitude as a `u32`. The sign flag is not applied.
    pub fn to_number(&self) -> Result<u32> {
        if self.size > NUMBER_BITS {
            return Err(UnlimIntError::Overflow { size: self.size, max: NUMBER_BITS });
        }
        Ok(self.low_word() as u32)
    }

    /// Magnitude as a `u64`. The sign flag is not applied.
    pub fn to_big_int(&self) -> Result<u64> {
        if self.size > BIG_INT_BITS {
            return Err(UnlimIntError::Overflow { size: self.size, max: BIG_INT_BITS });
        }
        Ok(self.low_word())
    }

    fn low_word(&self) -> u64 {
        self.buf
            .iter()
            .take(8)
            .enumerate()
            .fold(0u64, |acc, (i, byte)| acc | (*byte as u64) << (i * 8))
    }
}

// 实现打印
impl Display for UnlimInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.to_string_radix(10).map_err(|_| std::fmt::Error)?;
        f.write_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_number() {
        let five = UnlimInt::from_number(5);
        assert_eq!(five.capacity(), 3);
        assert_eq!(five.as_bytes(), &[0b101]);

        let big = UnlimInt::from_number(1000);
        assert_eq!(big.capacity(), 10);
        assert_eq!(big.to_number().unwrap(), 1000);

        let neg = UnlimInt::from_number(-300);
        assert!(neg.is_negative());
        assert_eq!(neg.to_number().unwrap(), 300);

        let min = UnlimInt::from_number(i32::MIN);
        assert_eq!(min.capacity(), 32);
        assert_eq!(min.to_number().unwrap(), 1 << 31);

        assert_eq!(UnlimInt::from_number(0).capacity(), 0);
    }

    #[test]
    fn test_from_big_int() {
        let three = UnlimInt::from_big_int(3);
        assert_eq!(three.capacity(), 2);

        let wide = UnlimInt::from_big_int(-0x1234_5678_9abc);
        assert!(wide.is_negative());
        assert_eq!(wide.capacity(), 45);
        assert_eq!(wide.to_big_int().unwrap(), 0x1234_5678_9abc);

        let max: UnlimInt = u64::MAX.into();
        assert_eq!(max.capacity(), 64);
        assert!(max.to_number().is_err());
    }

    #[test]
    fn test_from_buffer() {
        let v = UnlimInt::from_buffer(&[0x01, 0x80, 0x00], true);
        assert_eq!(v.capacity(), 24);
        assert!(v.is_negative());
        assert!(v.get_bit(0));
        assert!(v.get_bit(15));
        assert_eq!(v.trimmed_size(), 16);
        assert_eq!(v.to_buffer(), vec![0x01, 0x80, 0x00]);
    }

    #[test]
    fn test_set_bit_bounds() {
        let mut v = UnlimInt::new(10, false);
        v.set_bit(9, true).unwrap();
        assert_eq!(
            v.set_bit(10, true),
            Err(UnlimIntError::IndexOutOfRange { index: 10, size: 10 })
        );
        assert_eq!(v.get_byte(1), Some(0b10));
        assert_eq!(v.get_byte(2), None);
        assert!(!v.get_bit(100));
    }

    #[test]
    fn test_resize() {
        let mut v = UnlimInt::from_number(0b1011_0110);
        assert_eq!(v.capacity(), 8);

        v.expand(4);
        assert_eq!(v.capacity(), 8);
        v.expand(20);
        assert_eq!(v.capacity(), 20);
        assert_eq!(v.as_bytes().len(), 3);

        v.trim_to(4);
        assert_eq!(v.capacity(), 20);

        let cut = v.ctrim_to(4);
        assert_eq!(cut.capacity(), 4);
        assert_eq!(cut.to_number().unwrap(), 0b0110);

        let grown = v.ctrim_to(30);
        assert_eq!(grown.capacity(), 30);
        assert_eq!(grown.to_number().unwrap(), 0b1011_0110);

        v.trim();
        assert_eq!(v.capacity(), 8);
        assert_eq!(v.as_bytes().len(), 1);

        let zero = UnlimInt::new(40, false);
        assert_eq!(zero.trimmed_size(), 0);
        assert_eq!(zero.ctrim().capacity(), 0);
    }

    #[test]
    fn test_negate() {
        let mut v = UnlimInt::from_number(7);
        let n = v.cnegate();
        assert!(n.is_negative());
        assert!(!v.is_negative());
        v.negate().negate();
        assert!(!v.is_negative());
    }

    #[test]
    fn test_export_overflow() {
        let v = UnlimInt::new(33, false);
        assert_eq!(v.to_number(), Err(UnlimIntError::Overflow { size: 33, max: 32 }));
        assert_eq!(v.to_big_int(), Ok(0));
        let v = UnlimInt::new(65, false);
        assert!(v.to_big_int().is_err());
    }
}
