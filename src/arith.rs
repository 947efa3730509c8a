//! Arithmetic, bitwise operations and shifts.
//!
//! Every operation comes as a pure `c`-prefixed form that returns a new value and a mutating
//! form that swaps the receiver's buffer and capacity for the pure result. `+`, `-`, `*`, `^`
//! and division consult the result cache (see [`crate::memo`]) before computing.

use crate::UnlimInt;
use crate::errors::{Result, UnlimIntError};
use crate::memo::{self, CacheOp};
use crate::unlim_num_constants::FAST_PATH_BITS;

/// Operators with a default result capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    And,
    Or,
    Xor,
}

impl Operator {
    /// Capacity used for `lhs op rhs` when the caller does not pick one.
    pub fn result_size(self, lhs: &UnlimInt, rhs: &UnlimInt) -> usize {
        let a = lhs.trimmed_size();
        let b = rhs.trimmed_size();
        match self {
            Operator::Add | Operator::Sub => a.max(b) + 1,
            Operator::Mul => a + b,
            Operator::Pow => a * b,
            Operator::Div => a,
            Operator::Rem => b,
            Operator::And | Operator::Or | Operator::Xor => a.max(b),
        }
    }
}

// 实现加法
impl UnlimInt {
    pub fn cadd(&self, other: &UnlimInt) -> UnlimInt {
        self.cadd_sized(other, Operator::Add.result_size(self, other))
    }

    /// Ripple carry over all `size` bits of the result; overflow past `size` is dropped.
    pub fn cadd_sized(&self, other: &UnlimInt, size: usize) -> UnlimInt {
        if let Some(cached) = memo::lookup_value(CacheOp::Add, self, other) {
            return cached;
        }

        let mut result = UnlimInt::new(size, self.negative);
        let mut carry = false;
        for i in 0..size {
            let a = self.get_bit(i);
            let b = other.get_bit(i);
            result.put_bit(i, a ^ b ^ carry);
            carry = (a && b) || (carry && (a ^ b));
        }

        memo::store_value(CacheOp::Add, self, other, &result);
        result
    }

    pub fn add(&mut self, other: &UnlimInt) -> &mut Self {
        let result = self.cadd(other);
        self.replace_storage(result)
    }

    pub fn add_sized(&mut self, other: &UnlimInt, size: usize) -> &mut Self {
        let result = self.cadd_sized(other, size);
        self.replace_storage(result)
    }
}

// 实现减法
impl UnlimInt {
    pub fn csub(&self, other: &UnlimInt) -> UnlimInt {
        self.csub_sized(other, Operator::Sub.result_size(self, other))
    }

    /// Ripple borrow. A larger `other` wraps around modulo `2^size`.
    pub fn csub_sized(&self, other: &UnlimInt, size: usize) -> UnlimInt {
        if let Some(cached) = memo::lookup_value(CacheOp::Sub, self, other) {
            return cached;
        }

        let mut result = UnlimInt::new(size, self.negative);
        let mut borrow = false;
        for i in 0..size {
            let a = self.get_bit(i);
            let b = other.get_bit(i);
            result.put_bit(i, a ^ b ^ borrow);
            borrow = (!a && b) || (borrow && !(a ^ b));
        }

        memo::store_value(CacheOp::Sub, self, other, &result);
        result
    }

    pub fn sub(&mut self, other: &UnlimInt) -> &mut Self {
        let result = self.csub(other);
        self.replace_storage(result)
    }

    pub fn sub_sized(&mut self, other: &UnlimInt, size: usize) -> &mut Self {
        let result = self.csub_sized(other, size);
        self.replace_storage(result)
    }
}

// 实现乘法
impl UnlimInt {
    pub fn cmul(&self, other: &UnlimInt) -> UnlimInt {
        self.cmul_sized(other, Operator::Mul.result_size(self, other))
    }

    /// Shift and add: `other << i` is added for every set bit `i` of `self`.
    /// `size` is the starting capacity of the accumulator, each addition grows it as needed.
    pub fn cmul_sized(&self, other: &UnlimInt, size: usize) -> UnlimInt {
        if let Some(cached) = memo::lookup_value(CacheOp::Mul, self, other) {
            return cached;
        }

        let mut result = UnlimInt::new(size, self.negative);
        for i in 0..self.size {
            if self.get_bit(i) {
                let shifted = other.cshift_left(i);
                result.add(&shifted);
            }
        }

        memo::store_value(CacheOp::Mul, self, other, &result);
        result
    }

    pub fn mul(&mut self, other: &UnlimInt) -> &mut Self {
        let result = self.cmul(other);
        self.replace_storage(result)
    }

    pub fn mul_sized(&mut self, other: &UnlimInt, size: usize) -> &mut Self {
        let result = self.cmul_sized(other, size);
        self.replace_storage(result)
    }
}

// 实现乘方
impl UnlimInt {
    /// Multiplies `1` by `self` once per unit of `exponent`, so the cost grows with the
    /// exponent's value. The result is padded up to the default pow capacity, never cut.
    pub fn cpow(&self, exponent: &UnlimInt) -> Result<UnlimInt> {
        if let Some(cached) = memo::lookup_value(CacheOp::Pow, self, exponent) {
            return Ok(cached);
        }
        if exponent.negative {
            return Err(UnlimIntError::InvalidExponent);
        }

        let one = UnlimInt::from_number(1);
        let mut result = UnlimInt::from_number(1);
        let mut i = UnlimInt::from_number(0);
        while i.less_than(exponent) {
            result.mul(self);
            i.add(&one);
        }
        result.expand(Operator::Pow.result_size(self, exponent));

        memo::store_value(CacheOp::Pow, self, exponent, &result);
        Ok(result)
    }

    pub fn pow(&mut self, exponent: &UnlimInt) -> Result<&mut Self> {
        let result = self.cpow(exponent)?;
        Ok(self.replace_storage(result))
    }
}

enum DivStep {
    Done(UnlimInt, UnlimInt),
    /// `self - divisor * power`, still to be divided by `divisor`.
    Reduce { power: UnlimInt, rest: UnlimInt, divisor: UnlimInt },
}

// 实现除法
impl UnlimInt {
    /// Quotient and remainder of the magnitudes, both trimmed.
    ///
    /// Each round finds the largest `i` with `divisor * 2^i <= dividend` and carries on with the
    /// difference; the quotient is the sum of those powers of two. `2^i` comes from [`cpow`], so
    /// with the cache on each round also leaves its `-` and `^` entries, in that order, before
    /// the next round starts. Every round's result is cached under its own dividend.
    ///
    /// [`cpow`]: UnlimInt::cpow
    pub fn div_rem(&self, divisor: &UnlimInt) -> Result<(UnlimInt, UnlimInt)> {
        let mut pending: Vec<(UnlimInt, UnlimInt, UnlimInt)> = Vec::new();
        let mut dividend = self.clone();
        let mut keyed_divisor = divisor.clone();

        let (mut quotient, mut remainder) = loop {
            if let Some(cached) = memo::lookup_div_rem(&dividend, &keyed_divisor) {
                break cached;
            }
            match dividend.div_rem_step(&keyed_divisor)? {
                DivStep::Done(quotient, remainder) => break (quotient, remainder),
                DivStep::Reduce { power, rest, divisor } => {
                    pending.push((dividend, keyed_divisor, power));
                    dividend = rest;
                    keyed_divisor = divisor;
                }
            }
        };
        tracing::trace!(rounds = pending.len(), "division reduced");

        while let Some((dividend, divisor, power)) = pending.pop() {
            quotient = power.cadd(&quotient).ctrim();
            remainder = remainder.ctrim();
            memo::store_div_rem(&dividend, &divisor, &quotient, &remainder);
        }

        Ok((quotient, remainder))
    }

    fn div_rem_step(&self, divisor: &UnlimInt) -> Result<DivStep> {
        let dvsr = divisor.ctrim();

        if dvsr.is_zero() {
            return Err(UnlimIntError::DivisionByZero);
        }
        if self.is_zero() || dvsr.greater_than(self) {
            return Ok(DivStep::Done(UnlimInt::from_number(0), self.ctrim()));
        }
        if dvsr.equals(self) {
            let one = UnlimInt::from_number(if self.negative { -1 } else { 1 });
            return Ok(DivStep::Done(one, UnlimInt::from_number(0)));
        }
        if dvsr.equals(&UnlimInt::from_number(1)) {
            return Ok(DivStep::Done(self.clone(), UnlimInt::from_number(0)));
        }

        if self.size < FAST_PATH_BITS && dvsr.size < FAST_PATH_BITS {
            let q = self.to_big_int()? / dvsr.to_big_int()?;
            let quotient = UnlimInt::from_wide(q, false);
            let remainder = self.csub(&dvsr.cmul(&quotient));
            memo::store_div_rem(self, divisor, &quotient, &remainder);
            return Ok(DivStep::Done(quotient, remainder));
        }

        let mut temp = dvsr.clone();
        let mut exponent = 0;
        while temp.less_than(self) {
            temp.shift_left(1);
            exponent += 1;
        }
        if temp.greater_than(self) {
            temp.shift_right(1);
            exponent -= 1;
        }

        let rest = self.csub(&temp);
        let power = UnlimInt::from_number(2).cpow(&UnlimInt::from(exponent as u64))?;
        Ok(DivStep::Reduce { power, rest, divisor: dvsr })
    }

    pub fn div(&self, divisor: &UnlimInt) -> Result<UnlimInt> {
        Ok(self.div_rem(divisor)?.0)
    }

    pub fn rem(&self, divisor: &UnlimInt) -> Result<UnlimInt> {
        Ok(self.div_rem(divisor)?.1)
    }

    pub fn div_in_place(&mut self, divisor: &UnlimInt) -> Result<&mut Self> {
        let quotient = self.div(divisor)?;
        Ok(self.replace_storage(quotient))
    }

    pub fn rem_in_place(&mut self, divisor: &UnlimInt) -> Result<&mut Self> {
        let remainder = self.rem(divisor)?;
        Ok(self.replace_storage(remainder))
    }
}

// 实现位运算
impl UnlimInt {
    fn bitwise(&self, other: &UnlimInt, size: usize, op: impl Fn(bool, bool) -> bool) -> UnlimInt {
        let mut result = UnlimInt::new(size, self.negative);
        for i in 0..size {
            result.put_bit(i, op(self.get_bit(i), other.get_bit(i)));
        }
        result
    }

    pub fn cbit_and(&self, other: &UnlimInt) -> UnlimInt {
        self.cbit_and_sized(other, Operator::And.result_size(self, other))
    }

    pub fn cbit_and_sized(&self, other: &UnlimInt, size: usize) -> UnlimInt {
        self.bitwise(other, size, |a, b| a && b)
    }

    pub fn bit_and(&mut self, other: &UnlimInt) -> &mut Self {
        let result = self.cbit_and(other);
        self.replace_storage(result)
    }

    pub fn cbit_or(&self, other: &UnlimInt) -> UnlimInt {
        self.cbit_or_sized(other, Operator::Or.result_size(self, other))
    }

    pub fn cbit_or_sized(&self, other: &UnlimInt, size: usize) -> UnlimInt {
        self.bitwise(other, size, |a, b| a || b)
    }

    pub fn bit_or(&mut self, other: &UnlimInt) -> &mut Self {
        let result = self.cbit_or(other);
        self.replace_storage(result)
    }

    pub fn cbit_xor(&self, other: &UnlimInt) -> UnlimInt {
        self.cbit_xor_sized(other, Operator::Xor.result_size(self, other))
    }

    pub fn cbit_xor_sized(&self, other: &UnlimInt, size: usize) -> UnlimInt {
        self.bitwise(other, size, |a, b| a != b)
    }

    pub fn bit_xor(&mut self, other: &UnlimInt) -> &mut Self {
        let result = self.cbit_xor(other);
        self.replace_storage(result)
    }

    /// Flips every bit within the capacity, and the sign flag.
    pub fn cbit_not(&self) -> UnlimInt {
        let mut result = UnlimInt::new(self.size, !self.negative);
        for i in 0..self.size {
            result.put_bit(i, !self.get_bit(i));
        }
        result
    }

    pub fn bit_not(&mut self) -> &mut Self {
        *self = self.cbit_not();
        self
    }
}

// 实现移位
impl UnlimInt {
    /// Multiplies the magnitude by `2^count`, growing the capacity when the bits would not fit.
    pub fn shift_left(&mut self, count: usize) -> &mut Self {
        let needed = count + self.trimmed_size();
        if needed > self.size {
            self.expand(needed);
        }

        let byte_shift = count / 8;
        let bit_shift = count % 8;
        for i in (0..self.buf.len()).rev() {
            let mut byte = 0u8;
            if i >= byte_shift {
                let src = i - byte_shift;
                byte = self.buf[src] << bit_shift;
                if bit_shift > 0 && src > 0 {
                    byte |= self.buf[src - 1] >> (8 - bit_shift);
                }
            }
            self.buf[i] = byte;
        }
        self.clear_tail();
        self
    }

    pub fn cshift_left(&self, count: usize) -> UnlimInt {
        let mut result = self.clone();
        result.shift_left(count);
        result
    }

    /// Drops the low `count` bits. The capacity grows to `count` when it is smaller.
    pub fn shift_right(&mut self, count: usize) -> &mut Self {
        if count > self.size {
            self.expand(count);
        }

        let byte_shift = count / 8;
        let bit_shift = count % 8;
        let len = self.buf.len();
        for i in 0..len {
            let src = i + byte_shift;
            let mut byte = 0u8;
            if src < len {
                byte = self.buf[src] >> bit_shift;
                if bit_shift > 0 && src + 1 < len {
                    byte |= self.buf[src + 1] << (8 - bit_shift);
                }
            }
            self.buf[i] = byte;
        }
        self.clear_tail();
        self
    }

    pub fn cshift_right(&self, count: usize) -> UnlimInt {
        let mut result = self.clone();
        result.shift_right(count);
        result
    }
}
