//! Conversions between `UnlimInt` and text.
//!
//! Output supports bases 2 through 36 and 64, input only bases 2, 10 and 16.

use std::any::Any;
use std::collections::HashSet;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::UnlimInt;
use crate::errors::{Result, UnlimIntError};
use crate::unlim_num_constants::*;

// 实现打印
impl UnlimInt {
    /// Renders the value in `base`.
    ///
    /// * 2: bits high to low, negative values prefixed with `"- "`.
    /// * 16: lowercase hex, negative values prefixed with `"-"`.
    /// * 64: standard base64 of the raw buffer. No sign.
    /// * anything else in 3..=36: repeated division, digits `0-9a-z`.
    pub fn to_string_radix(&self, base: u32) -> Result<String> {
        if base < MIN_RADIX || (base > MAX_RADIX && base != BASE64_RADIX) {
            return Err(UnlimIntError::InvalidBase(base));
        }

        match base {
            2 => {
                let bits: String = self.buf.iter().rev().map(|byte| format!("{:08b}", byte)).collect();
                let digits = strip_leading_zeros(&bits);
                Ok(if self.negative { format!("- {}", digits) } else { digits.to_string() })
            }
            16 => {
                let hex = hex::encode(self.buf.iter().rev().copied().collect::<Vec<u8>>());
                let digits = strip_leading_zeros(&hex);
                Ok(if self.negative { format!("-{}", digits) } else { digits.to_string() })
            }
            64 => Ok(STANDARD.encode(&self.buf)),
            _ => self.to_string_divided(base),
        }
    }

    fn to_string_divided(&self, base: u32) -> Result<String> {
        let radix = UnlimInt::from(base);
        let mut digits: Vec<char> = Vec::new();
        let mut seen: HashSet<(String, String, String)> = HashSet::new();
        let mut temp = self.clone();

        while !temp.is_zero() {
            let (quotient, remainder) = temp.div_rem(&radix)?;

            let state = (
                temp.to_string_radix(2)?,
                quotient.to_string_radix(2)?,
                remainder.to_string_radix(2)?,
            );
            if !seen.insert(state) {
                tracing::warn!(base, "loop detected while converting to base {}", base);
            }

            digits.push(DIGITS[remainder.to_number()? as usize]);
            temp = quotient;
        }

        let mut result = String::with_capacity(digits.len() + 1);
        if self.negative {
            result.push('-');
        }
        if digits.is_empty() {
            result.push('0');
        }
        result.extend(digits.iter().rev());
        Ok(result)
    }

    /// Number of digits a value of this capacity can take in `base`.
    pub fn string_size(&self, base: u32) -> Result<usize> {
        if !(MIN_RADIX..=MAX_RADIX).contains(&base) {
            return Err(UnlimIntError::InvalidBase(base));
        }
        Ok((self.size as f64 * (base as f64).log2()).ceil() as usize)
    }
}

fn strip_leading_zeros(digits: &str) -> &str {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        "0"
    } else {
        stripped
    }
}

// 实现解析
impl UnlimInt {
    /// Parses bases 2, 10 and 16, with an optional leading `-`.
    pub fn from_str_radix(value: &str, base: u32) -> Result<UnlimInt> {
        if !matches!(base, 2 | 10 | 16) {
            return Err(UnlimIntError::InvalidBase(base));
        }

        let (negative, digits) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value),
        };

        match base {
            2 => UnlimInt::parse_binary(digits, negative, value.len()),
            10 => UnlimInt::parse_decimal(digits, negative),
            _ => UnlimInt::parse_hex(digits, negative),
        }
    }

    /// `size` is the length of the whole text, sign included, so `"-101"` gets 4 bits and
    /// `"- 101"` gets 5.
    fn parse_binary(digits: &str, negative: bool, size: usize) -> Result<UnlimInt> {
        // base 2 output writes negative values as "- 101"
        let digits = if negative { digits.strip_prefix(' ').unwrap_or(digits) } else { digits };

        let mut result = UnlimInt::new(size, negative);
        for (i, c) in digits.chars().rev().enumerate() {
            match c {
                '0' => {}
                '1' => result.set_bit(i, true)?,
                _ => return Err(UnlimIntError::InvalidDigit(c, 2)),
            }
        }
        Ok(result)
    }

    /// `sum(digit * 10^position)` from the least significant digit up.
    fn parse_decimal(digits: &str, negative: bool) -> Result<UnlimInt> {
        let ten = UnlimInt::from_number(10);
        let mut result = UnlimInt::from_number(0);
        let mut multiplier = UnlimInt::from_number(1);

        for c in digits.chars().rev() {
            let digit = c.to_digit(10).ok_or(UnlimIntError::InvalidDigit(c, 10))?;
            let mut digit_value = UnlimInt::from(digit);
            digit_value.mul(&multiplier);
            result.add(&digit_value);
            multiplier.mul(&ten);
        }

        if negative {
            result = UnlimInt::from_str_radix(&format!("-{}", result.to_string_radix(2)?), 2)?;
        }
        Ok(result)
    }

    fn parse_hex(digits: &str, negative: bool) -> Result<UnlimInt> {
        let mut result = UnlimInt::new(digits.len() * 4, false);
        for (i, c) in digits.chars().rev().enumerate() {
            let nibble = c.to_digit(16).ok_or(UnlimIntError::InvalidDigit(c, 16))?;
            for j in 0..4 {
                if nibble & (1u32 << j) != 0 {
                    result.set_bit(i * 4 + j, true)?;
                }
            }
        }

        // normalize through the binary text
        let bits = result.to_string_radix(2)?;
        result = if bits == "0" {
            UnlimInt::from_number(0)
        } else {
            UnlimInt::from_str_radix(&bits, 2)?
        };
        if negative {
            result = UnlimInt::from_str_radix(&format!("-{}", result.to_string_radix(2)?), 2)?;
        }
        Ok(result)
    }

    pub fn from_hex(value: &str) -> Result<UnlimInt> {
        UnlimInt::from_str_radix(value, 16)
    }

    pub fn from_decimal(value: &str) -> Result<UnlimInt> {
        UnlimInt::from_str_radix(value, 10)
    }

    pub fn from_binary(value: &str) -> Result<UnlimInt> {
        UnlimInt::from_str_radix(value, 2)
    }

    /// Uses `base` when given, otherwise reads a `0x` or `0b` prefix and falls back to decimal.
    pub fn parse(value: &str, base: Option<u32>) -> Result<UnlimInt> {
        if let Some(base) = base {
            return UnlimInt::from_str_radix(value, base);
        }
        if let Some(hex) = value.strip_prefix("0x") {
            UnlimInt::from_hex(hex)
        } else if let Some(binary) = value.strip_prefix("0b") {
            UnlimInt::from_binary(binary)
        } else {
            UnlimInt::from_decimal(value)
        }
    }

    /// Builds a value from whatever the caller holds: `i32`, `i64`, byte buffers
    /// (`Vec<u8>`, `&[u8]`, always non-negative) or strings (`String`, `&str`, read by [`parse`]).
    ///
    /// [`parse`]: UnlimInt::parse
    pub fn from_any(value: &dyn Any, base: Option<u32>) -> Result<UnlimInt> {
        if let Some(number) = value.downcast_ref::<i32>() {
            Ok(UnlimInt::from_number(*number))
        } else if let Some(number) = value.downcast_ref::<i64>() {
            Ok(UnlimInt::from_big_int(*number))
        } else if let Some(bytes) = value.downcast_ref::<Vec<u8>>() {
            Ok(UnlimInt::from_buffer(bytes, false))
        } else if let Some(bytes) = value.downcast_ref::<&[u8]>() {
            Ok(UnlimInt::from_buffer(bytes, false))
        } else if let Some(text) = value.downcast_ref::<String>() {
            UnlimInt::parse(text, base)
        } else if let Some(text) = value.downcast_ref::<&str>() {
            UnlimInt::parse(text, base)
        } else {
            Err(UnlimIntError::InvalidInputType)
        }
    }
}

impl FromStr for UnlimInt {
    type Err = UnlimIntError;

    fn from_str(s: &str) -> Result<Self> {
        UnlimInt::parse(s, None)
    }
}

impl TryFrom<&str> for UnlimInt {
    type Error = UnlimIntError;

    fn try_from(value: &str) -> Result<Self> {
        UnlimInt::parse(value, None)
    }
}
