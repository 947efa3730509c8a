//! Error type shared by every fallible `UnlimInt` operation.

use thiserror::Error as ThisError;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, UnlimIntError>;

/// Everything that can go wrong inside the engine.
///
/// Failures are immediate: nothing is retried and no partial result is
/// returned. Pure operations leave their operands untouched.
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[non_exhaustive]
pub enum UnlimIntError {
    /// A bit was written at or past the value's capacity.
    #[error("Index {index} is out of bounds, size is {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// The divisor's trimmed magnitude is zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// The exponent carries the negative sign flag.
    #[error("Exponent must be positive")]
    InvalidExponent,

    /// The value does not fit the requested native width.
    #[error("Number overflow: size {size} exceeds {max} bits")]
    Overflow { size: usize, max: usize },

    /// The base is outside what the called conversion supports.
    #[error("Unsupported base {0}")]
    InvalidBase(u32),

    /// A character is not a digit of the given base.
    #[error("Invalid digit {0:?} for base {1}")]
    InvalidDigit(char, u32),

    /// The generic constructor was handed a type it cannot read.
    #[error("Invalid input type")]
    InvalidInputType,
}
