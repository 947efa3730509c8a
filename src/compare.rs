//! Magnitude ordering. The sign flag is never consulted: `-5` and `5` are equal here,
//! and callers that need signed ordering combine the result with `is_negative` themselves.

use std::cmp::{Ord, Ordering, PartialEq, PartialOrd};

use crate::UnlimInt;

impl UnlimInt {
    /// Index of the highest set bit, `None` for zero.
    pub fn msb(&self) -> Option<usize> {
        self.buf
            .iter()
            .enumerate()
            .rev()
            .find(|(_, byte)| **byte != 0)
            .map(|(i, byte)| i * 8 + 7 - byte.leading_zeros() as usize)
    }

    /// Compares the highest set bits first, then scans down to the first differing bit.
    pub fn compare(&self, other: &UnlimInt) -> Ordering {
        let self_msb = self.msb();
        let other_msb = other.msb();
        match self_msb.cmp(&other_msb) {
            Ordering::Equal => {}
            ord => return ord,
        }

        let top = match self_msb {
            Some(bit) => bit / 8,
            None => return Ordering::Equal,
        };
        for i in (0..=top).rev() {
            let a = self.get_byte(i).unwrap_or(0);
            let b = other.get_byte(i).unwrap_or(0);
            if a != b {
                return a.cmp(&b);
            }
        }
        Ordering::Equal
    }

    /// Same trimmed size and same bits.
    pub fn equals(&self, other: &UnlimInt) -> bool {
        self.trimmed_size() == other.trimmed_size() && self.compare(other).is_eq()
    }

    pub fn greater_than(&self, other: &UnlimInt) -> bool {
        self.compare(other).is_gt()
    }

    pub fn less_than(&self, other: &UnlimInt) -> bool {
        self.compare(other).is_lt()
    }

    pub fn greater_than_or_equal_to(&self, other: &UnlimInt) -> bool {
        self.compare(other).is_ge()
    }

    pub fn less_than_or_equal_to(&self, other: &UnlimInt) -> bool {
        self.compare(other).is_le()
    }
}

impl PartialEq for UnlimInt {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}
impl Eq for UnlimInt {}

impl PartialOrd for UnlimInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UnlimInt {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}
