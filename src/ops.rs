//! Operator sugar over the pure and mutating method pairs.
//!
//! Kept apart from `arith` so the inherent `add`/`sub`/`mul` methods are not shadowed by the
//! trait methods inside the engine.

use std::ops::{
    Add, AddAssign,
    Sub, SubAssign,
    Mul, MulAssign,
    BitAnd, BitAndAssign,
    BitOr, BitOrAssign,
    BitXor, BitXorAssign,
    Shl, ShlAssign,
    Shr, ShrAssign,
    Not, Neg,
};

use crate::UnlimInt;

macro_rules! impl_binary_op {
    ($($trait: ident, $method: ident, $assign_trait: ident, $assign_method: ident,
       $pure: ident, $mutating: ident);* $(;)?) => {
    $(
    impl $trait for &UnlimInt {
        type Output = UnlimInt;

        fn $method(self, rhs: Self) -> Self::Output {
            UnlimInt::$pure(self, rhs)
        }
    }

    impl $trait for UnlimInt {
        type Output = UnlimInt;

        fn $method(self, rhs: Self) -> Self::Output {
            UnlimInt::$pure(&self, &rhs)
        }
    }

    impl $assign_trait<&UnlimInt> for UnlimInt {
        fn $assign_method(&mut self, rhs: &UnlimInt) {
            UnlimInt::$mutating(self, rhs);
        }
    }

    impl $assign_trait for UnlimInt {
        fn $assign_method(&mut self, rhs: Self) {
            UnlimInt::$mutating(self, &rhs);
        }
    }
    )*
    };
}

impl_binary_op!(
    Add, add, AddAssign, add_assign, cadd, add;
    Sub, sub, SubAssign, sub_assign, csub, sub;
    Mul, mul, MulAssign, mul_assign, cmul, mul;
    BitAnd, bitand, BitAndAssign, bitand_assign, cbit_and, bit_and;
    BitOr, bitor, BitOrAssign, bitor_assign, cbit_or, bit_or;
    BitXor, bitxor, BitXorAssign, bitxor_assign, cbit_xor, bit_xor;
);

// 实现移位
impl Shl<usize> for &UnlimInt {
    type Output = UnlimInt;

    fn shl(self, count: usize) -> Self::Output {
        self.cshift_left(count)
    }
}

impl ShlAssign<usize> for UnlimInt {
    fn shl_assign(&mut self, count: usize) {
        self.shift_left(count);
    }
}

impl Shr<usize> for &UnlimInt {
    type Output = UnlimInt;

    fn shr(self, count: usize) -> Self::Output {
        self.cshift_right(count)
    }
}

impl ShrAssign<usize> for UnlimInt {
    fn shr_assign(&mut self, count: usize) {
        self.shift_right(count);
    }
}

// 取反
impl Not for &UnlimInt {
    type Output = UnlimInt;

    fn not(self) -> Self::Output {
        self.cbit_not()
    }
}

impl Neg for &UnlimInt {
    type Output = UnlimInt;

    fn neg(self) -> Self::Output {
        self.cnegate()
    }
}

impl Neg for UnlimInt {
    type Output = UnlimInt;

    fn neg(mut self) -> Self::Output {
        self.negate();
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::UnlimInt;

    #[test]
    fn test_operators() {
        let a: UnlimInt = 200u32.into();
        let b: UnlimInt = 56u32.into();
        assert_eq!((&a + &b).to_number().unwrap(), 256);
        assert_eq!((&a - &b).to_number().unwrap(), 144);
        assert_eq!((&a * &b).to_number().unwrap(), 11200);
        assert_eq!((&a & &b).to_number().unwrap(), 200 & 56);
        assert_eq!((&a | &b).to_number().unwrap(), 200 | 56);
        assert_eq!((&a ^ &b).to_number().unwrap(), 200 ^ 56);
        assert_eq!((&a << 3).to_number().unwrap(), 1600);
        assert_eq!((&a >> 3).to_number().unwrap(), 25);
        assert!((-&a).is_negative());
        assert!((!&a).is_negative());
        assert_eq!((a.clone() + b.clone()).to_number().unwrap(), 256);
    }

    #[test]
    fn test_assign_operators() {
        let mut a: UnlimInt = 10u32.into();
        a += UnlimInt::from_number(5);
        a *= &UnlimInt::from_number(3);
        a -= &UnlimInt::from_number(1);
        assert_eq!(a.to_number().unwrap(), 44);

        a <<= 2;
        assert_eq!(a.to_number().unwrap(), 176);
        a >>= 4;
        assert_eq!(a.to_number().unwrap(), 11);

        a |= UnlimInt::from_number(4);
        a &= UnlimInt::from_number(0b1110);
        a ^= UnlimInt::from_number(1);
        assert_eq!(a.to_number().unwrap(), 0b1111);
    }
}
