use lazy_static::*;

use crate::UnlimInt;
use crate::unlim_num_constants::*;

lazy_static! {
    pub static ref POS_CACHE: Vec<UnlimInt> = (0..=MAX_CONSTANT)
        .map(|n| UnlimInt::from_magnitude(n as u64, false))
        .collect();
    pub static ref NEG_CACHE: Vec<UnlimInt> = (0..=MAX_CONSTANT)
        .map(|n| UnlimInt::from_magnitude(n as u64, true))
        .collect();
}

/// Clone of a tabled small value, `None` when `magnitude` is above [`MAX_CONSTANT`].
pub fn small_value(magnitude: u64, negative: bool) -> Option<UnlimInt> {
    let table: &Vec<UnlimInt> = if negative { &NEG_CACHE } else { &POS_CACHE };
    table.get(usize::try_from(magnitude).ok()?).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values() {
        let five = small_value(5, false).unwrap();
        assert_eq!(five.capacity(), 3);
        assert_eq!(five.to_number().unwrap(), 5);
        assert!(!five.is_negative());

        let minus_sixteen = small_value(16, true).unwrap();
        assert_eq!(minus_sixteen.capacity(), 5);
        assert!(minus_sixteen.is_negative());

        assert!(small_value(17, false).is_none());
        assert_eq!(small_value(0, false).unwrap().capacity(), 0);
    }
}
