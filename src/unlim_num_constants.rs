pub const DIGITS: [char; 36] = [
    '0' , '1' , '2' , '3' , '4' , '5' ,
    '6' , '7' , '8' , '9' , 'a' , 'b' ,
    'c' , 'd' , 'e' , 'f' , 'g' , 'h' ,
    'i' , 'j' , 'k' , 'l' , 'm' , 'n' ,
    'o' , 'p' , 'q' , 'r' , 's' , 't' ,
    'u' , 'v' , 'w' , 'x' , 'y' , 'z'
];

/// Largest magnitude kept in the small value table.
pub const MAX_CONSTANT: usize = 16;

/// Widest value `to_number` will export.
pub const NUMBER_BITS: usize = 32;

/// Widest value `to_big_int` will export, also the capacity `from_big_int` starts from.
pub const BIG_INT_BITS: usize = 64;

/// Division hands off to native integers when both capacities are below this.
pub const FAST_PATH_BITS: usize = 32;

pub const DEFAULT_CACHE_SIZE: usize = 1000;

pub const MIN_RADIX: u32 = 2;

pub const MAX_RADIX: u32 = 36;

pub const BASE64_RADIX: u32 = 64;
