//! Bitmask storage for per-channel flags.

use core::fmt::Debug;
use core::ops::{BitAnd, BitOr, BitXor, Not};

/// Unsigned integer used to pack one flag per channel.
///
/// Pick the narrowest type that holds all channels: `u8` for up to 8 inputs,
/// `u16` for 16, `u32` for 32 and `u64` for 64.
pub trait BitMask:
    Copy
    + Eq
    + Debug
    + Default
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
{
    /// All bits clear.
    const EMPTY: Self;

    /// Number of channels this mask can hold.
    const BITS: usize;

    /// Returns a mask with only bit `idx` set.
    fn bit(idx: usize) -> Self;

    /// Returns true if bit `idx` is set.
    #[inline]
    fn is_set(self, idx: usize) -> bool {
        self & Self::bit(idx) != Self::EMPTY
    }

    /// Returns a copy with bit `idx` set.
    #[inline]
    fn with(self, idx: usize) -> Self {
        self | Self::bit(idx)
    }

    /// Returns a copy with bit `idx` cleared.
    #[inline]
    fn without(self, idx: usize) -> Self {
        self & !Self::bit(idx)
    }

    /// Index of the lowest set bit, if any.
    fn lowest(self) -> Option<usize>;
}

macro_rules! impl_bitmask {
    ($($ty:ty),*) => {
        $(
            impl BitMask for $ty {
                const EMPTY: Self = 0;
                const BITS: usize = <$ty>::BITS as usize;

                #[inline]
                fn bit(idx: usize) -> Self {
                    1 << idx
                }

                #[inline]
                fn lowest(self) -> Option<usize> {
                    if self == 0 {
                        None
                    } else {
                        Some(self.trailing_zeros() as usize)
                    }
                }
            }
        )*
    };
}

impl_bitmask!(u8, u16, u32, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_helpers_touch_only_the_addressed_channel() {
        let mask = 0u8.with(3).with(5);
        assert_eq!(mask, 0b0010_1000);
        assert!(mask.is_set(3));
        assert!(!mask.is_set(4));
        assert_eq!(mask.without(3), 0b0010_0000);
    }

    #[test]
    fn lowest_finds_first_set_bit() {
        assert_eq!(0u16.lowest(), None);
        assert_eq!(0b1000_0000_0000_0100u16.lowest(), Some(2));
        assert_eq!(u64::bit(63).lowest(), Some(63));
    }

    #[test]
    fn widths_match_integer_types() {
        assert_eq!(<u8 as BitMask>::BITS, 8);
        assert_eq!(<u16 as BitMask>::BITS, 16);
        assert_eq!(<u32 as BitMask>::BITS, 32);
        assert_eq!(<u64 as BitMask>::BITS, 64);
    }
}
