//! The serialize/deserialize capability for storable element types.
//!
//! Memory models never reinterpret an element's in-memory layout. Instead
//! every storable type states its serialized width and converts to and from
//! a flat [`Bits`] vector explicitly.

use crate::bits::Bits;

/// Conversion between a typed value and its flat bit representation.
///
/// Implementations must satisfy two laws:
///
/// - `to_bits` returns exactly [`WIDTH`](Marshal::WIDTH) bits.
/// - `from_bits(&v.to_bits())` reproduces `v`'s serialized form:
///   `from_bits(&v.to_bits()).to_bits() == v.to_bits()`.
///
/// Composite implementations place their first component in the least
/// significant bits.
///
/// # Examples
///
/// ```
/// use membank_core::{Bits, Marshal};
///
/// let bits = 0x5634u16.to_bits();
/// assert_eq!(bits.width(), 16);
/// assert_eq!(u16::from_bits(&bits), 0x5634);
///
/// let pair = (0x34u8, 0x56u8).to_bits();
/// assert_eq!(pair.to_u64(), 0x5634);
/// ```
pub trait Marshal: Sized {
    /// Serialized width in bits.
    const WIDTH: usize;

    /// Serialize into exactly `WIDTH` bits.
    fn to_bits(&self) -> Bits;

    /// Deserialize from exactly `WIDTH` bits.
    fn from_bits(bits: &Bits) -> Self;
}

macro_rules! impl_marshal_unsigned {
    ($($t:ty),*) => {
        $(
            impl Marshal for $t {
                const WIDTH: usize = <$t>::BITS as usize;

                fn to_bits(&self) -> Bits {
                    Bits::from_u128(Self::WIDTH, *self as u128)
                }

                fn from_bits(bits: &Bits) -> Self {
                    debug_assert_eq!(bits.width(), Self::WIDTH);
                    bits.to_u128() as $t
                }
            }
        )*
    };
}

macro_rules! impl_marshal_signed {
    ($($t:ty => $u:ty),*) => {
        $(
            impl Marshal for $t {
                const WIDTH: usize = <$t>::BITS as usize;

                fn to_bits(&self) -> Bits {
                    (*self as $u).to_bits()
                }

                fn from_bits(bits: &Bits) -> Self {
                    <$u>::from_bits(bits) as $t
                }
            }
        )*
    };
}

impl_marshal_unsigned!(u8, u16, u32, u64, u128);
impl_marshal_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128);

impl Marshal for bool {
    const WIDTH: usize = 1;

    fn to_bits(&self) -> Bits {
        Bits::from_u64(1, *self as u64)
    }

    fn from_bits(bits: &Bits) -> Self {
        debug_assert_eq!(bits.width(), 1);
        bits.bit(0)
    }
}

impl Marshal for f32 {
    const WIDTH: usize = 32;

    fn to_bits(&self) -> Bits {
        f32::to_bits(*self).to_bits()
    }

    fn from_bits(bits: &Bits) -> Self {
        f32::from_bits(u32::from_bits(bits))
    }
}

impl Marshal for f64 {
    const WIDTH: usize = 64;

    fn to_bits(&self) -> Bits {
        f64::to_bits(*self).to_bits()
    }

    fn from_bits(bits: &Bits) -> Self {
        f64::from_bits(u64::from_bits(bits))
    }
}

impl<T: Marshal, const N: usize> Marshal for [T; N] {
    const WIDTH: usize = T::WIDTH * N;

    fn to_bits(&self) -> Bits {
        let parts: Vec<Bits> = self.iter().map(Marshal::to_bits).collect();
        Bits::concat(&parts)
    }

    fn from_bits(bits: &Bits) -> Self {
        debug_assert_eq!(bits.width(), Self::WIDTH);
        std::array::from_fn(|i| T::from_bits(&bits.range(i * T::WIDTH, T::WIDTH)))
    }
}

macro_rules! impl_marshal_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Marshal),+> Marshal for ($($name,)+) {
            const WIDTH: usize = 0 $(+ $name::WIDTH)+;

            fn to_bits(&self) -> Bits {
                Bits::concat([$(&self.$idx.to_bits()),+])
            }

            #[allow(unused_assignments)]
            fn from_bits(bits: &Bits) -> Self {
                debug_assert_eq!(bits.width(), Self::WIDTH);
                let mut lo = 0;
                ($(
                    {
                        let part = $name::from_bits(&bits.range(lo, $name::WIDTH));
                        lo += $name::WIDTH;
                        part
                    },
                )+)
            }
        }
    };
}

impl_marshal_tuple!(A 0, B 1);
impl_marshal_tuple!(A 0, B 1, C 2);
