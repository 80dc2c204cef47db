//! Element types with non-trivial defaults and widths.
//!
//! - [`Rgb`]: three bytes, 24 bits, default is not all-zero.
//! - [`Tag12`]: a 12-bit tag, so it splits evenly into 2, 3, 4, 6 or 12
//!   slices but never into bytes.

use membank_core::{Bits, Marshal};

/// A 24-bit colour; `r` occupies the low byte.
///
/// `Default` is `(0xAA, 0x55, 0x0F)` so that a freshly constructed memory
/// is distinguishable from a cleared one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::new(0xAA, 0x55, 0x0F)
    }
}

impl Marshal for Rgb {
    const WIDTH: usize = 24;

    fn to_bits(&self) -> Bits {
        Bits::concat([&self.r.to_bits(), &self.g.to_bits(), &self.b.to_bits()])
    }

    fn from_bits(bits: &Bits) -> Self {
        Self {
            r: u8::from_bits(&bits.range(0, 8)),
            g: u8::from_bits(&bits.range(8, 8)),
            b: u8::from_bits(&bits.range(16, 8)),
        }
    }
}

/// A 12-bit tag. Only the low 12 bits of the inner value are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag12(pub u16);

impl Tag12 {
    pub const MASK: u16 = 0x0FFF;
}

impl Default for Tag12 {
    fn default() -> Self {
        Tag12(0x5A5)
    }
}

impl Marshal for Tag12 {
    const WIDTH: usize = 12;

    fn to_bits(&self) -> Bits {
        Bits::from_u64(12, u64::from(self.0 & Self::MASK))
    }

    fn from_bits(bits: &Bits) -> Self {
        Tag12(bits.to_u64() as u16 & Self::MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_red_is_low_byte() {
        assert_eq!(Rgb::new(0x01, 0x02, 0x03).to_bits().to_u64(), 0x03_0201);
        assert_eq!(Rgb::default().to_bits().to_u64(), 0x0F_55AA);
    }

    #[test]
    fn tag12_drops_high_bits() {
        assert_eq!(Tag12(0xFABC).to_bits().to_u64(), 0xABC);
        assert_eq!(Tag12::from_bits(&Bits::from_u64(12, 0xABC)), Tag12(0xABC));
    }
}
