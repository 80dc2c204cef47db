//! Fixed-width bit vectors.
//!
//! [`Bits`] is the serialized form of every stored word and slice. It is
//! little-endian: bit 0 is the least significant bit of the first backing
//! word. Widths up to 128 bits are stored inline without heap allocation.

use std::fmt;

use smallvec::{smallvec, SmallVec};

const WORD_BITS: usize = 64;

/// Number of backing `u64` words needed for `width` bits.
fn word_count(width: usize) -> usize {
    width.div_ceil(WORD_BITS)
}

/// A mask with the low `n` bits set (`n <= 64`).
fn low_mask(n: usize) -> u64 {
    if n >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// A fixed-width bit vector.
///
/// The width is fixed at construction. All bits at positions `>= width`
/// are kept zero, so two vectors of the same width compare equal exactly
/// when their bit patterns match.
///
/// # Examples
///
/// ```
/// use membank_core::Bits;
///
/// let word = Bits::from_u64(16, 0x1234);
/// assert_eq!(word.range(0, 8).to_u64(), 0x34);
/// assert_eq!(word.range(8, 8).to_u64(), 0x12);
/// assert_eq!(format!("{word}"), "16'h1234");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Bits {
    width: usize,
    words: SmallVec<[u64; 2]>,
}

impl Bits {
    /// An all-zero vector of the given width.
    pub fn zero(width: usize) -> Self {
        Self {
            width,
            words: smallvec![0; word_count(width)],
        }
    }

    /// An all-ones vector of the given width.
    pub fn ones(width: usize) -> Self {
        let mut bits = Self {
            width,
            words: smallvec![u64::MAX; word_count(width)],
        };
        bits.trim();
        bits
    }

    /// Build a vector from the low `width` bits of `value`.
    ///
    /// Bits of `value` above `width` are discarded; positions above 64
    /// are zero.
    pub fn from_u64(width: usize, value: u64) -> Self {
        let mut bits = Self::zero(width);
        if let Some(first) = bits.words.first_mut() {
            *first = value;
        }
        bits.trim();
        bits
    }

    /// Build a vector from the low `width` bits of `value`.
    pub fn from_u128(width: usize, value: u128) -> Self {
        let mut bits = Self::zero(width);
        for (i, word) in bits.words.iter_mut().take(2).enumerate() {
            *word = (value >> (i * WORD_BITS)) as u64;
        }
        bits.trim();
        bits
    }

    /// Concatenate `parts` with the first part in the least significant bits.
    pub fn concat<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a Bits>,
    {
        let parts: SmallVec<[&Bits; 8]> = parts.into_iter().collect();
        let width = parts.iter().map(|p| p.width).sum::<usize>();
        let mut out = Self::zero(width);
        let mut lo = 0;
        for part in parts {
            out.set_range(lo, part);
            lo += part.width;
        }
        out
    }

    /// Width in bits.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The backing little-endian words.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Read bit `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= width`.
    pub fn bit(&self, i: usize) -> bool {
        assert!(i < self.width, "bit {i} out of range for width {}", self.width);
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    /// Set bit `i` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= width`.
    pub fn set_bit(&mut self, i: usize, value: bool) {
        assert!(i < self.width, "bit {i} out of range for width {}", self.width);
        let word = &mut self.words[i / WORD_BITS];
        let m = 1u64 << (i % WORD_BITS);
        if value {
            *word |= m;
        } else {
            *word &= !m;
        }
    }

    /// The low 64 bits as an integer.
    pub fn to_u64(&self) -> u64 {
        self.words.first().copied().unwrap_or(0)
    }

    /// The low 128 bits as an integer.
    pub fn to_u128(&self) -> u128 {
        self.words
            .iter()
            .take(2)
            .enumerate()
            .fold(0u128, |acc, (i, &w)| acc | (w as u128) << (i * WORD_BITS))
    }

    /// True if every bit is clear.
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Extract `width` bits starting at bit `lo`.
    ///
    /// # Panics
    ///
    /// Panics if `lo + width` exceeds this vector's width.
    pub fn range(&self, lo: usize, width: usize) -> Bits {
        assert!(
            lo + width <= self.width,
            "bit range {lo}..{} exceeds width {}",
            lo + width,
            self.width
        );
        let mut out = Bits::zero(width);
        let mut done = 0;
        while done < width {
            let n = (width - done).min(WORD_BITS);
            out.words[done / WORD_BITS] = self.chunk(lo + done, n);
            done += n;
        }
        out
    }

    /// Overwrite the bits starting at `lo` with `src`.
    ///
    /// Bits outside `lo..lo + src.width()` are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if `lo + src.width()` exceeds this vector's width.
    pub fn set_range(&mut self, lo: usize, src: &Bits) {
        assert!(
            lo + src.width <= self.width,
            "bit range {lo}..{} exceeds width {}",
            lo + src.width,
            self.width
        );
        let mut done = 0;
        while done < src.width {
            let n = (src.width - done).min(WORD_BITS);
            self.put_chunk(lo + done, n, src.words[done / WORD_BITS]);
            done += n;
        }
    }

    /// Split into consecutive pieces of `width` bits, least significant first.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero or does not divide this vector's width.
    pub fn chunks(&self, width: usize) -> impl Iterator<Item = Bits> + '_ {
        assert!(
            width > 0 && self.width % width == 0,
            "chunk width {width} does not divide width {}",
            self.width
        );
        (0..self.width / width).map(move |i| self.range(i * width, width))
    }

    /// Read `n <= 64` bits starting at `lo`.
    fn chunk(&self, lo: usize, n: usize) -> u64 {
        if n == 0 {
            return 0;
        }
        let idx = lo / WORD_BITS;
        let sh = lo % WORD_BITS;
        let mut v = self.words[idx] >> sh;
        if sh != 0 && sh + n > WORD_BITS {
            v |= self.words[idx + 1] << (WORD_BITS - sh);
        }
        v & low_mask(n)
    }

    /// Write the low `n <= 64` bits of `value` starting at `lo`.
    fn put_chunk(&mut self, lo: usize, n: usize, value: u64) {
        if n == 0 {
            return;
        }
        let value = value & low_mask(n);
        let idx = lo / WORD_BITS;
        let sh = lo % WORD_BITS;
        let m = low_mask(n) << sh;
        self.words[idx] = (self.words[idx] & !m) | (value << sh);
        if sh != 0 && sh + n > WORD_BITS {
            let hm = low_mask(sh + n - WORD_BITS);
            self.words[idx + 1] = (self.words[idx + 1] & !hm) | ((value >> (WORD_BITS - sh)) & hm);
        }
    }

    /// Clear the bits above `width` in the last backing word.
    fn trim(&mut self) {
        let rem = self.width % WORD_BITS;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= low_mask(rem);
            }
        }
    }
}

impl fmt::LowerHex for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        let digits = self.width.div_ceil(4).max(1);
        for d in (0..digits).rev() {
            let lo = d * 4;
            let n = self.width.saturating_sub(lo).min(4);
            write!(f, "{:x}", self.chunk(lo, n))?;
        }
        Ok(())
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'h{:x}", self.width, self)
    }
}

impl fmt::Debug for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bits({self})")
    }
}
