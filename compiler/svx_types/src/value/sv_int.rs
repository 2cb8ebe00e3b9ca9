//! Arbitrary-width two-state integers.

use std::fmt;

use smallvec::SmallVec;

use super::ValueError;

/// Widest vector the language allows.
pub const MAX_WIDTH: u32 = 1 << 24;

const WORD_BITS: u32 = 64;

/// A two-state integer of any width from 1 to [`MAX_WIDTH`] bits.
///
/// Bits are stored little-endian in 64-bit words. Bits above `width` in the
/// top word are always zero.
#[derive(Clone)]
pub struct SvInt {
    width: u32,
    signed: bool,
    words: SmallVec<[u64; 2]>,
}

fn word_count(width: u32) -> usize {
    width.div_ceil(WORD_BITS) as usize
}

impl SvInt {
    /// Create a `width`-bit integer holding the low bits of `value`.
    pub fn new(width: u32, value: u64, signed: bool) -> Result<Self, ValueError> {
        let mut result = Self::zero(width)?;
        result.words[0] = value;
        result.signed = signed;
        result.clear_unused_bits();
        Ok(result)
    }

    /// An all-zero unsigned integer.
    pub fn zero(width: u32) -> Result<Self, ValueError> {
        if width == 0 {
            return Err(ValueError::ZeroWidth);
        }
        if width > MAX_WIDTH {
            return Err(ValueError::WidthTooLarge { width });
        }
        Ok(SvInt {
            width,
            signed: false,
            words: SmallVec::from_elem(0, word_count(width)),
        })
    }

    /// A one-bit match result: `1'b1` or `1'b0`.
    pub fn logic(value: bool) -> Self {
        let mut words = SmallVec::new();
        words.push(u64::from(value));
        SvInt {
            width: 1,
            signed: false,
            words,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Same bits, reinterpreted with the given signedness.
    #[must_use]
    pub fn with_signed(mut self, signed: bool) -> Self {
        self.signed = signed;
        self
    }

    /// Value of bit `index`. Out-of-range bits read as zero.
    pub fn bit(&self, index: u32) -> bool {
        if index >= self.width {
            return false;
        }
        let word = self.words[(index / WORD_BITS) as usize];
        (word >> (index % WORD_BITS)) & 1 == 1
    }

    fn set_bit(&mut self, index: u32, value: bool) {
        let slot = &mut self.words[(index / WORD_BITS) as usize];
        let mask = 1u64 << (index % WORD_BITS);
        if value {
            *slot |= mask;
        } else {
            *slot &= !mask;
        }
    }

    fn clear_unused_bits(&mut self) {
        let used = self.width % WORD_BITS;
        if used != 0 {
            if let Some(top) = self.words.last_mut() {
                *top &= (1u64 << used) - 1;
            }
        }
    }

    /// Whether the sign bit is set on a signed value.
    pub fn is_negative(&self) -> bool {
        self.signed && self.bit(self.width - 1)
    }

    /// Any bit set.
    pub fn is_true(&self) -> bool {
        self.words.iter().any(|w| *w != 0)
    }

    /// Bits `[msb:lsb]` as a new unsigned integer.
    pub fn slice(&self, msb: u32, lsb: u32) -> Result<SvInt, ValueError> {
        if lsb > msb || msb >= self.width {
            return Err(ValueError::SliceOutOfRange {
                msb,
                lsb,
                width: self.width,
            });
        }
        let mut result = SvInt::zero(msb - lsb + 1)?;
        for i in 0..result.width {
            if self.bit(lsb + i) {
                result.set_bit(i, true);
            }
        }
        Ok(result)
    }

    /// Concatenate `parts` with the first part in the most significant bits.
    pub fn concat(parts: &[SvInt]) -> Result<SvInt, ValueError> {
        let total = parts.iter().map(|p| u64::from(p.width)).sum::<u64>();
        let total = u32::try_from(total).map_err(|_| ValueError::WidthTooLarge { width: u32::MAX })?;
        let mut result = SvInt::zero(total)?;
        let mut pos = total;
        for part in parts {
            pos -= part.width;
            for i in 0..part.width {
                if part.bit(i) {
                    result.set_bit(pos + i, true);
                }
            }
        }
        Ok(result)
    }

    /// Extend or truncate to `width` bits, sign-extending signed values.
    pub fn resize(&self, width: u32) -> Result<SvInt, ValueError> {
        self.extend_to(width, self.signed)
    }

    fn extend_to(&self, width: u32, sign_extend: bool) -> Result<SvInt, ValueError> {
        let mut result = SvInt::zero(width)?;
        result.signed = self.signed;
        let fill = sign_extend && self.bit(self.width - 1);
        for i in 0..width {
            let b = if i < self.width { self.bit(i) } else { fill };
            if b {
                result.set_bit(i, true);
            }
        }
        Ok(result)
    }

    /// The value as a `u64`, if every bit above 63 is clear.
    pub fn to_u64(&self) -> Option<u64> {
        if self.words[1..].iter().any(|w| *w != 0) {
            return None;
        }
        Some(self.words[0])
    }

    /// The value as an `i64`, honoring signedness.
    pub fn to_i64(&self) -> Option<i64> {
        if self.is_negative() {
            if self.width > 64 {
                // Every bit from 63 up must be a copy of the sign.
                return (63..self.width)
                    .all(|i| self.bit(i))
                    .then(|| self.words[0] as i64);
            }
            let extended = self.extend_to(64, true).ok()?;
            return Some(extended.words[0] as i64);
        }
        self.to_u64().and_then(|v| i64::try_from(v).ok())
    }

    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Ceiling of log2 of the unsigned value; zero for 0 and 1.
    pub fn clog2(&self) -> u32 {
        let highest = (0..self.width).rev().find(|i| self.bit(*i));
        match highest {
            None => 0,
            Some(top) => {
                let is_power_of_two = self.count_ones() == 1;
                if is_power_of_two {
                    top
                } else {
                    top + 1
                }
            }
        }
    }
}

/// Values of different widths are compared after extending both to the wider
/// width, sign-extending only when both operands are signed. That makes the
/// relation non-transitive across widths, so `SvInt` is not `Eq`.
impl PartialEq for SvInt {
    fn eq(&self, other: &Self) -> bool {
        if self.width == other.width {
            return self.words == other.words;
        }
        let width = self.width.max(other.width);
        let sign_extend = self.signed && other.signed;
        match (self.extend_to(width, sign_extend), other.extend_to(width, sign_extend)) {
            (Ok(a), Ok(b)) => a.words == b.words,
            _ => false,
        }
    }
}

impl fmt::Debug for SvInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for SvInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = if self.signed { "s" } else { "" };
        if self.is_negative() {
            if let Some(v) = self.to_i64() {
                return write!(f, "-{}'{s}d{}", self.width, v.unsigned_abs());
            }
        } else if let Some(v) = self.to_u64() {
            return write!(f, "{}'{s}d{v}", self.width);
        }
        write!(f, "{}'{s}h", self.width)?;
        for (i, word) in self.words.iter().rev().enumerate() {
            if i == 0 {
                write!(f, "{word:x}")?;
            } else {
                write!(f, "{word:016x}")?;
            }
        }
        Ok(())
    }
}
