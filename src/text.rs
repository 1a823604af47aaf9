use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use crate::{Error, Result};

/// A measure of text length. Also, equivalently, an offset from the
/// beginning of text, in bytes, never chars.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextSize {
    raw: u32,
}

impl TextSize {
    /// Creates a new size from a raw byte count.
    #[inline]
    pub const fn new(raw: u32) -> TextSize {
        TextSize { raw }
    }

    /// The underlying byte count.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.raw
    }

    /// The size of `text`, in bytes.
    ///
    /// # Panics
    ///
    /// Panics if the length does not fit in `u32`.
    #[inline]
    pub fn of(text: &str) -> TextSize {
        let raw = u32::try_from(text.len()).unwrap_or_else(|_| {
            panic!("text length {} does not fit in TextSize", text.len())
        });
        TextSize { raw }
    }

    /// Adds, failing with [`Error::Overflow`] past `u32::MAX`.
    #[inline]
    pub fn try_add(self, rhs: TextSize) -> Result<TextSize> {
        match self.raw.checked_add(rhs.raw) {
            Some(raw) => Ok(TextSize { raw }),
            None => Err(Error::Overflow),
        }
    }

    /// Subtracts, failing with [`Error::Underflow`] below zero.
    #[inline]
    pub fn try_sub(self, rhs: TextSize) -> Result<TextSize> {
        match self.raw.checked_sub(rhs.raw) {
            Some(raw) => Ok(TextSize { raw }),
            None => Err(Error::Underflow),
        }
    }
}

impl From<u32> for TextSize {
    #[inline]
    fn from(raw: u32) -> TextSize {
        TextSize::new(raw)
    }
}

impl From<TextSize> for u32 {
    #[inline]
    fn from(size: TextSize) -> u32 {
        size.raw
    }
}

impl From<TextSize> for usize {
    #[inline]
    fn from(size: TextSize) -> usize {
        size.raw as usize
    }
}

impl Add for TextSize {
    type Output = TextSize;
    #[inline]
    fn add(self, rhs: TextSize) -> TextSize {
        TextSize::new(self.raw + rhs.raw)
    }
}

impl AddAssign for TextSize {
    #[inline]
    fn add_assign(&mut self, rhs: TextSize) {
        *self = *self + rhs;
    }
}

impl Sub for TextSize {
    type Output = TextSize;
    #[inline]
    fn sub(self, rhs: TextSize) -> TextSize {
        TextSize::new(self.raw - rhs.raw)
    }
}

impl SubAssign for TextSize {
    #[inline]
    fn sub_assign(&mut self, rhs: TextSize) {
        *self = *self - rhs;
    }
}

impl fmt::Debug for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl fmt::Display for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// A half-open `[start, end)` span of text.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextRange {
    start: TextSize,
    end: TextSize,
}

impl TextRange {
    /// Creates a range, failing with [`Error::InvalidRange`] when
    /// `start > end`.
    #[inline]
    pub fn new(start: TextSize, end: TextSize) -> Result<TextRange> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(TextRange { start, end })
    }

    /// The range `[offset, offset + len)`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` overflows `u32`.
    #[inline]
    pub fn at(offset: TextSize, len: TextSize) -> TextRange {
        TextRange { start: offset, end: offset + len }
    }

    /// The empty range `[offset, offset)`.
    #[inline]
    pub const fn empty(offset: TextSize) -> TextRange {
        TextRange { start: offset, end: offset }
    }

    /// Start offset, inclusive.
    #[inline]
    pub const fn start(self) -> TextSize {
        self.start
    }

    /// End offset, exclusive.
    #[inline]
    pub const fn end(self) -> TextSize {
        self.end
    }

    /// Length of the range.
    #[inline]
    pub fn len(self) -> TextSize {
        self.end - self.start
    }

    /// True iff the range covers no text.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// True iff `offset` lies inside the range.
    ///
    /// Half-open semantics: `start` is in, `end` is not, and an empty
    /// range contains no offset at all.
    #[inline]
    pub fn contains(self, offset: TextSize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// True iff `other` lies entirely inside the range. An empty `other`
    /// on the boundary counts as contained.
    #[inline]
    pub fn contains_range(self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start.raw(), self.end.raw())
    }
}
