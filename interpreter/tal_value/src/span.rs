//! Index spans over container content.

use crate::errors::{range_error, ScriptResult};

/// A contiguous run of elements, bytes, or characters inside a container.
///
/// Spans are 1-indexed and inclusive on both ends, matching how chunk
/// expressions address content ("items 2 to 4"). A span is validated
/// against the owning container's current length before every use;
/// out-of-range spans are errors, never clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a span covering `start` through `end`, 1-indexed inclusive.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Create a span addressing the single position `index`.
    #[inline]
    pub fn at(index: usize) -> Self {
        Span {
            start: index,
            end: index,
        }
    }

    /// Number of positions the span addresses.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    /// A span never addresses zero positions; insertion points are expressed
    /// through `put before`/`put after` instead.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Validate against a container of `len` units and convert to a
    /// 0-indexed half-open range usable with slice indexing.
    ///
    /// `type_name` names the addressed content in the range error.
    pub fn resolve(&self, len: usize, type_name: &str) -> ScriptResult<std::ops::Range<usize>> {
        if self.start == 0 || self.end < self.start || self.end > len {
            return Err(range_error(type_name, self.start, self.end));
        }
        Ok((self.start - 1)..self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_in_bounds() {
        let r = Span::new(2, 3).resolve(5, "list");
        assert_eq!(r, Ok(1..3));
    }

    #[test]
    fn test_resolve_whole() {
        assert_eq!(Span::new(1, 5).resolve(5, "list"), Ok(0..5));
    }

    #[test]
    fn test_start_past_length_fails() {
        assert!(Span::new(5, 6).resolve(3, "list").is_err());
    }

    #[test]
    fn test_zero_start_fails() {
        assert!(Span::new(0, 2).resolve(3, "list").is_err());
    }

    #[test]
    fn test_inverted_fails() {
        assert!(Span::new(3, 2).resolve(5, "list").is_err());
    }

    #[test]
    fn test_single_position() {
        assert_eq!(Span::at(2).resolve(3, "binary"), Ok(1..2));
    }
}
