//! Positions for addressing rows in a sectioned list.
//!
//! A [`Position`] is the pair `(section, row)`. Positions are plain values:
//! they do not track the model, and a position obtained before a structural
//! change may point at a different row (or nowhere) afterwards.

use std::fmt;

/// Address of one row inside a [`ListModel`](super::ListModel).
///
/// Ordering is section-major: all rows of section 0 sort before any row of
/// section 1.
///
/// # Example
///
/// ```
/// use rowbox::model::Position;
///
/// let first = Position::new(0, 0);
/// let next = first.with_row(1);
///
/// assert!(first < next);
/// assert_eq!(next.to_string(), "(0, 1)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// The section index.
    pub section: usize,
    /// The row within the section.
    pub row: usize,
}

impl Position {
    /// Creates a position from a section and a row index.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Returns a position in the same section at `row`.
    #[inline]
    pub const fn with_row(self, row: usize) -> Self {
        Self { row, ..self }
    }

    /// Returns a position at the same row index in `section`.
    #[inline]
    pub const fn with_section(self, section: usize) -> Self {
        Self { section, ..self }
    }
}

impl From<(usize, usize)> for Position {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_major_ordering() {
        let mut positions = vec![
            Position::new(1, 0),
            Position::new(0, 2),
            Position::new(0, 0),
            Position::new(1, 3),
        ];
        positions.sort();

        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(0, 2),
                Position::new(1, 0),
                Position::new(1, 3),
            ]
        );
    }

    #[test]
    fn test_with_helpers() {
        let pos = Position::new(2, 5);
        assert_eq!(pos.with_row(0), Position::new(2, 0));
        assert_eq!(pos.with_section(0), Position::new(0, 5));
        assert_eq!(Position::from((3, 4)), Position::new(3, 4));
    }
}
