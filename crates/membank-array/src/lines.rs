//! Plain line arrays without banking or slicing.
//!
//! These are the simple storage shapes used beside [`BankedMemory`](crate::BankedMemory)
//! for tag stores and associative lookups: a flat run of lines, and the
//! same lines arranged as sets × ways in either storage order.

use std::ops::{Index, IndexMut};

use crate::error::ArrayError;

/// `N` lines of `T`, every line starting as `T::default()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineArray<T> {
    lines: Vec<T>,
}

impl<T: Default + Clone> LineArray<T> {
    /// Create `lines` default-initialized lines.
    pub fn new(lines: usize) -> Result<Self, ArrayError> {
        if lines == 0 {
            return Err(ArrayError::ZeroEntries);
        }
        Ok(Self {
            lines: vec![T::default(); lines],
        })
    }
}

impl<T> LineArray<T> {
    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false: a line array holds at least one line.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.lines.get(index)
    }

    /// Mutable access to the line at `index`, or `None` if out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.lines.get_mut(index)
    }

    /// Iterate over the lines in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.lines.iter()
    }
}

impl<T> Index<usize> for LineArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.lines[index]
    }
}

impl<T> IndexMut<usize> for LineArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.lines[index]
    }
}

/// Storage order of a [`LineArray2d`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// All ways of set 0, then all ways of set 1, ...
    SetMajor,
    /// All sets of way 0, then all sets of way 1, ...
    WayMajor,
}

/// `N` lines arranged as `N / A` sets of `A` ways.
///
/// Addressing is always `(set, way)`; the [`Layout`] only decides how the
/// lines are laid out in the backing storage, which matters to callers
/// that sweep a whole way at once.
///
/// # Examples
///
/// ```
/// use membank_array::{Layout, LineArray2d};
///
/// let mut tags = LineArray2d::<u32>::transposed(8, 2).unwrap();
/// assert_eq!((tags.sets(), tags.ways()), (4, 2));
/// tags[(3, 1)] = 0xAB;
/// assert_eq!(tags.layout(), Layout::WayMajor);
/// assert_eq!(tags.as_slice()[7], 0xAB);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineArray2d<T> {
    sets: usize,
    ways: usize,
    layout: Layout,
    data: Vec<T>,
}

impl<T: Default + Clone> LineArray2d<T> {
    /// `lines` lines in `ways` ways, stored set-major.
    pub fn new(lines: usize, ways: usize) -> Result<Self, ArrayError> {
        Self::with_layout(lines, ways, Layout::SetMajor)
    }

    /// `lines` lines in `ways` ways, stored way-major.
    pub fn transposed(lines: usize, ways: usize) -> Result<Self, ArrayError> {
        Self::with_layout(lines, ways, Layout::WayMajor)
    }

    /// `lines` lines in `ways` ways with an explicit storage order.
    pub fn with_layout(lines: usize, ways: usize, layout: Layout) -> Result<Self, ArrayError> {
        if lines == 0 {
            return Err(ArrayError::ZeroEntries);
        }
        if ways == 0 {
            return Err(ArrayError::ZeroWays);
        }
        if lines % ways != 0 {
            return Err(ArrayError::WaysNotDivisible { lines, ways });
        }
        Ok(Self {
            sets: lines / ways,
            ways,
            layout,
            data: vec![T::default(); lines],
        })
    }
}

impl<T> LineArray2d<T> {
    /// Number of sets (`lines / ways`).
    pub fn sets(&self) -> usize {
        self.sets
    }

    /// Number of ways.
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Storage order.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Total lines.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a line array holds at least one line.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The line at `(set, way)`, or `None` if out of range.
    pub fn get(&self, set: usize, way: usize) -> Option<&T> {
        self.position(set, way).map(|p| &self.data[p])
    }

    /// Mutable access to the line at `(set, way)`, or `None` if out of range.
    pub fn get_mut(&mut self, set: usize, way: usize) -> Option<&mut T> {
        match self.position(set, way) {
            Some(p) => Some(&mut self.data[p]),
            None => None,
        }
    }

    /// The backing storage in layout order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn position(&self, set: usize, way: usize) -> Option<usize> {
        if set >= self.sets || way >= self.ways {
            return None;
        }
        Some(match self.layout {
            Layout::SetMajor => set * self.ways + way,
            Layout::WayMajor => way * self.sets + set,
        })
    }
}

impl<T> Index<(usize, usize)> for LineArray2d<T> {
    type Output = T;

    fn index(&self, (set, way): (usize, usize)) -> &T {
        match self.get(set, way) {
            Some(line) => line,
            None => panic!(
                "line ({set}, {way}) out of range for {} sets x {} ways",
                self.sets, self.ways
            ),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for LineArray2d<T> {
    fn index_mut(&mut self, (set, way): (usize, usize)) -> &mut T {
        let (sets, ways) = (self.sets, self.ways);
        match self.get_mut(set, way) {
            Some(line) => line,
            None => panic!("line ({set}, {way}) out of range for {sets} sets x {ways} ways"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use membank_test_utils::Rgb;

    #[test]
    fn line_array_starts_at_default() {
        let lines = LineArray::<Rgb>::new(5).unwrap();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| *l == Rgb::default()));
    }

    #[test]
    fn line_array_rejects_zero_lines() {
        assert_eq!(LineArray::<u8>::new(0), Err(ArrayError::ZeroEntries));
    }

    #[test]
    fn line_array_index_and_get() {
        let mut lines = LineArray::<u16>::new(4).unwrap();
        lines[2] = 7;
        *lines.get_mut(3).unwrap() = 9;
        assert_eq!(lines.get(2), Some(&7));
        assert_eq!(lines[3], 9);
        assert_eq!(lines.get(4), None);
    }

    #[test]
    fn set_major_storage_order() {
        let mut grid = LineArray2d::<u8>::new(6, 3).unwrap();
        assert_eq!((grid.sets(), grid.ways()), (2, 3));
        grid[(1, 0)] = 1;
        assert_eq!(grid.as_slice()[3], 1);
    }

    #[test]
    fn way_major_storage_order() {
        let mut grid = LineArray2d::<u8>::transposed(6, 3).unwrap();
        grid[(1, 0)] = 1;
        grid[(0, 2)] = 2;
        assert_eq!(grid.as_slice()[1], 1);
        assert_eq!(grid.as_slice()[4], 2);
        assert_eq!(grid[(1, 0)], 1);
    }

    #[test]
    fn layouts_agree_on_logical_contents() {
        let mut a = LineArray2d::<u32>::new(12, 4).unwrap();
        let mut b = LineArray2d::<u32>::transposed(12, 4).unwrap();
        for set in 0..3 {
            for way in 0..4 {
                a[(set, way)] = (set * 10 + way) as u32;
                b[(set, way)] = (set * 10 + way) as u32;
            }
        }
        for set in 0..3 {
            for way in 0..4 {
                assert_eq!(a.get(set, way), b.get(set, way));
            }
        }
        assert_ne!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn grid_construction_errors() {
        assert_eq!(LineArray2d::<u8>::new(0, 2), Err(ArrayError::ZeroEntries));
        assert_eq!(LineArray2d::<u8>::new(4, 0), Err(ArrayError::ZeroWays));
        assert_eq!(
            LineArray2d::<u8>::new(10, 4),
            Err(ArrayError::WaysNotDivisible { lines: 10, ways: 4 })
        );
    }

    #[test]
    fn grid_out_of_range_is_none() {
        let grid = LineArray2d::<u8>::new(4, 2).unwrap();
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn grid_index_out_of_range_panics() {
        let grid = LineArray2d::<u8>::new(4, 2).unwrap();
        let _ = grid[(0, 5)];
    }
}
