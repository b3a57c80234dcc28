// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Windowing: which contiguous run of items to render.

use core::num::NonZeroUsize;
use core::ops::Range;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Half-open range of item indices to render.
///
/// # Invariants
/// - `start <= end`
/// - `end <= count` for the item count it was selected against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    /// First index to render (inclusive).
    pub start: usize,
    /// One past the last index to render (exclusive).
    pub end: usize,
}

impl VisibleRange {
    /// Creates a range over `start..end`.
    ///
    /// An inverted range collapses to the empty range at `end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        if start > end {
            Self { start: end, end }
        } else {
            Self { start, end }
        }
    }

    /// Number of indices in the range.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if there are no indices to render.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `index` falls inside the range.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// The indices in the range, in order.
    #[must_use]
    pub const fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Select the range of items to render for a scroll position.
///
/// - `scroll_offset` is measured from the top of the grid; negative values
///   count as `0`.
/// - `viewport_height` is how much of the grid is on screen.
///
/// Rows are `item_height + gap` tall. When that is not positive there is
/// nothing to window by and the full range `0..count` is returned.
///
/// One row past the ones covering the viewport is always included, so fast
/// downward scrolling never exposes blank space before the next pass lands.
/// When at most one row of items would remain after the range, the range is
/// extended to `count` so the last row is never split across passes.
///
/// The row math does not subtract the missing gap after the final row, and the
/// extra row is still added once the grid has scrolled out of view. Both only
/// over-render.
#[must_use]
pub fn select_range(
    count: usize,
    columns: NonZeroUsize,
    item_height: f64,
    gap: f64,
    scroll_offset: f64,
    viewport_height: f64,
) -> VisibleRange {
    let row_height = item_height + gap;
    if row_height.is_nan() || row_height <= 0.0 {
        return VisibleRange::new(0, count);
    }

    let columns = columns.get();
    let rows_before = to_rows((scroll_offset.max(0.0) / row_height).floor());
    let visible_rows = to_rows((viewport_height.max(0.0) / row_height).ceil()).saturating_add(1);

    let start = rows_before.saturating_mul(columns);
    let raw_end = rows_before
        .saturating_add(visible_rows)
        .saturating_mul(columns)
        .min(count);
    let end = if count - raw_end <= columns {
        count
    } else {
        raw_end
    };

    VisibleRange::new(start.min(end), end)
}

/// Converts a whole, non-negative row count to `usize`, saturating.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Float to int casts saturate, and NaN maps to zero"
)]
fn to_rows(rows: f64) -> usize {
    rows as usize
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroUsize;

    use super::{VisibleRange, select_range};

    fn cols(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn window_covers_viewport_plus_one_row() {
        // rows_before = 2, visible_rows = ceil(300 / 100) + 1 = 4.
        let range = select_range(100, cols(5), 100.0, 0.0, 250.0, 300.0);
        assert_eq!(range, VisibleRange::new(10, 30));
        assert_eq!(range.len(), 20);
    }

    #[test]
    fn top_of_grid_starts_at_zero() {
        let range = select_range(100, cols(4), 90.0, 10.0, 0.0, 250.0);
        // ceil(250 / 100) + 1 = 4 rows.
        assert_eq!(range, VisibleRange::new(0, 16));
    }

    #[test]
    fn negative_scroll_counts_as_top() {
        let range = select_range(100, cols(4), 90.0, 10.0, -500.0, 250.0);
        assert_eq!(range.start, 0);
    }

    #[test]
    fn remaining_single_row_is_absorbed() {
        // 12 items, 3 columns, 4 rows. From the top, 3 rows are selected and
        // exactly one row (3 items) would remain, so the range snaps to 12.
        let range = select_range(12, cols(3), 100.0, 0.0, 0.0, 150.0);
        assert_eq!(range, VisibleRange::new(0, 12));

        // A partial final row is absorbed too.
        let range = select_range(11, cols(3), 100.0, 0.0, 0.0, 150.0);
        assert_eq!(range.end, 11);
    }

    #[test]
    fn two_remaining_rows_are_not_absorbed() {
        let range = select_range(15, cols(3), 100.0, 0.0, 0.0, 150.0);
        assert_eq!(range, VisibleRange::new(0, 9));
    }

    #[test]
    fn zero_row_height_renders_everything() {
        let range = select_range(42, cols(3), 0.0, 0.0, 1000.0, 500.0);
        assert_eq!(range, VisibleRange::new(0, 42));

        let range = select_range(42, cols(3), f64::NAN, 0.0, 0.0, 500.0);
        assert_eq!(range, VisibleRange::new(0, 42));
    }

    #[test]
    fn empty_collection_is_empty_range() {
        let range = select_range(0, cols(3), 100.0, 10.0, 0.0, 500.0);
        assert!(range.is_empty());
        assert_eq!(range, VisibleRange::new(0, 0));
    }

    #[test]
    fn zero_viewport_still_renders_one_row() {
        let range = select_range(100, cols(5), 100.0, 0.0, 1000.0, 0.0);
        assert_eq!(range, VisibleRange::new(50, 55));
    }

    #[test]
    fn scrolled_far_past_the_end_stays_in_bounds() {
        let range = select_range(20, cols(5), 100.0, 0.0, 1.0e12, 300.0);
        assert_eq!(range, VisibleRange::new(20, 20));
        assert!(range.is_empty());

        let range = select_range(20, cols(5), 100.0, 0.0, f64::INFINITY, f64::INFINITY);
        assert!(range.start <= range.end && range.end <= 20);
    }

    #[test]
    fn range_helpers() {
        let range = VisibleRange::new(3, 7);
        assert!(range.contains(3));
        assert!(range.contains(6));
        assert!(!range.contains(7));
        assert_eq!(range.indices().collect::<alloc::vec::Vec<_>>(), [3, 4, 5, 6]);

        // Inverted ranges collapse.
        assert_eq!(VisibleRange::new(9, 4), VisibleRange::new(4, 4));
    }
}
