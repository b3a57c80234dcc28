// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Responsive column resolution.
//!
//! Given the width of the grid container, the smallest width an item may be
//! rendered at, and the gap between columns, [`resolve_columns`] picks how many
//! columns fit and how wide each one is. Inputs are clamped to sane bounds
//! instead of being rejected, so a container that momentarily reports zero or
//! absurd widths still produces a usable single-column layout.

use core::num::NonZeroUsize;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Smallest container width considered by [`resolve_columns`].
pub const MIN_CONTAINER_WIDTH: f64 = 100.0;
/// Largest container width considered by [`resolve_columns`].
pub const MAX_CONTAINER_WIDTH: f64 = 9999.0;
/// Lower bound applied to the requested minimum item width.
pub const MIN_MIN_ITEM_WIDTH: f64 = 10.0;
/// Upper bound applied to the requested minimum item width.
pub const MAX_MIN_ITEM_WIDTH: f64 = 999.0;
/// Largest gap considered by [`resolve_columns`]. The smallest is `0`.
pub const MAX_GAP: f64 = 99.0;

/// Resolved column count and per-item width.
///
/// Widths are available both in pixels and in a relative form, which is the
/// pixel value divided by ten and truncated to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnLayout {
    /// Number of columns; always at least one.
    pub columns: NonZeroUsize,
    /// Width of a single item in pixels.
    pub item_width_px: f64,
    /// Relative item width.
    pub item_width_percent: f64,
    /// Horizontal gap between columns in pixels. `0` for a single column.
    pub gap_px: f64,
    /// Relative gap.
    pub gap_percent: f64,
}

impl ColumnLayout {
    /// A single column spanning the full (clamped) container width.
    #[must_use]
    pub fn single(container_width: f64) -> Self {
        Self {
            columns: NonZeroUsize::MIN,
            item_width_px: clamp_bounds(container_width, MIN_CONTAINER_WIDTH, MAX_CONTAINER_WIDTH),
            item_width_percent: 100.0,
            gap_px: 0.0,
            gap_percent: 0.0,
        }
    }

    /// Returns `true` if this layout has exactly one column.
    #[must_use]
    pub const fn is_single_column(&self) -> bool {
        self.columns.get() == 1
    }

    fn multi(columns: NonZeroUsize, item_width_px: f64, gap_px: f64) -> Self {
        Self {
            columns,
            item_width_px,
            item_width_percent: relative(item_width_px),
            gap_px,
            gap_percent: relative(gap_px),
        }
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::single(MIN_CONTAINER_WIDTH)
    }
}

/// Resolve the number of columns and the per-item width for a container.
///
/// - `container_width` is clamped to `[100, 9999]`.
/// - `min_item_width` is clamped to `[10, 999]`.
/// - `gap` is clamped to `[0, 99]`.
///
/// NaN inputs clamp to the lower bound.
///
/// The candidate column count is `floor(container_width / min_item_width)`.
/// Once the gaps between columns are subtracted, the column count is reduced
/// until every column is at least `min_item_width` wide. Whenever the result
/// would be one column or fewer, a single full-width column is returned.
#[must_use]
pub fn resolve_columns(container_width: f64, min_item_width: f64, gap: f64) -> ColumnLayout {
    let container = clamp_bounds(container_width, MIN_CONTAINER_WIDTH, MAX_CONTAINER_WIDTH);
    let min_item = clamp_bounds(min_item_width, MIN_MIN_ITEM_WIDTH, MAX_MIN_ITEM_WIDTH);
    let gap = clamp_bounds(gap, 0.0, MAX_GAP);

    if min_item >= container {
        return ColumnLayout::single(container);
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Both operands are clamped, so the ratio is a small positive integer"
    )]
    let mut columns = (container / min_item).floor() as usize;
    if columns <= 1 {
        return ColumnLayout::single(container);
    }

    loop {
        let width = width_with_gap(container, gap, columns);
        if width >= min_item {
            return ColumnLayout::multi(nonzero(columns), width, gap);
        }
        columns -= 1;
        if columns <= 1 {
            return ColumnLayout::single(container);
        }
    }
}

fn width_with_gap(container: f64, gap: f64, columns: usize) -> f64 {
    let gaps = gap * (columns - 1) as f64;
    (container - gaps) / columns as f64
}

fn nonzero(columns: usize) -> NonZeroUsize {
    NonZeroUsize::new(columns).unwrap_or(NonZeroUsize::MIN)
}

/// Pixel value divided by ten, truncated to one decimal place.
fn relative(px: f64) -> f64 {
    px.trunc() / 10.0
}

/// Clamp into `[min, max]`; NaN maps to `min`.
pub(crate) fn clamp_bounds(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::{ColumnLayout, resolve_columns};

    #[test]
    fn exact_division_without_gap() {
        let layout = resolve_columns(1000.0, 200.0, 0.0);
        assert_eq!(layout.columns.get(), 5);
        assert_eq!(layout.item_width_px, 200.0);
        assert_eq!(layout.item_width_percent, 20.0);
        assert_eq!(layout.gap_px, 0.0);
        assert_eq!(layout.gap_percent, 0.0);
    }

    #[test]
    fn gap_that_squeezes_items_drops_a_column() {
        // Five columns would leave (1000 - 4 * 20) / 5 = 184px, below 200.
        let layout = resolve_columns(1000.0, 200.0, 20.0);
        assert_eq!(layout.columns.get(), 4);
        assert_eq!(layout.item_width_px, 235.0);
        assert_eq!(layout.item_width_percent, 23.5);
        assert_eq!(layout.gap_px, 20.0);
        assert_eq!(layout.gap_percent, 2.0);
    }

    #[test]
    fn gap_that_still_fits_keeps_candidate_columns() {
        // floor(1000 / 180) = 5, and (1000 - 40) / 5 = 192 >= 180.
        let layout = resolve_columns(1000.0, 180.0, 10.0);
        assert_eq!(layout.columns.get(), 5);
        assert_eq!(layout.item_width_px, 192.0);
        assert_eq!(layout.gap_px, 10.0);
    }

    #[test]
    fn min_width_at_least_container_is_single_column() {
        let layout = resolve_columns(300.0, 300.0, 10.0);
        assert_eq!(layout, ColumnLayout::single(300.0));
        assert_eq!(layout.item_width_px, 300.0);
        assert_eq!(layout.item_width_percent, 100.0);
        assert_eq!(layout.gap_px, 0.0);

        let layout = resolve_columns(300.0, 500.0, 0.0);
        assert!(layout.is_single_column());
        assert_eq!(layout.item_width_px, 300.0);
    }

    #[test]
    fn candidate_of_one_column_is_single_column() {
        // floor(500 / 260) = 1.
        let layout = resolve_columns(500.0, 260.0, 0.0);
        assert!(layout.is_single_column());
        assert_eq!(layout.item_width_px, 500.0);
    }

    #[test]
    fn dropping_to_one_column_falls_back_to_full_width() {
        // floor(400 / 190) = 2, but (400 - 40) / 2 = 180 < 190.
        let layout = resolve_columns(400.0, 190.0, 40.0);
        assert_eq!(layout, ColumnLayout::single(400.0));
    }

    #[test]
    fn large_gaps_keep_reducing_columns_until_items_fit() {
        // floor(1000 / 10) = 100 candidates; with a 99px gap only
        // floor((1000 + 99) / (10 + 99)) = 10 columns can hold 10px items.
        let layout = resolve_columns(1000.0, 10.0, 99.0);
        assert_eq!(layout.columns.get(), 10);
        assert!(layout.item_width_px >= 10.0);
    }

    #[test]
    fn inputs_are_clamped() {
        // Zero width clamps to 100; min width clamps to 10.
        let layout = resolve_columns(0.0, 0.0, 0.0);
        assert_eq!(layout.columns.get(), 10);
        assert_eq!(layout.item_width_px, 10.0);

        // Huge container clamps to 9999.
        let layout = resolve_columns(1.0e9, 5000.0, 0.0);
        assert_eq!(layout.columns.get(), 10);
        assert!((layout.item_width_px - 999.9).abs() < 1.0e-9);

        // Negative gap clamps to 0; huge gap clamps to 99.
        assert_eq!(resolve_columns(1000.0, 200.0, -5.0).gap_px, 0.0);
        assert_eq!(resolve_columns(9999.0, 10.0, 500.0).gap_px, 99.0);
    }

    #[test]
    fn nan_inputs_clamp_to_lower_bounds() {
        let layout = resolve_columns(f64::NAN, f64::NAN, f64::NAN);
        assert_eq!(layout, resolve_columns(100.0, 10.0, 0.0));
    }

    #[test]
    fn fractional_widths_are_truncated_in_relative_form() {
        // 1000 / 3 = 333.33..., relative 33.3.
        let layout = resolve_columns(1000.0, 300.0, 0.0);
        assert_eq!(layout.columns.get(), 3);
        assert_eq!(layout.item_width_percent, 33.3);
    }
}
