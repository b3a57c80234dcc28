// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row-major placement of individual items.

use core::num::NonZeroUsize;

use kurbo::{Point, Rect};

use crate::ColumnLayout;

/// Top-left offset of the item at `order` within the grid.
///
/// Items are laid out row-major: `order / columns` is the row and
/// `order % columns` the column. The returned point has `x = left` and
/// `y = top`.
///
/// `order` is expected to be in `0..count`. Larger values still produce a
/// consistent position, one that no rendered item will occupy.
#[must_use]
pub fn item_position(
    order: usize,
    columns: NonZeroUsize,
    item_width: f64,
    item_height: f64,
    gap: f64,
) -> Point {
    let row = order / columns.get();
    let column = order % columns.get();
    Point::new(
        column as f64 * (item_width + gap),
        row as f64 * (item_height + gap),
    )
}

/// A single item to render, positioned within the full grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem {
    /// Index of this item in the full collection.
    pub order: usize,
    /// Offset from the top of the grid.
    pub top: f64,
    /// Offset from the left of the grid.
    pub left: f64,
    /// Item width.
    pub width: f64,
    /// Item height.
    pub height: f64,
}

impl VirtualItem {
    /// Places the item at `order` using a resolved column layout.
    ///
    /// `gap` separates rows as well as columns. A single-column layout reports
    /// a zero column gap, but its rows stay `gap` apart.
    #[must_use]
    pub fn new(order: usize, layout: &ColumnLayout, item_height: f64, gap: f64) -> Self {
        let origin = item_position(order, layout.columns, layout.item_width_px, item_height, gap);
        Self {
            order,
            top: origin.y,
            left: origin.x,
            width: layout.item_width_px,
            height: item_height,
        }
    }

    /// Row this item sits in.
    #[must_use]
    pub const fn row(&self, columns: NonZeroUsize) -> usize {
        self.order / columns.get()
    }

    /// Column this item sits in.
    #[must_use]
    pub const fn column(&self, columns: NonZeroUsize) -> usize {
        self.order % columns.get()
    }

    /// Top-left corner of the item.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Bottom edge of the item.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Bounds of the item in grid coordinates.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.left + self.width, self.top + self.height)
    }
}
