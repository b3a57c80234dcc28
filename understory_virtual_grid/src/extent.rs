// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Total height of the full, non-virtualized grid.

use core::num::NonZeroUsize;

/// Height the whole grid would occupy if every item were rendered.
///
/// - No items: `0`.
/// - Everything fits in one row: `item_height`, with no gap.
/// - Otherwise `rows * (item_height + gap) - gap`, where
///   `rows = ceil(count / columns)`. The last row has no trailing gap.
///
/// The result is never negative.
#[must_use]
pub fn container_height(count: usize, columns: NonZeroUsize, item_height: f64, gap: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    if count <= columns.get() {
        return item_height.max(0.0);
    }

    let rows = count.div_ceil(columns.get());
    (rows as f64 * (item_height + gap) - gap).max(0.0)
}
