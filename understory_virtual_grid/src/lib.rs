// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_virtual_grid --heading-base-level=0

//! Understory Virtual Grid: responsive, virtualized grid layout.
//!
//! This crate computes everything a host needs to render only the on-screen
//! part of a large, uniformly-sized grid of items while keeping the scrollbar
//! and item placement consistent with the full, non-virtualized grid.
//!
//! The pieces, in the order a layout pass runs them:
//!
//! - [`resolve_columns`]: turns a container width, minimum item width, and gap
//!   into a [`ColumnLayout`]. Columns never shrink below the minimum width;
//!   the column count is reduced instead.
//! - [`container_height`]: the total height the full grid would occupy.
//! - [`GridViewport::from_document`]: the scroll offset and visible height
//!   relative to the grid's own top edge.
//! - [`select_range`]: the half-open [`VisibleRange`] of item indices to render,
//!   always over-rendering one extra row.
//! - [`item_position`] / [`VirtualItem`]: row-major placement of each item.
//! - [`VirtualGrid`]: a small controller that owns the latest [`GridConfig`]
//!   and [`Measurement`] snapshot, reruns the pass above whenever a measurement
//!   changes, caches the resulting [`GridLayout`], and notifies listeners with
//!   a [`LayoutChanges`] set.
//!
//! Every calculator is a pure function. Out-of-range or non-finite inputs are
//! clamped or fall back to a definitional result; nothing here returns an error
//! or panics on numeric input, so a transiently bogus measurement (a container
//! mid-transition at zero width, say) yields a degenerate but consistent layout.
//!
//! All items share one height. This is a property of the whole design: both the
//! range selection and the placement math depend on it.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_virtual_grid::{GridConfig, VirtualGrid};
//!
//! // 1000 items, at least 200px wide, 20px apart.
//! let mut grid = VirtualGrid::new(GridConfig::new(1000, 200.0, 20.0));
//!
//! // Measurements arrive from the host as they become known.
//! grid.report_container_width(1000.0);
//! grid.report_item_height(150.0);
//! grid.report_scroll(600.0, 40_000.0, 800.0);
//!
//! assert_eq!(grid.column_layout().columns.get(), 4);
//! let range = grid.range();
//! assert!(range.start < range.end);
//!
//! // Host frameworks now render `grid.visible_items()` and pad the list with
//! // `space_before()` / `space_after()` worth of spacer.
//! for item in grid.visible_items() {
//!     let _bounds = item.rect();
//! }
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for the configuration and layout value types.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod columns;
mod extent;
mod grid;
mod measurement;
mod position;
mod range;

pub use columns::{
    ColumnLayout, MAX_CONTAINER_WIDTH, MAX_GAP, MAX_MIN_ITEM_WIDTH, MIN_CONTAINER_WIDTH,
    MIN_MIN_ITEM_WIDTH, resolve_columns,
};
pub use extent::container_height;
pub use grid::{GridConfig, GridLayout, LayoutChanges, LayoutListener, ListenerId, VirtualGrid};
pub use measurement::{GridViewport, Measurement};
pub use position::{VirtualItem, item_position};
pub use range::{VisibleRange, select_range};
