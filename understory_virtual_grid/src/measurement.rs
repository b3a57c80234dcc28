// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Externally observed measurements and the grid-relative viewport.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Width assumed for the container before it has been measured.
pub(crate) const DEFAULT_CONTAINER_WIDTH: f64 = 320.0;
/// Item height assumed before a sample item has been measured.
pub(crate) const DEFAULT_ITEM_HEIGHT: f64 = 10.0;

/// Latest measurements reported by the host.
///
/// Each field is refreshed independently: the width from a resize
/// observation, the item height from measuring one rendered item, and the
/// scroll values from window scroll/resize events. `grid_top` is the grid's
/// offset from the top of the scrolling document.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Measurement {
    /// Width of the grid container.
    pub container_width: f64,
    /// Height shared by every item.
    pub item_height: f64,
    /// Scroll offset of the document.
    pub scroll_y: f64,
    /// Total scrollable height of the document.
    pub document_height: f64,
    /// Height of the viewport.
    pub viewport_height: f64,
    /// Offset of the grid's top edge from the top of the document.
    pub grid_top: f64,
}

impl Default for Measurement {
    fn default() -> Self {
        Self {
            container_width: DEFAULT_CONTAINER_WIDTH,
            item_height: DEFAULT_ITEM_HEIGHT,
            scroll_y: 0.0,
            document_height: 0.0,
            viewport_height: 0.0,
            grid_top: 0.0,
        }
    }
}

impl Measurement {
    /// The viewport expressed relative to the grid, given its total height.
    #[must_use]
    pub fn grid_viewport(&self, total_height: f64) -> GridViewport {
        GridViewport::from_document(
            self.scroll_y,
            self.grid_top,
            self.viewport_height,
            total_height,
        )
    }
}

/// Scroll position and visible height measured from the grid's own top edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridViewport {
    /// How far the grid has scrolled past the top of the viewport, in
    /// `0..=total_height`.
    pub scroll_offset: f64,
    /// How much of the grid is on screen, in `0..=viewport_height`.
    pub visible_height: f64,
}

impl GridViewport {
    /// Derives the grid-relative viewport from document-level measurements.
    ///
    /// The scroll offset is `scroll_y - grid_top` clamped to the grid. The
    /// visible height is the grid height left past that distance, clamped to
    /// the viewport. While the grid still sits below the top of the viewport,
    /// the distance is taken as an absolute value, which can over-report the
    /// visible height but never under-reports it.
    #[must_use]
    pub fn from_document(
        scroll_y: f64,
        grid_top: f64,
        viewport_height: f64,
        total_height: f64,
    ) -> Self {
        let total_height = total_height.max(0.0);
        let viewport_height = viewport_height.max(0.0);
        let adjusted = scroll_y - grid_top;

        Self {
            scroll_offset: adjusted.max(0.0).min(total_height),
            visible_height: (total_height - adjusted.abs())
                .max(0.0)
                .min(viewport_height),
        }
    }
}
