// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small controller that owns grid configuration, measurements, and the derived layout.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use tracing::{debug, trace};

use crate::columns::clamp_bounds;
use crate::{
    ColumnLayout, GridViewport, MAX_GAP, Measurement, VirtualItem, VisibleRange, container_height,
    resolve_columns, select_range,
};

/// Minimum item width used when none is configured.
const DEFAULT_MIN_ITEM_WIDTH: f64 = 10.0;

/// Caller-supplied grid parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct GridConfig {
    /// Number of items in the full collection.
    pub count: usize,
    /// Smallest width an item may be rendered at.
    pub min_item_width: f64,
    /// Space between rows and between columns.
    pub gap: f64,
}

impl GridConfig {
    /// Creates a configuration for `count` items.
    #[must_use]
    pub const fn new(count: usize, min_item_width: f64, gap: f64) -> Self {
        Self {
            count,
            min_item_width,
            gap,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            count: 0,
            min_item_width: DEFAULT_MIN_ITEM_WIDTH,
            gap: 0.0,
        }
    }
}

bitflags::bitflags! {
    /// Parts of a [`GridLayout`] that changed during a layout pass.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LayoutChanges: u8 {
        /// The column count or item/gap widths changed.
        const COLUMNS = 0b0000_0001;
        /// The total grid height changed.
        const EXTENT  = 0b0000_0010;
        /// A different range of items is selected.
        const RANGE   = 0b0000_0100;
        /// At least one visible item moved, resized, or was added/removed.
        const ITEMS   = 0b0000_1000;
    }
}

/// Everything derived from one [`GridConfig`] + [`Measurement`] snapshot.
///
/// A layout is always computed as a whole; see [`GridLayout::compute`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    columns: ColumnLayout,
    item_height: f64,
    gap: f64,
    total_height: f64,
    viewport: GridViewport,
    range: VisibleRange,
    items: Vec<VirtualItem>,
}

impl GridLayout {
    /// Runs a full layout pass.
    ///
    /// Stages run in dependency order: columns are resolved, then the total
    /// height, then the grid-relative viewport, then the visible range, and
    /// finally the position of every item in that range.
    #[must_use]
    pub fn compute(config: &GridConfig, measurement: &Measurement) -> Self {
        let columns = resolve_columns(
            measurement.container_width,
            config.min_item_width,
            config.gap,
        );
        let gap = clamp_bounds(config.gap, 0.0, MAX_GAP);
        let item_height = measurement.item_height.max(0.0);

        let total_height = container_height(config.count, columns.columns, item_height, gap);
        let viewport = measurement.grid_viewport(total_height);
        let range = select_range(
            config.count,
            columns.columns,
            item_height,
            gap,
            viewport.scroll_offset,
            viewport.visible_height,
        );
        let items = range
            .indices()
            .map(|order| VirtualItem::new(order, &columns, item_height, gap))
            .collect();

        Self {
            columns,
            item_height,
            gap,
            total_height,
            viewport,
            range,
            items,
        }
    }

    /// The resolved columns.
    #[must_use]
    pub const fn column_layout(&self) -> &ColumnLayout {
        &self.columns
    }

    /// Height shared by every item.
    #[must_use]
    pub const fn item_height(&self) -> f64 {
        self.item_height
    }

    /// Gap between rows.
    #[must_use]
    pub const fn gap(&self) -> f64 {
        self.gap
    }

    /// Height of the full grid.
    #[must_use]
    pub const fn total_height(&self) -> f64 {
        self.total_height
    }

    /// Scroll offset and visible height relative to the grid.
    #[must_use]
    pub const fn viewport(&self) -> GridViewport {
        self.viewport
    }

    /// Range of items to render.
    #[must_use]
    pub const fn range(&self) -> VisibleRange {
        self.range
    }

    /// Items to render, in order.
    #[must_use]
    pub fn items(&self) -> &[VirtualItem] {
        &self.items
    }

    /// Size of the empty region above the first rendered row.
    ///
    /// `0` when nothing is rendered.
    #[must_use]
    pub fn space_before(&self) -> f64 {
        self.items.first().map_or(0.0, |first| first.top.max(0.0))
    }

    /// Size of the empty region below the last rendered row.
    ///
    /// `0` when nothing is rendered.
    #[must_use]
    pub fn space_after(&self) -> f64 {
        self.items.last().map_or(0.0, |last| {
            (self.total_height - (last.top + self.item_height)).max(0.0)
        })
    }

    /// Which parts differ between `self` and `next`.
    #[must_use]
    pub fn changes_to(&self, next: &Self) -> LayoutChanges {
        let mut changes = LayoutChanges::empty();
        changes.set(LayoutChanges::COLUMNS, self.columns != next.columns);
        changes.set(LayoutChanges::EXTENT, self.total_height != next.total_height);
        changes.set(LayoutChanges::RANGE, self.range != next.range);
        changes.set(LayoutChanges::ITEMS, self.items != next.items);
        changes
    }
}

/// Callback invoked after a layout pass that changed something.
pub type LayoutListener = Box<dyn FnMut(&GridLayout, LayoutChanges)>;

/// Handle returned by [`VirtualGrid::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Controller for a virtualized grid.
///
/// This type:
/// - stores the current [`GridConfig`] and [`Measurement`] snapshot,
/// - reruns [`GridLayout::compute`] whenever either changes,
/// - caches the resulting [`GridLayout`],
/// - notifies subscribed listeners with the [`LayoutChanges`] of each pass.
///
/// Every `report_*`/`set_*` method returns the changes of the pass it ran.
/// Reporting a value that is already current is a no-op and returns an empty
/// set. Non-finite measurements are ignored.
///
/// Updates take `&mut self`, so passes never interleave. Hosts receiving
/// measurements from several sources serialize them before calling in.
pub struct VirtualGrid {
    config: GridConfig,
    measurement: Measurement,
    layout: GridLayout,
    listeners: Vec<(ListenerId, LayoutListener)>,
    next_listener: u64,
}

impl fmt::Debug for VirtualGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualGrid")
            .field("config", &self.config)
            .field("measurement", &self.measurement)
            .field("layout", &self.layout)
            .field("listeners", &self.listeners.len())
            .field("next_listener", &self.next_listener)
            .finish()
    }
}

impl Default for VirtualGrid {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl VirtualGrid {
    /// Creates a grid with default measurements.
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        Self::with_measurement(config, Measurement::default())
    }

    /// Creates a grid from an initial measurement snapshot.
    #[must_use]
    pub fn with_measurement(config: GridConfig, measurement: Measurement) -> Self {
        Self {
            layout: GridLayout::compute(&config, &measurement),
            config,
            measurement,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Returns the current configuration.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Returns the current measurements.
    #[must_use]
    pub const fn measurement(&self) -> &Measurement {
        &self.measurement
    }

    /// Returns the most recently computed layout.
    #[must_use]
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Returns the resolved columns.
    #[must_use]
    pub const fn column_layout(&self) -> &ColumnLayout {
        self.layout.column_layout()
    }

    /// Items to render, in order.
    #[must_use]
    pub fn visible_items(&self) -> &[VirtualItem] {
        self.layout.items()
    }

    /// Height of the full grid.
    #[must_use]
    pub const fn total_height(&self) -> f64 {
        self.layout.total_height()
    }

    /// Size of the empty region above the first rendered row.
    #[must_use]
    pub fn space_before(&self) -> f64 {
        self.layout.space_before()
    }

    /// Size of the empty region below the last rendered row.
    #[must_use]
    pub fn space_after(&self) -> f64 {
        self.layout.space_after()
    }

    /// Range of items to render.
    #[must_use]
    pub const fn range(&self) -> VisibleRange {
        self.layout.range()
    }

    /// Registers a listener called after every pass that changes the layout.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&GridLayout, LayoutChanges) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Replaces the whole configuration.
    pub fn set_config(&mut self, config: GridConfig) -> LayoutChanges {
        if config == self.config {
            return LayoutChanges::empty();
        }
        self.config = config;
        self.recompute()
    }

    /// Sets the number of items.
    pub fn set_count(&mut self, count: usize) -> LayoutChanges {
        self.set_config(GridConfig {
            count,
            ..self.config
        })
    }

    /// Sets the minimum item width.
    pub fn set_min_item_width(&mut self, min_item_width: f64) -> LayoutChanges {
        self.set_config(GridConfig {
            min_item_width,
            ..self.config
        })
    }

    /// Sets the gap between rows and columns.
    pub fn set_gap(&mut self, gap: f64) -> LayoutChanges {
        self.set_config(GridConfig { gap, ..self.config })
    }

    /// Reports a new container width.
    pub fn report_container_width(&mut self, width: f64) -> LayoutChanges {
        if !width.is_finite() {
            trace!(width, "ignoring non-finite container width");
            return LayoutChanges::empty();
        }
        self.apply(Measurement {
            container_width: width,
            ..self.measurement
        })
    }

    /// Reports the measured height of a rendered item.
    ///
    /// The height is rounded up to a whole pixel and becomes the height of
    /// every item.
    pub fn report_item_height(&mut self, height: f64) -> LayoutChanges {
        if !height.is_finite() {
            trace!(height, "ignoring non-finite item height");
            return LayoutChanges::empty();
        }
        self.apply(Measurement {
            item_height: height.max(0.0).ceil(),
            ..self.measurement
        })
    }

    /// Reports the document scroll offset, document height, and viewport height.
    ///
    /// Non-finite values keep their previous value.
    pub fn report_scroll(
        &mut self,
        scroll_y: f64,
        document_height: f64,
        viewport_height: f64,
    ) -> LayoutChanges {
        let m = self.measurement;
        self.apply(Measurement {
            scroll_y: finite_or(scroll_y, m.scroll_y),
            document_height: finite_or(document_height, m.document_height),
            viewport_height: finite_or(viewport_height, m.viewport_height),
            ..m
        })
    }

    /// Reports the grid's offset from the top of the document.
    pub fn report_grid_top(&mut self, offset: f64) -> LayoutChanges {
        if !offset.is_finite() {
            trace!(offset, "ignoring non-finite grid offset");
            return LayoutChanges::empty();
        }
        self.apply(Measurement {
            grid_top: offset,
            ..self.measurement
        })
    }

    fn apply(&mut self, measurement: Measurement) -> LayoutChanges {
        if measurement == self.measurement {
            return LayoutChanges::empty();
        }
        self.measurement = measurement;
        self.recompute()
    }

    fn recompute(&mut self) -> LayoutChanges {
        let next = GridLayout::compute(&self.config, &self.measurement);
        let changes = self.layout.changes_to(&next);
        self.layout = next;

        if changes.contains(LayoutChanges::COLUMNS) {
            let columns = self.layout.column_layout();
            debug!(
                columns = columns.columns.get(),
                item_width = columns.item_width_px,
                gap = columns.gap_px,
                "resolved grid columns"
            );
        }
        trace!(
            start = self.layout.range.start,
            end = self.layout.range.end,
            total_height = self.layout.total_height,
            ?changes,
            "grid layout pass"
        );

        if !changes.is_empty() {
            for (_, listener) in &mut self.listeners {
                listener(&self.layout, changes);
            }
        }
        changes
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
