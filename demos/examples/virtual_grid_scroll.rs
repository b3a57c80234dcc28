// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual grid: drive a `VirtualGrid` through a simulated scroll session.
//!
//! This example shows how a host:
//! - reports container width, item height, and scroll measurements,
//! - subscribes to layout changes instead of polling,
//! - renders only `visible_items()` between two spacers.
//!
//! Run:
//! - `cargo run -p understory_demos --example virtual_grid_scroll`
//! - `cargo run -p understory_demos --example virtual_grid_scroll -- demos/scenarios/gallery.toml`
//!
//! Set `RUST_LOG=debug` (or `trace`) to see each layout pass.

use std::path::PathBuf;

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_demos::{Scenario, ScenarioError};
use understory_virtual_grid::LayoutChanges;

fn main() -> Result<(), ScenarioError> {
    // Respect RUST_LOG, default to "info".
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let scenario = match std::env::args_os().nth(1) {
        Some(path) => Scenario::load(&PathBuf::from(path))?,
        None => Scenario::default(),
    };

    let mut grid = scenario.build_grid();
    if grid.config().count == 0 {
        grid.set_count(240);
    }

    grid.subscribe(|layout, changes| {
        if changes.contains(LayoutChanges::COLUMNS) {
            let columns = layout.column_layout();
            tracing::info!(
                columns = columns.columns.get(),
                item_width = columns.item_width_px,
                "columns changed"
            );
        }
    });

    // A container resize mid-session, as a resize observer would report it.
    let resize_at = scenario.viewport.steps / 2;

    for (step, scroll_y) in scenario.scroll_positions().enumerate() {
        if step == resize_at {
            grid.report_container_width(scenario.viewport.container_width * 0.6);
        }
        let document_height = scenario.document_height(&grid);
        grid.report_scroll(scroll_y, document_height, scenario.viewport.viewport_height);

        let range = grid.range();
        let items = grid.visible_items();
        let bounds = items
            .iter()
            .map(|item| item.rect())
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO);

        println!(
            "scroll {scroll_y:>7.1}  items {:>4}..{:<4} ({:>3} rendered)  spacer {:>8.1} / {:>8.1}  bounds {:?}",
            range.start,
            range.end,
            items.len(),
            grid.space_before(),
            grid.space_after(),
            bounds,
        );
    }

    Ok(())
}
