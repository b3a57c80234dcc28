// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared plumbing for the Understory demos.
//!
//! Demos describe a virtual grid and a simulated scroll session in a small
//! TOML scenario file:
//!
//! ```toml
//! [grid]
//! count = 500
//! min_item_width = 180.0
//! gap = 12.0
//!
//! [viewport]
//! container_width = 1000.0
//! item_height = 120.0
//! viewport_height = 720.0
//! grid_top = 64.0
//! scroll_step = 240.0
//! steps = 8
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use understory_virtual_grid::{GridConfig, Measurement, VirtualGrid};

/// Errors that can occur while loading a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    #[error("failed to read scenario at {path:?}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The scenario file is not valid TOML or has unexpected keys.
    #[error("invalid scenario in {path:?}: {source}")]
    Parse {
        /// Path with the invalid scenario.
        path: PathBuf,
        /// Parse error details.
        #[source]
        source: toml::de::Error,
    },
}

/// Host-side measurements and the simulated scroll session.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportScenario {
    /// Width of the grid container.
    pub container_width: f64,
    /// Height of a rendered item, as a host would measure it.
    pub item_height: f64,
    /// Height of the window.
    pub viewport_height: f64,
    /// Offset of the grid from the top of the document.
    pub grid_top: f64,
    /// Distance scrolled per step.
    pub scroll_step: f64,
    /// Number of scroll steps to simulate.
    pub steps: usize,
}

impl Default for ViewportScenario {
    fn default() -> Self {
        Self {
            container_width: 1000.0,
            item_height: 120.0,
            viewport_height: 720.0,
            grid_top: 0.0,
            scroll_step: 240.0,
            steps: 8,
        }
    }
}

/// A complete demo scenario.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    /// Grid parameters.
    pub grid: GridConfig,
    /// Measurements and scroll session.
    pub viewport: ViewportScenario,
}

impl Scenario {
    /// Parses a scenario from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads and parses a scenario file.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_toml_str(&text).map_err(|source| ScenarioError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(?path, count = scenario.grid.count, "loaded scenario");
        Ok(scenario)
    }

    /// Builds a grid with the scenario's initial measurements.
    pub fn build_grid(&self) -> VirtualGrid {
        let vp = &self.viewport;
        let mut grid = VirtualGrid::with_measurement(
            self.grid,
            Measurement {
                container_width: vp.container_width,
                viewport_height: vp.viewport_height,
                grid_top: vp.grid_top,
                ..Measurement::default()
            },
        );
        // Item heights come from measuring a rendered item, which rounds up.
        grid.report_item_height(vp.item_height);
        grid
    }

    /// Document scroll offsets visited by the simulated session, starting at `0`.
    pub fn scroll_positions(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=self.viewport.steps).map(|step| step as f64 * self.viewport.scroll_step)
    }

    /// Total document height: the grid plus its offset from the top.
    pub fn document_height(&self, grid: &VirtualGrid) -> f64 {
        self.viewport.grid_top + grid.total_height()
    }
}

#[cfg(test)]
mod tests {
    use super::{Scenario, ScenarioError, ViewportScenario};
    use std::path::Path;
    use understory_virtual_grid::VisibleRange;

    #[test]
    fn empty_scenario_uses_defaults() {
        let scenario = Scenario::from_toml_str("").unwrap();
        assert_eq!(scenario, Scenario::default());
        assert_eq!(scenario.grid.count, 0);
        assert_eq!(scenario.grid.min_item_width, 10.0);
        assert_eq!(scenario.viewport, ViewportScenario::default());
    }

    #[test]
    fn full_scenario_parses() {
        let scenario = Scenario::from_toml_str(
            r#"
            [grid]
            count = 500
            min_item_width = 180.0
            gap = 12.0

            [viewport]
            container_width = 1000.0
            item_height = 119.4
            viewport_height = 720.0
            grid_top = 64.0
            scroll_step = 240.0
            steps = 3
            "#,
        )
        .unwrap();

        assert_eq!(scenario.grid.count, 500);
        assert_eq!(scenario.grid.gap, 12.0);
        assert_eq!(scenario.viewport.grid_top, 64.0);
        assert_eq!(
            scenario.scroll_positions().collect::<Vec<_>>(),
            [0.0, 240.0, 480.0, 720.0]
        );

        let grid = scenario.build_grid();
        assert_eq!(grid.measurement().item_height, 120.0);
        assert_eq!(grid.column_layout().columns.get(), 5);
        // 100 rows of 132px, without the trailing gap, below a 64px header.
        assert_eq!(grid.total_height(), 13_188.0);
        assert_eq!(scenario.document_height(&grid), 13_252.0);
    }

    #[test]
    fn bundled_gallery_scenario_parses() {
        let scenario = Scenario::from_toml_str(include_str!("../scenarios/gallery.toml")).unwrap();
        assert_eq!(scenario.grid.count, 500);
        assert_eq!(scenario.viewport.steps, 8);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let scenario = Scenario::from_toml_str("[grid]\ncount = 12\n").unwrap();
        assert_eq!(scenario.grid.count, 12);
        assert_eq!(scenario.grid.gap, 0.0);
        assert_eq!(scenario.viewport, ViewportScenario::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Scenario::from_toml_str("[viewport]\nzoom = 2.0\n").is_err());
        assert!(Scenario::from_toml_str("[extras]\n").is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Scenario::load(Path::new("/nonexistent/understory/scenario.toml")).unwrap_err();
        assert!(matches!(err, ScenarioError::Read { .. }));
    }

    #[test]
    fn invalid_file_is_a_parse_error() {
        let path = std::env::temp_dir().join("understory_demos_invalid_scenario.toml");
        std::fs::write(&path, "[grid]\ncount = \"many\"\n").unwrap();
        let err = Scenario::load(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, ScenarioError::Parse { .. }));
    }

    #[test]
    fn built_grid_follows_the_session() {
        let scenario = Scenario::from_toml_str("[grid]\ncount = 100\nmin_item_width = 200.0\n")
            .unwrap();
        let mut grid = scenario.build_grid();
        // 5 columns of 200px, 20 rows of 120px, viewport 720px.
        assert_eq!(grid.range(), VisibleRange::new(0, 35));

        grid.report_scroll(480.0, scenario.document_height(&grid), 720.0);
        assert_eq!(grid.range(), VisibleRange::new(20, 55));
    }
}
