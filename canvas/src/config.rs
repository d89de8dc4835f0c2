//! Editor configuration injected by the host.
//!
//! The host owns layer visibility and grid settings and pushes changes in
//! through [`ConfigUpdate`] messages; the engine never reads ambient state.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::DEFAULT_GRID_SIZE;
use crate::snap::snap_point;

/// A toggleable category of rendered entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// POIs, entrances, and elevators.
    Pois,
    Paths,
    Zones,
    /// Labels and annotations.
    Labels,
}

/// Per-layer visibility flags.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerVisibility {
    pub pois: bool,
    pub paths: bool,
    pub zones: bool,
    pub labels: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self { pois: true, paths: true, zones: true, labels: true }
    }
}

impl LayerVisibility {
    #[must_use]
    pub fn is_visible(&self, layer: Layer) -> bool {
        match layer {
            Layer::Pois => self.pois,
            Layer::Paths => self.paths,
            Layer::Zones => self.zones,
            Layer::Labels => self.labels,
        }
    }

    pub fn set(&mut self, layer: Layer, visible: bool) {
        match layer {
            Layer::Pois => self.pois = visible,
            Layer::Paths => self.paths = visible,
            Layer::Zones => self.zones = visible,
            Layer::Labels => self.labels = visible,
        }
    }
}

/// Colour scheme of the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn background(self) -> &'static str {
        match self {
            Self::Light => "#ffffff",
            Self::Dark => "#1a1a1a",
        }
    }

    #[must_use]
    pub fn grid_color(self) -> &'static str {
        match self {
            Self::Light => "#d1d5db",
            Self::Dark => "#374151",
        }
    }

    #[must_use]
    pub fn grid_opacity(self) -> f64 {
        match self {
            Self::Light => 0.8,
            Self::Dark => 0.4,
        }
    }

    #[must_use]
    pub fn text_color(self) -> &'static str {
        match self {
            Self::Light => "#374151",
            Self::Dark => "#e5e7eb",
        }
    }
}

/// Everything the host configures about the editor stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    pub layers: LayerVisibility,
    pub grid_size: f64,
    pub snap_to_grid: bool,
    pub show_grid: bool,
    pub theme: Theme,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            layers: LayerVisibility::default(),
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: true,
            show_grid: true,
            theme: Theme::default(),
        }
    }
}

/// A single change pushed from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ConfigUpdate {
    SetLayer { layer: Layer, visible: bool },
    ToggleLayer { layer: Layer },
    SetGridSize { size: f64 },
    SetSnapToGrid { enabled: bool },
    SetShowGrid { enabled: bool },
    SetTheme { theme: Theme },
}

impl EditorConfig {
    /// Apply one update. Returns `true` if the configuration changed.
    ///
    /// Grid sizes that are not positive and finite are ignored.
    pub fn apply(&mut self, update: ConfigUpdate) -> bool {
        let before = *self;
        match update {
            ConfigUpdate::SetLayer { layer, visible } => self.layers.set(layer, visible),
            ConfigUpdate::ToggleLayer { layer } => {
                let visible = self.layers.is_visible(layer);
                self.layers.set(layer, !visible);
            }
            ConfigUpdate::SetGridSize { size } => {
                if size.is_finite() && size > 0.0 {
                    self.grid_size = size;
                } else {
                    tracing::warn!(size, "ignoring invalid grid size");
                }
            }
            ConfigUpdate::SetSnapToGrid { enabled } => self.snap_to_grid = enabled,
            ConfigUpdate::SetShowGrid { enabled } => self.show_grid = enabled,
            ConfigUpdate::SetTheme { theme } => self.theme = theme,
        }
        *self != before
    }

    /// Snap `p` under the current grid settings.
    #[must_use]
    pub fn snap(&self, p: Point) -> Point {
        snap_point(p, self.grid_size, self.snap_to_grid)
    }
}
