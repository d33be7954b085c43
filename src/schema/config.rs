//! Configuration types for a Life session.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Seed;

fn default_save_path() -> PathBuf {
    PathBuf::from("grid-save.bin")
}

/// Cell counts along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCount {
    pub width: usize,
    pub height: usize,
}

/// Window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

/// Top-level session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Window dimensions in pixels.
    pub window: WindowConfig,
    /// Number of cells visible in the initial viewport. The grid starts at
    /// exactly this size.
    pub cells: CellCount,
    /// Where save/load read and write the bit-packed grid.
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,
    /// Initial population.
    #[serde(default)]
    pub seed: Seed,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig {
                width: 800,
                height: 800,
            },
            cells: CellCount {
                width: 100,
                height: 100,
            },
            save_path: default_save_path(),
            seed: Seed::default(),
        }
    }
}

impl SessionConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::InvalidWindow);
        }
        if self.cells.width == 0 || self.cells.height == 0 {
            return Err(ConfigError::InvalidCells);
        }
        if self.cells.width > self.window.width as usize {
            return Err(ConfigError::CellsExceedWindow {
                axis: "width",
                cells: self.cells.width,
                pixels: self.window.width,
            });
        }
        if self.cells.height > self.window.height as usize {
            return Err(ConfigError::CellsExceedWindow {
                axis: "height",
                cells: self.cells.height,
                pixels: self.window.height,
            });
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Window dimensions must be non-zero")]
    InvalidWindow,
    #[error("Cell counts must be non-zero")]
    InvalidCells,
    #[error("Cell {axis} ({cells}) must be less than or equal to window {axis} ({pixels}px)")]
    CellsExceedWindow {
        axis: &'static str,
        cells: usize,
        pixels: u32,
    },
}
