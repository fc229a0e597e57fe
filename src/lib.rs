//! Mesh Heatmap Library
//!
//! Renders a flat big-endian f64 sample file as a pseudocolor heatmap with a
//! colorbar. Used by the `mesh_heatmap` and `generate_mesh` binaries.

pub mod config;
pub mod heatmap;
pub mod logging;
pub mod pipeline;
pub mod timing;

pub use config::{GridPreset, PlotConfig};
pub use heatmap::{HeatmapError, Result};
pub use pipeline::{render, RenderSummary};
