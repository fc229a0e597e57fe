//! Heatmap building blocks
//!
//! Structure:
//! - `samples.rs`: big-endian f64 sample file format
//! - `grid.rs`: row-major 2D grid of samples
//! - `axes.rs`: linear axes and the coordinate mesh
//! - `palettes.rs` / `colors.rs`: palette registry and clipped color scales
//! - `properties.rs` / `plot_properties.rs`: plot.json property registry and typed values
//! - `fonts.rs` / `render.rs`: plotters drawing
//! - `output.rs`: PNG encoding and atomic writes
//! - `error.rs`: Error types

pub mod axes;
pub mod colors;
pub mod error;
pub mod fonts;
pub mod grid;
pub mod output;
pub mod palettes;
pub mod plot_properties;
pub mod properties;
pub mod render;
pub mod samples;

// Re-exports for convenience
pub use axes::{CoordinateMesh, LinearAxis};
pub use colors::ColorScale;
pub use error::{HeatmapError, Result};
pub use grid::Grid;
pub use plot_properties::PlotPropertyReader;
pub use properties::{PlotDimension, PngCompression};
pub use render::{RenderLayout, RenderedImage};
