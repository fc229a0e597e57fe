//! Heatmap generation pipeline
//!
//! The pipeline is strictly linear:
//! 1. Reads the big-endian sample file
//! 2. Reshapes it into a rows × cols grid
//! 3. Builds the axes and the coordinate mesh
//! 4. Renders the grid with a clipped color scale and colorbar
//! 5. Encodes PNG and replaces the output file atomically
//!
//! Any failure aborts the run before the output file is touched.

use crate::config::PlotConfig;
use crate::heatmap::axes::{CoordinateMesh, LinearAxis};
use crate::heatmap::colors::ColorScale;
use crate::heatmap::grid::Grid;
use crate::heatmap::render::{self, RenderedImage};
use crate::heatmap::{fonts, output, samples, Result};
use crate::timing::PhaseTimer;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What a successful run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub output_path: PathBuf,
    /// Image size in pixels
    pub width: u32,
    pub height: u32,
    /// Encoded PNG size
    pub bytes_written: usize,
    /// (rows, cols)
    pub grid_shape: (usize, usize),
    /// Finite value range observed in the grid
    pub value_range: Option<(f64, f64)>,
}

/// Render the configured sample file to the configured PNG
pub fn render(config: &PlotConfig) -> Result<RenderSummary> {
    config.validate()?;
    let mut timer = PhaseTimer::start();

    info!("[1/5] Reading samples from {}", config.input_path.display());
    let values = samples::read_samples(&config.input_path)?;
    info!("  {} samples", values.len());
    timer.phase("read samples");

    info!("[2/5] Reshaping into {}×{} grid", config.rows, config.cols);
    let grid = Grid::from_samples(values, config.rows, config.cols)?;
    timer.phase("reshape");

    let image = render_grid(&grid, config, &mut timer)?;

    info!(
        "[5/5] Writing {}×{} PNG to {}",
        image.width,
        image.height,
        config.output_path.display()
    );
    let png = output::encode_png(&image, config.png_compression)?;
    output::write_atomic(&config.output_path, &png)?;
    timer.phase("encode and write");

    info!(
        "✓ Plot written ({} bytes in {:.3}s)",
        png.len(),
        timer.elapsed().as_secs_f64()
    );

    Ok(RenderSummary {
        output_path: config.output_path.clone(),
        width: image.width,
        height: image.height,
        bytes_written: png.len(),
        grid_shape: grid.shape(),
        value_range: grid.value_range(),
    })
}

/// Render an in-memory grid with the configured axes, colors and layout
///
/// The grid's shape takes precedence over `config.rows`/`config.cols`.
pub fn render_to_image(grid: &Grid, config: &PlotConfig) -> Result<RenderedImage> {
    config.validate()?;
    render_grid(grid, config, &mut PhaseTimer::start())
}

fn render_grid(grid: &Grid, config: &PlotConfig, timer: &mut PhaseTimer) -> Result<RenderedImage> {
    log_grid_stats(grid, config.color_clip);

    info!("[3/5] Building axes and coordinate mesh");
    let (rows, cols) = grid.shape();
    let x_axis = LinearAxis::linspace(config.x_range.0, config.x_range.1, cols);
    let t_axis = LinearAxis::linspace(config.t_range.0, config.t_range.1, rows);
    let mesh = CoordinateMesh::from_axes(&x_axis, &t_axis);
    timer.phase("axes and mesh");

    info!(
        "[4/5] Rendering (palette: {}, clip: [{}, {}])",
        config.palette, config.color_clip.0, config.color_clip.1
    );
    let scale = ColorScale::from_palette_name(&config.palette, config.color_clip)?;
    debug!("  Resolved palette {}", scale.name());
    let labels = fonts::ensure_font(config.font_path.as_deref());
    let layout = config.render_layout(labels);
    let image = render::render_heatmap(grid, &mesh, &scale, &layout)?;
    timer.phase("render");

    Ok(image)
}

fn log_grid_stats(grid: &Grid, clip: (f64, f64)) {
    match grid.value_range() {
        Some((lo, hi)) => {
            info!("  Value range: {} to {}", lo, hi);
            if lo < clip.0 || hi > clip.1 {
                info!("  Values outside [{}, {}] saturate", clip.0, clip.1);
            }
        }
        None => warn!("⚠ Grid has no finite values"),
    }

    let nan = grid.count_nan();
    if nan > 0 {
        warn!("⚠ {} NaN cells will render as gray", nan);
    }
    let infinite = grid.count_infinite();
    if infinite > 0 {
        warn!("⚠ {} infinite cells saturate to the colorbar ends", infinite);
    }
}
