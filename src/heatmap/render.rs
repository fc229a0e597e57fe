//! Pseudocolor rendering of a grid over its coordinate mesh
//!
//! Each grid cell is drawn as a filled quad centered on its mesh coordinate,
//! colored through a clipped color scale. An optional colorbar to the right
//! shows the scale over its clip range. Drawing goes into an in-memory RGB
//! buffer; encoding and writing are handled by the output module.

use super::axes::CoordinateMesh;
use super::colors::ColorScale;
use super::error::{HeatmapError, Result};
use super::fonts::FONT_FAMILY;
use super::grid::Grid;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Outer margin around the plot and the colorbar, in pixels
const MARGIN: i32 = 20;
/// Space reserved for tick labels and axis titles when a font is available
const LABEL_AREA: i32 = 50;
/// Width added to the image for the colorbar
pub const COLORBAR_WIDTH: u32 = 110;
/// Number of color bands drawn in the colorbar
const COLORBAR_STEPS: usize = 256;

/// Image geometry and decorations
#[derive(Debug, Clone, PartialEq)]
pub struct RenderLayout {
    /// Width of the plot panel (axes, labels and quads)
    pub plot_width: u32,
    pub plot_height: u32,
    pub colorbar: bool,
    pub x_label: Option<String>,
    pub t_label: Option<String>,
    /// Draw tick labels and axis titles; requires a registered font
    pub labels: bool,
}

impl RenderLayout {
    /// Total image size in pixels
    pub fn image_size(&self) -> (u32, u32) {
        let extra = if self.colorbar { COLORBAR_WIDTH } else { 0 };
        (self.plot_width + extra, self.plot_height)
    }
}

/// An RGB8 raster, rows top to bottom
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RenderedImage {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }
}

fn render_error<E: std::fmt::Display>(e: E) -> HeatmapError {
    HeatmapError::Render(e.to_string())
}

fn rgb(color: [u8; 3]) -> RGBColor {
    RGBColor(color[0], color[1], color[2])
}

/// Draw `grid` over `mesh` with `scale`
pub fn render_heatmap(
    grid: &Grid,
    mesh: &CoordinateMesh,
    scale: &ColorScale,
    layout: &RenderLayout,
) -> Result<RenderedImage> {
    if grid.shape() != mesh.shape() {
        return Err(HeatmapError::Shape(format!(
            "grid is {:?} but coordinate mesh is {:?}",
            grid.shape(),
            mesh.shape()
        )));
    }
    if !mesh.is_finite() {
        return Err(HeatmapError::Render(format!(
            "coordinate mesh extent {:?} is not finite",
            mesh.extent()
        )));
    }

    let (width, height) = layout.image_size();
    let mut pixels = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let (plot_area, colorbar_area) = if layout.colorbar {
            let (plot, bar) = root.split_horizontally(layout.plot_width as i32);
            (plot, Some(bar))
        } else {
            (root.clone(), None)
        };

        draw_quads(&plot_area, grid, mesh, scale, layout)?;

        if let Some(area) = colorbar_area {
            draw_colorbar(&area, scale, layout.labels)?;
        }

        root.present().map_err(render_error)?;
    }

    Ok(RenderedImage {
        width,
        height,
        pixels,
    })
}

fn draw_quads(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    grid: &Grid,
    mesh: &CoordinateMesh,
    scale: &ColorScale,
    layout: &RenderLayout,
) -> Result<()> {
    let ((x_lo, x_hi), (t_lo, t_hi)) = mesh.extent();
    let label_area = if layout.labels { LABEL_AREA } else { 0 };

    let mut chart = ChartBuilder::on(area)
        .margin(MARGIN)
        .x_label_area_size(label_area)
        .y_label_area_size(label_area)
        .build_cartesian_2d(x_lo..x_hi, t_lo..t_hi)
        .map_err(render_error)?;

    if layout.labels {
        let mut axes = chart.configure_mesh();
        axes.disable_mesh()
            .label_style((FONT_FAMILY, 14))
            .axis_desc_style((FONT_FAMILY, 16));
        if let Some(label) = &layout.x_label {
            axes.x_desc(label.as_str());
        }
        if let Some(label) = &layout.t_label {
            axes.y_desc(label.as_str());
        }
        axes.draw().map_err(render_error)?;
    }

    let (rows, cols) = grid.shape();
    let values = grid.values();
    chart
        .draw_series((0..rows).flat_map(|i| {
            (0..cols).map(move |j| {
                let quad = mesh.cell(i, j);
                let color = scale.color_for(values[[i, j]]);
                Rectangle::new([(quad.x0, quad.t0), (quad.x1, quad.t1)], rgb(color).filled())
            })
        }))
        .map_err(render_error)?;

    Ok(())
}

fn draw_colorbar(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    scale: &ColorScale,
    labels: bool,
) -> Result<()> {
    let (lo, hi) = scale.clip();
    let label_area = if labels { LABEL_AREA } else { 0 };

    let mut bar = ChartBuilder::on(area)
        .margin(MARGIN)
        .set_label_area_size(LabelAreaPosition::Right, label_area)
        .build_cartesian_2d(0.0..1.0, lo..hi)
        .map_err(render_error)?;

    if labels {
        bar.configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .label_style((FONT_FAMILY, 14))
            .y_label_formatter(&|v| format!("{:.2}", v))
            .draw()
            .map_err(render_error)?;
    }

    let delta = (hi - lo) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|k| {
        let v0 = lo + delta * k as f64;
        let v1 = if k + 1 == COLORBAR_STEPS { hi } else { v0 + delta };
        let color = scale.color_for((v0 + v1) / 2.0);
        Rectangle::new([(0.0, v0), (1.0, v1)], rgb(color).filled())
    }))
    .map_err(render_error)?;

    bar.plotting_area()
        .draw(&Rectangle::new([(0.0, lo), (1.0, hi)], BLACK.stroke_width(1)))
        .map_err(render_error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heatmap::axes::LinearAxis;

    fn layout(colorbar: bool) -> RenderLayout {
        RenderLayout {
            plot_width: 200,
            plot_height: 160,
            colorbar,
            x_label: None,
            t_label: None,
            labels: false,
        }
    }

    fn render(grid: &Grid, colorbar: bool) -> RenderedImage {
        let x_axis = LinearAxis::linspace(0.0, 6.0, grid.cols());
        let t_axis = LinearAxis::linspace(0.0, 3.0, grid.rows());
        let mesh = CoordinateMesh::from_axes(&x_axis, &t_axis);
        let scale = ColorScale::from_palette_name("RdBu_r", (-1.0, 1.0)).unwrap();
        render_heatmap(grid, &mesh, &scale, &layout(colorbar)).unwrap()
    }

    #[test]
    fn test_image_size() {
        assert_eq!(layout(false).image_size(), (200, 160));
        assert_eq!(layout(true).image_size(), (200 + COLORBAR_WIDTH, 160));

        let image = render(&Grid::from_fn(3, 4, |_, _| 0.0), true);
        assert_eq!((image.width, image.height), (310, 160));
        assert_eq!(image.pixels.len(), 310 * 160 * 3);
    }

    #[test]
    fn test_uniform_grid_fills_plot_area() {
        let grid = Grid::from_fn(4, 4, |_, _| 0.5);
        let image = render(&grid, false);
        let scale = ColorScale::from_palette_name("RdBu_r", (-1.0, 1.0)).unwrap();

        assert_eq!(image.pixel(100, 80), Some(scale.color_for(0.5)));
        // Margin stays white
        assert_eq!(image.pixel(2, 2), Some([255, 255, 255]));
    }

    #[test]
    fn test_low_rows_are_drawn_at_the_bottom() {
        // Row 0 is t = 0, which plots at the bottom of the image
        let grid = Grid::from_fn(2, 1, |i, _| if i == 0 { -1.0 } else { 1.0 });
        let image = render(&grid, false);
        let scale = ColorScale::from_palette_name("RdBu_r", (-1.0, 1.0)).unwrap();

        assert_eq!(image.pixel(100, 130), Some(scale.min_color()));
        assert_eq!(image.pixel(100, 30), Some(scale.max_color()));
    }

    #[test]
    fn test_out_of_range_values_render_saturated() {
        let clipped = render(
            &Grid::from_fn(4, 4, |i, j| if (i + j) % 2 == 0 { -5.0 } else { 5.0 }),
            true,
        );
        let saturated = render(
            &Grid::from_fn(4, 4, |i, j| if (i + j) % 2 == 0 { -1.0 } else { 1.0 }),
            true,
        );
        assert_eq!(clipped.pixels, saturated.pixels);
    }

    #[test]
    fn test_colorbar_is_drawn() {
        let image = render(&Grid::from_fn(2, 2, |_, _| 0.0), true);
        let x = 200 + COLORBAR_WIDTH / 2;
        let top = image.pixel(x, 25).unwrap();
        let bottom = image.pixel(x, 134).unwrap();
        assert_ne!(top, [255, 255, 255]);
        assert_ne!(bottom, [255, 255, 255]);
        assert_ne!(top, bottom);
    }

    #[test]
    fn test_mismatched_mesh_is_rejected() {
        let grid = Grid::from_fn(2, 3, |_, _| 0.0);
        let mesh = CoordinateMesh::from_axes(
            &LinearAxis::linspace(0.0, 6.0, 2),
            &LinearAxis::linspace(0.0, 3.0, 3),
        );
        let scale = ColorScale::from_palette_name("RdBu_r", (-1.0, 1.0)).unwrap();
        let err = render_heatmap(&grid, &mesh, &scale, &layout(false)).unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_non_finite_mesh_is_rejected() {
        let grid = Grid::from_fn(2, 4, |_, _| 0.0);
        let mesh = CoordinateMesh::from_axes(
            &LinearAxis::linspace(-1e308, 1e308, 4),
            &LinearAxis::linspace(0.0, 3.0, 2),
        );
        let scale = ColorScale::from_palette_name("RdBu_r", (-1.0, 1.0)).unwrap();
        let err = render_heatmap(&grid, &mesh, &scale, &layout(false)).unwrap_err();
        assert!(matches!(err, HeatmapError::Render(_)));
    }
}
