//! Plot configuration from plot properties
//!
//! Configuration is loaded from plot properties (defined in plot.json).
//! Default values come from plot.json - no hardcoded fallbacks in this code.
//! The one exception is the grid shape, which has no default: it must match
//! the sample file, so the caller picks a preset or gives rows and cols.

use crate::heatmap::axes::LinearAxis;
use crate::heatmap::plot_properties::PlotPropertyReader;
use crate::heatmap::properties::{PlotDimension, PngCompression};
use crate::heatmap::render::RenderLayout;
use crate::heatmap::{HeatmapError, Result};
use std::path::PathBuf;

/// Plot panel size used for `auto` dimensions
const AUTO_PLOT_WIDTH: u32 = 800;
const AUTO_PLOT_HEIGHT: u32 = 600;

/// Named grid shapes the solver produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPreset {
    /// 1000×1000
    Fine,
    /// 100×100
    Coarse,
}

impl GridPreset {
    /// Parse from string value, None for anything unrecognized
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fine" => Some(Self::Fine),
            "coarse" => Some(Self::Coarse),
            _ => None,
        }
    }

    /// (rows, cols)
    pub fn shape(self) -> (usize, usize) {
        match self {
            Self::Fine => (1000, 1000),
            Self::Coarse => (100, 100),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Flat big-endian f64 sample file
    pub input_path: PathBuf,

    /// Destination PNG
    pub output_path: PathBuf,

    /// Grid rows (vertical axis samples)
    pub rows: usize,

    /// Grid columns (horizontal axis samples)
    pub cols: usize,

    /// Horizontal axis interval, both endpoints included
    pub x_range: (f64, f64),

    /// Vertical axis interval, both endpoints included
    pub t_range: (f64, f64),

    /// Color scale range; values beyond it saturate
    pub color_clip: (f64, f64),

    /// Palette name from palettes.json (`_r` suffix reverses)
    pub palette: String,

    /// Plot panel width (pixels or Auto)
    pub plot_width: PlotDimension,

    /// Plot panel height (pixels or Auto)
    pub plot_height: PlotDimension,

    /// Draw the colorbar legend
    pub colorbar: bool,

    pub x_label: Option<String>,
    pub t_label: Option<String>,

    /// Label font; None searches common system locations
    pub font_path: Option<PathBuf>,

    pub png_compression: PngCompression,
}

impl PlotConfig {
    /// Create config from plot properties
    pub fn from_properties(props: &PlotPropertyReader) -> Result<Self> {
        let (rows, cols) = resolve_grid_shape(props)?;

        let x_range = required_range(props, "x.range")?;
        let t_range = required_range(props, "t.range")?;
        let color_clip = required_range(props, "color.clip")?;

        let plot_width = PlotDimension::parse(&props.get_string("plot.width"), PlotDimension::Auto);
        let plot_height =
            PlotDimension::parse(&props.get_string("plot.height"), PlotDimension::Auto);

        let png_compression = PngCompression::parse(&props.get_enum("png.compression"));

        let config = Self {
            input_path: PathBuf::from(props.get_string("input.path")),
            output_path: PathBuf::from(props.get_string("output.path")),
            rows,
            cols,
            x_range,
            t_range,
            color_clip,
            palette: props.get_string("palette"),
            plot_width,
            plot_height,
            colorbar: props.get_bool("colorbar"),
            x_label: props.get_optional_string("x.label"),
            t_label: props.get_optional_string("t.label"),
            font_path: props.get_optional_string("font.path").map(PathBuf::from),
            png_compression,
        };

        config.validate()?;
        Ok(config)
    }

    /// Config with plot.json defaults for everything but paths and shape
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        rows: usize,
        cols: usize,
    ) -> Result<Self> {
        let mut props = PlotPropertyReader::default();
        props.set("grid.rows", rows.to_string());
        props.set("grid.cols", cols.to_string());

        let mut config = Self::from_properties(&props)?;
        config.input_path = input_path.into();
        config.output_path = output_path.into();
        Ok(config)
    }

    pub fn with_preset(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        preset: GridPreset,
    ) -> Result<Self> {
        let (rows, cols) = preset.shape();
        Self::new(input_path, output_path, rows, cols)
    }

    pub fn with_x_range(mut self, lo: f64, hi: f64) -> Self {
        self.x_range = (lo, hi);
        self
    }

    pub fn with_t_range(mut self, lo: f64, hi: f64) -> Self {
        self.t_range = (lo, hi);
        self
    }

    pub fn with_color_clip(mut self, lo: f64, hi: f64) -> Self {
        self.color_clip = (lo, hi);
        self
    }

    pub fn with_palette(mut self, palette: impl Into<String>) -> Self {
        self.palette = palette.into();
        self
    }

    pub fn with_plot_size(mut self, width: PlotDimension, height: PlotDimension) -> Self {
        self.plot_width = width;
        self.plot_height = height;
        self
    }

    pub fn with_colorbar(mut self, colorbar: bool) -> Self {
        self.colorbar = colorbar;
        self
    }

    /// Number of samples the input file must hold
    pub fn sample_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Check shape and interval invariants
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(HeatmapError::Config(format!(
                "grid shape {}×{} must be positive",
                self.rows, self.cols
            )));
        }

        for (name, (lo, hi)) in [
            ("x.range", self.x_range),
            ("t.range", self.t_range),
            ("color.clip", self.color_clip),
        ] {
            if !(lo.is_finite() && hi.is_finite() && lo < hi && (hi - lo).is_finite()) {
                return Err(HeatmapError::Config(format!(
                    "{} [{}, {}] must be finite with lo < hi and a finite width",
                    name, lo, hi
                )));
            }
        }

        for (name, (lo, hi), n) in [
            ("x.range", self.x_range, self.cols),
            ("t.range", self.t_range, self.rows),
        ] {
            if !LinearAxis::linspace(lo, hi, n).is_finite() {
                return Err(HeatmapError::Config(format!(
                    "{} [{}, {}] with {} samples has cell edges beyond the f64 range",
                    name, lo, hi, n
                )));
            }
        }

        Ok(())
    }

    /// Resolve plot dimensions to actual pixels: (width, height) of the plot panel
    pub fn resolve_dimensions(&self) -> (u32, u32) {
        (
            self.plot_width.resolve(AUTO_PLOT_WIDTH),
            self.plot_height.resolve(AUTO_PLOT_HEIGHT),
        )
    }

    /// Render layout; `labels` says whether a label font is available
    pub fn render_layout(&self, labels: bool) -> RenderLayout {
        let (plot_width, plot_height) = self.resolve_dimensions();
        RenderLayout {
            plot_width,
            plot_height,
            colorbar: self.colorbar,
            x_label: self.x_label.clone(),
            t_label: self.t_label.clone(),
            labels,
        }
    }
}

/// Grid shape from explicit rows/cols, falling back to the preset
///
/// Explicit values win over the preset one dimension at a time.
fn resolve_grid_shape(props: &PlotPropertyReader) -> Result<(usize, usize)> {
    let preset = match props.get_optional_string("grid.preset") {
        Some(name) => Some(GridPreset::parse(&name).ok_or_else(|| {
            HeatmapError::Config(format!("unknown grid preset '{}'", name))
        })?),
        None => None,
    };
    let preset_shape = preset.map(GridPreset::shape);

    let rows = props
        .get_positive_usize("grid.rows")
        .map_err(HeatmapError::Config)?
        .or(preset_shape.map(|(rows, _)| rows));
    let cols = props
        .get_positive_usize("grid.cols")
        .map_err(HeatmapError::Config)?
        .or(preset_shape.map(|(_, cols)| cols));

    match (rows, cols) {
        (Some(rows), Some(cols)) => Ok((rows, cols)),
        _ => Err(HeatmapError::Config(
            "grid shape is required: set grid.preset (fine = 1000x1000, coarse = 100x100) \
             or both grid.rows and grid.cols"
                .to_string(),
        )),
    }
}

fn required_range(props: &PlotPropertyReader, name: &str) -> Result<(f64, f64)> {
    props
        .get_range(name)
        .ok_or_else(|| HeatmapError::Config(format!("property '{}' has no valid range", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn props(values: &[(&str, &str)]) -> PlotPropertyReader {
        PlotPropertyReader::new(
            values
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn test_presets() {
        assert_eq!(GridPreset::Fine.shape(), (1000, 1000));
        assert_eq!(GridPreset::Coarse.shape(), (100, 100));
        assert_eq!(GridPreset::parse(" Fine "), Some(GridPreset::Fine));
        assert_eq!(GridPreset::parse("medium"), None);
    }

    #[test]
    fn test_defaults_match_source_values() {
        let config = PlotConfig::from_properties(&props(&[("grid.preset", "fine")])).unwrap();
        assert_eq!(config.input_path, PathBuf::from("testing/MyMesh"));
        assert_eq!(config.output_path, PathBuf::from("plot.png"));
        assert_eq!((config.rows, config.cols), (1000, 1000));
        assert_eq!(config.x_range, (0.0, 6.0));
        assert_eq!(config.t_range, (0.0, 3.0));
        assert_eq!(config.color_clip, (-1.0, 1.0));
        assert_eq!(config.palette, "RdBu_r");
        assert!(config.colorbar);
        assert_eq!(config.x_label.as_deref(), Some("x"));
        assert_eq!(config.t_label.as_deref(), Some("t"));
        assert_eq!(config.font_path, None);
        assert_eq!(config.png_compression, PngCompression::Fast);
        assert_eq!(config.sample_count(), 1_000_000);
    }

    #[test]
    fn test_grid_shape_is_required() {
        let err = PlotConfig::from_properties(&PlotPropertyReader::default()).unwrap_err();
        assert!(matches!(err, HeatmapError::Config(_)));

        let err = PlotConfig::from_properties(&props(&[("grid.rows", "10")])).unwrap_err();
        assert!(matches!(err, HeatmapError::Config(_)));
    }

    #[test]
    fn test_explicit_shape_overrides_preset() {
        let config = PlotConfig::from_properties(&props(&[
            ("grid.preset", "coarse"),
            ("grid.cols", "250"),
        ]))
        .unwrap();
        assert_eq!((config.rows, config.cols), (100, 250));
    }

    #[test]
    fn test_invalid_shape_values() {
        assert!(PlotConfig::from_properties(&props(&[("grid.rows", "0"), ("grid.cols", "5")])).is_err());
        assert!(PlotConfig::from_properties(&props(&[("grid.rows", "5"), ("grid.cols", "-1")])).is_err());

        let err = PlotConfig::from_properties(&props(&[("grid.preset", "medium")])).unwrap_err();
        assert!(err.to_string().contains("medium"));
    }

    #[test]
    fn test_new_and_builders() {
        let config = PlotConfig::new("in.bin", "out.png", 3, 4)
            .unwrap()
            .with_x_range(-1.0, 1.0)
            .with_t_range(0.0, 10.0)
            .with_color_clip(-2.0, 2.0)
            .with_palette("Viridis")
            .with_colorbar(false);

        assert_eq!(config.input_path, PathBuf::from("in.bin"));
        assert_eq!(config.output_path, PathBuf::from("out.png"));
        assert_eq!((config.rows, config.cols), (3, 4));
        assert_eq!(config.x_range, (-1.0, 1.0));
        assert_eq!(config.t_range, (0.0, 10.0));
        assert_eq!(config.color_clip, (-2.0, 2.0));
        assert_eq!(config.palette, "Viridis");
        assert!(!config.colorbar);
        assert!(config.validate().is_ok());

        let coarse = PlotConfig::with_preset("a", "b", GridPreset::Coarse).unwrap();
        assert_eq!(coarse.sample_count(), 10_000);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let base = PlotConfig::new("in", "out", 2, 2).unwrap();
        assert!(base.clone().with_x_range(6.0, 0.0).validate().is_err());
        assert!(base.clone().with_t_range(1.0, 1.0).validate().is_err());
        assert!(base.clone().with_color_clip(f64::NAN, 1.0).validate().is_err());
        assert!(PlotConfig::new("in", "out", 0, 2).is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_ranges() {
        let base = PlotConfig::new("in", "out", 2, 2).unwrap();

        // Width hi - lo overflows to infinity
        let err = base.clone().with_x_range(-1e308, 1e308).validate().unwrap_err();
        assert!(matches!(err, HeatmapError::Config(_)));
        assert!(base.clone().with_t_range(-f64::MAX, f64::MAX).validate().is_err());
        assert!(base.clone().with_color_clip(-1e308, 1e308).validate().is_err());

        // Width is finite but the outer cell edge is not
        let err = base.clone().with_x_range(0.0, f64::MAX).validate().unwrap_err();
        assert!(err.to_string().contains("cell edges"));

        // Large but representable
        assert!(base.clone().with_x_range(0.0, 1e300).validate().is_ok());

        let err = PlotConfig::from_properties(&props(&[
            ("grid.preset", "coarse"),
            ("x.range", "-1e308,1e308"),
        ]))
        .unwrap_err();
        assert!(matches!(err, HeatmapError::Config(_)));
    }

    #[test]
    fn test_range_properties() {
        let config = PlotConfig::from_properties(&props(&[
            ("grid.preset", "coarse"),
            ("x.range", "-3,3"),
            ("color.clip", "-0.5, 0.5"),
        ]))
        .unwrap();
        assert_eq!(config.x_range, (-3.0, 3.0));
        assert_eq!(config.color_clip, (-0.5, 0.5));

        let err = PlotConfig::from_properties(&props(&[
            ("grid.preset", "coarse"),
            ("t.range", "3,0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, HeatmapError::Config(_)));
    }

    #[test]
    fn test_resolve_dimensions() {
        let config = PlotConfig::new("in", "out", 2, 2).unwrap();
        assert_eq!(config.resolve_dimensions(), (800, 600));

        let config = config.with_plot_size(PlotDimension::Pixels(400), PlotDimension::Auto);
        assert_eq!(config.resolve_dimensions(), (400, 600));

        let layout = config.render_layout(false);
        assert_eq!(layout.plot_width, 400);
        assert!(layout.colorbar);
        assert!(!layout.labels);
    }
}
