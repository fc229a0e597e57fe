//! Continuous color scales
//!
//! This module provides:
//! - Color palettes as sorted value → RGB stops
//! - Linear RGB interpolation between stops, clamped at both ends
//! - A clipped color scale mapping grid values onto a named palette

use super::error::{HeatmapError, Result};
use super::palettes::{PaletteDefinition, PALETTE_REGISTRY};

/// Color used for cells without a palette entry (NaN, infinite, empty palette)
pub const BAD_COLOR: [u8; 3] = [128, 128, 128];

/// A color palette with sorted color stops for interpolation
#[derive(Debug, Clone, Default)]
pub struct ColorPalette {
    /// Sorted list of color stops (by value, ascending)
    pub stops: Vec<ColorStop>,
}

/// A single color stop in a palette
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    /// Numeric value at this stop
    pub value: f64,
    /// RGB color at this stop
    pub color: [u8; 3],
}

impl ColorPalette {
    pub fn new() -> Self {
        ColorPalette { stops: Vec::new() }
    }

    /// Spread `colors` evenly over `[lo, hi]`
    pub fn from_colors(colors: &[[u8; 3]], lo: f64, hi: f64) -> Self {
        let mut palette = ColorPalette::new();
        match colors.len() {
            0 => {}
            1 => palette.add_stop(lo, colors[0]),
            n => {
                let step = (hi - lo) / (n - 1) as f64;
                for (k, &color) in colors.iter().enumerate() {
                    let value = if k == n - 1 { hi } else { lo + k as f64 * step };
                    palette.add_stop(value, color);
                }
            }
        }
        palette
    }

    /// Add a color stop and maintain sorted order
    ///
    /// Non-finite values are ignored.
    pub fn add_stop(&mut self, value: f64, color: [u8; 3]) {
        if !value.is_finite() {
            return;
        }
        let stop = ColorStop { value, color };
        match self.stops.binary_search_by(|s| s.value.total_cmp(&value)) {
            Ok(pos) => self.stops[pos] = stop, // Replace if exists
            Err(pos) => self.stops.insert(pos, stop),
        }
    }
}

/// Interpolate a color value using the palette
///
/// Uses linear interpolation between the surrounding color stops.
/// Values outside the palette range clamp to the min/max colors.
pub fn interpolate_color(value: f64, palette: &ColorPalette) -> [u8; 3] {
    let stops = &palette.stops;
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return BAD_COLOR,
    };

    if value.is_nan() {
        return BAD_COLOR;
    }

    // Clamp to min
    if value <= first.value {
        return first.color;
    }

    // Clamp to max
    if value >= last.value {
        return last.color;
    }

    // Find surrounding stops using binary search
    let idx = stops.partition_point(|stop| stop.value < value);
    let lower = &stops[idx - 1];
    let upper = &stops[idx];

    let t = (value - lower.value) / (upper.value - lower.value);
    [
        (lower.color[0] as f64 * (1.0 - t) + upper.color[0] as f64 * t) as u8,
        (lower.color[1] as f64 * (1.0 - t) + upper.color[1] as f64 * t) as u8,
        (lower.color[2] as f64 * (1.0 - t) + upper.color[2] as f64 * t) as u8,
    ]
}

/// Maps grid values to colors over a fixed clip range
///
/// Values at or beyond the clip bounds saturate to the palette's end colors.
#[derive(Debug, Clone)]
pub struct ColorScale {
    palette: ColorPalette,
    clip: (f64, f64),
    name: String,
}

impl ColorScale {
    pub fn new(definition: &PaletteDefinition, clip: (f64, f64)) -> Result<Self> {
        let (lo, hi) = clip;
        if !(lo.is_finite() && hi.is_finite() && lo < hi && (hi - lo).is_finite()) {
            return Err(HeatmapError::Config(format!(
                "color clip [{}, {}] must be finite with min < max and a finite width",
                lo, hi
            )));
        }

        let colors = definition.get_colors_rgb();
        if colors.is_empty() {
            return Err(HeatmapError::Config(format!(
                "palette '{}' has no usable colors",
                definition.name
            )));
        }

        Ok(ColorScale {
            palette: ColorPalette::from_colors(&colors, lo, hi),
            clip,
            name: definition.name.clone(),
        })
    }

    /// Look up a palette by name in the registry and clip it to `clip`
    pub fn from_palette_name(name: &str, clip: (f64, f64)) -> Result<Self> {
        let definition = PALETTE_REGISTRY.resolve(name).ok_or_else(|| {
            HeatmapError::Config(format!("unknown palette '{}'", name))
        })?;
        Self::new(&definition, clip)
    }

    pub fn clip(&self) -> (f64, f64) {
        self.clip
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color_for(&self, value: f64) -> [u8; 3] {
        if !value.is_finite() {
            // +/- infinity still saturates like any other out-of-range value
            return match value {
                v if v == f64::INFINITY => self.max_color(),
                v if v == f64::NEG_INFINITY => self.min_color(),
                _ => BAD_COLOR,
            };
        }
        interpolate_color(value, &self.palette)
    }

    pub fn min_color(&self) -> [u8; 3] {
        self.palette.stops.first().map_or(BAD_COLOR, |s| s.color)
    }

    pub fn max_color(&self) -> [u8; 3] {
        self.palette.stops.last().map_or(BAD_COLOR, |s| s.color)
    }
}
