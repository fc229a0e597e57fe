//! Typed values parsed from plot properties

use tracing::warn;

/// Plot dimension - either explicit pixels or "auto"
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlotDimension {
    #[default]
    Auto,
    Pixels(u32),
}

impl PlotDimension {
    /// Smallest accepted explicit size
    pub const MIN_PIXELS: u32 = 100;
    /// Largest accepted explicit size
    pub const MAX_PIXELS: u32 = 10_000;

    /// Parse from string property value
    ///
    /// Valid formats:
    /// - "auto" or "" (empty) → Auto
    /// - "1500" → Pixels(1500) if in valid range [100, 10000]
    pub fn parse(value: &str, default: PlotDimension) -> Self {
        let trimmed = value.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return PlotDimension::Auto;
        }

        match trimmed.parse::<u32>() {
            Ok(px) if (Self::MIN_PIXELS..=Self::MAX_PIXELS).contains(&px) => {
                PlotDimension::Pixels(px)
            }
            Ok(px) => {
                warn!(
                    "Plot dimension {} out of valid range [{}-{}], using default: {:?}",
                    px,
                    Self::MIN_PIXELS,
                    Self::MAX_PIXELS,
                    default
                );
                default
            }
            Err(_) => {
                warn!(
                    "Invalid plot dimension '{}', using default: {:?}",
                    trimmed, default
                );
                default
            }
        }
    }

    /// Resolve to actual pixels, `auto_size` for Auto
    pub fn resolve(&self, auto_size: u32) -> u32 {
        match self {
            PlotDimension::Pixels(px) => *px,
            PlotDimension::Auto => auto_size,
        }
    }
}

/// PNG compression level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PngCompression {
    /// Fastest encoding, larger files
    #[default]
    Fast,
    Default,
    /// Slowest encoding, smallest files
    Best,
}

impl PngCompression {
    /// Parse from string value
    ///
    /// Validation happens in PlotPropertyReader::get_enum, so anything
    /// unrecognized here means "default".
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "fast" => Self::Fast,
            "best" => Self::Best,
            _ => Self::Default,
        }
    }
}
