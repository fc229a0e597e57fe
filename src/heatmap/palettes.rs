//! Palette registry for loading and accessing color palettes
//!
//! Loads palettes from palettes.json (embedded at compile time) and provides
//! access by name. Names are case-insensitive, and an `_r` suffix selects the
//! reversed palette (`RdBu_r` runs blue → white → red).
//!
//! Palette types:
//! - `sequential`: Gradient from low to high values
//! - `diverging`: Gradient with a neutral midpoint (e.g., for +/- deviations)

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error, warn};

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../../palettes.json");

/// Global palette registry, initialized lazily on first access
pub static PALETTE_REGISTRY: Lazy<PaletteRegistry> = Lazy::new(|| {
    PaletteRegistry::from_json(PALETTES_JSON).unwrap_or_else(|e| {
        error!("Failed to load palettes.json: {}", e);
        PaletteRegistry::default()
    })
});

/// Suffix selecting the reversed palette
const REVERSED_SUFFIX: &str = "_r";

/// Palette type as defined in palettes.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    Sequential,
    Diverging,
}

/// A single palette definition from palettes.json
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub palette_type: PaletteType,
    pub colors: Vec<String>,
}

impl PaletteDefinition {
    /// Get all colors as RGB arrays, skipping malformed entries
    pub fn get_colors_rgb(&self) -> Vec<[u8; 3]> {
        self.colors
            .iter()
            .filter_map(|hex| parse_hex_color(hex))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Same palette with its colors in the opposite order
    pub fn reversed(&self) -> Self {
        let mut colors = self.colors.clone();
        colors.reverse();
        PaletteDefinition {
            name: format!("{}{}", self.name, REVERSED_SUFFIX),
            palette_type: self.palette_type,
            colors,
        }
    }
}

/// Registry of all available palettes
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    /// All palettes by name (lowercase keys for case-insensitive lookup)
    palettes: HashMap<String, PaletteDefinition>,
    sequential_names: Vec<String>,
    diverging_names: Vec<String>,
}

impl PaletteRegistry {
    /// Load palettes from JSON string
    pub fn from_json(json: &str) -> Result<Self, String> {
        let definitions: Vec<PaletteDefinition> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse palettes JSON: {}", e))?;

        let mut registry = Self::default();

        for def in definitions {
            let name = def.name.clone();
            match def.palette_type {
                PaletteType::Sequential => registry.sequential_names.push(name.clone()),
                PaletteType::Diverging => registry.diverging_names.push(name.clone()),
            }
            registry.palettes.insert(name.to_lowercase(), def);
        }

        debug!(
            "PaletteRegistry: loaded {} palettes ({} sequential, {} diverging)",
            registry.palettes.len(),
            registry.sequential_names.len(),
            registry.diverging_names.len()
        );

        Ok(registry)
    }

    /// Get a palette by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PaletteDefinition> {
        self.palettes.get(&name.to_lowercase())
    }

    /// Get a palette by name, honoring the `_r` suffix
    pub fn resolve(&self, name: &str) -> Option<PaletteDefinition> {
        if let Some(def) = self.get(name) {
            return Some(def.clone());
        }

        let lower = name.to_lowercase();
        lower
            .strip_suffix(REVERSED_SUFFIX)
            .and_then(|base| self.get(base))
            .map(PaletteDefinition::reversed)
    }

    pub fn sequential_palettes(&self) -> &[String] {
        &self.sequential_names
    }

    pub fn diverging_palettes(&self) -> &[String] {
        &self.diverging_names
    }
}

/// Parse a hex color string to RGB array
///
/// Supports formats:
/// - `#RRGGBB` (6 hex digits)
/// - `#RRGGBBAA` (8 hex digits, alpha ignored)
/// - `RRGGBB` / `RRGGBBAA` (without #)
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if hex.len() != 6 && hex.len() != 8 {
        warn!("Invalid hex color length '{}': {}", hex, hex.len());
        return None;
    }

    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;

    Some([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("#00FF00"), Some([0, 255, 0]));
        assert_eq!(parse_hex_color("#2166AC"), Some([33, 102, 172]));

        // Without #
        assert_eq!(parse_hex_color("FF0000"), Some([255, 0, 0]));

        // 8-digit hex (with alpha, ignored)
        assert_eq!(parse_hex_color("#440154FF"), Some([68, 1, 84]));

        // Invalid
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("GGGGGG"), None);
    }

    #[test]
    fn test_palette_registry_loads() {
        let registry = &*PALETTE_REGISTRY;
        assert!(!registry.palettes.is_empty());

        let rdbu = registry.get("RdBu").unwrap();
        assert_eq!(rdbu.palette_type, PaletteType::Diverging);
        assert_eq!(rdbu.len(), 11);
        // Dark red at the low end, dark blue at the high end
        assert_eq!(rdbu.get_colors_rgb()[0], [103, 0, 31]);
        assert_eq!(rdbu.get_colors_rgb()[10], [5, 48, 97]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(PALETTE_REGISTRY.get("rdbu").is_some());
        assert!(PALETTE_REGISTRY.get("VIRIDIS").is_some());
        assert!(PALETTE_REGISTRY.get("no-such-palette").is_none());
    }

    #[test]
    fn test_resolve_reversed() {
        let forward = PALETTE_REGISTRY.resolve("RdBu").unwrap();
        let reversed = PALETTE_REGISTRY.resolve("RdBu_r").unwrap();

        assert_eq!(reversed.name, "RdBu_r");
        assert_eq!(reversed.len(), forward.len());
        assert_eq!(reversed.colors.first(), forward.colors.last());
        assert_eq!(reversed.colors.last(), forward.colors.first());

        assert!(PALETTE_REGISTRY.resolve("nope_r").is_none());
    }

    #[test]
    fn test_palette_types() {
        let registry = &*PALETTE_REGISTRY;
        assert!(registry
            .sequential_palettes()
            .contains(&"Viridis".to_string()));
        assert!(registry.sequential_palettes().contains(&"Jet".to_string()));
        assert!(registry.diverging_palettes().contains(&"RdBu".to_string()));
        assert!(registry.diverging_palettes().contains(&"PiYG".to_string()));
    }

    #[test]
    fn test_all_palette_colors_parse() {
        let registry = PaletteRegistry::from_json(PALETTES_JSON).unwrap();
        for def in registry.palettes.values() {
            assert_eq!(def.get_colors_rgb().len(), def.len(), "{}", def.name);
        }
    }
}
