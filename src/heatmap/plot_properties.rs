//! Plot property definitions with defaults from plot.json
//!
//! plot.json is embedded at compile time and holds every recognized property
//! with its default value, so defaults are defined in ONE place rather than
//! scattered through the codebase as fallbacks.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{error, warn};

/// plot.json embedded at compile time
const PLOT_JSON: &str = include_str!("../../plot.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PropertyKind {
    #[serde(rename = "StringProperty")]
    String,
    #[serde(rename = "EnumeratedProperty")]
    Enumerated,
    #[serde(rename = "BooleanProperty")]
    Boolean,
}

/// Property definition from plot.json
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    #[serde(rename = "defaultValue", default)]
    pub default_value: String,
    #[serde(default)]
    pub description: String,
    /// For EnumeratedProperty, the valid values
    #[serde(rename = "values")]
    pub valid_values: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct PlotDefinition {
    properties: Vec<PropertyDef>,
}

/// Registry of all plot properties with their defaults from plot.json
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let definition: PlotDefinition =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse plot JSON: {}", e))?;

        let properties = definition
            .properties
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();

        Ok(Self { properties })
    }

    /// Get the default value for a property
    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// All property definitions, sorted by name
    pub fn properties(&self) -> Vec<&PropertyDef> {
        let mut defs: Vec<&PropertyDef> = self.properties.values().collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true) // Non-enumerated properties accept any value
    }
}

static REGISTRY: OnceLock<PropertyRegistry> = OnceLock::new();

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    REGISTRY.get_or_init(|| {
        PropertyRegistry::from_json(PLOT_JSON).unwrap_or_else(|e| {
            error!("{}", e);
            PropertyRegistry::default()
        })
    })
}

/// Typed plot property reader
///
/// User-set values take precedence; anything unset (or set to an empty
/// string) falls back to the plot.json default.
#[derive(Debug, Clone, Default)]
pub struct PlotPropertyReader {
    user_values: HashMap<String, String>,
}

impl PlotPropertyReader {
    pub fn new(user_values: HashMap<String, String>) -> Self {
        let user_values = user_values
            .into_iter()
            .filter(|(_, v)| !v.is_empty()) // Empty = not set
            .collect();
        Self { user_values }
    }

    /// Set or replace a user value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let name = name.into();
        if value.is_empty() {
            self.user_values.remove(&name);
        } else {
            self.user_values.insert(name, value);
        }
    }

    /// Names of user values that plot.json does not define
    pub fn unknown_properties(&self) -> Vec<&str> {
        let reg = registry();
        let mut unknown: Vec<&str> = self
            .user_values
            .keys()
            .filter(|name| reg.get_property(name).is_none())
            .map(|name| name.as_str())
            .collect();
        unknown.sort_unstable();
        unknown
    }

    /// Get string property (user value or default from plot.json)
    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }
        registry().get_default(name).unwrap_or("").to_string()
    }

    /// Get optional string property (None if empty)
    pub fn get_optional_string(&self, name: &str) -> Option<String> {
        let value = self.get_string(name);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Get enumerated property with validation
    ///
    /// Returns the user-set value if valid, otherwise the default.
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            if reg.is_valid_enum_value(name, value) {
                return value.to_lowercase();
            }
            let valid_values = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            warn!(
                "Invalid value '{}' for property '{}'. Valid values: [{}]. Using default: '{}'",
                value, name, valid_values, default
            );
        }

        default.to_string()
    }

    /// Get boolean property ("true"/"false", case-insensitive)
    pub fn get_bool(&self, name: &str) -> bool {
        let default = registry()
            .get_default(name)
            .map(|d| d.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        match self.user_values.get(name) {
            Some(v) if v.eq_ignore_ascii_case("true") => true,
            Some(v) if v.eq_ignore_ascii_case("false") => false,
            Some(other) => {
                warn!(
                    "Invalid boolean value '{}' for property '{}'. Using default: {}",
                    other, name, default
                );
                default
            }
            None => default,
        }
    }

    /// Get a strictly positive integer, None if unset
    ///
    /// Unlike the other getters an invalid value is an error: it names a
    /// required grid dimension, and guessing one would read the file wrong.
    pub fn get_positive_usize(&self, name: &str) -> Result<Option<usize>, String> {
        let value = match self.get_optional_string(name) {
            Some(v) => v,
            None => return Ok(None),
        };
        match value.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(format!(
                "property '{}' must be a positive integer, got '{}'",
                name, value
            )),
        }
    }

    /// Parse an interval "lo,hi"
    ///
    /// Falls back to the plot.json default when the user value is malformed.
    pub fn get_range(&self, name: &str) -> Option<(f64, f64)> {
        if let Some(value) = self.user_values.get(name) {
            match parse_pair(value) {
                Some(pair) => return Some(pair),
                None => warn!(
                    "Invalid range '{}' for property '{}', expected 'lo,hi'. Using default",
                    value, name
                ),
            }
        }
        registry().get_default(name).and_then(parse_pair)
    }
}

/// Parse "a,b" into two f64 values
fn parse_pair(value: &str) -> Option<(f64, f64)> {
    let (a, b) = value.split_once(',')?;
    let a = a.trim().parse::<f64>().ok()?;
    let b = b.trim().parse::<f64>().ok()?;
    Some((a, b))
}
