//! Area color palette
//!
//! Named areas get a color by hashing their name, so an area keeps its
//! color while the template is edited around it. Freshly generated areas
//! can be colored by position instead.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default area colors (Material 300 tones)
const DEFAULT_COLORS: [&str; 10] = [
    "#e57373", "#64b5f6", "#81c784", "#ffb74d", "#ba68c8", "#4db6ac", "#f06292", "#aed581",
    "#7986cb", "#ffd54f",
];

/// A cyclic list of area colors
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Optional name for the palette
    pub name: Option<String>,
    /// Colors in cycle order; never empty
    pub colors: Vec<String>,
}

/// TOML structure for deserializing palettes
#[derive(Deserialize)]
struct TomlPalette {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: Vec<String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            name: None,
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Palette {
    /// Load a palette from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a palette from TOML; an empty color list keeps the defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlPalette = toml::from_str(content)?;
        let mut palette = Palette {
            name: parsed.metadata.and_then(|m| m.name),
            ..Palette::default()
        };
        if !parsed.colors.is_empty() {
            palette.colors = parsed.colors;
        }
        Ok(palette)
    }

    /// Color for the `index`-th area
    pub fn color_for_index(&self, index: usize) -> &str {
        match self.colors.len() {
            0 => DEFAULT_COLORS[index % DEFAULT_COLORS.len()],
            n => &self.colors[index % n],
        }
    }

    /// Color for an area name; the same name always gets the same color
    pub fn color_for_name(&self, name: &str) -> &str {
        self.color_for_index(name_hash(name) as usize)
    }
}

/// 31-multiplier string hash, stable across runs and platforms
fn name_hash(name: &str) -> u32 {
    name.chars()
        .fold(0u32, |hash, c| hash.wrapping_mul(31).wrapping_add(c as u32))
}
