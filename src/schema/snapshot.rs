//! The configuration snapshot handed over by the host on every edit

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;

use super::breakpoint::{Breakpoint, PerBreakpoint};
use super::field::{ContainerField, Scope};

/// How an item positions itself in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlacementType {
    #[default]
    Auto,
    Area,
    Coordinates,
    Span,
}

impl PlacementType {
    pub fn as_str(self) -> &'static str {
        match self {
            PlacementType::Auto => "auto",
            PlacementType::Area => "area",
            PlacementType::Coordinates => "coordinates",
            PlacementType::Span => "span",
        }
    }
}

impl fmt::Display for PlacementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `justify-items`/`align-items`/`*-self` values; `Auto` inherits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemAlignment {
    #[default]
    Auto,
    Start,
    End,
    Center,
    Stretch,
    Baseline,
}

/// `justify-content`/`align-content` values; `Auto` inherits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentAlignment {
    #[default]
    Auto,
    Start,
    End,
    Center,
    Stretch,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AutoFlow {
    #[default]
    Auto,
    Row,
    Column,
    Dense,
    RowDense,
    ColumnDense,
}

/// HTML element an item renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemTag {
    #[default]
    Auto,
    Div,
    Section,
    Article,
    Header,
    Footer,
    Main,
    Aside,
    Nav,
}

/// Integer fields typed by hand in the IDE; anything that is not an
/// integer reads as absent
fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Some(n),
        Raw::Text(s) => s.trim().parse().ok(),
        Raw::Other(_) => None,
    })
}

/// Read access shared by the base container and its breakpoint overrides
pub trait ContainerValues {
    /// Raw text of a free-text field, `None` for enumerated fields
    fn text(&self, field: ContainerField) -> Option<&str>;

    /// Whether the field carries a non-default value
    fn is_set(&self, field: ContainerField) -> bool;
}

/// Root configuration of one grid widget instance
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    pub grid_template_columns: String,
    pub grid_template_rows: String,
    pub grid_template_areas: String,
    pub use_named_areas: bool,
    pub gap: String,
    pub row_gap: String,
    pub column_gap: String,
    pub justify_items: ItemAlignment,
    pub align_items: ItemAlignment,
    pub justify_content: ContentAlignment,
    pub align_content: ContentAlignment,
    pub grid_auto_flow: AutoFlow,
    pub auto_columns: String,
    pub auto_rows: String,
    pub min_width: String,
    pub max_width: String,
    pub min_height: String,
    pub max_height: String,
    pub enable_virtualization: bool,
    #[serde(deserialize_with = "lenient_integer")]
    pub virtualize_threshold: Option<i64>,
    pub enable_breakpoints: bool,
    pub breakpoints: PerBreakpoint<ContainerOverrides>,
    pub show_grid_lines: bool,
    pub show_grid_areas: bool,
    pub show_grid_gaps: bool,
    pub aria_label: String,
    pub aria_labelled_by: String,
    pub items: Vec<ItemConfig>,
}

impl Snapshot {
    /// Parse a snapshot from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a snapshot from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Whether a tier's overrides apply: both the global switch and the
    /// tier's own flag must be on
    pub fn tier_active(&self, tier: Breakpoint) -> bool {
        self.enable_breakpoints && self.breakpoints.get(tier).enabled
    }

    /// Active tiers in ascending order
    pub fn active_tiers(&self) -> Vec<Breakpoint> {
        Breakpoint::ALL
            .into_iter()
            .filter(|tier| self.tier_active(*tier))
            .collect()
    }

    /// Container values for a scope
    pub fn container(&self, scope: Scope) -> &dyn ContainerValues {
        match scope {
            Scope::Base => self,
            Scope::Tier(tier) => self.breakpoints.get(tier),
        }
    }
}

impl ContainerValues for Snapshot {
    fn text(&self, field: ContainerField) -> Option<&str> {
        let value = match field {
            ContainerField::Columns => &self.grid_template_columns,
            ContainerField::Rows => &self.grid_template_rows,
            ContainerField::Areas => &self.grid_template_areas,
            ContainerField::Gap => &self.gap,
            ContainerField::RowGap => &self.row_gap,
            ContainerField::ColumnGap => &self.column_gap,
            ContainerField::MinWidth => &self.min_width,
            ContainerField::MaxWidth => &self.max_width,
            ContainerField::MinHeight => &self.min_height,
            ContainerField::MaxHeight => &self.max_height,
            ContainerField::JustifyItems
            | ContainerField::AlignItems
            | ContainerField::JustifyContent
            | ContainerField::AlignContent
            | ContainerField::AutoFlow => return None,
        };
        Some(value.as_str())
    }

    fn is_set(&self, field: ContainerField) -> bool {
        match field {
            ContainerField::JustifyItems => self.justify_items != ItemAlignment::Auto,
            ContainerField::AlignItems => self.align_items != ItemAlignment::Auto,
            ContainerField::JustifyContent => self.justify_content != ContentAlignment::Auto,
            ContainerField::AlignContent => self.align_content != ContentAlignment::Auto,
            ContainerField::AutoFlow => self.grid_auto_flow != AutoFlow::Auto,
            other => self.text(other).is_some_and(|v| !v.trim().is_empty()),
        }
    }
}

/// Per-breakpoint container overrides
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerOverrides {
    pub enabled: bool,
    pub columns: String,
    pub rows: String,
    pub areas: String,
    pub gap: String,
    pub row_gap: String,
    pub column_gap: String,
    pub justify_items: ItemAlignment,
    pub align_items: ItemAlignment,
    pub justify_content: ContentAlignment,
    pub align_content: ContentAlignment,
    pub auto_flow: AutoFlow,
    pub min_width: String,
    pub max_width: String,
    pub min_height: String,
    pub max_height: String,
}

impl ContainerOverrides {
    /// Number of fields carrying an override
    pub fn override_count(&self) -> usize {
        ContainerField::ALL
            .into_iter()
            .filter(|field| self.is_set(*field))
            .count()
    }
}

impl ContainerValues for ContainerOverrides {
    fn text(&self, field: ContainerField) -> Option<&str> {
        let value = match field {
            ContainerField::Columns => &self.columns,
            ContainerField::Rows => &self.rows,
            ContainerField::Areas => &self.areas,
            ContainerField::Gap => &self.gap,
            ContainerField::RowGap => &self.row_gap,
            ContainerField::ColumnGap => &self.column_gap,
            ContainerField::MinWidth => &self.min_width,
            ContainerField::MaxWidth => &self.max_width,
            ContainerField::MinHeight => &self.min_height,
            ContainerField::MaxHeight => &self.max_height,
            ContainerField::JustifyItems
            | ContainerField::AlignItems
            | ContainerField::JustifyContent
            | ContainerField::AlignContent
            | ContainerField::AutoFlow => return None,
        };
        Some(value.as_str())
    }

    fn is_set(&self, field: ContainerField) -> bool {
        match field {
            ContainerField::JustifyItems => self.justify_items != ItemAlignment::Auto,
            ContainerField::AlignItems => self.align_items != ItemAlignment::Auto,
            ContainerField::JustifyContent => self.justify_content != ContentAlignment::Auto,
            ContainerField::AlignContent => self.align_content != ContentAlignment::Auto,
            ContainerField::AutoFlow => self.auto_flow != AutoFlow::Auto,
            other => self.text(other).is_some_and(|v| !v.trim().is_empty()),
        }
    }
}

/// One child of the grid
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemConfig {
    pub name: String,
    pub placement_type: PlacementType,
    pub grid_area: String,
    pub column_start: String,
    pub column_end: String,
    pub row_start: String,
    pub row_end: String,
    pub z_index: String,
    pub justify_self: ItemAlignment,
    pub align_self: ItemAlignment,
    pub tag_name: ItemTag,
    pub enable_responsive: bool,
    pub breakpoints: PerBreakpoint<ItemOverrides>,
}

impl ItemConfig {
    /// Placement-related values for a scope
    pub fn fields(&self, scope: Scope) -> PlacementFields<'_> {
        match scope {
            Scope::Base => PlacementFields {
                placement_type: self.placement_type,
                grid_area: &self.grid_area,
                column_start: &self.column_start,
                column_end: &self.column_end,
                row_start: &self.row_start,
                row_end: &self.row_end,
                z_index: &self.z_index,
            },
            Scope::Tier(tier) => {
                let o = self.breakpoints.get(tier);
                PlacementFields {
                    placement_type: o.placement_type,
                    grid_area: &o.grid_area,
                    column_start: &o.column_start,
                    column_end: &o.column_end,
                    row_start: &o.row_start,
                    row_end: &o.row_end,
                    z_index: &o.z_index,
                }
            }
        }
    }

    /// Label used in messages: `Item 3` or `Item 3 (sidebar)`
    pub fn label(&self, index: usize) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            format!("Item {}", index + 1)
        } else {
            format!("Item {} ({})", index + 1, name)
        }
    }
}

/// Per-breakpoint item overrides
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemOverrides {
    pub enabled: bool,
    pub placement_type: PlacementType,
    pub grid_area: String,
    pub column_start: String,
    pub column_end: String,
    pub row_start: String,
    pub row_end: String,
    pub z_index: String,
    pub justify_self: ItemAlignment,
    pub align_self: ItemAlignment,
}

/// Borrowed view of the placement fields of one item in one scope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementFields<'a> {
    pub placement_type: PlacementType,
    pub grid_area: &'a str,
    pub column_start: &'a str,
    pub column_end: &'a str,
    pub row_start: &'a str,
    pub row_end: &'a str,
    pub z_index: &'a str,
}

impl PlacementFields<'_> {
    /// Whether any of the four line fields holds a value
    pub fn has_coordinates(&self) -> bool {
        [self.column_start, self.column_end, self.row_start, self.row_end]
            .iter()
            .any(|v| !v.trim().is_empty())
    }
}
