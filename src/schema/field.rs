//! Field identifiers and the lookup table from (scope, logical field) to
//! host property keys and user-facing labels.

use std::fmt;

use super::breakpoint::Breakpoint;

/// Where a field lives: the base configuration or one breakpoint override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Base,
    Tier(Breakpoint),
}

impl Scope {
    pub fn tier(self) -> Option<Breakpoint> {
        match self {
            Scope::Base => None,
            Scope::Tier(tier) => Some(tier),
        }
    }
}

/// Container fields that exist both at the base level and per breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerField {
    Columns,
    Rows,
    Areas,
    Gap,
    RowGap,
    ColumnGap,
    JustifyItems,
    AlignItems,
    JustifyContent,
    AlignContent,
    AutoFlow,
    MinWidth,
    MaxWidth,
    MinHeight,
    MaxHeight,
}

impl ContainerField {
    pub const ALL: [ContainerField; 15] = [
        ContainerField::Columns,
        ContainerField::Rows,
        ContainerField::Areas,
        ContainerField::Gap,
        ContainerField::RowGap,
        ContainerField::ColumnGap,
        ContainerField::JustifyItems,
        ContainerField::AlignItems,
        ContainerField::JustifyContent,
        ContainerField::AlignContent,
        ContainerField::AutoFlow,
        ContainerField::MinWidth,
        ContainerField::MaxWidth,
        ContainerField::MinHeight,
        ContainerField::MaxHeight,
    ];

    pub const GAPS: [ContainerField; 3] = [
        ContainerField::Gap,
        ContainerField::RowGap,
        ContainerField::ColumnGap,
    ];

    pub const SIZING: [ContainerField; 4] = [
        ContainerField::MinWidth,
        ContainerField::MaxWidth,
        ContainerField::MinHeight,
        ContainerField::MaxHeight,
    ];

    fn base_key(self) -> &'static str {
        match self {
            ContainerField::Columns => "gridTemplateColumns",
            ContainerField::Rows => "gridTemplateRows",
            ContainerField::Areas => "gridTemplateAreas",
            ContainerField::Gap => "gap",
            ContainerField::RowGap => "rowGap",
            ContainerField::ColumnGap => "columnGap",
            ContainerField::JustifyItems => "justifyItems",
            ContainerField::AlignItems => "alignItems",
            ContainerField::JustifyContent => "justifyContent",
            ContainerField::AlignContent => "alignContent",
            ContainerField::AutoFlow => "gridAutoFlow",
            ContainerField::MinWidth => "minWidth",
            ContainerField::MaxWidth => "maxWidth",
            ContainerField::MinHeight => "minHeight",
            ContainerField::MaxHeight => "maxHeight",
        }
    }

    fn tier_suffix(self) -> &'static str {
        match self {
            ContainerField::Columns => "Columns",
            ContainerField::Rows => "Rows",
            ContainerField::Areas => "Areas",
            ContainerField::Gap => "Gap",
            ContainerField::RowGap => "RowGap",
            ContainerField::ColumnGap => "ColumnGap",
            ContainerField::JustifyItems => "JustifyItems",
            ContainerField::AlignItems => "AlignItems",
            ContainerField::JustifyContent => "JustifyContent",
            ContainerField::AlignContent => "AlignContent",
            ContainerField::AutoFlow => "AutoFlow",
            ContainerField::MinWidth => "MinWidth",
            ContainerField::MaxWidth => "MaxWidth",
            ContainerField::MinHeight => "MinHeight",
            ContainerField::MaxHeight => "MaxHeight",
        }
    }

    fn base_label(self) -> &'static str {
        match self {
            ContainerField::Columns => "Grid Template Columns",
            ContainerField::Rows => "Grid Template Rows",
            ContainerField::Areas => "Grid Template Areas",
            other => other.tier_label(),
        }
    }

    fn tier_label(self) -> &'static str {
        match self {
            ContainerField::Columns => "Columns",
            ContainerField::Rows => "Rows",
            ContainerField::Areas => "Areas",
            ContainerField::Gap => "Gap",
            ContainerField::RowGap => "Row Gap",
            ContainerField::ColumnGap => "Column Gap",
            ContainerField::JustifyItems => "Justify Items",
            ContainerField::AlignItems => "Align Items",
            ContainerField::JustifyContent => "Justify Content",
            ContainerField::AlignContent => "Align Content",
            ContainerField::AutoFlow => "Auto Flow",
            ContainerField::MinWidth => "Min Width",
            ContainerField::MaxWidth => "Max Width",
            ContainerField::MinHeight => "Min Height",
            ContainerField::MaxHeight => "Max Height",
        }
    }

    /// Host property key, e.g. `gridTemplateColumns` or `smColumns`
    pub fn key(self, scope: Scope) -> String {
        match scope {
            Scope::Base => self.base_key().to_string(),
            Scope::Tier(tier) => format!("{}{}", tier.prefix(), self.tier_suffix()),
        }
    }

    /// Label used in messages, e.g. `Grid Template Columns` or `Small Columns`
    pub fn label(self, scope: Scope) -> String {
        match scope {
            Scope::Base => self.base_label().to_string(),
            Scope::Tier(tier) => format!("{} {}", tier.label(), self.tier_label()),
        }
    }
}

/// Item fields; `Enabled` only exists per breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Enabled,
    PlacementType,
    GridArea,
    ColumnStart,
    ColumnEnd,
    RowStart,
    RowEnd,
    ZIndex,
    JustifySelf,
    AlignSelf,
}

impl ItemField {
    /// Fields whose relevance depends on the placement type
    pub const PLACEMENT: [ItemField; 5] = [
        ItemField::GridArea,
        ItemField::ColumnStart,
        ItemField::ColumnEnd,
        ItemField::RowStart,
        ItemField::RowEnd,
    ];

    pub const COORDINATES: [ItemField; 4] = [
        ItemField::ColumnStart,
        ItemField::ColumnEnd,
        ItemField::RowStart,
        ItemField::RowEnd,
    ];

    /// Everything a breakpoint override carries besides its `Enabled` flag
    pub const TIER_DETAILS: [ItemField; 9] = [
        ItemField::PlacementType,
        ItemField::GridArea,
        ItemField::ColumnStart,
        ItemField::ColumnEnd,
        ItemField::RowStart,
        ItemField::RowEnd,
        ItemField::ZIndex,
        ItemField::JustifySelf,
        ItemField::AlignSelf,
    ];

    fn suffix(self) -> &'static str {
        match self {
            ItemField::Enabled => "Enabled",
            ItemField::PlacementType => "PlacementType",
            ItemField::GridArea => "GridArea",
            ItemField::ColumnStart => "ColumnStart",
            ItemField::ColumnEnd => "ColumnEnd",
            ItemField::RowStart => "RowStart",
            ItemField::RowEnd => "RowEnd",
            ItemField::ZIndex => "ZIndex",
            ItemField::JustifySelf => "JustifySelf",
            ItemField::AlignSelf => "AlignSelf",
        }
    }

    fn base_label(self) -> &'static str {
        match self {
            ItemField::Enabled => "Enabled",
            ItemField::PlacementType => "Placement Type",
            ItemField::GridArea => "Grid Area",
            ItemField::ColumnStart => "Column Start",
            ItemField::ColumnEnd => "Column End",
            ItemField::RowStart => "Row Start",
            ItemField::RowEnd => "Row End",
            ItemField::ZIndex => "Z-Index",
            ItemField::JustifySelf => "Justify Self",
            ItemField::AlignSelf => "Align Self",
        }
    }

    /// Host property key, e.g. `columnStart` or `smColumnStart`
    pub fn key(self, scope: Scope) -> String {
        match scope {
            Scope::Base => {
                let suffix = self.suffix();
                let mut chars = suffix.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            }
            Scope::Tier(tier) => format!("{}{}", tier.prefix(), self.suffix()),
        }
    }

    pub fn label(self, scope: Scope) -> String {
        match scope {
            Scope::Base => self.base_label().to_string(),
            Scope::Tier(tier) => format!("{} {}", tier.label(), self.base_label()),
        }
    }
}

/// Address of a property in the host's property panel
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    Container(String),
    Item { index: usize, key: String },
}

impl FieldPath {
    pub fn container(key: impl Into<String>) -> Self {
        FieldPath::Container(key.into())
    }

    pub fn item(index: usize, key: impl Into<String>) -> Self {
        FieldPath::Item {
            index,
            key: key.into(),
        }
    }

    pub fn container_field(field: ContainerField, scope: Scope) -> Self {
        FieldPath::Container(field.key(scope))
    }

    pub fn item_field(index: usize, field: ItemField, scope: Scope) -> Self {
        FieldPath::Item {
            index,
            key: field.key(scope),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Container(key) => f.write_str(key),
            FieldPath::Item { index, key } => write!(f, "items/{}/{}", index, key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_keys() {
        assert_eq!(ContainerField::Columns.key(Scope::Base), "gridTemplateColumns");
        assert_eq!(
            ContainerField::Columns.key(Scope::Tier(Breakpoint::Sm)),
            "smColumns"
        );
        assert_eq!(
            ContainerField::RowGap.key(Scope::Tier(Breakpoint::Xxl)),
            "xxlRowGap"
        );
        assert_eq!(ContainerField::AutoFlow.key(Scope::Base), "gridAutoFlow");
    }

    #[test]
    fn test_container_labels() {
        assert_eq!(
            ContainerField::Areas.label(Scope::Base),
            "Grid Template Areas"
        );
        assert_eq!(
            ContainerField::MinWidth.label(Scope::Tier(Breakpoint::Md)),
            "Medium Min Width"
        );
    }

    #[test]
    fn test_item_keys() {
        assert_eq!(ItemField::ColumnStart.key(Scope::Base), "columnStart");
        assert_eq!(ItemField::ZIndex.key(Scope::Base), "zIndex");
        assert_eq!(
            ItemField::ColumnStart.key(Scope::Tier(Breakpoint::Sm)),
            "smColumnStart"
        );
        assert_eq!(ItemField::Enabled.key(Scope::Tier(Breakpoint::Lg)), "lgEnabled");
    }

    #[test]
    fn test_field_path_display() {
        assert_eq!(FieldPath::container("gap").to_string(), "gap");
        assert_eq!(
            FieldPath::item_field(2, ItemField::ColumnStart, Scope::Tier(Breakpoint::Sm))
                .to_string(),
            "items/2/smColumnStart"
        );
    }
}
