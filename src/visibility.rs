//! Property panel visibility
//!
//! Decides which fields the host should hide for the current snapshot and
//! groups the container-level fields into tabs. Every rule contributes to a
//! single set; a field hidden by any rule stays hidden.

use std::collections::BTreeSet;

use tracing::debug;

use crate::schema::{
    Breakpoint, ContainerField, FieldPath, ItemConfig, ItemField, PlacementType, Scope, Snapshot,
};

/// Set of fields the property panel should hide
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiddenFields(BTreeSet<FieldPath>);

impl HiddenFields {
    pub fn contains(&self, path: &FieldPath) -> bool {
        self.0.contains(path)
    }

    /// Whether the container-level field with this key is hidden
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains(&FieldPath::container(key))
    }

    /// Whether the field `key` of item `index` is hidden
    pub fn contains_item(&self, index: usize, key: &str) -> bool {
        self.0.contains(&FieldPath::item(index, key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldPath> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn hide(&mut self, path: FieldPath) {
        self.0.insert(path);
    }

    fn hide_container(&mut self, field: ContainerField, scope: Scope) {
        self.hide(FieldPath::container_field(field, scope));
    }

    fn hide_item(&mut self, index: usize, field: ItemField, scope: Scope) {
        self.hide(FieldPath::item_field(index, field, scope));
    }
}

impl<'a> IntoIterator for &'a HiddenFields {
    type Item = &'a FieldPath;
    type IntoIter = std::collections::btree_set::Iter<'a, FieldPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Compute the set of hidden fields for a snapshot
pub fn compute_visibility(snapshot: &Snapshot) -> HiddenFields {
    let mut hidden = HiddenFields::default();
    hide_named_area_fields(snapshot, &mut hidden);
    hide_gap_fields(snapshot, &mut hidden);
    hide_breakpoint_fields(snapshot, &mut hidden);
    for (index, item) in snapshot.items.iter().enumerate() {
        hide_item_placement(snapshot, index, item, &mut hidden);
        hide_item_breakpoints(snapshot, index, item, &mut hidden);
    }
    if !snapshot.enable_virtualization {
        hidden.hide(FieldPath::container("virtualizeThreshold"));
    }
    if !snapshot.use_named_areas {
        hidden.hide(FieldPath::container("showGridAreas"));
    }
    debug!(hidden = hidden.len(), items = snapshot.items.len(), "computed visibility");
    hidden
}

/// Placement fields that have no meaning for a placement type
pub fn unused_placement_fields(placement_type: PlacementType, use_named_areas: bool) -> Vec<ItemField> {
    match placement_type {
        PlacementType::Auto => ItemField::PLACEMENT.to_vec(),
        PlacementType::Area => {
            let mut fields = ItemField::COORDINATES.to_vec();
            if !use_named_areas {
                fields.push(ItemField::GridArea);
            }
            fields
        }
        PlacementType::Coordinates => vec![ItemField::GridArea],
        PlacementType::Span => vec![ItemField::GridArea, ItemField::ColumnEnd, ItemField::RowEnd],
    }
}

fn hide_named_area_fields(snapshot: &Snapshot, hidden: &mut HiddenFields) {
    if snapshot.use_named_areas {
        return;
    }
    hidden.hide_container(ContainerField::Areas, Scope::Base);
    for tier in Breakpoint::ALL {
        hidden.hide_container(ContainerField::Areas, Scope::Tier(tier));
    }
}

fn hide_gap_fields(snapshot: &Snapshot, hidden: &mut HiddenFields) {
    let scopes = std::iter::once(Scope::Base).chain(Breakpoint::ALL.into_iter().map(Scope::Tier));
    for scope in scopes {
        if snapshot.container(scope).is_set(ContainerField::Gap) {
            hidden.hide_container(ContainerField::RowGap, scope);
            hidden.hide_container(ContainerField::ColumnGap, scope);
        }
    }
}

fn hide_breakpoint_fields(snapshot: &Snapshot, hidden: &mut HiddenFields) {
    for (tier, overrides) in snapshot.breakpoints.iter() {
        if !snapshot.enable_breakpoints {
            hidden.hide(FieldPath::container(tier.enabled_key()));
        } else if overrides.enabled {
            continue;
        }
        for field in ContainerField::ALL {
            hidden.hide_container(field, Scope::Tier(tier));
        }
    }
}

fn hide_item_placement(snapshot: &Snapshot, index: usize, item: &ItemConfig, hidden: &mut HiddenFields) {
    for field in unused_placement_fields(item.placement_type, snapshot.use_named_areas) {
        hidden.hide_item(index, field, Scope::Base);
    }
}

fn hide_item_breakpoints(snapshot: &Snapshot, index: usize, item: &ItemConfig, hidden: &mut HiddenFields) {
    let responsive = item.enable_responsive && snapshot.enable_breakpoints;

    for (tier, overrides) in item.breakpoints.iter() {
        let scope = Scope::Tier(tier);
        if !responsive || !snapshot.breakpoints.get(tier).enabled {
            hidden.hide_item(index, ItemField::Enabled, scope);
            for field in ItemField::TIER_DETAILS {
                hidden.hide_item(index, field, scope);
            }
        } else if !overrides.enabled {
            for field in ItemField::TIER_DETAILS {
                hidden.hide_item(index, field, scope);
            }
        } else {
            for field in unused_placement_fields(overrides.placement_type, snapshot.use_named_areas) {
                hidden.hide_item(index, field, scope);
            }
        }
    }
}

/// One tab of the property panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyTab {
    pub caption: &'static str,
    /// Container-level field keys in display order
    pub fields: Vec<String>,
}

/// Hidden fields plus the tab grouping of the property panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    pub hidden: HiddenFields,
    pub tabs: Vec<PropertyTab>,
}

impl PanelLayout {
    /// Fields of a tab that are not hidden
    pub fn visible_fields(&self, caption: &str) -> Vec<&str> {
        self.tabs
            .iter()
            .filter(|tab| tab.caption == caption)
            .flat_map(|tab| tab.fields.iter())
            .filter(|key| !self.hidden.contains_key(key))
            .map(String::as_str)
            .collect()
    }
}

/// Compute visibility and the tab grouping of the container fields
pub fn compute_panel(snapshot: &Snapshot) -> PanelLayout {
    PanelLayout {
        hidden: compute_visibility(snapshot),
        tabs: panel_tabs(),
    }
}

fn keys(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

fn panel_tabs() -> Vec<PropertyTab> {
    let mut general = vec![
        ContainerField::Columns.key(Scope::Base),
        ContainerField::Rows.key(Scope::Base),
        "useNamedAreas".to_string(),
        ContainerField::Areas.key(Scope::Base),
    ];
    general.extend(
        ContainerField::ALL
            .into_iter()
            .filter(|f| !matches!(f, ContainerField::Columns | ContainerField::Rows | ContainerField::Areas))
            .map(|f| f.key(Scope::Base)),
    );
    general.extend(keys(&["autoColumns", "autoRows"]));

    let mut responsive = vec!["enableBreakpoints".to_string()];
    for tier in Breakpoint::ALL {
        responsive.push(tier.enabled_key());
        responsive.extend(ContainerField::ALL.into_iter().map(|f| f.key(Scope::Tier(tier))));
    }

    vec![
        PropertyTab {
            caption: "General",
            fields: general,
        },
        PropertyTab {
            caption: "Responsive",
            fields: responsive,
        },
        PropertyTab {
            caption: "Items",
            fields: keys(&["items"]),
        },
        PropertyTab {
            caption: "Performance",
            fields: keys(&["enableVirtualization", "virtualizeThreshold"]),
        },
        PropertyTab {
            caption: "Accessibility",
            fields: keys(&["ariaLabel", "ariaLabelledBy"]),
        },
        PropertyTab {
            caption: "Debug",
            fields: keys(&["showGridLines", "showGridAreas", "showGridGaps"]),
        },
    ]
}
