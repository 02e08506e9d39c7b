//! Index of every named area a snapshot defines

use std::collections::BTreeSet;

use tracing::trace;

use crate::parser::parse_areas;
use crate::schema::Snapshot;

/// Union of area names from the base template and every enabled tier's
/// template. Empty when named areas are off. Templates that fail to parse
/// contribute nothing; diagnostics reports them separately.
pub fn compute_area_index(snapshot: &Snapshot) -> BTreeSet<String> {
    let mut index = BTreeSet::new();
    if !snapshot.use_named_areas {
        return index;
    }

    let templates = std::iter::once(("base", snapshot.grid_template_areas.as_str())).chain(
        snapshot
            .breakpoints
            .iter()
            .filter(|(_, o)| o.enabled)
            .map(|(tier, o)| (tier.prefix(), o.areas.as_str())),
    );

    for (scope, text) in templates {
        if text.trim().is_empty() {
            continue;
        }
        match parse_areas(text) {
            Ok(grid) => index.extend(grid.names().into_iter().map(str::to_string)),
            Err(err) => trace!(scope, %err, "skipping invalid area template"),
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Breakpoint;

    fn names(index: &BTreeSet<String>) -> Vec<&str> {
        index.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_empty_when_named_areas_off() {
        let snapshot = Snapshot {
            grid_template_areas: "a b".to_string(),
            ..Default::default()
        };
        assert!(compute_area_index(&snapshot).is_empty());
    }

    #[test]
    fn test_union_of_base_and_enabled_tiers() {
        let mut snapshot = Snapshot {
            use_named_areas: true,
            grid_template_areas: "header header\nsidebar main".to_string(),
            ..Default::default()
        };
        let md = snapshot.breakpoints.get_mut(Breakpoint::Md);
        md.enabled = true;
        md.areas = "header\nmain\n.\nfooter".to_string();
        // Disabled tiers are not indexed
        snapshot.breakpoints.get_mut(Breakpoint::Lg).areas = "promo".to_string();

        let index = compute_area_index(&snapshot);
        assert_eq!(names(&index), vec!["footer", "header", "main", "sidebar"]);
    }

    #[test]
    fn test_invalid_template_contributes_nothing() {
        let mut snapshot = Snapshot {
            use_named_areas: true,
            grid_template_areas: "a b a".to_string(),
            ..Default::default()
        };
        let sm = snapshot.breakpoints.get_mut(Breakpoint::Sm);
        sm.enabled = true;
        sm.areas = "x y".to_string();

        assert_eq!(names(&compute_area_index(&snapshot)), vec!["x", "y"]);
    }
}
