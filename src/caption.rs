//! One-line summary of a grid shown on the canvas and in the structure tree

use crate::parser::parse_track_list;
use crate::schema::Snapshot;

/// Build the caption, e.g. `Grid (3×2) - 4 items (1 responsive) - 2 breakpoints`
pub fn caption(snapshot: &Snapshot) -> String {
    let mut clauses = vec![grid_clause(snapshot)];

    if !snapshot.items.is_empty() {
        let responsive = snapshot
            .items
            .iter()
            .filter(|item| item.enable_responsive)
            .count();
        clauses.push(format!(
            "{} items ({} responsive)",
            snapshot.items.len(),
            responsive
        ));
    }

    if snapshot.enable_breakpoints {
        let tiers = snapshot.active_tiers().len();
        if tiers > 0 {
            clauses.push(format!("{} breakpoints", tiers));
        }
    }

    clauses.join(" - ")
}

fn grid_clause(snapshot: &Snapshot) -> String {
    if snapshot.use_named_areas {
        let areas = snapshot.grid_template_areas.trim();
        let lines = if areas.is_empty() {
            0
        } else {
            areas.matches('\n').count() + 1
        };
        format!("Grid ({} areas)", lines)
    } else {
        format!(
            "Grid ({}×{})",
            track_count(&snapshot.grid_template_columns),
            track_count(&snapshot.grid_template_rows)
        )
    }
}

fn track_count(template: &str) -> String {
    match parse_track_list(template).map(|list| list.track_count()) {
        Ok(count) if count > 0 => count.to_string(),
        _ => "auto".to_string(),
    }
}
