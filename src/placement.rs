//! Placement calculator for the design-time preview
//!
//! Resolves each item to a box of grid lines. The boxes only approximate
//! what the browser does; `span` placements in particular are left for the
//! live CSS engine and get a placeholder box.

use tracing::trace;

use crate::parser::{parse_areas, parse_grid_line, parse_track_list, AreaGrid, GridLine};
use crate::schema::{Breakpoint, ItemConfig, PlacementFields, PlacementType, Scope, Snapshot};

/// Resolved grid lines of one item (1-based, end lines exclusive)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub col_start: i32,
    pub col_end: i32,
    pub row_start: i32,
    pub row_end: i32,
    /// Area name, for area placements that resolved
    pub grid_area: Option<String>,
    /// Raw column expression, for span placements
    pub grid_column: Option<String>,
    /// Raw row expression, for span placements
    pub grid_row: Option<String>,
}

impl Placement {
    fn cell(col_start: i32, col_end: i32, row_start: i32, row_end: i32) -> Self {
        Self {
            col_start,
            col_end,
            row_start,
            row_end,
            grid_area: None,
            grid_column: None,
            grid_row: None,
        }
    }
}

/// Compute the placement box of one item
pub fn compute_placement(
    fields: &PlacementFields<'_>,
    index: usize,
    area_grid: Option<&AreaGrid>,
    column_count: usize,
    use_named_areas: bool,
) -> Placement {
    match fields.placement_type {
        PlacementType::Area => {
            let name = fields.grid_area.trim();
            let bounds = area_grid
                .filter(|_| use_named_areas && !name.is_empty())
                .and_then(|grid| grid.bounds(name));
            match bounds {
                Some(b) => Placement {
                    grid_area: Some(name.to_string()),
                    ..Placement::cell(
                        b.min_col as i32 + 1,
                        b.max_col as i32 + 2,
                        b.min_row as i32 + 1,
                        b.max_row as i32 + 2,
                    )
                },
                None => {
                    trace!(index, area = name, "area not found, falling back to auto placement");
                    auto_placement(index, column_count)
                }
            }
        }
        PlacementType::Coordinates => {
            let (col_start, col_end) = line_pair(fields.column_start, fields.column_end);
            let (row_start, row_end) = line_pair(fields.row_start, fields.row_end);
            Placement::cell(col_start, col_end, row_start, row_end)
        }
        PlacementType::Span => Placement {
            grid_column: Some(expression(fields.column_start)),
            grid_row: Some(expression(fields.row_start)),
            ..Placement::cell(1, 2, 1, 2)
        },
        PlacementType::Auto => auto_placement(index, column_count),
    }
}

fn auto_placement(index: usize, column_count: usize) -> Placement {
    let columns = column_count.max(1);
    let col = (index % columns) as i32 + 1;
    let row = (index / columns) as i32 + 1;
    Placement::cell(col, col + 1, row, row + 1)
}

/// Plain line number the validator would accept
fn line_number(value: &str) -> Option<i32> {
    match parse_grid_line(value) {
        Ok(GridLine::Line(n)) => Some(n),
        _ => None,
    }
}

/// Start and end lines; end falls back to start + 1 and never precedes it
fn line_pair(start: &str, end: &str) -> (i32, i32) {
    let start = line_number(start).unwrap_or(1);
    let end = match line_number(end) {
        Some(end) if end > start => end,
        _ => start + 1,
    };
    (start, end)
}

fn expression(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        "auto".to_string()
    } else {
        value.to_string()
    }
}

/// Whether the item at `index` shares at least one row with another item
pub fn is_inline_with_others(index: usize, placements: &[Placement]) -> bool {
    let Some(this) = placements.get(index) else {
        return false;
    };
    placements
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .any(|(_, other)| this.row_start < other.row_end && other.row_start < this.row_end)
}

/// Human-readable summary of a placement
pub fn describe_placement(placement: &Placement, placement_type: PlacementType) -> String {
    let p = placement;
    match (placement_type, &p.grid_area) {
        (PlacementType::Area, Some(name)) => format!(
            "Area {}: columns {} / {}, rows {} / {}",
            name, p.col_start, p.col_end, p.row_start, p.row_end
        ),
        (PlacementType::Coordinates, _) => format!(
            "Columns {} / {}, rows {} / {}",
            p.col_start, p.col_end, p.row_start, p.row_end
        ),
        (PlacementType::Span, _) => format!(
            "Span: column {}, row {}",
            p.grid_column.as_deref().unwrap_or("auto"),
            p.grid_row.as_deref().unwrap_or("auto")
        ),
        _ => format!("Auto: column {}, row {}", p.col_start, p.row_start),
    }
}

/// Container templates in effect at a preview width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGrid<'a> {
    pub columns: &'a str,
    pub rows: &'a str,
    pub areas: &'a str,
}

impl ResolvedGrid<'_> {
    /// Parsed area template; `None` when empty or invalid
    pub fn area_grid(&self) -> Option<AreaGrid> {
        if self.areas.trim().is_empty() {
            return None;
        }
        parse_areas(self.areas).ok()
    }

    /// Explicit column count used for auto placement, at least 1
    pub fn column_count(&self, area_grid: Option<&AreaGrid>) -> usize {
        parse_track_list(self.columns)
            .ok()
            .map(|list| list.track_count())
            .filter(|n| *n > 0)
            .or_else(|| area_grid.map(AreaGrid::column_count).filter(|n| *n > 0))
            .unwrap_or(1)
    }
}

/// Active tiers up to and including `tier`, smallest first
fn cascade(snapshot: &Snapshot, tier: Option<Breakpoint>) -> impl Iterator<Item = Breakpoint> + '_ {
    snapshot
        .active_tiers()
        .into_iter()
        .filter(move |t| tier.is_some_and(|limit| *t <= limit))
}

fn overlay<'a>(current: &'a str, value: &'a str) -> &'a str {
    if value.trim().is_empty() {
        current
    } else {
        value
    }
}

/// Templates in effect at `tier`; later non-empty tier values win
pub fn resolve_grid(snapshot: &Snapshot, tier: Option<Breakpoint>) -> ResolvedGrid<'_> {
    let mut grid = ResolvedGrid {
        columns: &snapshot.grid_template_columns,
        rows: &snapshot.grid_template_rows,
        areas: &snapshot.grid_template_areas,
    };
    for t in cascade(snapshot, tier) {
        let o = snapshot.breakpoints.get(t);
        grid.columns = overlay(grid.columns, &o.columns);
        grid.rows = overlay(grid.rows, &o.rows);
        grid.areas = overlay(grid.areas, &o.areas);
    }
    grid
}

/// Placement fields of an item in effect at `tier`
pub fn resolve_item<'a>(snapshot: &Snapshot, item: &'a ItemConfig, tier: Option<Breakpoint>) -> PlacementFields<'a> {
    let mut fields = item.fields(Scope::Base);
    if !item.enable_responsive {
        return fields;
    }
    for t in cascade(snapshot, tier) {
        if !item.breakpoints.get(t).enabled {
            continue;
        }
        let z_index = fields.z_index;
        fields = item.fields(Scope::Tier(t));
        fields.z_index = overlay(z_index, fields.z_index);
    }
    fields
}

/// Place every item as the grid looks at `tier` (`None` for the base)
pub fn compute_placements(snapshot: &Snapshot, tier: Option<Breakpoint>) -> Vec<Placement> {
    let grid = resolve_grid(snapshot, tier);
    let area_grid = if snapshot.use_named_areas {
        grid.area_grid()
    } else {
        None
    };
    let column_count = grid.column_count(area_grid.as_ref());

    snapshot
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let fields = resolve_item(snapshot, item, tier);
            compute_placement(
                &fields,
                index,
                area_grid.as_ref(),
                column_count,
                snapshot.use_named_areas,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields<'a>(placement_type: PlacementType) -> PlacementFields<'a> {
        PlacementFields {
            placement_type,
            grid_area: "",
            column_start: "",
            column_end: "",
            row_start: "",
            row_end: "",
            z_index: "",
        }
    }

    #[test]
    fn test_area_bounding_box() {
        let grid = parse_areas("header header\nsidebar main\nsidebar main").expect("Should parse");
        let mut f = fields(PlacementType::Area);
        f.grid_area = "sidebar";
        let p = compute_placement(&f, 0, Some(&grid), 2, true);
        assert_eq!(
            (p.row_start, p.row_end, p.col_start, p.col_end),
            (2, 4, 1, 2)
        );
        assert_eq!(describe_placement(&p, PlacementType::Area), "Area sidebar: columns 1 / 2, rows 2 / 4");
    }

    #[test]
    fn test_unknown_area_falls_back_to_auto() {
        let grid = parse_areas("a b").expect("Should parse");
        let mut f = fields(PlacementType::Area);
        f.grid_area = "missing";
        let p = compute_placement(&f, 3, Some(&grid), 2, true);
        assert_eq!((p.col_start, p.row_start), (2, 2));
        assert_eq!(p.grid_area, None);

        f.grid_area = "a";
        let p = compute_placement(&f, 0, Some(&grid), 2, false);
        assert_eq!(p.grid_area, None);
    }

    #[test]
    fn test_coordinates() {
        let mut f = fields(PlacementType::Coordinates);
        f.column_start = "2";
        f.column_end = "4";
        f.row_start = "3";
        let p = compute_placement(&f, 0, None, 1, false);
        assert_eq!(Placement::cell(2, 4, 3, 4), p);
        assert_eq!(describe_placement(&p, PlacementType::Coordinates), "Columns 2 / 4, rows 3 / 4");

        // End never precedes start
        f.column_end = "1";
        let p = compute_placement(&f, 0, None, 1, false);
        assert_eq!((p.col_start, p.col_end), (2, 3));
    }

    #[test]
    fn test_coordinates_outside_line_range_fall_back() {
        let mut f = fields(PlacementType::Coordinates);
        f.column_start = "2147483647";
        f.column_end = "2000000000";
        f.row_start = "span 2";
        f.row_end = "x";
        let p = compute_placement(&f, 0, None, 1, false);
        assert_eq!(Placement::cell(1, 2, 1, 2), p);

        f.column_start = "-1";
        f.column_end = "10001";
        let p = compute_placement(&f, 0, None, 1, false);
        assert_eq!((p.col_start, p.col_end), (-1, 0));
        assert!(p.col_end > p.col_start);
    }

    #[test]
    fn test_span_passes_expressions_through() {
        let mut f = fields(PlacementType::Span);
        f.column_start = "span 2";
        let p = compute_placement(&f, 5, None, 3, false);
        assert_eq!((p.col_start, p.col_end, p.row_start, p.row_end), (1, 2, 1, 2));
        assert_eq!(describe_placement(&p, PlacementType::Span), "Span: column span 2, row auto");
    }

    #[test]
    fn test_auto_flow() {
        let f = fields(PlacementType::Auto);
        let p = compute_placement(&f, 4, None, 3, false);
        assert_eq!((p.col_start, p.row_start), (2, 2));
        assert_eq!(describe_placement(&p, PlacementType::Auto), "Auto: column 2, row 2");

        // A zero column count behaves as a single column
        let p = compute_placement(&f, 2, None, 0, false);
        assert_eq!((p.col_start, p.row_start), (1, 3));
    }

    #[test]
    fn test_inline_with_others() {
        let placements = vec![
            Placement::cell(1, 2, 1, 3),
            Placement::cell(2, 3, 2, 3),
            Placement::cell(1, 3, 3, 4),
        ];
        assert!(is_inline_with_others(0, &placements));
        assert!(is_inline_with_others(1, &placements));
        assert!(!is_inline_with_others(2, &placements));
        assert!(!is_inline_with_others(7, &placements));
    }

    #[test]
    fn test_resolve_grid_cascades_through_active_tiers() {
        let mut snapshot = Snapshot {
            enable_breakpoints: true,
            grid_template_columns: "1fr".to_string(),
            grid_template_rows: "auto".to_string(),
            ..Default::default()
        };
        let sm = snapshot.breakpoints.get_mut(Breakpoint::Sm);
        sm.enabled = true;
        sm.columns = "1fr 1fr".to_string();
        let lg = snapshot.breakpoints.get_mut(Breakpoint::Lg);
        lg.enabled = true;
        lg.columns = "repeat(4, 1fr)".to_string();
        // Disabled tiers never apply
        snapshot.breakpoints.get_mut(Breakpoint::Md).columns = "1fr 1fr 1fr".to_string();

        assert_eq!(resolve_grid(&snapshot, None).columns, "1fr");
        assert_eq!(resolve_grid(&snapshot, Some(Breakpoint::Md)).columns, "1fr 1fr");
        let xl = resolve_grid(&snapshot, Some(Breakpoint::Xl));
        assert_eq!(xl.columns, "repeat(4, 1fr)");
        assert_eq!(xl.rows, "auto");
        assert_eq!(xl.column_count(None), 4);
    }

    #[test]
    fn test_compute_placements_at_tier() {
        let mut snapshot = Snapshot {
            enable_breakpoints: true,
            grid_template_columns: "1fr 1fr".to_string(),
            ..Default::default()
        };
        snapshot.breakpoints.get_mut(Breakpoint::Md).enabled = true;

        let mut item = ItemConfig {
            enable_responsive: true,
            z_index: "2".to_string(),
            ..Default::default()
        };
        let md = item.breakpoints.get_mut(Breakpoint::Md);
        md.enabled = true;
        md.placement_type = PlacementType::Coordinates;
        md.column_start = "2".to_string();
        snapshot.items = vec![ItemConfig::default(), item];

        let base = compute_placements(&snapshot, None);
        assert_eq!((base[1].col_start, base[1].row_start), (2, 1));

        let resolved = resolve_item(&snapshot, &snapshot.items[1], Some(Breakpoint::Lg));
        assert_eq!(resolved.placement_type, PlacementType::Coordinates);
        assert_eq!(resolved.z_index, "2");
    }
}
