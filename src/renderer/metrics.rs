//! Track measurements supplied by the host's live layout

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::parser::parse_track_list;
use crate::placement::{compute_placements, resolve_grid};
use crate::schema::{Breakpoint, Snapshot};

/// Upper bound on estimated tracks per axis
pub const MAX_ESTIMATED_TRACKS: usize = 100;

/// Pixel geometry of a rendered grid
///
/// `column_starts[i]`/`column_sizes[i]` give the left edge and width of
/// track `i`; rows likewise. Gap thicknesses are the measured
/// `column-gap`/`row-gap`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridMetrics {
    pub width: f64,
    pub height: f64,
    pub column_starts: Vec<f64>,
    pub column_sizes: Vec<f64>,
    pub row_starts: Vec<f64>,
    pub row_sizes: Vec<f64>,
    pub column_gap: f64,
    pub row_gap: f64,
}

/// Axis-aligned rectangle in overlay coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

impl GridMetrics {
    /// Parse metrics from TOML
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load metrics from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Evenly sized tracks, for previews without a live measurement
    pub fn uniform(columns: usize, rows: usize, cell_width: f64, cell_height: f64, gap: f64) -> Self {
        let starts = |count: usize, size: f64| -> Vec<f64> {
            (0..count).map(|i| i as f64 * (size + gap)).collect()
        };
        let extent = |count: usize, size: f64| {
            if count == 0 {
                0.0
            } else {
                count as f64 * size + (count - 1) as f64 * gap
            }
        };
        Self {
            width: extent(columns, cell_width),
            height: extent(rows, cell_height),
            column_starts: starts(columns, cell_width),
            column_sizes: vec![cell_width; columns],
            row_starts: starts(rows, cell_height),
            row_sizes: vec![cell_height; rows],
            column_gap: gap,
            row_gap: gap,
        }
    }

    /// Evenly sized tracks covering the template and every placed item,
    /// for previews without a live measurement
    pub fn estimated(snapshot: &Snapshot, tier: Option<Breakpoint>) -> Self {
        let grid = resolve_grid(snapshot, tier);
        let area_grid = if snapshot.use_named_areas {
            grid.area_grid()
        } else {
            None
        };
        let placements = compute_placements(snapshot, tier);

        let columns = placements
            .iter()
            .map(|p| (p.col_end - 1).max(0) as usize)
            .fold(grid.column_count(area_grid.as_ref()), usize::max);
        let template_rows = parse_track_list(grid.rows)
            .map(|list| list.track_count())
            .unwrap_or(0)
            .max(area_grid.as_ref().map_or(0, |g| g.row_count()));
        let rows = placements
            .iter()
            .map(|p| (p.row_end - 1).max(0) as usize)
            .fold(template_rows.max(1), usize::max);

        Self::uniform(
            columns.min(MAX_ESTIMATED_TRACKS),
            rows.min(MAX_ESTIMATED_TRACKS),
            120.0,
            80.0,
            8.0,
        )
    }

    pub fn column_count(&self) -> usize {
        self.column_starts.len().min(self.column_sizes.len())
    }

    pub fn row_count(&self) -> usize {
        self.row_starts.len().min(self.row_sizes.len())
    }

    /// X position of grid column line `line` (1-based, negative from the end)
    pub fn column_line(&self, line: i32) -> Option<f64> {
        line_position(&self.column_starts, &self.column_sizes, line)
    }

    /// Y position of grid row line `line`
    pub fn row_line(&self, line: i32) -> Option<f64> {
        line_position(&self.row_starts, &self.row_sizes, line)
    }

    /// Rectangle covered by the lines, clamped to the measured tracks
    ///
    /// Spans from the start of the first track to the end of the last one,
    /// so outer gaps are not included.
    pub fn area_rect(&self, col_start: i32, col_end: i32, row_start: i32, row_end: i32) -> Option<Rect> {
        let (x1, x2) = track_span(&self.column_starts, &self.column_sizes, col_start, col_end)?;
        let (y1, y2) = track_span(&self.row_starts, &self.row_sizes, row_start, row_end)?;
        Some(Rect::new(x1, y1, (x2 - x1).max(0.0), (y2 - y1).max(0.0)))
    }

    /// Gaps between consecutive columns as rectangles spanning the grid height
    pub fn column_gaps(&self) -> Vec<Rect> {
        gaps(&self.column_starts, &self.column_sizes)
            .map(|(start, size)| Rect::new(start, 0.0, size, self.height))
            .collect()
    }

    /// Gaps between consecutive rows as rectangles spanning the grid width
    pub fn row_gaps(&self) -> Vec<Rect> {
        gaps(&self.row_starts, &self.row_sizes)
            .map(|(start, size)| Rect::new(0.0, start, self.width, size))
            .collect()
    }
}

fn line_position(starts: &[f64], sizes: &[f64], line: i32) -> Option<f64> {
    let tracks = starts.len().min(sizes.len()) as i32;
    if tracks == 0 || line == 0 {
        return None;
    }
    // Lines 1..=tracks+1; -1 is the last line
    let index = if line > 0 { line - 1 } else { tracks + 1 + line };
    if index < 0 || index > tracks {
        return None;
    }
    let index = index as usize;
    if index == 0 {
        Some(starts[0])
    } else {
        Some(starts[index - 1] + sizes[index - 1])
    }
}

fn track_span(starts: &[f64], sizes: &[f64], start: i32, end: i32) -> Option<(f64, f64)> {
    let tracks = starts.len().min(sizes.len()) as i32;
    if tracks == 0 {
        return None;
    }
    let first = start.clamp(1, tracks);
    let last = end.clamp(first + 1, tracks + 1) - 1;
    let first = (first - 1) as usize;
    let last = (last - 1) as usize;
    Some((starts[first], starts[last] + sizes[last]))
}

fn gaps<'a>(starts: &'a [f64], sizes: &'a [f64]) -> impl Iterator<Item = (f64, f64)> + 'a {
    starts
        .windows(2)
        .zip(sizes)
        .map(|(pair, size)| {
            let end = pair[0] + size;
            (end, pair[1] - end)
        })
        .filter(|(_, width)| *width > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ItemConfig, PlacementType};

    #[test]
    fn test_uniform_metrics() {
        let m = GridMetrics::uniform(3, 2, 100.0, 50.0, 10.0);
        assert_eq!(m.column_starts, vec![0.0, 110.0, 220.0]);
        assert_eq!(m.width, 320.0);
        assert_eq!(m.height, 110.0);
    }

    #[test]
    fn test_estimated_covers_placed_items() {
        let snapshot = Snapshot {
            grid_template_columns: "1fr 1fr".to_string(),
            items: vec![ItemConfig::default(); 5],
            ..Default::default()
        };
        let m = GridMetrics::estimated(&snapshot, None);
        assert_eq!((m.column_count(), m.row_count()), (2, 3));
    }

    #[test]
    fn test_estimated_track_counts_are_capped() {
        let snapshot = Snapshot {
            grid_template_columns: "repeat(5000, 1fr)".to_string(),
            items: vec![ItemConfig {
                placement_type: PlacementType::Coordinates,
                row_start: "9000".to_string(),
                column_start: "2000000000".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let m = GridMetrics::estimated(&snapshot, None);
        assert_eq!(m.column_count(), MAX_ESTIMATED_TRACKS);
        assert_eq!(m.row_count(), MAX_ESTIMATED_TRACKS);
    }

    #[test]
    fn test_line_positions() {
        let m = GridMetrics::uniform(3, 2, 100.0, 50.0, 10.0);
        assert_eq!(m.column_line(1), Some(0.0));
        assert_eq!(m.column_line(2), Some(100.0));
        assert_eq!(m.column_line(4), Some(320.0));
        assert_eq!(m.column_line(-1), Some(320.0));
        assert_eq!(m.column_line(5), None);
        assert_eq!(m.row_line(0), None);
    }

    #[test]
    fn test_area_rect_clamps_to_tracks() {
        let m = GridMetrics::uniform(2, 2, 100.0, 100.0, 0.0);
        assert_eq!(m.area_rect(1, 3, 2, 3), Some(Rect::new(0.0, 100.0, 200.0, 100.0)));
        assert_eq!(m.area_rect(5, 9, 1, 2), Some(Rect::new(100.0, 0.0, 100.0, 100.0)));
        assert_eq!(GridMetrics::default().area_rect(1, 2, 1, 2), None);

        // Inner gaps are covered, outer ones are not
        let m = GridMetrics::uniform(3, 1, 100.0, 40.0, 10.0);
        assert_eq!(m.area_rect(2, 4, 1, 2), Some(Rect::new(110.0, 0.0, 210.0, 40.0)));
    }

    #[test]
    fn test_gaps() {
        let m = GridMetrics::uniform(3, 1, 100.0, 40.0, 8.0);
        let gaps = m.column_gaps();
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0], Rect::new(100.0, 0.0, 8.0, 40.0));
        assert!(m.row_gaps().is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let m = GridMetrics::from_toml_str(
            r#"
width = 200.0
height = 100.0
columnStarts = [0.0, 110.0]
columnSizes = [90.0, 90.0]
rowStarts = [0.0]
rowSizes = [100.0]
columnGap = 20.0
"#,
        )
        .expect("Should parse metrics");
        assert_eq!(m.column_count(), 2);
        assert_eq!(m.column_gaps()[0], Rect::new(90.0, 0.0, 20.0, 100.0));
    }
}
