//! SVG overlay generation for the design-time preview

use tracing::debug;

use crate::placement::{compute_placements, is_inline_with_others, resolve_grid, Placement};
use crate::schema::Snapshot;

use super::{GridMetrics, PreviewConfig, Rect};

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: PreviewConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: PreviewConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add the default overlay style rules
    pub fn add_default_styles(&mut self) {
        let p = self.prefix();
        self.styles.extend([
            format!(".{p}grid {{ fill: none; stroke: #9e9e9e; }}"),
            format!(".{p}area {{ fill-opacity: 0.25; }}"),
            format!(".{p}gap {{ fill: #f48fb1; fill-opacity: 0.3; }}"),
            format!(".{p}grid-line {{ stroke: #7e57c2; stroke-dasharray: 4 2; }}"),
            format!(".{p}line-number {{ font-size: 10px; fill: #7e57c2; }}"),
            format!(".{p}item {{ fill: #ffffff; fill-opacity: 0.6; stroke: #2196f3; }}"),
            format!(".{p}area-name {{ font-size: 12px; font-weight: bold; fill: #424242; }}"),
            format!(".{p}item-box {{ pointer-events: none; }}"),
            format!(".{p}item-label {{ font-size: 11px; fill: #1565c0; }}"),
            format!(".{p}badge {{ font-size: 9px; fill: #e65100; }}"),
        ]);
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn class_list(&self, class: &str) -> String {
        format!("{}{}", self.prefix(), class)
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, id: Option<&str>, rect: Rect, class: &str, styles: &str) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, escape_xml(i))).unwrap_or_default();
        self.elements.push(format!(
            r#"{}<rect{} class="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            id_attr,
            self.class_list(class),
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            styles
        ));
    }

    /// Add a line element
    pub fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, class: &str) {
        self.elements.push(format!(
            r#"{}<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
            self.indent_str(),
            self.class_list(class),
            x1,
            y1,
            x2,
            y2
        ));
    }

    /// Add a text element
    pub fn add_text(&mut self, text: &str, x: f64, y: f64, anchor: &str, class: &str) {
        self.elements.push(format!(
            r#"{}<text class="{}" x="{}" y="{}" text-anchor="{}" dominant-baseline="middle">{}</text>"#,
            self.indent_str(),
            self.class_list(class),
            x,
            y,
            anchor,
            escape_xml(text)
        ));
    }

    /// Add a group element with optional ID and class
    pub fn start_group(&mut self, id: Option<&str>, class: &str) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, escape_xml(i))).unwrap_or_default();
        self.elements.push(format!(
            r#"{}<g{} class="{}">"#,
            self.indent_str(),
            id_attr,
            self.class_list(class)
        ));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: Rect) -> String {
        let padding = self.config.viewbox_padding;
        let vb_x = viewbox.x - padding;
        let vb_y = viewbox.y - padding;
        let vb_w = viewbox.width + 2.0 * padding;
        let vb_h = viewbox.height + 2.0 * padding;

        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            vb_x, vb_y, vb_w, vb_h
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            let indent = if self.config.pretty_print { "  " } else { "" };
            svg.push_str(indent);
            svg.push_str("<style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str(indent);
                svg.push_str(indent);
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str(indent);
            svg.push_str("</style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render the preview overlay for a snapshot with host-measured tracks
pub fn render_preview(snapshot: &Snapshot, metrics: &GridMetrics, config: &PreviewConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_default_styles();

    let bounds = Rect::new(0.0, 0.0, metrics.width, metrics.height);
    builder.add_rect(None, bounds, "grid", "");

    if snapshot.show_grid_areas && snapshot.use_named_areas {
        render_areas(snapshot, metrics, config, &mut builder);
    }
    if snapshot.show_grid_gaps {
        render_gaps(metrics, &mut builder);
    }
    if snapshot.show_grid_lines {
        render_grid_lines(metrics, &mut builder);
    }

    let placements = compute_placements(snapshot, config.breakpoint);
    render_items(snapshot, &placements, metrics, config, &mut builder);
    debug!(items = placements.len(), "rendered preview");

    builder.build(bounds)
}

fn render_areas(snapshot: &Snapshot, metrics: &GridMetrics, config: &PreviewConfig, builder: &mut SvgBuilder) {
    let Some(grid) = resolve_grid(snapshot, config.breakpoint).area_grid() else {
        return;
    };
    builder.start_group(None, "areas");
    for name in grid.names() {
        let Some(b) = grid.bounds(name) else {
            continue;
        };
        let rect = metrics.area_rect(
            b.min_col as i32 + 1,
            b.max_col as i32 + 2,
            b.min_row as i32 + 1,
            b.max_row as i32 + 2,
        );
        if let Some(rect) = rect {
            let fill = format!(r#" fill="{}""#, escape_xml(config.palette.color_for_name(name)));
            let id = format!("area-{}", name);
            builder.add_rect(Some(id.as_str()), rect, "area", &fill);
            let (cx, cy) = rect.center();
            builder.add_text(name, cx, cy, "middle", "area-name");
        }
    }
    builder.end_group();
}

fn render_gaps(metrics: &GridMetrics, builder: &mut SvgBuilder) {
    let gaps: Vec<Rect> = metrics
        .column_gaps()
        .into_iter()
        .chain(metrics.row_gaps())
        .collect();
    if gaps.is_empty() {
        return;
    }
    builder.start_group(None, "gaps");
    for gap in gaps {
        builder.add_rect(None, gap, "gap", "");
    }
    builder.end_group();
}

fn render_grid_lines(metrics: &GridMetrics, builder: &mut SvgBuilder) {
    builder.start_group(None, "grid-lines");
    for line in 1..=metrics.column_count() as i32 + 1 {
        if let Some(x) = metrics.column_line(line) {
            builder.add_line(x, 0.0, x, metrics.height, "grid-line");
            builder.add_text(&line.to_string(), x, -8.0, "middle", "line-number");
        }
    }
    for line in 1..=metrics.row_count() as i32 + 1 {
        if let Some(y) = metrics.row_line(line) {
            builder.add_line(0.0, y, metrics.width, y, "grid-line");
            builder.add_text(&line.to_string(), -8.0, y, "end", "line-number");
        }
    }
    builder.end_group();
}

fn render_items(
    snapshot: &Snapshot,
    placements: &[Placement],
    metrics: &GridMetrics,
    config: &PreviewConfig,
    builder: &mut SvgBuilder,
) {
    for (index, (item, placement)) in snapshot.items.iter().zip(placements).enumerate() {
        let Some(rect) = metrics.area_rect(
            placement.col_start,
            placement.col_end,
            placement.row_start,
            placement.row_end,
        ) else {
            continue;
        };
        let id = format!("item-{}", index);
        builder.start_group(Some(id.as_str()), "item-box");
        builder.add_rect(None, rect, "item", "");
        if config.item_labels {
            let (cx, cy) = rect.center();
            builder.add_text(&item.label(index), cx, cy, "middle", "item-label");
        }
        if config.inline_badges && is_inline_with_others(index, placements) {
            builder.add_text("inline", rect.x + rect.width - 4.0, rect.y + 8.0, "end", "badge");
        }
        builder.end_group();
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Palette;
    use crate::schema::{ItemConfig, PlacementType};

    fn snapshot() -> Snapshot {
        Snapshot {
            grid_template_columns: "1fr 1fr".to_string(),
            use_named_areas: true,
            grid_template_areas: "header header\nside main".to_string(),
            show_grid_areas: true,
            show_grid_lines: true,
            show_grid_gaps: true,
            items: vec![
                ItemConfig {
                    name: "Header".to_string(),
                    placement_type: PlacementType::Area,
                    grid_area: "header".to_string(),
                    ..Default::default()
                },
                ItemConfig {
                    placement_type: PlacementType::Area,
                    grid_area: "side".to_string(),
                    ..Default::default()
                },
                ItemConfig {
                    placement_type: PlacementType::Area,
                    grid_area: "main".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
    }

    #[test]
    fn test_render_full_overlay() {
        let metrics = GridMetrics::uniform(2, 2, 100.0, 50.0, 10.0);
        let svg = render_preview(&snapshot(), &metrics, &PreviewConfig::default());

        assert!(svg.starts_with("<?xml"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"id="area-header""#));
        assert!(svg.contains(r#"class="gd-gap""#));
        assert!(svg.contains(r#"class="gd-grid-line""#));
        assert!(svg.contains(r#"id="item-0""#));
        assert!(svg.contains("Item 1 (Header)"));
        // Side and main share row 2
        assert_eq!(svg.matches(">inline</text>").count(), 2);
    }

    #[test]
    fn test_area_colors_come_from_palette() {
        let metrics = GridMetrics::uniform(2, 2, 100.0, 50.0, 0.0);
        let config = PreviewConfig::default();
        let svg = render_preview(&snapshot(), &metrics, &config);
        let color = config.palette.color_for_name("main");
        assert!(svg.contains(&format!(r#"fill="{}""#, color)));
    }

    #[test]
    fn test_palette_colors_are_escaped() {
        let palette = Palette {
            name: None,
            colors: vec![r#"red" onload="x"#.to_string()],
        };
        let config = PreviewConfig::default().with_palette(palette);
        let svg = render_preview(&snapshot(), &GridMetrics::uniform(2, 2, 100.0, 50.0, 0.0), &config);
        assert!(!svg.contains(r#"onload="x""#));
        assert!(svg.contains(r#"fill="red&quot; onload=&quot;x""#));
    }

    #[test]
    fn test_every_emitted_class_has_a_rule() {
        let svg = render_preview(
            &snapshot(),
            &GridMetrics::uniform(2, 2, 100.0, 50.0, 10.0),
            &PreviewConfig::default(),
        );
        for class in ["grid", "area", "area-name", "gap", "grid-line", "line-number", "item", "item-box", "item-label", "badge"] {
            assert!(svg.contains(&format!(r#"class="gd-{}""#, class)), "{} not emitted", class);
            assert!(svg.contains(&format!(".gd-{} {{", class)), "{} has no rule", class);
        }
    }

    #[test]
    fn test_debug_toggles_off() {
        let mut s = snapshot();
        s.show_grid_areas = false;
        s.show_grid_lines = false;
        s.show_grid_gaps = false;
        let metrics = GridMetrics::uniform(2, 2, 100.0, 50.0, 10.0);
        let svg = render_preview(&s, &metrics, &PreviewConfig::default().with_pretty_print(false));

        assert!(!svg.contains("area-header"));
        assert!(!svg.contains(r#"class="gd-gap""#));
        assert!(!svg.contains(r#"class="gd-grid-line""#));
        assert!(!svg.contains('\n'));
    }

    #[test]
    fn test_items_skipped_without_measurements() {
        let svg = render_preview(&snapshot(), &GridMetrics::default(), &PreviewConfig::default());
        assert!(!svg.contains("item-0"));
    }
}
