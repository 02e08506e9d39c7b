//! Preview overlay tests

use grid_designer::renderer::Rect;
use grid_designer::{render_preview, Breakpoint, GridMetrics, Palette, PreviewConfig, Snapshot};

fn load(source: &str) -> Snapshot {
    Snapshot::from_toml_str(source).expect("Should load fixture")
}

#[test]
fn test_dashboard_overlay() {
    let snapshot = load(include_str!("fixtures/dashboard.toml"));
    let metrics = GridMetrics::uniform(3, 3, 100.0, 60.0, 10.0);
    let svg = render_preview(&snapshot, &metrics, &PreviewConfig::default());

    assert!(svg.contains("<svg"));
    for area in ["header", "nav", "aside"] {
        assert!(svg.contains(&format!(r#"id="area-{}""#, area)), "missing area {}", area);
    }
    assert_eq!(svg.matches(r#"<g id="item-"#).count(), 3);
    assert!(svg.contains("Item 2 (Navigation)"));
    // nav spans two columns and two rows
    assert!(svg.contains(r#"x="0" y="70" width="210" height="130""#));
}

#[test]
fn test_measured_metrics_from_toml() {
    let snapshot = load(include_str!("fixtures/dashboard.toml"));
    let metrics = GridMetrics::from_toml_str(
        r#"
width = 300.0
height = 200.0
columnStarts = [0.0, 100.0, 200.0]
columnSizes = [100.0, 100.0, 100.0]
rowStarts = [0.0, 40.0, 120.0]
rowSizes = [40.0, 80.0, 80.0]
"#,
    )
    .expect("Should parse metrics");
    assert_eq!(metrics.area_rect(1, 3, 2, 4), Some(Rect::new(0.0, 40.0, 200.0, 160.0)));

    let svg = render_preview(&snapshot, &metrics, &PreviewConfig::default());
    // no gaps measured, so no stripes
    assert!(!svg.contains(r#"class="gd-gap""#));
}

#[test]
fn test_custom_palette_and_prefix() {
    let snapshot = load(include_str!("fixtures/dashboard.toml"));
    let palette = Palette::from_toml_str(r##"colors = ["#123456"]"##).expect("Should parse palette");
    let config = PreviewConfig::new()
        .with_palette(palette)
        .without_class_prefix()
        .with_standalone(false);
    let svg = render_preview(&snapshot, &GridMetrics::uniform(3, 3, 50.0, 50.0, 0.0), &config);

    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches(r##"fill="#123456""##).count(), 3);
    assert!(svg.contains(r#"class="item""#));
}

#[test]
fn test_breakpoint_preview() {
    let snapshot = load(include_str!("fixtures/responsive.toml"));
    let metrics = GridMetrics::uniform(2, 3, 100.0, 50.0, 0.0);
    let config = PreviewConfig::new().with_breakpoint(Some(Breakpoint::Sm));
    let svg = render_preview(&snapshot, &metrics, &config);

    // Promo spans both columns on small screens
    assert!(svg.contains(r#"x="0" y="0" width="200" height="50""#));
    assert!(!svg.contains("area-"));
}
