//! Integration tests for the design-time engines

use pretty_assertions::assert_eq;

use grid_designer::placement::{compute_placements, describe_placement, resolve_grid};
use grid_designer::{
    caption, check_source, compute_diagnostics, compute_diagnostics_with, compute_visibility,
    evaluate, Breakpoint, ItemConfig, PlacementType, Policy, Problem, Severity, Snapshot,
};

fn load(source: &str) -> Snapshot {
    Snapshot::from_toml_str(source).expect("Should load fixture")
}

fn on<'a>(problems: &'a [Problem], property: &str) -> Vec<&'a Problem> {
    problems
        .iter()
        .filter(|p| p.property.as_deref() == Some(property))
        .collect()
}

fn report(problems: &[Problem]) -> String {
    problems
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Caption ───────────────────────────────────────────────────────

#[test]
fn test_caption_responsive_grid() {
    let snapshot = load(include_str!("fixtures/responsive.toml"));
    insta::assert_snapshot!(caption(&snapshot), @"Grid (3×2) - 4 items (1 responsive) - 2 breakpoints");
}

#[test]
fn test_caption_named_areas() {
    let snapshot = load(include_str!("fixtures/dashboard.toml"));
    insta::assert_snapshot!(caption(&snapshot), @"Grid (3 areas) - 3 items (0 responsive)");
}

// ── Diagnostics ───────────────────────────────────────────────────

#[test]
fn test_clean_fixtures_have_no_problems() {
    for source in [
        include_str!("fixtures/responsive.toml"),
        include_str!("fixtures/dashboard.toml"),
    ] {
        let problems = compute_diagnostics(&load(source));
        assert!(problems.is_empty(), "unexpected problems: {:?}", problems);
    }
}

#[test]
fn test_auto_fit_without_minmax() {
    let snapshot = load(include_str!("fixtures/auto_fit.toml"));
    let problems = compute_diagnostics(&snapshot);

    let found = on(&problems, "gridTemplateColumns");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Warning);
    assert!(found[0].message.contains("minmax"));
    assert!(!problems.iter().any(Problem::is_error));
}

#[test]
fn test_broken_configuration_report() {
    let snapshot = load(include_str!("fixtures/broken.toml"));
    let problems = compute_diagnostics(&snapshot);

    insta::assert_snapshot!(report(&problems), @r"
    warning [gap]: Gap of 48px with fr tracks leaves less room for flexible columns
    warning [ariaLabel]: Add an ARIA label so screen readers can describe this grid
    error [items/0/columnEnd]: Item 1: Column End must be greater than Column Start
    error [items/1/zIndex]: Item 2 (Overlay): Z-Index must be an integer or auto
    ");
}

#[test]
fn test_coordinate_end_before_start() {
    let snapshot = load(include_str!("fixtures/broken.toml"));
    let problems = compute_diagnostics(&snapshot);
    let found = on(&problems, "items/0/columnEnd");
    assert_eq!(found.len(), 1);
    assert!(found[0].is_error());
}

#[test]
fn test_check_source_matches_direct_diagnostics() {
    let source = include_str!("fixtures/broken.toml");
    let problems = check_source(source, &Policy::default()).expect("Should load");
    assert_eq!(problems, compute_diagnostics(&load(source)));
}

#[test]
fn test_many_items_warn_about_virtualization() {
    let snapshot = Snapshot {
        grid_template_columns: "repeat(4, 1fr)".to_string(),
        aria_label: "Feed".to_string(),
        items: vec![ItemConfig::default(); 500],
        ..Default::default()
    };
    let problems = compute_diagnostics(&snapshot);
    let found = on(&problems, "enableVirtualization");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Warning);
}

#[test]
fn test_policy_file_thresholds() {
    let policy = Policy::from_toml_str(include_str!("fixtures/policy.toml")).expect("Should parse");
    assert_eq!(policy.max_columns, 4);
    assert_eq!(policy.z_index_recommended, (0, 100));
    assert_eq!(policy.large_item_count, 500);

    let mut snapshot = load(include_str!("fixtures/responsive.toml"));
    snapshot.grid_template_columns = "repeat(6, 1fr)".to_string();
    snapshot.items[0].z_index = "500".to_string();

    let problems = compute_diagnostics_with(&snapshot, &policy);
    assert_eq!(
        on(&problems, "gridTemplateColumns")[0].message,
        "Grid Template Columns defines 6 columns; more than 4 columns can slow down rendering"
    );
    assert_eq!(on(&problems, "items/0/zIndex")[0].severity, Severity::Warning);

    // Default thresholds accept both
    assert!(compute_diagnostics(&snapshot).is_empty());
}

#[test]
fn test_engines_are_idempotent() {
    for source in [
        include_str!("fixtures/responsive.toml"),
        include_str!("fixtures/dashboard.toml"),
        include_str!("fixtures/broken.toml"),
        include_str!("fixtures/auto_fit.toml"),
    ] {
        let snapshot = load(source);
        assert_eq!(evaluate(&snapshot), evaluate(&snapshot));
    }
}

// ── Visibility ────────────────────────────────────────────────────

#[test]
fn test_visibility_follows_breakpoint_switches() {
    let snapshot = load(include_str!("fixtures/responsive.toml"));
    let hidden = compute_visibility(&snapshot);

    // gap set: individual gaps hidden
    assert!(hidden.contains_key("rowGap"));
    assert!(hidden.contains_key("columnGap"));
    assert!(hidden.contains_key("lgRowGap"));
    assert!(!hidden.contains_key("smRowGap"));

    // enabled tiers show their overrides, disabled ones do not
    assert!(!hidden.contains_key("smEnabled"));
    assert!(!hidden.contains_key("smColumns"));
    assert!(hidden.contains_key("mdColumns"));
    assert!(hidden.contains_key("gridTemplateAreas"));

    // items without responsive overrides hide every tier
    assert!(hidden.contains_item(0, "smEnabled"));
    assert!(hidden.contains_item(0, "gridArea"));

    // the responsive item shows coordinates on small screens
    assert!(!hidden.contains_item(3, "smEnabled"));
    assert!(!hidden.contains_item(3, "smColumnStart"));
    assert!(hidden.contains_item(3, "smGridArea"));
    assert!(hidden.contains_item(3, "mdEnabled"));
}

#[test]
fn test_visibility_without_breakpoints() {
    let mut snapshot = load(include_str!("fixtures/responsive.toml"));
    snapshot.enable_breakpoints = false;
    let hidden = compute_visibility(&snapshot);

    for tier in Breakpoint::ALL {
        assert!(hidden.contains_key(&tier.enabled_key()));
    }
    assert!(hidden.contains_item(3, "smEnabled"));
    assert!(hidden.contains_item(3, "smColumnStart"));
}

#[test]
fn test_panel_tabs_hide_ignored_fields() {
    let snapshot = load(include_str!("fixtures/dashboard.toml"));
    let evaluation = evaluate(&snapshot);
    let general = evaluation.panel.visible_fields("General");
    assert!(general.contains(&"gridTemplateAreas"));
    assert!(general.contains(&"rowGap"));
}

// ── Placement ─────────────────────────────────────────────────────

#[test]
fn test_area_placement_round_trip() {
    let snapshot = load(include_str!("fixtures/dashboard.toml"));
    let placements = compute_placements(&snapshot, None);

    let nav = &placements[1];
    assert_eq!(
        (nav.row_start, nav.row_end, nav.col_start, nav.col_end),
        (2, 4, 1, 3)
    );
    assert_eq!(nav.grid_area.as_deref(), Some("nav"));
    assert_eq!(
        describe_placement(nav, PlacementType::Area),
        "Area nav: columns 1 / 3, rows 2 / 4"
    );
}

#[test]
fn test_placements_follow_breakpoint_cascade() {
    let snapshot = load(include_str!("fixtures/responsive.toml"));

    let base = compute_placements(&snapshot, None);
    assert_eq!((base[3].col_start, base[3].row_start), (1, 2));

    let small = compute_placements(&snapshot, Some(Breakpoint::Sm));
    assert_eq!(resolve_grid(&snapshot, Some(Breakpoint::Sm)).columns, "1fr 1fr");
    assert_eq!((small[2].col_start, small[2].row_start), (1, 2));
    assert_eq!((small[3].col_start, small[3].col_end), (1, 3));

    // md is disabled, so sm still applies
    let medium = compute_placements(&snapshot, Some(Breakpoint::Md));
    assert_eq!(medium, small);

    let large = compute_placements(&snapshot, Some(Breakpoint::Lg));
    assert_eq!((large[2].col_start, large[2].row_start), (3, 1));
    assert_eq!((large[3].col_start, large[3].col_end), (1, 3));
}
