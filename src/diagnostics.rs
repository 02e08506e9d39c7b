//! Diagnostics engine for grid configurations.
//!
//! Walks the snapshot the same way the property panel is laid out and
//! reports configuration errors and best-practice warnings. Every check
//! runs on every call; the output order is the order of the checks below.

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::areas::compute_area_index;
use crate::parser::{parse_size, SizeValue};
use crate::policy::Policy;
use crate::schema::{
    ContainerField, ContainerValues, FieldPath, ItemConfig, ItemField, ItemTag, PlacementType,
    Scope, Snapshot,
};
use crate::validate::{
    validate_dimension, validate_gap, validate_grid_template, validate_grid_template_areas,
    validate_item_placement, validate_z_index, Axis, Outcome, Severity,
};

/// A problem found in the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// Field the problem belongs to (`gap`, `items/2/smColumnStart`)
    pub property: Option<String>,
    pub severity: Severity,
    pub message: String,
}

impl Problem {
    fn new(property: Option<FieldPath>, severity: Severity, message: String) -> Self {
        Self {
            property: property.map(|p| p.to_string()),
            severity,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property {
            Some(property) => write!(f, "{} [{}]: {}", self.severity, property, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

fn warning(property: FieldPath, message: String) -> Problem {
    Problem::new(Some(property), Severity::Warning, message)
}

/// Run all checks with the default policy
pub fn compute_diagnostics(snapshot: &Snapshot) -> Vec<Problem> {
    compute_diagnostics_with(snapshot, &Policy::default())
}

/// Run all checks with explicit thresholds
pub fn compute_diagnostics_with(snapshot: &Snapshot, policy: &Policy) -> Vec<Problem> {
    let mut problems = Vec::new();
    let area_index = compute_area_index(snapshot);

    check_main_landmarks(snapshot, &mut problems);
    check_template_structure(snapshot, policy, &mut problems);
    check_template_heuristics(snapshot, policy, &mut problems);
    check_accessible_label(snapshot, &mut problems);
    check_ignored_coordinates(snapshot, &mut problems);
    check_base_sizing(snapshot, &mut problems);
    check_breakpoints(snapshot, policy, &mut problems);
    check_breakpoints_configured(snapshot, &mut problems);
    check_items(snapshot, policy, &area_index, &mut problems);
    check_performance(snapshot, policy, &mut problems);

    debug!(
        problems = problems.len(),
        errors = problems.iter().filter(|p| p.is_error()).count(),
        "computed diagnostics"
    );
    problems
}

/// Append an outcome's error, and its warnings when asked, as problems on `path`
fn report<T>(outcome: &Outcome<T>, path: &FieldPath, include_warnings: bool, problems: &mut Vec<Problem>) {
    if let Some(error) = &outcome.error {
        problems.push(Problem::new(Some(path.clone()), Severity::Error, error.clone()));
    }
    if include_warnings {
        for message in &outcome.warnings {
            problems.push(warning(path.clone(), message.clone()));
        }
    }
}

fn text(values: &dyn ContainerValues, field: ContainerField) -> &str {
    values.text(field).unwrap_or_default()
}

// ── Main landmark ─────────────────────────────────────────────────

fn renders_as_main(item: &ItemConfig) -> bool {
    let named_main = |s: &str| {
        let s = s.trim();
        s.eq_ignore_ascii_case("main") || s.eq_ignore_ascii_case("content")
    };
    match item.tag_name {
        ItemTag::Main => true,
        ItemTag::Auto => named_main(&item.name) || named_main(&item.grid_area),
        _ => false,
    }
}

fn check_main_landmarks(snapshot: &Snapshot, problems: &mut Vec<Problem>) {
    let count = snapshot.items.iter().filter(|item| renders_as_main(item)).count();
    if count > 1 {
        problems.push(warning(
            FieldPath::container("items"),
            format!(
                "{} items render as <main>; a page should have a single main landmark",
                count
            ),
        ));
    }
}

// ── Template structure ────────────────────────────────────────────

fn check_template_structure(snapshot: &Snapshot, policy: &Policy, problems: &mut Vec<Problem>) {
    let base = Scope::Base;
    let areas_path = FieldPath::container_field(ContainerField::Areas, base);
    let columns_label = ContainerField::Columns.label(base);

    if snapshot.use_named_areas {
        let areas = validate_grid_template_areas(
            &snapshot.grid_template_areas,
            &ContainerField::Areas.label(base),
            true,
        );
        report(&areas, &areas_path, false, problems);

        let mut column_count = None;
        for (field, axis) in [(ContainerField::Columns, Axis::Columns), (ContainerField::Rows, Axis::Rows)] {
            let label = field.label(base);
            let path = FieldPath::container_field(field, base);
            let value = text(snapshot, field);
            if value.trim().is_empty() {
                problems.push(warning(
                    path,
                    format!("{} is recommended when using named areas", label),
                ));
                continue;
            }
            let outcome = validate_grid_template(value, &label, false, axis, policy);
            report(&outcome, &path, false, problems);
            if axis == Axis::Columns {
                column_count = outcome.parsed.as_ref().and_then(|list| list.definite_track_count());
            }
        }

        if let (Some(grid), Some(columns)) = (&areas.parsed, column_count) {
            if grid.column_count() != columns {
                problems.push(warning(
                    areas_path,
                    format!(
                        "Grid Template Areas defines {} columns but {} defines {}",
                        grid.column_count(),
                        columns_label,
                        columns
                    ),
                ));
            }
        }
    } else {
        if !snapshot.grid_template_areas.trim().is_empty() {
            problems.push(warning(
                areas_path,
                "Grid Template Areas is ignored because named areas are disabled".to_string(),
            ));
        }
        let columns = validate_grid_template(
            &snapshot.grid_template_columns,
            &columns_label,
            true,
            Axis::Columns,
            policy,
        );
        report(
            &columns,
            &FieldPath::container_field(ContainerField::Columns, base),
            false,
            problems,
        );
        let rows = validate_grid_template(
            &snapshot.grid_template_rows,
            &ContainerField::Rows.label(base),
            false,
            Axis::Rows,
            policy,
        );
        report(
            &rows,
            &FieldPath::container_field(ContainerField::Rows, base),
            false,
            problems,
        );
    }
}

// ── CSS heuristics ────────────────────────────────────────────────

fn check_template_heuristics(snapshot: &Snapshot, policy: &Policy, problems: &mut Vec<Problem>) {
    let base = Scope::Base;
    let mut uses_flex = false;

    for (field, axis) in [(ContainerField::Columns, Axis::Columns), (ContainerField::Rows, Axis::Rows)] {
        let outcome = validate_grid_template(text(snapshot, field), &field.label(base), false, axis, policy);
        for message in &outcome.warnings {
            problems.push(warning(FieldPath::container_field(field, base), message.clone()));
        }
        uses_flex |= outcome.parsed.as_ref().is_some_and(|list| list.uses_flex());
    }

    if !uses_flex {
        return;
    }
    for field in ContainerField::GAPS {
        let value = text(snapshot, field).trim();
        if let Ok(SizeValue::Length(length)) = parse_size(value) {
            if length.value > policy.large_gap {
                problems.push(warning(
                    FieldPath::container_field(field, base),
                    format!(
                        "{} of {} with fr tracks leaves less room for flexible columns",
                        field.label(base),
                        value
                    ),
                ));
            }
        }
    }
}

// ── Accessibility ─────────────────────────────────────────────────

fn check_accessible_label(snapshot: &Snapshot, problems: &mut Vec<Problem>) {
    if snapshot.items.len() > 1
        && snapshot.aria_label.trim().is_empty()
        && snapshot.aria_labelled_by.trim().is_empty()
    {
        problems.push(warning(
            FieldPath::container("ariaLabel"),
            "Add an ARIA label so screen readers can describe this grid".to_string(),
        ));
    }
}

fn check_ignored_coordinates(snapshot: &Snapshot, problems: &mut Vec<Problem>) {
    for (index, item) in snapshot.items.iter().enumerate() {
        let fields = item.fields(Scope::Base);
        if fields.placement_type == PlacementType::Area && fields.has_coordinates() {
            problems.push(warning(
                FieldPath::item_field(index, ItemField::PlacementType, Scope::Base),
                format!(
                    "{}: coordinates are ignored when placement type is area",
                    item.label(index)
                ),
            ));
        }
    }
}

// ── Gaps and sizing ───────────────────────────────────────────────

/// Validate gap and sizing fields of one scope; empty values pass
fn check_sizing(values: &dyn ContainerValues, scope: Scope, problems: &mut Vec<Problem>) {
    for field in ContainerField::GAPS {
        let outcome = validate_gap(text(values, field), &field.label(scope), false);
        report(&outcome, &FieldPath::container_field(field, scope), true, problems);
    }
    for field in ContainerField::SIZING {
        let outcome = validate_dimension(text(values, field), &field.label(scope), false);
        report(&outcome, &FieldPath::container_field(field, scope), true, problems);
    }
}

fn check_base_sizing(snapshot: &Snapshot, problems: &mut Vec<Problem>) {
    check_sizing(snapshot, Scope::Base, problems);
}

// ── Breakpoints ───────────────────────────────────────────────────

fn check_breakpoints(snapshot: &Snapshot, policy: &Policy, problems: &mut Vec<Problem>) {
    for tier in snapshot.active_tiers() {
        let scope = Scope::Tier(tier);
        let overrides = snapshot.breakpoints.get(tier);

        for (field, axis) in [(ContainerField::Columns, Axis::Columns), (ContainerField::Rows, Axis::Rows)] {
            let outcome = validate_grid_template(text(overrides, field), &field.label(scope), false, axis, policy);
            report(&outcome, &FieldPath::container_field(field, scope), true, problems);
        }

        let areas_label = ContainerField::Areas.label(scope);
        let areas_path = FieldPath::container_field(ContainerField::Areas, scope);
        if snapshot.use_named_areas {
            let outcome = validate_grid_template_areas(&overrides.areas, &areas_label, false);
            report(&outcome, &areas_path, true, problems);
        } else if !overrides.areas.trim().is_empty() {
            problems.push(warning(
                areas_path,
                format!("{} is ignored because named areas are disabled", areas_label),
            ));
        }

        check_sizing(overrides, scope, problems);

        if overrides.override_count() == 0 {
            problems.push(warning(
                FieldPath::container(tier.enabled_key()),
                format!("{} breakpoint is enabled but overrides nothing", tier.label()),
            ));
        }
    }
}

fn check_breakpoints_configured(snapshot: &Snapshot, problems: &mut Vec<Problem>) {
    if snapshot.enable_breakpoints && snapshot.active_tiers().is_empty() {
        problems.push(warning(
            FieldPath::container("enableBreakpoints"),
            "Breakpoints are enabled but no breakpoint is configured".to_string(),
        ));
    }
}

// ── Items ─────────────────────────────────────────────────────────

fn check_item_scope(
    snapshot: &Snapshot,
    policy: &Policy,
    area_index: &BTreeSet<String>,
    index: usize,
    item: &ItemConfig,
    scope: Scope,
    problems: &mut Vec<Problem>,
) {
    let item_label = item.label(index);
    let fields = item.fields(scope);

    for finding in validate_item_placement(
        &fields,
        scope,
        &item_label,
        snapshot.use_named_areas,
        area_index,
    ) {
        problems.push(Problem::new(
            Some(FieldPath::item(index, finding.key)),
            finding.severity,
            finding.message,
        ));
    }

    let z_label = format!("{}: {}", item_label, ItemField::ZIndex.label(scope));
    let z_index = validate_z_index(fields.z_index, &z_label, policy);
    report(
        &z_index,
        &FieldPath::item_field(index, ItemField::ZIndex, scope),
        true,
        problems,
    );
}

fn check_items(
    snapshot: &Snapshot,
    policy: &Policy,
    area_index: &BTreeSet<String>,
    problems: &mut Vec<Problem>,
) {
    for (index, item) in snapshot.items.iter().enumerate() {
        check_item_scope(snapshot, policy, area_index, index, item, Scope::Base, problems);
        if !item.enable_responsive {
            continue;
        }
        for (tier, overrides) in item.breakpoints.iter() {
            if !overrides.enabled {
                continue;
            }
            let scope = Scope::Tier(tier);
            check_item_scope(snapshot, policy, area_index, index, item, scope, problems);
            if !snapshot.tier_active(tier) {
                problems.push(warning(
                    FieldPath::item_field(index, ItemField::Enabled, scope),
                    format!(
                        "{}: {} override has no effect because the {} breakpoint is disabled",
                        item.label(index),
                        tier.label(),
                        tier.label()
                    ),
                ));
            }
        }
    }
}

// ── Performance ───────────────────────────────────────────────────

fn check_performance(snapshot: &Snapshot, policy: &Policy, problems: &mut Vec<Problem>) {
    let count = snapshot.items.len();
    let virtualization = FieldPath::container("enableVirtualization");
    let threshold = FieldPath::container("virtualizeThreshold");

    if !snapshot.enable_virtualization {
        if count >= policy.large_item_count {
            problems.push(warning(
                virtualization,
                format!(
                    "{} items without virtualization will render slowly; enable virtualization",
                    count
                ),
            ));
        } else if count >= policy.moderate_item_count {
            problems.push(warning(
                virtualization,
                format!("{} items; consider enabling virtualization", count),
            ));
        }
        if snapshot.virtualize_threshold.is_some() {
            problems.push(warning(
                threshold,
                "Virtualization threshold has no effect while virtualization is disabled"
                    .to_string(),
            ));
        }
    } else if let Some(t) = snapshot.virtualize_threshold {
        let (min, max) = policy.virtualize_threshold_range;
        if t < i64::from(min) || t > i64::from(max) {
            problems.push(warning(
                threshold,
                format!(
                    "Virtualization threshold {} is outside the recommended range {} to {}",
                    t, min, max
                ),
            ));
        }
    }

    if count == 0 {
        problems.push(warning(
            FieldPath::container("items"),
            "The grid has no items".to_string(),
        ));
    }
}
