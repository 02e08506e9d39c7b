//! Field validators
//!
//! Each validator checks one kind of value and reports the result as data.
//! None of them panic on malformed input.

use std::collections::BTreeSet;
use std::fmt;
use std::num::IntErrorKind;

use crate::parser::{
    parse_areas, parse_grid_line, parse_size, parse_track_list, AreaGrid, GridLine, SizeValue,
    TrackList,
};
use crate::policy::Policy;
use crate::schema::{ItemField, PlacementFields, PlacementType, Scope};

/// How serious a problem is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Result of validating one value
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub error: Option<String>,
    pub warnings: Vec<String>,
    /// Parsed form of the value, when it was non-empty and valid
    pub parsed: Option<T>,
}

impl<T> Outcome<T> {
    fn empty() -> Self {
        Self {
            error: None,
            warnings: Vec::new(),
            parsed: None,
        }
    }

    fn parsed(value: T) -> Self {
        Self {
            error: None,
            warnings: Vec::new(),
            parsed: Some(value),
        }
    }

    fn failed(message: String) -> Self {
        Self {
            error: Some(message),
            warnings: Vec::new(),
            parsed: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// `Error` when invalid, `Warning` when valid with warnings
    pub fn severity(&self) -> Option<Severity> {
        if self.error.is_some() {
            Some(Severity::Error)
        } else if !self.warnings.is_empty() {
            Some(Severity::Warning)
        } else {
            None
        }
    }
}

/// Which track list a template describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Columns,
    Rows,
}

const DIMENSION_KEYWORDS: &[&str] = &["auto", "none", "min-content", "max-content", "fit-content"];

/// Shared handling of empty values; `Some` short-circuits validation
fn check_empty<T>(value: &str, label: &str, required: bool) -> Option<Outcome<T>> {
    if !value.trim().is_empty() {
        return None;
    }
    Some(if required {
        Outcome::failed(format!("{} is required", label))
    } else {
        Outcome::empty()
    })
}

/// Validate a sizing value such as `minWidth`
pub fn validate_dimension(value: &str, label: &str, required: bool) -> Outcome<SizeValue> {
    if let Some(outcome) = check_empty(value, label, required) {
        return outcome;
    }
    match parse_size(value) {
        Ok(SizeValue::Keyword(k)) if !DIMENSION_KEYWORDS.contains(&k.as_str()) => {
            Outcome::failed(format!(
                "{} must be a valid CSS length (e.g. 100px, 50%, auto)",
                label
            ))
        }
        Ok(size) => Outcome::parsed(size),
        Err(_) => Outcome::failed(format!(
            "{} must be a valid CSS length (e.g. 100px, 50%, auto)",
            label
        )),
    }
}

/// Validate a gap value; negative lengths are rejected
pub fn validate_gap(value: &str, label: &str, required: bool) -> Outcome<SizeValue> {
    if let Some(outcome) = check_empty(value, label, required) {
        return outcome;
    }
    let invalid = || {
        Outcome::failed(format!(
            "{} must be a valid CSS length (e.g. 16px, 1rem)",
            label
        ))
    };
    match parse_size(value) {
        Ok(SizeValue::Length(len)) if len.value < 0.0 => {
            Outcome::failed(format!("{} cannot be negative", label))
        }
        Ok(SizeValue::Keyword(k)) if k != "normal" => invalid(),
        Ok(size) => Outcome::parsed(size),
        Err(_) => invalid(),
    }
}

/// Validate a `grid-template-columns`/`grid-template-rows` track list
pub fn validate_grid_template(
    value: &str,
    label: &str,
    required: bool,
    axis: Axis,
    policy: &Policy,
) -> Outcome<TrackList> {
    if let Some(outcome) = check_empty(value, label, required) {
        return outcome;
    }
    let list = match parse_track_list(value) {
        Ok(list) => list,
        Err(errors) => {
            let detail = errors
                .first()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unrecognized value".to_string());
            return Outcome::failed(format!("{} is not a valid track list: {}", label, detail));
        }
    };

    let mut outcome = Outcome::parsed(list);
    if let Some(list) = &outcome.parsed {
        if list.has_auto_fit() && !list.uses_minmax() {
            outcome.warnings.push(format!(
                "{} uses auto-fit without minmax(); tracks may collapse to their content size",
                label
            ));
        }
        let count = list.track_count();
        if axis == Axis::Columns && count > policy.max_columns {
            outcome.warnings.push(format!(
                "{} defines {} columns; more than {} columns can slow down rendering",
                label, count, policy.max_columns
            ));
        }
    }
    outcome
}

/// Validate a `grid-template-areas` block
pub fn validate_grid_template_areas(value: &str, label: &str, required: bool) -> Outcome<AreaGrid> {
    if let Some(outcome) = check_empty(value, label, required) {
        return outcome;
    }
    match parse_areas(value) {
        Ok(grid) => Outcome::parsed(grid),
        Err(err) => Outcome::failed(format!("{}: {}", label, err)),
    }
}

/// Validate a z-index; empty and `auto` are accepted
pub fn validate_z_index(value: &str, label: &str, policy: &Policy) -> Outcome<i64> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("auto") {
        return Outcome::empty();
    }
    let limit = policy.z_index_limit;
    let out_of_range = || Outcome::failed(format!("{} must be between -{} and {}", label, limit, limit));

    let z = match value.parse::<i64>() {
        Ok(z) => z,
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return out_of_range()
        }
        Err(_) => return Outcome::failed(format!("{} must be an integer or auto", label)),
    };
    if z.checked_abs().map_or(true, |abs| abs > limit) {
        return out_of_range();
    }

    let mut outcome = Outcome::parsed(z);
    let (min, max) = policy.z_index_recommended;
    if z < min || z > max {
        outcome.warnings.push(format!(
            "{} {} is outside the recommended range {} to {}",
            label, z, min, max
        ));
    }
    outcome
}

/// One issue with a single item field
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    /// Host key of the offending field in its scope, e.g. `smColumnEnd`
    pub key: String,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn new(field: ItemField, scope: Scope, severity: Severity, message: String) -> Self {
        Self {
            key: field.key(scope),
            severity,
            message,
        }
    }
}

/// Check that an item's placement fields fit its placement type
pub fn validate_item_placement(
    fields: &PlacementFields<'_>,
    scope: Scope,
    item_label: &str,
    use_named_areas: bool,
    area_index: &BTreeSet<String>,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    match fields.placement_type {
        PlacementType::Auto => {}
        PlacementType::Area => check_area(fields, scope, item_label, use_named_areas, area_index, &mut findings),
        PlacementType::Coordinates => check_coordinates(fields, scope, item_label, &mut findings),
        PlacementType::Span => check_span(fields, scope, item_label, &mut findings),
    }
    findings
}

fn check_area(
    fields: &PlacementFields<'_>,
    scope: Scope,
    item_label: &str,
    use_named_areas: bool,
    area_index: &BTreeSet<String>,
    findings: &mut Vec<Finding>,
) {
    let label = ItemField::GridArea.label(scope);
    let name = fields.grid_area.trim();

    if !use_named_areas {
        findings.push(Finding::new(
            ItemField::GridArea,
            scope,
            Severity::Warning,
            format!(
                "{}: {} is ignored because named areas are disabled",
                item_label, label
            ),
        ));
    } else if name.is_empty() {
        findings.push(Finding::new(
            ItemField::GridArea,
            scope,
            Severity::Error,
            format!("{}: {} is required for area placement", item_label, label),
        ));
    } else if !area_index.contains(name) {
        findings.push(Finding::new(
            ItemField::GridArea,
            scope,
            Severity::Error,
            format!("{}: unknown area \"{}\" in {}", item_label, name, label),
        ));
    }
}

/// Parse a line field, recording a finding when it is malformed
fn check_line(
    value: &str,
    field: ItemField,
    scope: Scope,
    item_label: &str,
    findings: &mut Vec<Finding>,
) -> Option<GridLine> {
    if value.trim().is_empty() {
        return None;
    }
    match parse_grid_line(value) {
        Ok(line) => Some(line),
        Err(_) => {
            findings.push(Finding::new(
                field,
                scope,
                Severity::Error,
                format!(
                    "{}: {} must be a line number or \"span N\"",
                    item_label,
                    field.label(scope)
                ),
            ));
            None
        }
    }
}

fn check_coordinates(
    fields: &PlacementFields<'_>,
    scope: Scope,
    item_label: &str,
    findings: &mut Vec<Finding>,
) {
    let pairs = [
        (fields.column_start, ItemField::ColumnStart, fields.column_end, ItemField::ColumnEnd),
        (fields.row_start, ItemField::RowStart, fields.row_end, ItemField::RowEnd),
    ];
    for (start_value, start_field, end_value, end_field) in pairs {
        let start = check_line(start_value, start_field, scope, item_label, findings);
        let end = check_line(end_value, end_field, scope, item_label, findings);
        if let (Some(GridLine::Line(s)), Some(GridLine::Line(e))) = (start, end) {
            if e <= s {
                findings.push(Finding::new(
                    end_field,
                    scope,
                    Severity::Error,
                    format!(
                        "{}: {} must be greater than {}",
                        item_label,
                        end_field.label(scope),
                        start_field.label(scope)
                    ),
                ));
            }
        }
    }
}

fn check_span(
    fields: &PlacementFields<'_>,
    scope: Scope,
    item_label: &str,
    findings: &mut Vec<Finding>,
) {
    if fields.column_start.trim().is_empty() && fields.row_start.trim().is_empty() {
        findings.push(Finding::new(
            ItemField::ColumnStart,
            scope,
            Severity::Error,
            format!(
                "{}: {} or {} is required for span placement",
                item_label,
                ItemField::ColumnStart.label(scope),
                ItemField::RowStart.label(scope)
            ),
        ));
        return;
    }
    check_line(fields.column_start, ItemField::ColumnStart, scope, item_label, findings);
    check_line(fields.row_start, ItemField::RowStart, scope, item_label, findings);
}
