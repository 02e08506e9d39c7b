//! Grid Designer - design-time engine for a CSS Grid layout widget
//!
//! This library computes everything a low-code IDE shows while a grid
//! widget is being configured: which property-panel fields are hidden,
//! the ordered list of configuration problems, the canvas caption, and
//! approximate item placements for a preview overlay.
//!
//! # Example
//!
//! ```rust
//! use grid_designer::{evaluate, Snapshot};
//!
//! let snapshot = Snapshot::from_toml_str(r#"
//!     gridTemplateColumns = "1fr 1fr"
//!     gridTemplateRows = "auto"
//! "#).unwrap();
//!
//! let evaluation = evaluate(&snapshot);
//! assert_eq!(evaluation.caption, "Grid (2×1)");
//! ```

pub mod areas;
pub mod caption;
pub mod diagnostics;
pub mod error;
pub mod parser;
pub mod placement;
pub mod policy;
pub mod renderer;
pub mod schema;
pub mod validate;
pub mod visibility;

pub use areas::compute_area_index;
pub use caption::caption;
pub use diagnostics::{compute_diagnostics, compute_diagnostics_with, Problem};
pub use error::{AreaError, ConfigError, ValueError};
pub use placement::{compute_placement, compute_placements, Placement};
pub use policy::Policy;
pub use renderer::{render_preview, GridMetrics, Palette, PreviewConfig};
pub use schema::{Breakpoint, ItemConfig, PlacementType, Snapshot};
pub use validate::{Outcome, Severity};
pub use visibility::{compute_panel, compute_visibility, HiddenFields, PanelLayout};

use thiserror::Error;

/// Errors that can occur in the check pipeline
#[derive(Debug, Error)]
pub enum DesignerError {
    /// The snapshot could not be loaded
    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] ConfigError),
}

/// Everything the IDE needs after an edit
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub caption: String,
    pub panel: PanelLayout,
    pub problems: Vec<Problem>,
    /// Placements for the base configuration
    pub placements: Vec<Placement>,
}

impl Evaluation {
    pub fn has_errors(&self) -> bool {
        self.problems.iter().any(Problem::is_error)
    }
}

/// Evaluate a snapshot with the default policy
pub fn evaluate(snapshot: &Snapshot) -> Evaluation {
    evaluate_with_policy(snapshot, &Policy::default())
}

/// Evaluate a snapshot with custom heuristic thresholds
pub fn evaluate_with_policy(snapshot: &Snapshot, policy: &Policy) -> Evaluation {
    Evaluation {
        caption: caption(snapshot),
        panel: compute_panel(snapshot),
        problems: compute_diagnostics_with(snapshot, policy),
        placements: compute_placements(snapshot, None),
    }
}

/// Parse a TOML snapshot and run the diagnostics
///
/// # Example
///
/// ```rust
/// use grid_designer::{check_source, Policy};
///
/// let problems = check_source(r#"gridTemplateColumns = "1fr 1fr""#, &Policy::default()).unwrap();
/// assert!(problems.iter().all(|p| !p.is_error()));
/// ```
pub fn check_source(source: &str, policy: &Policy) -> Result<Vec<Problem>, DesignerError> {
    let snapshot = Snapshot::from_toml_str(source)?;
    Ok(compute_diagnostics_with(&snapshot, policy))
}
