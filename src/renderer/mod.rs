//! SVG preview overlay
//!
//! Takes item placements plus track positions measured by the host and
//! produces an SVG debug overlay with CSS classes for styling.

pub mod config;
pub mod metrics;
pub mod palette;
pub mod svg;

pub use config::PreviewConfig;
pub use metrics::{GridMetrics, Rect};
pub use palette::Palette;
pub use svg::render_preview;
