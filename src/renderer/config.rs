//! Configuration for the preview overlay

use crate::schema::Breakpoint;

use super::Palette;

/// Configuration options for SVG preview output
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Padding around the viewBox
    pub viewbox_padding: f64,

    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "gd-" for "gd-item")
    pub class_prefix: Option<String>,

    /// Breakpoint to preview; `None` shows the base configuration
    pub breakpoint: Option<Breakpoint>,

    /// Whether to label item boxes
    pub item_labels: bool,

    /// Whether to mark items that share a row with another item
    pub inline_badges: bool,

    /// Area colors
    pub palette: Palette,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 20.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("gd-".to_string()),
            breakpoint: None,
            item_labels: true,
            inline_badges: true,
            palette: Palette::default(),
        }
    }
}

impl PreviewConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewBox padding
    pub fn with_viewbox_padding(mut self, padding: f64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Preview the grid as it looks at a breakpoint
    pub fn with_breakpoint(mut self, breakpoint: Option<Breakpoint>) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    pub fn with_item_labels(mut self, labels: bool) -> Self {
        self.item_labels = labels;
        self
    }

    pub fn with_inline_badges(mut self, badges: bool) -> Self {
        self.inline_badges = badges;
        self
    }

    /// Set the area palette
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}
