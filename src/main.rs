//! Grid Designer CLI
//!
//! Usage:
//!   grid-designer [OPTIONS] [FILE]
//!
//! Options:
//!   -p, --policy <FILE>        Heuristic thresholds (TOML format)
//!       --palette <FILE>       Area colors for the SVG preview (TOML format)
//!   -m, --metrics <FILE>       Measured track positions for the SVG preview
//!   -b, --breakpoint <TIER>    Preview the grid at a breakpoint (xs..xxxl)
//!   -c, --caption              Print the caption
//!   -v, --visibility           Print hidden fields and visible panel fields
//!       --placements           Print item placements
//!   -s, --svg                  Print the SVG preview overlay
//!   -d, --debug                Log engine activity to stderr
//!   -h, --help                 Print help

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::debug;

use grid_designer::parser::{parse_areas, parse_track_list};
use grid_designer::placement::{describe_placement, resolve_item};
use grid_designer::{
    caption, compute_diagnostics_with, compute_panel, compute_placements, render_preview,
    Breakpoint, ConfigError, GridMetrics, Palette, Policy, PreviewConfig, Snapshot,
};

#[derive(Parser)]
#[command(name = "grid-designer")]
#[command(about = "Design-time checks and previews for CSS Grid widget configurations")]
struct Cli {
    /// Snapshot file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Policy file with heuristic thresholds (TOML format)
    #[arg(short, long)]
    policy: Option<PathBuf>,

    /// Palette file for area colors (TOML format)
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Measured track positions (TOML format)
    #[arg(short, long)]
    metrics: Option<PathBuf>,

    /// Breakpoint to preview (xs, sm, md, lg, xl, xxl, xxxl)
    #[arg(short, long)]
    breakpoint: Option<Breakpoint>,

    /// Print the caption
    #[arg(short, long, conflicts_with_all = ["visibility", "placements", "svg"])]
    caption: bool,

    /// Print hidden fields and the visible fields of each panel tab
    #[arg(short, long, conflicts_with_all = ["placements", "svg"])]
    visibility: bool,

    /// Print item placements
    #[arg(long, conflicts_with = "svg")]
    placements: bool,

    /// Print the SVG preview overlay
    #[arg(short, long)]
    svg: bool,

    /// Log engine activity to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let policy = load_or_default(cli.policy.as_deref(), "policy", Policy::from_file);

    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let snapshot = match Snapshot::from_toml_str(&source) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Error loading snapshot '{}': {}", filename, e);
            std::process::exit(1);
        }
    };
    debug!(items = snapshot.items.len(), file = %filename, "loaded snapshot");

    if cli.caption {
        println!("{}", caption(&snapshot));
    } else if cli.visibility {
        print_visibility(&snapshot);
    } else if cli.placements {
        print_placements(&snapshot, cli.breakpoint);
    } else if cli.svg {
        let palette = load_or_default(cli.palette.as_deref(), "palette", Palette::from_file);
        let metrics = match &cli.metrics {
            Some(path) => load_or_default(Some(path.as_path()), "metrics", GridMetrics::from_file),
            None => GridMetrics::estimated(&snapshot, cli.breakpoint),
        };
        let config = PreviewConfig::new()
            .with_breakpoint(cli.breakpoint)
            .with_palette(palette);
        println!("{}", render_preview(&snapshot, &metrics, &config));
    } else {
        print_template_reports(&snapshot);
        let problems = compute_diagnostics_with(&snapshot, &policy);
        for problem in &problems {
            println!("{}", problem);
        }
        if problems.iter().any(|p| p.is_error()) {
            std::process::exit(1);
        }
    }
}

/// Load an optional TOML file, exiting on failure
fn load_or_default<T: Default>(
    path: Option<&Path>,
    what: &str,
    load: impl Fn(&Path) -> Result<T, ConfigError>,
) -> T {
    match path {
        Some(path) => match load(path) {
            Ok(value) => value,
            Err(e) => {
                eprintln!("Error loading {} '{}': {}", what, path.display(), e);
                std::process::exit(1);
            }
        },
        None => T::default(),
    }
}

/// Show source context for base templates that fail to parse
fn print_template_reports(snapshot: &Snapshot) {
    if snapshot.use_named_areas {
        let areas = &snapshot.grid_template_areas;
        if !areas.trim().is_empty() {
            if let Err(e) = parse_areas(areas) {
                eprint!("{}", e.format(areas, "gridTemplateAreas"));
            }
        }
    }
    for (value, name) in [
        (&snapshot.grid_template_columns, "gridTemplateColumns"),
        (&snapshot.grid_template_rows, "gridTemplateRows"),
    ] {
        if value.trim().is_empty() {
            continue;
        }
        if let Err(errors) = parse_track_list(value) {
            for e in errors {
                eprint!("{}", e.format(value, name));
            }
        }
    }
}

fn print_visibility(snapshot: &Snapshot) {
    let panel = compute_panel(snapshot);
    println!("Hidden fields ({}):", panel.hidden.len());
    for path in &panel.hidden {
        println!("  {}", path);
    }
    for tab in &panel.tabs {
        let visible = panel.visible_fields(tab.caption);
        println!("{} ({} visible):", tab.caption, visible.len());
        for key in visible {
            println!("  {}", key);
        }
    }
}

fn print_placements(snapshot: &Snapshot, tier: Option<Breakpoint>) {
    let placements = compute_placements(snapshot, tier);
    for (index, (item, placement)) in snapshot.items.iter().zip(&placements).enumerate() {
        let fields = resolve_item(snapshot, item, tier);
        println!(
            "{}: {}",
            item.label(index),
            describe_placement(placement, fields.placement_type)
        );
    }
}
