//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **trail-centric**. The primary display for every entry is its
//! positional index and name; classification, durations and access details
//! follow as indented context lines. The same header shape is used by
//! `search`, `check` and `build`, so a trail reads the same everywhere.
//!
//! # Output Format
//!
//! ## Search
//!
//! ```text
//! Showing 3 of 20 trails (term "bush", Easy, Under 2 hours)
//! 001 Karamatura Falls Track
//!     Easy · Open · 45 minutes return · 1.5km
//!     Access: Karamatura Valley Road
//! 002 Goldie Bush Walkway
//!     ...
//! ```
//!
//! ## Show
//!
//! ```text
//! Hillary Trail [hillary-trail]
//!     Difficulty: Challenging
//!     Status: Partial
//!     ...
//! Highlights
//!     - Complete traverse of Waitākere Ranges
//! ```
//!
//! ## Check
//!
//! ```text
//! Trails
//! 001 Hillary Trail (Challenging, Partial)
//! ...
//!
//! Featured
//!     karamatura-falls → Karamatura Falls Track
//!
//! Pages
//!     Safety Information (built-in)
//!     Trip Planning → planning.md
//! ```
//!
//! ## Build
//!
//! ```text
//! Waitākere Ranges → index.html
//! All Trails → trails/index.html
//! Easy Trails → trails/easy/any/index.html (unchanged)
//! Hillary Trail → trail/hillary-trail/index.html
//!
//! Generated 43 pages for 20 trails
//! Cache: 44 written
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::cache::WriteStatus;
use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::generate::{GenerateEvent, GenerateResult};
use crate::pages::PanelPage;
use crate::search::Query;
use crate::trail::Trail;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format a trail header: positional index + name, with optional detail.
///
/// ```text
/// 001 Hillary Trail
/// 001 Hillary Trail (Challenging, Partial)
/// ```
fn trail_header(index: usize, trail: &Trail, with_class: bool) -> String {
    if with_class {
        format!(
            "{} {} ({}, {})",
            format_index(index),
            trail.name,
            trail.difficulty,
            trail.status
        )
    } else {
        format!("{} {}", format_index(index), trail.name)
    }
}

/// Describe the active filters, e.g. `term "bush", Easy, Under 2 hours`.
fn describe_query(query: &Query) -> Option<String> {
    let mut parts = Vec::new();
    if !query.term.is_empty() {
        parts.push(format!("term \"{}\"", query.term));
    }
    if let Some(d) = query.difficulty {
        parts.push(d.to_string());
    }
    if let Some(b) = query.duration {
        parts.push(b.label().to_string());
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}

fn pluralize(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// search
// ============================================================================

/// Format a filtered trail list with its result count.
pub fn format_search_results(results: &[&Trail], total: usize, query: &Query) -> Vec<String> {
    let mut header = format!("Showing {} of {} trails", results.len(), total);
    if let Some(filters) = describe_query(query) {
        header.push_str(&format!(" ({filters})"));
    }
    let mut lines = vec![header];

    if results.is_empty() {
        lines.push("No trails found".to_string());
        lines.push(format!(
            "{}Try adjusting your search or filters",
            indent(1)
        ));
        return lines;
    }

    for (i, trail) in results.iter().enumerate() {
        lines.push(trail_header(i + 1, trail, false));
        lines.push(format!(
            "{}{} · {} · {} · {}",
            indent(1),
            trail.difficulty,
            trail.status,
            trail.duration,
            trail.distance
        ));
        lines.push(format!("{}Access: {}", indent(1), trail.primary_access()));
    }
    lines
}

pub fn print_search_results(results: &[&Trail], total: usize, query: &Query) {
    for line in format_search_results(results, total, query) {
        println!("{}", line);
    }
}

// ============================================================================
// show
// ============================================================================

fn push_list(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(heading.to_string());
    for item in items {
        lines.push(format!("{}- {}", indent(1), item));
    }
}

/// Format the full record of one trail, grouped like the detail page.
pub fn format_trail_detail(trail: &Trail) -> Vec<String> {
    let mut lines = vec![
        format!("{} [{}]", trail.name, trail.id),
        format!("{}Difficulty: {}", indent(1), trail.difficulty),
        format!("{}Status: {}", indent(1), trail.status),
        format!("{}Distance: {}", indent(1), trail.distance),
        format!("{}Duration: {}", indent(1), trail.duration),
        format!("{}Elevation: {}", indent(1), trail.elevation),
    ];
    let flags: Vec<&str> = [
        (trail.kauri_risk, "kauri risk"),
        (trail.multi_day, "multi-day"),
    ]
    .into_iter()
    .filter_map(|(on, label)| on.then_some(label))
    .collect();
    if !flags.is_empty() {
        lines.push(format!("{}Flags: {}", indent(1), flags.join(", ")));
    }

    lines.push("Description".to_string());
    lines.push(format!("{}{}", indent(1), trail.description));
    push_list(&mut lines, "Highlights", &trail.highlights);
    push_list(&mut lines, "Warnings", &trail.warnings);

    lines.push("Access".to_string());
    lines.push(format!("{}Trailhead: {}", indent(1), trail.access));
    lines.push(format!("{}Parking: {}", indent(1), trail.parking));
    lines.push(format!("{}Coordinates: {}", indent(1), trail.coordinates));
    lines.push(format!("{}Map: {}", indent(1), trail.maps_url()));
    push_list(&mut lines, "Facilities", &trail.facilities);
    lines
}

pub fn print_trail_detail(trail: &Trail) {
    for line in format_trail_detail(trail) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Format the content inventory: trails, featured picks, panels, config files.
pub fn format_check_output(
    catalog: &Catalog,
    featured: &[&Trail],
    panels: &[PanelPage],
    config: &SiteConfig,
    source_root: &Path,
) -> Vec<String> {
    let mut lines = vec!["Trails".to_string()];
    for (i, trail) in catalog.trails().iter().enumerate() {
        lines.push(trail_header(i + 1, trail, true));
    }

    if !featured.is_empty() {
        lines.push(String::new());
        lines.push("Featured".to_string());
        for trail in featured {
            lines.push(format!("{}{} \u{2192} {}", indent(1), trail.id, trail.name));
        }
    }

    lines.push(String::new());
    lines.push("Pages".to_string());
    for page in panels {
        if page.overridden {
            lines.push(format!(
                "{}{} \u{2192} {}.md",
                indent(1),
                page.title,
                page.panel.slug()
            ));
        } else {
            lines.push(format!("{}{} (built-in)", indent(1), page.title));
        }
    }

    let mut config_lines = Vec::new();
    if source_root.join("config.toml").exists() {
        config_lines.push(format!("{}config.toml", indent(1)));
    }
    if let Some(path) = &config.catalog.path {
        config_lines.push(format!("{}{}", indent(1), path));
    }
    if source_root.join(&config.catalog.extra_dir).is_dir() {
        config_lines.push(format!("{}{}/", indent(1), config.catalog.extra_dir));
    }
    if source_root.join(&config.assets_dir).is_dir() {
        config_lines.push(format!("{}{}/", indent(1), config.assets_dir));
    }
    if !config_lines.is_empty() {
        lines.push(String::new());
        lines.push("Config".to_string());
        lines.extend(config_lines);
    }
    lines
}

pub fn print_check_output(
    catalog: &Catalog,
    featured: &[&Trail],
    panels: &[PanelPage],
    config: &SiteConfig,
    source_root: &Path,
) {
    for line in format_check_output(catalog, featured, panels, config, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Format a single build progress event as display lines.
pub fn format_generate_event(event: &GenerateEvent) -> Vec<String> {
    match event {
        GenerateEvent::PageWritten {
            title,
            path,
            status,
        } => {
            let suffix = match status {
                WriteStatus::Written => "",
                WriteStatus::Unchanged => " (unchanged)",
            };
            vec![format!("{} \u{2192} {}{}", title, path, suffix)]
        }
        GenerateEvent::PageRemoved { path } => vec![format!("Removed {}", path)],
        GenerateEvent::AssetsCopied { count } => {
            vec![format!("Copied {}", pluralize(*count, "asset"))]
        }
    }
}

/// Format the closing summary of a build.
pub fn format_generate_summary(result: &GenerateResult) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!(
            "Generated {} for {}",
            pluralize(result.pages, "page"),
            pluralize(result.trails, "trail")
        ),
    ];
    if result.removed > 0 {
        lines.push(format!("Removed {}", pluralize(result.removed, "stale page")));
    }
    lines.push(format!("Cache: {}", result.cache_stats));
    lines
}

pub fn print_generate_summary(result: &GenerateResult) {
    for line in format_generate_summary(result) {
        println!("{}", line);
    }
}
