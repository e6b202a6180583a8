//! HTML site generation.
//!
//! Renders the trail directory as a static site. Every page is one
//! [`ViewState`] snapshot: the generator enumerates the reachable states,
//! renders each with maud, and writes it to [`ViewState::page_path`].
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero, quick stats, featured trail cards
//! - **Trail listings** (`/trails/index.html`, `/trails/<difficulty>/<duration>/index.html`):
//!   filter bar, result count and summary cards for every difficulty and
//!   duration-bucket combination
//! - **Trail detail** (`/trail/<id>/index.html`): the full record for one trail
//! - **Safety / Planning** (`/safety/index.html`, `/planning/index.html`):
//!   markdown panels from [`crate::pages`]
//! - **Catalog export** (`/trails.json`)
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── trails.json
//! ├── .build-manifest.json
//! ├── trails/
//! │   ├── index.html             # no filters
//! │   ├── easy/any/index.html
//! │   ├── all/short/index.html
//! │   └── ...
//! ├── trail/
//! │   ├── hillary-trail/index.html
//! │   └── ...
//! ├── safety/index.html
//! ├── planning/index.html
//! └── favicon.ico                # from <content>/assets/
//! ```
//!
//! Assets may not land on a generated path: `assets/index.html` is an
//! [`GenerateError::AssetCollision`]. Stale pages from the previous manifest
//! are removed only when their path stays inside the output directory.
//!
//! ## Text Search
//!
//! Difficulty and duration filters are pages. The free-text term is applied
//! in the browser by `static/search.js`, which narrows the cards already on
//! the page. Each card carries `data-name` and `data-description`, both
//! lowercased here with the same folding [`crate::search`] uses, so the
//! script only has to lowercase the term and test substrings.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/search.js`: Card filtering by search term
//!
//! ## Parallelism
//!
//! Pages are rendered in parallel with rayon, then written in page order so
//! progress output is stable. Unchanged pages are skipped through
//! [`crate::cache`].

use crate::cache::{self, BuildManifest, CacheStats, WriteStatus};
use crate::catalog::{Catalog, CatalogError};
use crate::config::{self, SiteConfig};
use crate::pages::{self, PanelPage};
use crate::search::{DurationBucket, Query};
use crate::trail::{Difficulty, Status, Trail};
use crate::view::{self, Action, Panel, ViewState};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use std::fs;
use std::collections::HashSet;
use std::path::{Component, Path};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Unknown trail '{0}'")]
    UnknownTrail(String),
    #[error("Asset '{0}' would overwrite a generated page")]
    AssetCollision(String),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const SEARCH_JS: &str = include_str!("../static/search.js");

/// Catalog export path, relative to the output root.
const CATALOG_JSON: &str = "trails.json";

/// Progress reported while writing the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateEvent {
    PageWritten {
        title: String,
        path: String,
        status: WriteStatus,
    },
    /// A page from the previous build that this build no longer produces.
    PageRemoved { path: String },
    AssetsCopied { count: usize },
}

/// What a build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResult {
    /// HTML pages rendered (catalog export not included).
    pub pages: usize,
    pub trails: usize,
    pub removed: usize,
    pub assets_copied: usize,
    pub cache_stats: CacheStats,
}

/// Build the site for `source_root` into `output_dir`.
///
/// With `use_cache` off every page is rewritten; the previous manifest is
/// still read so pages of trails that no longer exist get removed.
pub fn generate(
    source_root: &Path,
    output_dir: &Path,
    config: &SiteConfig,
    use_cache: bool,
    events: Option<Sender<GenerateEvent>>,
) -> Result<GenerateResult, GenerateError> {
    let catalog = Catalog::load(source_root, &config.catalog)?;
    let ctx = SiteContext::new(&catalog, config, pages::load_panel_pages(source_root)?)?;
    let emit = |event: GenerateEvent| {
        if let Some(tx) = &events {
            tx.send(event).ok();
        }
    };

    let states = site_states(&catalog);
    let assets_dir = source_root.join(&config.assets_dir);
    check_asset_collisions(&assets_dir, &states)?;

    fs::create_dir_all(output_dir)?;
    let previous = BuildManifest::load(output_dir);
    let reuse = if use_cache {
        previous.clone()
    } else {
        BuildManifest::empty()
    };

    let rendered = states
        .par_iter()
        .map(|state| -> Result<RenderedPage, GenerateError> {
            Ok(RenderedPage {
                title: ctx.page_title(state)?,
                path: state.page_path(),
                html: ctx.render(state)?.into_string(),
            })
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;

    let mut manifest = BuildManifest::empty();
    let mut cache_stats = CacheStats::default();
    let mut write = |title: String, path: String, content: &[u8]| -> std::io::Result<()> {
        let (status, hash) = cache::write_if_changed(&reuse, output_dir, &path, content)?;
        cache_stats.record(status);
        manifest.insert(path.clone(), hash);
        emit(GenerateEvent::PageWritten {
            title,
            path,
            status,
        });
        Ok(())
    };

    for page in &rendered {
        write(page.title.clone(), page.path.clone(), page.html.as_bytes())?;
    }
    write(
        "Catalog".to_string(),
        CATALOG_JSON.to_string(),
        catalog.to_json()?.as_bytes(),
    )?;

    let mut removed = 0;
    for stale in previous.pages.keys() {
        if manifest.pages.contains_key(stale) || !is_relative_inside(stale) {
            continue;
        }
        let path = output_dir.join(stale);
        if path.is_file() {
            fs::remove_file(&path)?;
            remove_empty_parents(&path, output_dir)?;
            removed += 1;
            emit(GenerateEvent::PageRemoved {
                path: stale.clone(),
            });
        }
    }
    manifest.save(output_dir)?;

    let assets_copied = if assets_dir.is_dir() {
        copy_dir_recursive(&assets_dir, output_dir)?
    } else {
        0
    };
    if assets_copied > 0 {
        emit(GenerateEvent::AssetsCopied {
            count: assets_copied,
        });
    }

    Ok(GenerateResult {
        pages: rendered.len(),
        trails: catalog.len(),
        removed,
        assets_copied,
        cache_stats,
    })
}

/// Every page of the site, in output order: home, listings, details, panels.
pub fn site_states(catalog: &Catalog) -> Vec<ViewState> {
    let mut states = vec![ViewState::default()];
    states.extend(view::filter_states());
    states.extend(catalog.trails().iter().map(detail_state));
    states.push(ViewState::at(Panel::Safety));
    states.push(ViewState::at(Panel::Planning));
    states
}

/// Featured trails from config, in config order. Unknown ids are an error.
pub fn featured_trails<'a>(
    catalog: &'a Catalog,
    config: &SiteConfig,
) -> Result<Vec<&'a Trail>, GenerateError> {
    config
        .featured
        .iter()
        .map(|id| {
            catalog
                .get(id)
                .ok_or_else(|| GenerateError::UnknownTrail(id.clone()))
        })
        .collect()
}

/// Detail view of `trail`, opened from the trails panel.
fn detail_state(trail: &Trail) -> ViewState {
    ViewState::at(Panel::Trails).apply(Action::SelectTrail(trail.id.clone()))
}

/// Fail if any file under `assets_dir` lands on a generated output path.
fn check_asset_collisions(assets_dir: &Path, states: &[ViewState]) -> Result<(), GenerateError> {
    if !assets_dir.is_dir() {
        return Ok(());
    }
    let mut reserved: HashSet<String> = states.iter().map(ViewState::page_path).collect();
    reserved.insert(CATALOG_JSON.to_string());
    reserved.insert(cache::MANIFEST_FILENAME.to_string());

    for entry in WalkDir::new(assets_dir).follow_links(true) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(assets_dir)
            .unwrap_or(entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if reserved.contains(&rel) {
            return Err(GenerateError::AssetCollision(rel));
        }
    }
    Ok(())
}

/// Whether a manifest key names a path under the output root.
fn is_relative_inside(page_path: &str) -> bool {
    let path = Path::new(page_path);
    !page_path.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Remove directories left empty by a deleted page, stopping at `root`.
fn remove_empty_parents(path: &Path, root: &Path) -> std::io::Result<()> {
    let mut dir = path.parent();
    while let Some(current) = dir {
        if current == root || !current.starts_with(root) {
            break;
        }
        if fs::read_dir(current)?.next().is_some() {
            break;
        }
        fs::remove_dir(current)?;
        dir = current.parent();
    }
    Ok(())
}

/// Copy a directory tree, returning the number of files copied.
pub(crate) fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<usize> {
    let mut count = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            count += copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            count += 1;
        }
    }
    Ok(count)
}

struct RenderedPage {
    title: String,
    path: String,
    html: String,
}

/// Everything shared by every page of one build.
struct SiteContext<'a> {
    catalog: &'a Catalog,
    config: &'a SiteConfig,
    css: String,
    panels: Vec<PanelPage>,
    featured: Vec<&'a Trail>,
}

impl<'a> SiteContext<'a> {
    fn new(
        catalog: &'a Catalog,
        config: &'a SiteConfig,
        panels: Vec<PanelPage>,
    ) -> Result<Self, GenerateError> {
        let color_css = config::generate_color_css(&config.colors);
        Ok(Self {
            catalog,
            config,
            css: format!("{}\n\n{}", color_css, CSS_STATIC),
            panels,
            featured: featured_trails(catalog, config)?,
        })
    }

    fn panel_page(&self, panel: Panel) -> Option<&PanelPage> {
        self.panels.iter().find(|p| p.panel == panel)
    }

    /// Short page name, used in `<title>` and progress output.
    fn page_title(&self, state: &ViewState) -> Result<String, GenerateError> {
        if let Some(id) = &state.selected {
            return self
                .catalog
                .get(id)
                .map(|t| t.name.clone())
                .ok_or_else(|| GenerateError::UnknownTrail(id.clone()));
        }
        Ok(match state.panel {
            Panel::Home => self.config.title.clone(),
            Panel::Trails => listing_title(&state.query),
            panel => self
                .panel_page(panel)
                .map(|p| p.title.clone())
                .unwrap_or_else(|| panel.title().to_string()),
        })
    }

    fn render(&self, state: &ViewState) -> Result<Markup, GenerateError> {
        let title = self.page_title(state)?;
        let document_title = if state.panel == Panel::Home && state.selected.is_none() {
            title
        } else {
            format!("{} | {}", title, self.config.title)
        };

        let (body_class, content) = if let Some(trail) = state.selected_trail(self.catalog) {
            ("detail", render_trail_detail(trail, state, self.config))
        } else {
            match state.panel {
                Panel::Home => ("home", render_home(self)),
                Panel::Trails => ("trails", render_trail_listing(self.catalog, state)),
                panel => {
                    let page = self.panel_page(panel);
                    ("panel", render_panel_page(panel, page))
                }
            }
        };

        Ok(base_document(
            &document_title,
            &self.css,
            Some(body_class),
            html! {
                (site_header(self.config, state.panel))
                (alert_banner(&self.config.alert))
                main { (content) }
                (site_footer(self.config))
            },
        ))
    }
}

/// Heading for a listing page, e.g. `Easy Trails · Under 2 hours`.
pub fn listing_title(query: &Query) -> String {
    let base = match query.difficulty {
        Some(d) => format!("{d} Trails"),
        None => "All Trails".to_string(),
    };
    match query.duration {
        Some(bucket) => format!("{base} · {}", bucket.label()),
        None => base,
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Site name plus one link per panel. The current panel is marked.
fn site_header(config: &SiteConfig, current: Panel) -> Markup {
    html! {
        header.site-header {
            a.brand href="/" {
                span.brand-title { (config.title) }
                span.brand-tagline { "Hiking Directory & Planning" }
            }
            nav.site-nav {
                @for panel in Panel::ALL {
                    a class=[(panel == current).then_some("current")] href=(ViewState::at(panel).href()) {
                        (panel.title())
                    }
                }
            }
        }
    }
}

fn alert_banner(alert: &str) -> Markup {
    html! {
        @if !alert.trim().is_empty() {
            aside.alert-banner role="note" {
                strong { "Important: " }
                (alert)
            }
        }
    }
}

fn site_footer(config: &SiteConfig) -> Markup {
    html! {
        footer.site-footer {
            div.footer-columns {
                div {
                    h3 { (config.title) }
                    p { (config.tagline) }
                }
                div {
                    h3 { "Emergency Contacts" }
                    p { "Police/Fire/Ambulance: 111" }
                    p { "Search & Rescue: 111" }
                }
                div {
                    h3 { "Resources" }
                    p { a href=(config.official_info_url) target="_blank" rel="noopener" { "Auckland Council Parks" } }
                    p { a href="https://www.doc.govt.nz/" target="_blank" rel="noopener" { "Department of Conservation" } }
                }
            }
            p.footer-note { "Track status is published copy, not live data. For informational purposes only." }
        }
    }
}

fn badge(label: &str, class: &str) -> Markup {
    html! { span class=(class) { (label) } }
}

/// Difficulty and status badges plus the kauri and multi-day flags.
fn trail_badges(trail: &Trail) -> Markup {
    html! {
        (badge(trail.difficulty.as_str(), trail.difficulty.style().css_class()))
        (badge(trail.status.as_str(), trail.status.style().css_class()))
        @if trail.kauri_risk {
            span.flag.flag-kauri { "⚠️ Kauri Risk" }
        }
        @if trail.multi_day {
            span.flag.flag-multiday { "🏕️ Multi-day" }
        }
    }
}

/// Summary card linking to the trail's detail page.
fn trail_card(trail: &Trail) -> Markup {
    let extra_highlights = trail.highlights.len().saturating_sub(3);
    html! {
        article.trail-card
            data-id=(trail.id)
            data-name=(trail.name.to_lowercase())
            data-description=(trail.description.to_lowercase())
        {
            a.card-link href=(detail_state(trail).href()) {
                div.card-image {
                    img src=(trail.image) alt=(trail.name) loading="lazy";
                    div.card-badges { (trail_badges(trail)) }
                }
                div.card-body {
                    h3 { (trail.name) }
                    ul.card-stats {
                        li { "📏 " (trail.distance) }
                        li { "⏱️ " (trail.duration) }
                        li { "⛰️ " (trail.elevation) }
                    }
                    p.card-description { (trail.description) }
                    div.tags {
                        @for highlight in trail.highlights.iter().take(3) {
                            span.tag { (highlight) }
                        }
                        @if extra_highlights > 0 {
                            span.tag.tag-more { "+" (extra_highlights) " more" }
                        }
                    }
                    div.card-footer {
                        span.card-access { "📍 " (trail.primary_access()) }
                        span.button { "View Details" }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

fn render_home(ctx: &SiteContext) -> Markup {
    let trails = ctx.catalog.trails();
    let easy = trails
        .iter()
        .filter(|t| t.difficulty == Difficulty::Easy)
        .count();
    let open = trails.iter().filter(|t| t.status == Status::Open).count();
    let kauri = trails.iter().filter(|t| t.kauri_risk).count();
    let hero_image = ctx.featured.first().map(|t| t.image.as_str());

    html! {
        section.hero style=[hero_image.map(|url| format!("background-image: url('{url}')"))] {
            div.hero-content {
                h1 { "Explore the Wild West" }
                p { (ctx.config.tagline) }
                div.hero-actions {
                    a.button href=(ViewState::at(Panel::Trails).href()) { "Browse Trails" }
                    a.button.button-warning href=(ViewState::at(Panel::Safety).href()) { "Safety Info" }
                }
            }
        }
        section.stats {
            div.stat { span.stat-value { (trails.len()) } span.stat-label { "trails listed" } }
            div.stat { span.stat-value { (easy) } span.stat-label { "easy walks" } }
            div.stat { span.stat-value { (open) } span.stat-label { "fully open" } }
            div.stat { span.stat-value { (kauri) } span.stat-label { "in kauri areas" } }
        }
        @if !ctx.featured.is_empty() {
            section.featured {
                h2 { "Featured Trails" }
                div.card-grid {
                    @for trail in &ctx.featured {
                        (trail_card(trail))
                    }
                }
            }
        }
    }
}

/// One filter chip: links to `state` with `action` applied.
fn filter_chip(state: &ViewState, action: Action, label: &str, active: bool) -> Markup {
    let target = state.clone().apply(action);
    html! {
        a class=(if active { "chip active" } else { "chip" }) href=(target.href()) { (label) }
    }
}

fn render_trail_listing(catalog: &Catalog, state: &ViewState) -> Markup {
    let visible = state.visible_trails(catalog);
    let query = &state.query;

    html! {
        section.listing {
            h2 { (listing_title(query)) }
            p.lead { "Comprehensive directory of hiking trails in the Waitākere Ranges" }
            form.filter-bar role="search" onsubmit="return false" {
                input id="trail-search" type="search" name="q" placeholder="Search trails..." autocomplete="off";
                div.chip-row aria-label="Difficulty" {
                    (filter_chip(state, Action::SetDifficulty(None), "All Difficulties", query.difficulty.is_none()))
                    @for d in Difficulty::ALL {
                        (filter_chip(state, Action::SetDifficulty(Some(d)), d.as_str(), query.difficulty == Some(d)))
                    }
                }
                div.chip-row aria-label="Duration" {
                    (filter_chip(state, Action::SetDuration(None), "All Durations", query.duration.is_none()))
                    @for b in DurationBucket::ALL {
                        (filter_chip(state, Action::SetDuration(Some(b)), b.label(), query.duration == Some(b)))
                    }
                }
                @if !query.is_empty() {
                    a.clear-filters href=(state.clone().apply(Action::ClearFilters).href()) { "Clear filters" }
                }
            }
            p.result-count {
                "Showing " span id="visible-count" { (visible.len()) } " of " (catalog.len()) " trails"
            }
            div.card-grid {
                @for trail in &visible {
                    (trail_card(trail))
                }
            }
            div id="no-results" class="empty-state" hidden[!visible.is_empty()] {
                p.empty-title { "No trails found" }
                p { "Try adjusting your search or filters" }
            }
        }
        script { (PreEscaped(SEARCH_JS)) }
    }
}

fn render_trail_detail(trail: &Trail, state: &ViewState, config: &SiteConfig) -> Markup {
    let close = state.clone().apply(Action::CloseDetail);
    html! {
        article.trail-detail {
            div.detail-header {
                img src=(trail.image) alt=(trail.name);
                a.close href=(close.href()) aria-label="Close" { "✕" }
                div.card-badges { (trail_badges(trail)) }
            }
            h1 { (trail.name) }
            dl.detail-stats {
                div { dt { "Distance" } dd { "📏 " (trail.distance) } }
                div { dt { "Duration" } dd { "⏱️ " (trail.duration) } }
                div { dt { "Elevation" } dd { "⛰️ " (trail.elevation) } }
            }
            section {
                h2 { "Description" }
                p { (trail.description) }
            }
            @if !trail.highlights.is_empty() {
                section {
                    h2 { "Highlights" }
                    ul.checklist {
                        @for h in &trail.highlights {
                            li { (h) }
                        }
                    }
                }
            }
            @if !trail.warnings.is_empty() {
                section.warnings {
                    h2 { "⚠️ Warnings & Safety" }
                    ul {
                        @for w in &trail.warnings {
                            li { (w) }
                        }
                    }
                }
            }
            div.detail-columns {
                section {
                    h2 { "Access & Parking" }
                    dl {
                        dt { "Trailhead Access:" } dd { (trail.access) }
                        dt { "Parking:" } dd { (trail.parking) }
                        dt { "Coordinates:" } dd.coordinates { (trail.coordinates) }
                    }
                }
                @if !trail.facilities.is_empty() {
                    section {
                        h2 { "Facilities" }
                        ul.checklist {
                            @for f in &trail.facilities {
                                li { (f) }
                            }
                        }
                    }
                }
            }
            @if trail.kauri_risk {
                section.kauri-info {
                    h2 { "🌲 Kauri Dieback Information" }
                    p { "This trail passes through areas with kauri trees that may be affected by Kauri Dieback disease." }
                    p { strong { "Please:" } }
                    ul {
                        li { "Use cleaning stations at the start and end of your walk" }
                        li { "Stay on designated tracks and boardwalks" }
                        li { "Clean your footwear and equipment thoroughly" }
                        li { "Do not touch kauri trees or disturb soil around them" }
                    }
                }
            }
            div.detail-actions {
                a.button href=(trail.maps_url()) target="_blank" rel="noopener" { "📍 Open in Maps" }
                a.button.button-secondary href=(config.official_info_url) target="_blank" rel="noopener" { "🌐 Official Info" }
            }
        }
    }
}

fn render_panel_page(panel: Panel, page: Option<&PanelPage>) -> Markup {
    html! {
        article.panel-page data-panel=(panel.slug()) {
            @if let Some(page) = page {
                (PreEscaped(page.to_html()))
            } @else {
                h1 { (panel.title()) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_trail;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn builtin_ctx<'a>(catalog: &'a Catalog, config: &'a SiteConfig) -> SiteContext<'a> {
        let tmp = TempDir::new().unwrap();
        let panels = pages::load_panel_pages(tmp.path()).unwrap();
        SiteContext::new(catalog, config, panels).unwrap()
    }

    fn render_to_string(catalog: &Catalog, state: &ViewState) -> String {
        let config = SiteConfig::default();
        builtin_ctx(catalog, &config)
            .render(state)
            .unwrap()
            .into_string()
    }

    fn listing(difficulty: Option<Difficulty>, duration: Option<DurationBucket>) -> ViewState {
        ViewState::at(Panel::Trails)
            .apply(Action::SetDifficulty(difficulty))
            .apply(Action::SetDuration(duration))
    }

    // =========================================================================
    // Components
    // =========================================================================

    #[test]
    fn base_document_includes_doctype() {
        let doc = base_document("Test", "body {}", None, html! { p { "hi" } });
        let html = doc.into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Test</title>"));
    }

    #[test]
    fn base_document_keeps_css_unescaped() {
        let doc = base_document("T", "a > b { color: red; }", Some("home"), html! {});
        let html = doc.into_string();
        assert!(html.contains("a > b"));
        assert!(html.contains(r#"<body class="home">"#));
    }

    #[test]
    fn header_marks_current_panel() {
        let html = site_header(&SiteConfig::default(), Panel::Safety).into_string();
        assert!(html.contains(r#"<a class="current" href="/safety/">Safety</a>"#));
        assert!(html.contains(r#"<a href="/trails/">Trails</a>"#));
        assert!(html.contains(r#"href="/planning/""#));
    }

    #[test]
    fn empty_alert_hides_banner() {
        assert!(alert_banner("").into_string().is_empty());
        assert!(alert_banner("Track closed").into_string().contains("Track closed"));
    }

    #[test]
    fn card_carries_lowercased_search_haystacks() {
        let mut trail = sample_trail("ridge", "Easy", "1 hour");
        trail.name = "Ōkura Ridge".to_string();
        let html = trail_card(&trail).into_string();
        assert!(html.contains(r#"data-name="ōkura ridge""#));
        assert!(html.contains(r#"data-description="a short climb through regenerating bush.""#));
        assert!(html.contains(r#"href="/trail/ridge/""#));
        assert!(html.contains("📍 Scenic Drive"));
    }

    #[test]
    fn card_truncates_highlights_to_three() {
        let catalog = Catalog::builtin();
        // Hillary Trail has five highlights
        let html = trail_card(catalog.get("hillary-trail").unwrap()).into_string();
        assert!(html.contains("+2 more"));
        assert_eq!(html.matches(r#"<span class="tag">"#).count(), 3);
    }

    #[test]
    fn badges_use_style_tokens() {
        let catalog = Catalog::builtin();
        let html = trail_badges(catalog.get("hillary-trail").unwrap()).into_string();
        assert!(html.contains(r#"<span class="badge badge-orange">Challenging</span>"#));
        assert!(html.contains(r#"<span class="badge badge-yellow">Partial</span>"#));
        assert!(html.contains("Kauri Risk"));
        assert!(html.contains("Multi-day"));
    }

    #[test]
    fn html_escape_in_maud() {
        let mut trail = sample_trail("xss", "Easy", "1 hour");
        trail.name = "<script>alert('x')</script>".to_string();
        let html = trail_card(&trail).into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    // =========================================================================
    // Pages
    // =========================================================================

    #[test]
    fn listing_shows_filtered_count() {
        let catalog = Catalog::builtin();
        let state = listing(Some(Difficulty::Easy), Some(DurationBucket::Short));
        let html = render_to_string(&catalog, &state);
        assert!(html.contains(r#"<span id="visible-count">7</span> of 20 trails"#));
        assert!(html.contains(r#"data-id="karamatura-falls""#));
        assert!(!html.contains(r#"data-id="hillary-trail""#));
        assert!(html.contains("<title>Easy Trails · Under 2 hours | Waitākere Ranges</title>"));
    }

    #[test]
    fn listing_chips_link_to_neighbour_states() {
        let catalog = Catalog::builtin();
        let html = render_to_string(&catalog, &listing(Some(Difficulty::Easy), None));
        assert!(html.contains(r#"<a class="chip active" href="/trails/easy/any/">Easy</a>"#));
        assert!(html.contains(r#"href="/trails/easy/long/""#));
        assert!(html.contains(r#"<a class="chip" href="/trails/">All Difficulties</a>"#));
        assert!(html.contains(r#"<a class="clear-filters" href="/trails/">"#));
        assert!(html.contains("trail-search"));
    }

    #[test]
    fn unfiltered_listing_has_no_clear_link() {
        let catalog = Catalog::builtin();
        let html = render_to_string(&catalog, &ViewState::at(Panel::Trails));
        assert!(!html.contains("clear-filters"));
        assert!(html.contains(r#"<div id="no-results" class="empty-state" hidden>"#));
    }

    #[test]
    fn empty_listing_shows_no_results() {
        let catalog = Catalog::builtin();
        let html = render_to_string(&catalog, &listing(Some(Difficulty::Expert), None));
        assert!(html.contains(r#"<span id="visible-count">0</span>"#));
        assert!(html.contains(r#"<div id="no-results" class="empty-state">"#));
        assert!(html.contains("No trails found"));
    }

    #[test]
    fn detail_page_shows_full_record() {
        let catalog = Catalog::builtin();
        let state = detail_state(catalog.get("hillary-trail").unwrap());
        let html = render_to_string(&catalog, &state);
        assert!(html.contains("<h1>Hillary Trail</h1>"));
        assert!(html.contains("Kauri Dieback Information"));
        assert!(html.contains("https://maps.google.com/?q="));
        assert!(html.contains("Official Info"));
        assert!(html.contains(r#"<a class="close" href="/trails/" aria-label="Close">"#));
        assert!(html.contains(r#"<body class="detail">"#));
    }

    #[test]
    fn detail_page_without_kauri_risk_omits_section() {
        let catalog = Catalog::builtin();
        let state = detail_state(catalog.get("fairy-falls").unwrap());
        let html = render_to_string(&catalog, &state);
        assert!(!html.contains("Kauri Dieback Information"));
        assert!(html.contains("Warnings &amp; Safety"));
    }

    #[test]
    fn unknown_selection_is_error() {
        let catalog = Catalog::builtin();
        let config = SiteConfig::default();
        let ctx = builtin_ctx(&catalog, &config);
        let state = ViewState::default().apply(Action::SelectTrail("nowhere".into()));
        assert!(matches!(
            ctx.render(&state),
            Err(GenerateError::UnknownTrail(id)) if id == "nowhere"
        ));
    }

    #[test]
    fn home_lists_featured_in_config_order() {
        let catalog = Catalog::builtin();
        let html = render_to_string(&catalog, &ViewState::default());
        let karamatura = html.find(r#"data-id="karamatura-falls""#).unwrap();
        let hillary = html.find(r#"data-id="hillary-trail""#).unwrap();
        assert!(karamatura < hillary);
        assert!(html.contains("Featured Trails"));
        assert!(html.contains("<title>Waitākere Ranges</title>"));
    }

    #[test]
    fn panel_pages_render_markdown() {
        let catalog = Catalog::builtin();
        let html = render_to_string(&catalog, &ViewState::at(Panel::Safety));
        assert!(html.contains("<h1>Safety Information</h1>"));
        assert!(html.contains("<title>Safety Information | Waitākere Ranges</title>"));
    }

    #[test]
    fn unknown_featured_id_is_error() {
        let catalog = Catalog::builtin();
        let config = SiteConfig {
            featured: vec!["fairy-falls".into(), "atlantis".into()],
            ..SiteConfig::default()
        };
        assert!(matches!(
            featured_trails(&catalog, &config),
            Err(GenerateError::UnknownTrail(id)) if id == "atlantis"
        ));
    }

    #[test]
    fn listing_titles() {
        assert_eq!(listing_title(&Query::all()), "All Trails");
        let q = Query {
            difficulty: Some(Difficulty::Moderate),
            duration: Some(DurationBucket::Medium),
            ..Query::all()
        };
        assert_eq!(listing_title(&q), "Moderate Trails · 2-4 hours");
    }

    // =========================================================================
    // Whole-site generation
    // =========================================================================

    #[test]
    fn site_states_cover_every_page_once() {
        let catalog = Catalog::builtin();
        let states = site_states(&catalog);
        assert_eq!(states.len(), 1 + 20 + 20 + 2);
        let mut paths: Vec<String> = states.iter().map(ViewState::page_path).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), states.len());
    }

    #[test]
    fn generate_writes_every_page() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let result = generate(source.path(), out.path(), &SiteConfig::default(), true, None).unwrap();

        assert_eq!(result.pages, 43);
        assert_eq!(result.trails, 20);
        assert_eq!(result.cache_stats.written, 44);
        for path in [
            "index.html",
            "trails/index.html",
            "trails/easy/short/index.html",
            "trails/all/long/index.html",
            "trail/hillary-trail/index.html",
            "safety/index.html",
            "planning/index.html",
            "trails.json",
            ".build-manifest.json",
        ] {
            assert!(out.path().join(path).exists(), "missing {path}");
        }
    }

    #[test]
    fn rebuild_skips_unchanged_pages() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let config = SiteConfig::default();
        generate(source.path(), out.path(), &config, true, None).unwrap();

        let second = generate(source.path(), out.path(), &config, true, None).unwrap();
        assert_eq!(second.cache_stats.written, 0);
        assert_eq!(second.cache_stats.unchanged, 44);

        let forced = generate(source.path(), out.path(), &config, false, None).unwrap();
        assert_eq!(forced.cache_stats.written, 44);
    }

    #[test]
    fn config_change_rewrites_pages() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        generate(source.path(), out.path(), &SiteConfig::default(), true, None).unwrap();

        let retitled = SiteConfig {
            title: "West Auckland Walks".into(),
            ..SiteConfig::default()
        };
        let result = generate(source.path(), out.path(), &retitled, true, None).unwrap();
        // Every HTML page carries the title; the JSON export does not
        assert_eq!(result.cache_stats.written, 43);
        assert_eq!(result.cache_stats.unchanged, 1);
    }

    #[test]
    fn removed_trail_page_is_deleted() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let trails_dir = source.path().join("trails");
        fs::create_dir_all(&trails_dir).unwrap();
        fs::write(
            trails_dir.join("010-test-ridge.toml"),
            crate::test_helpers::trail_file_toml(None, "Moderate"),
        )
        .unwrap();
        let config = SiteConfig::default();
        generate(source.path(), out.path(), &config, true, None).unwrap();
        assert!(out.path().join("trail/test-ridge/index.html").exists());

        fs::remove_file(trails_dir.join("010-test-ridge.toml")).unwrap();
        let result = generate(source.path(), out.path(), &config, true, None).unwrap();
        assert_eq!(result.removed, 1);
        assert!(!out.path().join("trail/test-ridge/index.html").exists());
        // Its directory goes too; siblings stay
        assert!(!out.path().join("trail/test-ridge").exists());
        assert!(out.path().join("trail/fairy-falls/index.html").exists());
    }

    #[test]
    fn stale_entries_outside_output_are_never_removed() {
        let root = TempDir::new().unwrap();
        let source = root.path().join("content");
        let out = root.path().join("dist");
        fs::create_dir_all(&source).unwrap();
        fs::create_dir_all(&out).unwrap();
        let outside = root.path().join("keep.txt");
        fs::write(&outside, "keep").unwrap();
        fs::write(
            out.join(".build-manifest.json"),
            r#"{"version": 1, "pages": {"../keep.txt": "00"}}"#,
        )
        .unwrap();

        let result = generate(&source, &out, &SiteConfig::default(), true, None).unwrap();
        assert_eq!(result.removed, 0);
        assert!(outside.exists());
    }

    #[test]
    fn manifest_keys_must_stay_relative() {
        assert!(is_relative_inside("trail/fairy-falls/index.html"));
        assert!(is_relative_inside("trails.json"));
        assert!(!is_relative_inside("../keep.txt"));
        assert!(!is_relative_inside("trail/../../keep.txt"));
        assert!(!is_relative_inside("/etc/hosts"));
        assert!(!is_relative_inside(""));
    }

    #[test]
    fn asset_colliding_with_page_is_error() {
        for colliding in ["index.html", "trails/easy/any/index.html", "trails.json"] {
            let source = TempDir::new().unwrap();
            let out = TempDir::new().unwrap();
            let asset = source.path().join("assets").join(colliding);
            fs::create_dir_all(asset.parent().unwrap()).unwrap();
            fs::write(&asset, "ASSET").unwrap();

            let result = generate(source.path(), out.path(), &SiteConfig::default(), true, None);
            assert!(
                matches!(&result, Err(GenerateError::AssetCollision(path)) if path == colliding),
                "{colliding}: {result:?}"
            );
            assert!(!out.path().join("index.html").exists());
        }
    }

    #[test]
    fn generate_copies_assets_and_reports_events() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::create_dir_all(source.path().join("assets/icons")).unwrap();
        fs::write(source.path().join("assets/favicon.ico"), "ico").unwrap();
        fs::write(source.path().join("assets/icons/kauri.svg"), "<svg/>").unwrap();

        let (tx, rx) = mpsc::channel();
        let result =
            generate(source.path(), out.path(), &SiteConfig::default(), true, Some(tx)).unwrap();
        let events: Vec<GenerateEvent> = rx.iter().collect();

        assert_eq!(result.assets_copied, 2);
        assert!(out.path().join("icons/kauri.svg").exists());
        assert_eq!(
            events.first(),
            Some(&GenerateEvent::PageWritten {
                title: "Waitākere Ranges".into(),
                path: "index.html".into(),
                status: WriteStatus::Written,
            })
        );
        assert_eq!(events.last(), Some(&GenerateEvent::AssetsCopied { count: 2 }));
    }

    #[test]
    fn fixture_site_applies_config_and_overrides() {
        let source = crate::test_helpers::setup_fixtures();
        let out = TempDir::new().unwrap();
        let config = crate::config::load_config(source.path()).unwrap();
        let result = generate(source.path(), out.path(), &config, true, None).unwrap();

        assert_eq!(result.trails, 21);
        assert_eq!(result.pages, 44);
        assert_eq!(result.assets_copied, 1);
        assert!(out.path().join("robots.txt").exists());

        let home = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(home.contains("Test Ranges"));
        assert!(home.contains("Fixture alert"));
        let ridge = home.find("Test Ridge").unwrap();
        let fairy = home.find("Fairy Falls").unwrap();
        assert!(ridge < fairy);

        let safety = fs::read_to_string(out.path().join("safety/index.html")).unwrap();
        assert!(safety.contains("Fixture Safety"));
        assert!(!safety.contains("Safety Information"));
    }

    #[test]
    fn generate_fails_on_unknown_featured() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let config = SiteConfig {
            featured: vec!["atlantis".into()],
            ..SiteConfig::default()
        };
        assert!(matches!(
            generate(source.path(), out.path(), &config, true, None),
            Err(GenerateError::UnknownTrail(_))
        ));
    }
}
