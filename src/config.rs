//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table, the user's `config.toml` (if any) is merged on
//! top key-by-key, and the result is deserialized and validated.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml              # Site config (optional)
//! ├── trails/                  # Extra trail files (see `catalog.extra_dir`)
//! │   └── 010-test-ridge.toml
//! ├── safety.md                # Optional override of the Safety panel
//! └── assets/                  # Copied verbatim to the output root
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! title = "Waitākere Ranges"
//! tagline = "Your comprehensive guide to hiking in Auckland's wild west"
//! official_info_url = "https://www.aucklandcouncil.govt.nz/..."
//! alert = "Some tracks may be temporarily closed ..."   # "" hides the banner
//! featured = ["karamatura-falls", "piha-kitekite-falls", "hillary-trail"]
//! assets_dir = "assets"
//!
//! [catalog]
//! # path = "my-trails.toml"  # Replace the built-in catalog
//! extra_dir = "trails"       # Extra trail files, appended in NNN- order
//!
//! [colors.light]
//! background = "#f7faf8"
//! # ... text, text_muted, border, link, link_hover, accent
//!
//! [processing]
//! max_processes = 4          # Max parallel page renderers (omit for auto)
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site name shown in the header, footer and page titles.
    pub title: String,
    /// One-line description under the site name.
    pub tagline: String,
    /// Link behind the "Official Info" button on every trail page.
    pub official_info_url: String,
    /// Banner text shown on every page. Empty hides the banner.
    pub alert: String,
    /// Trail ids shown as cards on the home page, in this order.
    pub featured: Vec<String>,
    /// Directory under the content root copied verbatim to the output root.
    pub assets_dir: String,
    /// Where trail records come from.
    pub catalog: CatalogConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel page rendering settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Waitākere Ranges".to_string(),
            tagline: "Your comprehensive guide to hiking in Auckland's wild west".to_string(),
            official_info_url: "https://www.aucklandcouncil.govt.nz/parks-recreation/get-outdoors/auckland-walks/Pages/default.aspx".to_string(),
            alert: "Some tracks may be temporarily closed due to Kauri Dieback disease. \
                    Check track status before your visit and always use cleaning stations."
                .to_string(),
            featured: vec![
                "karamatura-falls".to_string(),
                "piha-kitekite-falls".to_string(),
                "hillary-trail".to_string(),
            ],
            assets_dir: "assets".to_string(),
            catalog: CatalogConfig::default(),
            colors: ColorConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if !(self.official_info_url.starts_with("https://")
            || self.official_info_url.starts_with("http://"))
        {
            return Err(ConfigError::Validation(
                "official_info_url must be an http(s) URL".into(),
            ));
        }
        let mut seen = HashSet::new();
        for id in &self.featured {
            if !seen.insert(id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "featured lists '{id}' more than once"
                )));
            }
        }
        if self.catalog.extra_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "catalog.extra_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Catalog source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Catalog file (relative to the content root) replacing the built-in
    /// trails. When absent, the built-in Waitākere catalog is used.
    pub path: Option<String>,
    /// Directory (relative to the content root) of single-trail files
    /// appended after the base catalog.
    pub extra_dir: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            extra_dir: "trails".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel page renderers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text (card metadata, result counts, footer).
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
    /// Header bar and primary buttons.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f7faf8".to_string(),
            text: "#1c2b24".to_string(),
            text_muted: "#5b6b63".to_string(),
            border: "#d8e3dc".to_string(),
            link: "#047857".to_string(),
            link_hover: "#065f46".to_string(),
            accent: "#065f46".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0f1a15".to_string(),
            text: "#e6efe9".to_string(),
            text_muted: "#9db0a6".to_string(),
            border: "#24352c".to_string(),
            link: "#6ee7b7".to_string(),
            link_hover: "#a7f3d0".to_string(),
            accent: "#064e3b".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing directory yields the defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Waitākere Trails Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Site name shown in the header, footer and page titles.
title = "Waitākere Ranges"

# One-line description under the site name.
tagline = "Your comprehensive guide to hiking in Auckland's wild west"

# Target of the "Official Info" button on every trail page.
official_info_url = "https://www.aucklandcouncil.govt.nz/parks-recreation/get-outdoors/auckland-walks/Pages/default.aspx"

# Banner shown at the top of every page. Set to "" to hide it.
alert = "Some tracks may be temporarily closed due to Kauri Dieback disease. Check track status before your visit and always use cleaning stations."

# Trail ids shown as cards on the home page, in order.
featured = ["karamatura-falls", "piha-kitekite-falls", "hillary-trail"]

# Directory under the content root copied verbatim to the output root.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Trail catalog
# ---------------------------------------------------------------------------
[catalog]
# Catalog file replacing the built-in Waitākere trails, relative to the
# content root. Same format as the built-in data/trails.toml ([[trail]] tables).
# path = "my-trails.toml"

# Directory of single-trail files appended after the base catalog.
# Files are ordered by their NNN- prefix; a file without `id` uses its name.
extra_dir = "trails"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f7faf8"
text = "#1c2b24"
text_muted = "#5b6b63"    # Card metadata, result counts, footer
border = "#d8e3dc"
link = "#047857"
link_hover = "#065f46"
accent = "#065f46"        # Header bar and primary buttons

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0f1a15"
text = "#e6efe9"
text_muted = "#9db0a6"
border = "#24352c"
link = "#6ee7b7"
link_hover = "#a7f3d0"
accent = "#064e3b"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page renderers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let vars = |s: &ColorScheme, pad: &str| {
        format!(
            "{pad}--color-bg: {};\n{pad}--color-text: {};\n{pad}--color-text-muted: {};\n\
             {pad}--color-border: {};\n{pad}--color-link: {};\n{pad}--color-link-hover: {};\n\
             {pad}--color-accent: {};\n",
            s.background, s.text, s.text_muted, s.border, s.link, s.link_hover, s.accent,
        )
    };
    format!(
        ":root {{\n{}}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}    }}\n}}",
        vars(&colors.light, "    "),
        vars(&colors.dark, "        "),
    )
}
