//! The trail catalog: an ordered, read-only collection of [`Trail`] records.
//!
//! The catalog is assembled once at startup and never changes afterwards.
//! There are no insert/update/delete operations; everything downstream
//! (search, view state, page rendering) borrows from it.
//!
//! ## Sources
//!
//! ```text
//! 1. Base    built-in data/trails.toml   or   <content>/<catalog.path>
//! 2. Extra   <content>/<catalog.extra_dir>/**/*.toml   (one trail per file)
//! ```
//!
//! Extra files are appended after the base in `NNN-` prefix order (see
//! [`crate::naming`]). A file without an `id` key uses its stem minus the
//! number prefix, so `trails/010-test-ridge.toml` becomes `test-ridge`.
//!
//! ## Validation
//!
//! - ids are URL-safe slugs (`[a-z0-9-]`), because they become page paths
//! - ids are unique across base and extra sources
//! - names are non-empty
//! - `difficulty`/`status` are closed enums, rejected by the TOML parser

use crate::config::CatalogConfig;
use crate::naming::{self, EntryName};
use crate::trail::Trail;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

const BUILTIN_TRAILS: &str = include_str!("../data/trails.toml");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Duplicate trail id '{0}'")]
    DuplicateId(String),
    #[error("Trail id '{0}' is not a slug (use lowercase letters, digits and dashes)")]
    InvalidId(String),
    #[error("Catalog validation error: {0}")]
    Validation(String),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Top-level shape of a catalog file: a list of `[[trail]]` tables.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    trail: Vec<Trail>,
}

/// Ordered, immutable trail collection.
#[derive(Debug, Clone)]
pub struct Catalog {
    trails: Vec<Trail>,
}

impl Catalog {
    /// Build a catalog, enforcing id and name invariants. Order is kept as given.
    pub fn new(trails: Vec<Trail>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for trail in &trails {
            if !naming::is_slug(&trail.id) {
                return Err(CatalogError::InvalidId(trail.id.clone()));
            }
            if !seen.insert(trail.id.as_str()) {
                return Err(CatalogError::DuplicateId(trail.id.clone()));
            }
            if trail.name.trim().is_empty() {
                return Err(CatalogError::Validation(format!(
                    "trail '{}' has an empty name",
                    trail.id
                )));
            }
        }
        Ok(Self { trails })
    }

    /// The built-in Waitākere Ranges catalog.
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_TRAILS, "data/trails.toml")
            .expect("built-in catalog must be valid")
    }

    /// Parse a catalog from `[[trail]]` tables. `origin` names the source in errors.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content).map_err(|source| CatalogError::Toml {
            path: origin.to_string(),
            source,
        })?;
        Self::new(file.trail)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Assemble the catalog for a content root: base source plus extra files.
    pub fn load(source_root: &Path, config: &CatalogConfig) -> Result<Self, CatalogError> {
        let base = match &config.path {
            Some(path) => Self::from_file(&source_root.join(path))?,
            None => Self::builtin(),
        };
        let extra = load_extra_trails(&source_root.join(&config.extra_dir))?;
        if extra.is_empty() {
            return Ok(base);
        }
        let mut trails = base.trails;
        trails.extend(extra);
        Self::new(trails)
    }

    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    /// Look up a trail by id.
    pub fn get(&self, id: &str) -> Option<&Trail> {
        self.trails.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    /// Pretty JSON array of every trail, in catalog order.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.trails)
    }
}

/// Read every `*.toml` under `dir` as a single trail, ordered by file name.
///
/// A missing directory is not an error: extra trails are optional.
fn load_extra_trails(dir: &Path) -> Result<Vec<Trail>, CatalogError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<(EntryName, PathBuf)> = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        let path = entry.path();
        let is_toml = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);
        if !entry.file_type().is_file() || !is_toml {
            continue;
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        files.push((naming::parse_entry_name(&stem), path.to_path_buf()));
    }
    files.sort_by_key(|(name, path)| (name.sort_key(), path.clone()));

    files
        .iter()
        .map(|(name, path)| parse_trail_file(path, name))
        .collect()
}

/// Parse one trail file, defaulting `id` to the file's slug.
fn parse_trail_file(path: &Path, name: &EntryName) -> Result<Trail, CatalogError> {
    let origin = path.display().to_string();
    let content = fs::read_to_string(path)?;
    let mut value: toml::Value = toml::from_str(&content).map_err(|source| CatalogError::Toml {
        path: origin.clone(),
        source,
    })?;
    if let toml::Value::Table(table) = &mut value
        && !table.contains_key("id")
    {
        if name.slug.is_empty() {
            return Err(CatalogError::Validation(format!(
                "{origin} has no `id` and its file name has no slug"
            )));
        }
        table.insert("id".to_string(), toml::Value::String(name.slug.clone()));
    }
    value
        .try_into()
        .map_err(|source| CatalogError::Toml { path: origin, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{find_trail, sample_trail, setup_fixtures, trail_file_toml};
    use crate::trail::{Difficulty, Status};
    use tempfile::TempDir;

    #[test]
    fn builtin_catalog_has_twenty_trails_in_order() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.trails()[0].id, "hillary-trail");
        assert_eq!(catalog.trails()[19].id, "whatipu-beach-track");
    }

    #[test]
    fn builtin_catalog_record_fields() {
        let catalog = Catalog::builtin();
        let hillary = catalog.get("hillary-trail").unwrap();
        assert_eq!(hillary.name, "Hillary Trail");
        assert_eq!(hillary.difficulty, Difficulty::Challenging);
        assert_eq!(hillary.duration, "3-4 days");
        assert_eq!(hillary.status, Status::Partial);
        assert!(hillary.kauri_risk);
        assert!(hillary.multi_day);
        assert_eq!(hillary.highlights.len(), 5);
        assert_eq!(hillary.coordinates.lat, -36.9544);
    }

    #[test]
    fn get_unknown_id_is_none() {
        assert!(Catalog::builtin().get("no-such-trail").is_none());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let trails = vec![
            sample_trail("same", "Easy", "1 hour"),
            sample_trail("same", "Moderate", "2 hours"),
        ];
        assert!(matches!(
            Catalog::new(trails),
            Err(CatalogError::DuplicateId(id)) if id == "same"
        ));
    }

    #[test]
    fn non_slug_ids_rejected() {
        let trails = vec![sample_trail("Bad Id", "Easy", "1 hour")];
        assert!(matches!(Catalog::new(trails), Err(CatalogError::InvalidId(_))));
    }

    #[test]
    fn empty_name_rejected() {
        let mut trail = sample_trail("nameless", "Easy", "1 hour");
        trail.name = " ".to_string();
        assert!(matches!(
            Catalog::new(vec![trail]),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = Catalog::from_toml_str("", "empty.toml").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn unknown_difficulty_rejected_at_parse() {
        let content = format!("[[trail]]\n{}", trail_file_toml(Some("x"), "Hard"));
        let err = Catalog::from_toml_str(&content, "bad.toml").unwrap_err();
        assert!(matches!(err, CatalogError::Toml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn load_without_extras_is_builtin() {
        let tmp = TempDir::new().unwrap();
        let catalog = Catalog::load(tmp.path(), &CatalogConfig::default()).unwrap();
        assert_eq!(catalog.len(), 20);
    }

    #[test]
    fn load_appends_extra_files_in_prefix_order() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("trails");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("020-second.toml"), trail_file_toml(None, "Easy")).unwrap();
        fs::write(dir.join("010-first.toml"), trail_file_toml(None, "Moderate")).unwrap();
        fs::write(
            dir.join("nested/unnumbered.toml"),
            trail_file_toml(Some("explicit-id"), "Expert"),
        )
        .unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let catalog = Catalog::load(tmp.path(), &CatalogConfig::default()).unwrap();
        let tail: Vec<&str> = catalog.trails()[20..].iter().map(|t| t.id.as_str()).collect();
        assert_eq!(tail, vec!["first", "second", "explicit-id"]);
        assert_eq!(catalog.get("explicit-id").unwrap().difficulty, Difficulty::Expert);
    }

    #[test]
    fn load_rejects_extra_colliding_with_builtin() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("trails");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("010-fairy-falls.toml"), trail_file_toml(None, "Easy")).unwrap();
        let result = Catalog::load(tmp.path(), &CatalogConfig::default());
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "fairy-falls"));
    }

    #[test]
    fn load_replaces_builtin_with_catalog_path() {
        let tmp = TempDir::new().unwrap();
        let content = format!(
            "[[trail]]\n{}\n[[trail]]\n{}",
            trail_file_toml(Some("north-a"), "Easy"),
            trail_file_toml(Some("north-b"), "Challenging"),
        );
        fs::write(tmp.path().join("north.toml"), content).unwrap();
        let config = CatalogConfig {
            path: Some("north.toml".to_string()),
            ..CatalogConfig::default()
        };
        let catalog = Catalog::load(tmp.path(), &config).unwrap();
        let ids: Vec<&str> = catalog.trails().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["north-a", "north-b"]);
    }

    #[test]
    fn load_missing_catalog_path_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let config = CatalogConfig {
            path: Some("missing.toml".to_string()),
            ..CatalogConfig::default()
        };
        assert!(matches!(
            Catalog::load(tmp.path(), &config),
            Err(CatalogError::Io(_))
        ));
    }

    #[test]
    fn number_only_file_without_id_is_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("trails");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("030.toml"), trail_file_toml(None, "Easy")).unwrap();
        let result = Catalog::load(tmp.path(), &CatalogConfig::default());
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn fixture_content_appends_test_ridge() {
        let tmp = setup_fixtures();
        let config = crate::config::load_config(tmp.path()).unwrap();
        let catalog = Catalog::load(tmp.path(), &config.catalog).unwrap();
        assert_eq!(catalog.len(), 21);
        assert_eq!(catalog.trails()[20].id, "test-ridge");

        let ridge = find_trail(&catalog, "test-ridge");
        assert_eq!(ridge.name, "Test Ridge");
        assert_eq!(ridge.difficulty, Difficulty::Moderate);
        assert!(!ridge.kauri_risk);
    }

    #[test]
    fn json_export_lists_every_trail() {
        let catalog = Catalog::builtin();
        let json = catalog.to_json().unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 20);
        assert_eq!(parsed[1]["id"], "karamatura-falls");
        assert_eq!(parsed[1]["difficulty"], "Easy");
        assert_eq!(parsed[0]["kauri_risk"], true);
    }
}
