//! Shared test utilities for the waitakere-trails test suite.
//!
//! Provides fixture setup, trail builders, and lookup helpers that panic
//! with a clear message instead of returning `Option`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let catalog = Catalog::load(tmp.path(), &config.catalog).unwrap();
//!
//! let ridge = find_trail(&catalog, "test-ridge");
//! assert_eq!(ridge.difficulty, Difficulty::Moderate);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::catalog::Catalog;
use crate::generate::copy_dir_recursive;
use crate::trail::{Coordinates, Status, Trail};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

// =========================================================================
// Trail builders
// =========================================================================

/// A minimal, valid trail. `difficulty` must be a known label.
pub fn sample_trail(id: &str, difficulty: &str, duration: &str) -> Trail {
    Trail {
        id: id.to_string(),
        name: format!("{id} ridge"),
        difficulty: difficulty.parse().unwrap(),
        distance: "3 km".to_string(),
        duration: duration.to_string(),
        elevation: "120m".to_string(),
        description: "A short climb through regenerating bush.".to_string(),
        highlights: vec!["Views".to_string()],
        warnings: vec!["Slippery when wet".to_string()],
        access: "Scenic Drive, near the visitor centre".to_string(),
        parking: "Roadside".to_string(),
        facilities: vec!["Toilets".to_string()],
        image: "https://example.com/ridge.jpg".to_string(),
        coordinates: Coordinates {
            lat: -36.95,
            lng: 174.5,
        },
        status: Status::Open,
        kauri_risk: false,
        multi_day: false,
    }
}

/// Body of a single-trail TOML file (no table header), optionally with `id`.
pub fn trail_file_toml(id: Option<&str>, difficulty: &str) -> String {
    let id_line = id.map(|id| format!("id = \"{id}\"\n")).unwrap_or_default();
    format!(
        r#"{id_line}name = "Test Trail"
difficulty = "{difficulty}"
distance = "2 km"
duration = "1 hour return"
elevation = "50m"
description = "A fixture trail."
highlights = ["Fern gully"]
warnings = ["Uneven ground"]
access = "Test Road, Waitākere"
parking = "Small car park"
facilities = []
image = "https://example.com/test.jpg"
coordinates = {{ lat = -36.9, lng = 174.5 }}
status = "Open"
"#
    )
}

// =========================================================================
// Lookups
// =========================================================================

/// Find a trail by id. Panics if not found.
pub fn find_trail<'a>(catalog: &'a Catalog, id: &str) -> &'a Trail {
    catalog.get(id).unwrap_or_else(|| {
        let available = ids(&catalog.trails().iter().collect::<Vec<_>>());
        panic!("trail '{id}' not found. Available: {available:?}")
    })
}

/// Ids of a filtered result, in order.
pub fn ids<'a>(trails: &[&'a Trail]) -> Vec<&'a str> {
    trails.iter().map(|t| t.id.as_str()).collect()
}
