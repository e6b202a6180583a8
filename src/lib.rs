//! # Waitākere Trails
//!
//! A hiking-trail directory for the Waitākere Ranges: an immutable catalog
//! of trail records, a filter engine over it, and a static site generator
//! that renders every view of the directory to plain HTML.
//!
//! # Architecture
//!
//! ```text
//! catalog   data/trails.toml (+ content/trails/*.toml)  →  Catalog
//! search    Catalog + Query                             →  ordered Vec<&Trail>
//! view      ViewState + Action                          →  next ViewState
//! generate  every reachable ViewState                   →  dist/**/index.html
//! ```
//!
//! The filter engine and the view layer are pure and synchronous. Only the
//! edges (loading TOML, writing pages) can fail.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`trail`] | `Trail` record, closed `Difficulty`/`Status` enums, badge style classification |
//! | [`catalog`] | Loading and validating the ordered trail collection |
//! | [`search`] | Filter engine: text term, difficulty, duration bucket |
//! | [`view`] | `ViewState` snapshots, `Action` transitions, page paths |
//! | [`pages`] | Markdown Safety and Planning panels |
//! | [`generate`] | HTML rendering with Maud, parallel page rendering |
//! | [`cache`] | Content-hash build manifest for incremental output |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`naming`] | `NNN-slug` filename convention for extra trail files |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## One Page Per View State
//!
//! The directory's UI is a handful of panels, a filter bar and a detail
//! view. Instead of shipping a client-side app, the generator enumerates the
//! view states reachable by clicking (panels, every difficulty × duration
//! combination, every trail's detail) and writes each to its own URL. The
//! only script is the free-text search box, which narrows cards already on
//! the page.
//!
//! ## Duration Buckets Are Substring Tests
//!
//! Durations are published as free text ("45 minutes return", "3-4 days").
//! The buckets test for literal substrings of that text rather than parsing
//! numbers, so a 45-minute walk is both `short` and `long`. See
//! [`search::DurationBucket`].
//!
//! ## Closed Enumerations
//!
//! Difficulty and status are Rust enums. An unknown value is a parse error
//! when the catalog loads, so renderers never see one.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): templates are
//! Rust expressions checked at compile time, and all interpolation is
//! escaped.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod generate;
pub mod naming;
pub mod output;
pub mod pages;
pub mod search;
pub mod trail;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
