//! Trail filtering: free-text term, difficulty, and duration bucket.
//!
//! [`filter`] is the single entry point. It scans the whole catalog on every
//! call and returns the passing trails in catalog order. The catalog is a
//! couple of dozen records, so there is no index and no memoization: the
//! result for a given `(trails, query)` pair is always the same.
//!
//! ## Predicates
//!
//! A trail passes when all three pass:
//!
//! | Predicate | Passes when |
//! |-----------|-------------|
//! | text | term is empty, or lowercased `name`/`description` contains the lowercased term |
//! | difficulty | no difficulty selected, or it equals the trail's |
//! | duration | no bucket selected, or the raw `duration` text hits one of the bucket's needles |
//!
//! ## Duration Buckets Are Substring Tests
//!
//! Durations are free text ("45 minutes return", "2.5-3 hours", "3-4 days").
//! Buckets match literal substrings of that text, not parsed numbers:
//!
//! ```text
//! short   "min" | "1 hour" | "30 minutes"
//! medium  "2" | "3" | "1.5"
//! long    "4" | "5" | "6" | "7" | "day"
//! ```
//!
//! Consequences the published catalog relies on: "45 minutes return" is both
//! `short` (via "min") and `long` (via "4"); "30 minutes return" is also
//! `medium` (via "3"); "13 hours" would be `medium`. Buckets overlap and that
//! is accepted behavior.
//!
//! ## Case Folding
//!
//! Plain `to_lowercase()` on both sides. No Unicode normalization and no
//! diacritic folding: "waitakere" does not find "Waitākere".

use crate::trail::{Difficulty, ParseEnumError, Trail};
use std::fmt;
use std::str::FromStr;

/// A coarse duration category selected in the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationBucket {
    Short,
    Medium,
    Long,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 3] = [
        DurationBucket::Short,
        DurationBucket::Medium,
        DurationBucket::Long,
    ];

    fn needles(self) -> &'static [&'static str] {
        match self {
            DurationBucket::Short => &["min", "1 hour", "30 minutes"],
            DurationBucket::Medium => &["2", "3", "1.5"],
            DurationBucket::Long => &["4", "5", "6", "7", "day"],
        }
    }

    /// Whether a free-text duration falls in this bucket.
    pub fn matches(self, duration: &str) -> bool {
        self.needles().iter().any(|needle| duration.contains(needle))
    }

    /// Wire name: `short`, `medium`, `long`.
    pub fn slug(self) -> &'static str {
        match self {
            DurationBucket::Short => "short",
            DurationBucket::Medium => "medium",
            DurationBucket::Long => "long",
        }
    }

    /// Human label shown in the filter bar.
    pub fn label(self) -> &'static str {
        match self {
            DurationBucket::Short => "Under 2 hours",
            DurationBucket::Medium => "2-4 hours",
            DurationBucket::Long => "4+ hours",
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for DurationBucket {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DurationBucket::ALL
            .into_iter()
            .find(|b| b.slug() == s)
            .ok_or_else(|| ParseEnumError::new("duration bucket", s, &["short", "medium", "long"]))
    }
}

/// The current search term and filter selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub term: String,
    pub difficulty: Option<Difficulty>,
    pub duration: Option<DurationBucket>,
}

impl Query {
    /// A query with no term and no filters. Matches every trail.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_empty() && self.difficulty.is_none() && self.duration.is_none()
    }

    /// Whether one trail passes all active predicates.
    pub fn matches(&self, trail: &Trail) -> bool {
        Matcher::new(self).matches(trail)
    }
}

/// A query with its term lowercased once, reused across the whole scan.
struct Matcher<'q> {
    term: String,
    query: &'q Query,
}

impl<'q> Matcher<'q> {
    fn new(query: &'q Query) -> Self {
        Self {
            term: query.term.to_lowercase(),
            query,
        }
    }

    fn matches(&self, trail: &Trail) -> bool {
        self.matches_text(trail) && self.matches_difficulty(trail) && self.matches_duration(trail)
    }

    fn matches_text(&self, trail: &Trail) -> bool {
        self.term.is_empty()
            || trail.name.to_lowercase().contains(&self.term)
            || trail.description.to_lowercase().contains(&self.term)
    }

    fn matches_difficulty(&self, trail: &Trail) -> bool {
        self.query.difficulty.is_none_or(|d| d == trail.difficulty)
    }

    fn matches_duration(&self, trail: &Trail) -> bool {
        self.query
            .duration
            .is_none_or(|bucket| bucket.matches(&trail.duration))
    }
}

/// Trails passing `query`, in their original order.
pub fn filter<'a>(trails: &'a [Trail], query: &Query) -> Vec<&'a Trail> {
    let matcher = Matcher::new(query);
    trails.iter().filter(|t| matcher.matches(t)).collect()
}
