//! Trail records and their display classification.
//!
//! A [`Trail`] is one named hiking route. Everything a page or the CLI shows
//! about a trail lives on this struct; nothing is derived lazily and nothing
//! is mutated after the catalog is loaded.
//!
//! ## Closed Enumerations
//!
//! `difficulty` and `status` are closed enums. A catalog file with
//! `difficulty = "Hard"` fails to parse, so renderers never meet an unknown
//! value. The string-based classifiers ([`classify_difficulty_style`],
//! [`classify_status_style`]) still exist for callers holding raw text (the
//! CLI, hand-edited data) and degrade to [`StyleToken::Neutral`] instead of
//! failing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

/// How demanding a trail is. Variants are ordered from easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Moderate,
        Difficulty::Challenging,
        Difficulty::Expert,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Challenging => "Challenging",
            Difficulty::Expert => "Expert",
        }
    }

    /// Lowercase form used in generated URLs (`trails/easy/...`).
    pub fn slug(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Challenging => "challenging",
            Difficulty::Expert => "expert",
        }
    }

    pub fn style(self) -> StyleToken {
        match self {
            Difficulty::Easy => StyleToken::Green,
            Difficulty::Moderate => StyleToken::Yellow,
            Difficulty::Challenging => StyleToken::Orange,
            Difficulty::Expert => StyleToken::Red,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive: `"Easy"` parses, `"easy"` does not.
impl FromStr for Difficulty {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();
                ParseEnumError::new("difficulty", s, &names)
            })
    }
}

/// Track status as published by the park operator. Static copy, not live data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Open,
    Closed,
    Partial,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Open, Status::Closed, Status::Partial];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::Closed => "Closed",
            Status::Partial => "Partial",
        }
    }

    pub fn style(self) -> StyleToken {
        match self {
            Status::Open => StyleToken::Green,
            Status::Closed => StyleToken::Red,
            Status::Partial => StyleToken::Yellow,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Status::ALL.iter().map(|st| st.as_str()).collect();
                ParseEnumError::new("status", s, &names)
            })
    }
}

/// Display-styling category for a badge. Not used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleToken {
    Green,
    Yellow,
    Orange,
    Red,
    Neutral,
}

impl StyleToken {
    /// CSS class applied to badges; colors live in `static/style.css`.
    pub fn css_class(self) -> &'static str {
        match self {
            StyleToken::Green => "badge badge-green",
            StyleToken::Yellow => "badge badge-yellow",
            StyleToken::Orange => "badge badge-orange",
            StyleToken::Red => "badge badge-red",
            StyleToken::Neutral => "badge badge-neutral",
        }
    }
}

/// Style token for a raw difficulty label. Unknown labels get
/// [`StyleToken::Neutral`].
pub fn classify_difficulty_style(raw: &str) -> StyleToken {
    raw.parse::<Difficulty>()
        .map(Difficulty::style)
        .unwrap_or(StyleToken::Neutral)
}

/// Style token for a raw status label. Unknown labels get
/// [`StyleToken::Neutral`].
pub fn classify_status_style(raw: &str) -> StyleToken {
    raw.parse::<Status>()
        .map(Status::style)
        .unwrap_or(StyleToken::Neutral)
}

/// Latitude/longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// One named hiking route.
///
/// `distance`, `duration` and `elevation` are free text exactly as published
/// ("45 minutes return", "3-4 days"); they are never parsed into numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Trail {
    pub id: String,
    pub name: String,
    pub difficulty: Difficulty,
    pub distance: String,
    pub duration: String,
    pub elevation: String,
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub access: String,
    pub parking: String,
    #[serde(default)]
    pub facilities: Vec<String>,
    /// External asset URL. Rendered as-is, never fetched.
    pub image: String,
    pub coordinates: Coordinates,
    pub status: Status,
    #[serde(default)]
    pub kauri_risk: bool,
    #[serde(default)]
    pub multi_day: bool,
}

impl Trail {
    /// Map search link centred on the trailhead coordinates.
    pub fn maps_url(&self) -> String {
        format!(
            "https://maps.google.com/?q={},{}",
            self.coordinates.lat, self.coordinates.lng
        )
    }

    /// First entry point from `access`: the text before the first comma, as written.
    pub fn primary_access(&self) -> &str {
        self.access.split(',').next().unwrap_or("")
    }
}
