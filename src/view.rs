//! View state: which panel is showing, the current query, and which trail
//! (if any) is open in the detail view.
//!
//! [`ViewState`] is an immutable snapshot. Every input is an [`Action`] and
//! [`ViewState::apply`] returns the next snapshot, so the set of states the
//! site can show is exactly the set reachable from [`ViewState::default`].
//! The generator walks those states to decide which pages to write.
//!
//! ## Page Paths
//!
//! Each snapshot maps to one location in the generated site:
//!
//! ```text
//! Home                               index.html
//! Trails, no filters                 trails/index.html
//! Trails, difficulty and/or bucket   trails/<easy|...|all>/<short|...|any>/index.html
//! Safety                             safety/index.html
//! Planning                           planning/index.html
//! any panel, trail selected          trail/<id>/index.html
//! ```
//!
//! The free-text term is not part of the path. Trail pages narrow cards by
//! term in the browser, reading it from `?q=`.

use crate::catalog::Catalog;
use crate::search::{self, DurationBucket, Query};
use crate::trail::{Difficulty, Trail};

/// The four mutually exclusive top-level panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Panel {
    #[default]
    Home,
    Trails,
    Safety,
    Planning,
}

impl Panel {
    pub const ALL: [Panel; 4] = [Panel::Home, Panel::Trails, Panel::Safety, Panel::Planning];

    /// Path segment; empty for the home panel.
    pub fn slug(self) -> &'static str {
        match self {
            Panel::Home => "",
            Panel::Trails => "trails",
            Panel::Safety => "safety",
            Panel::Planning => "planning",
        }
    }

    /// Navigation label.
    pub fn title(self) -> &'static str {
        match self {
            Panel::Home => "Home",
            Panel::Trails => "Trails",
            Panel::Safety => "Safety",
            Panel::Planning => "Plan Your Visit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowPanel(Panel),
    SetTerm(String),
    SetDifficulty(Option<Difficulty>),
    SetDuration(Option<DurationBucket>),
    ClearFilters,
    SelectTrail(String),
    CloseDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub panel: Panel,
    pub query: Query,
    /// Id of the trail open in the detail view. At most one.
    pub selected: Option<String>,
}

impl ViewState {
    /// State showing `panel` with no query and nothing selected.
    pub fn at(panel: Panel) -> Self {
        Self {
            panel,
            ..Self::default()
        }
    }

    /// Next state after `action`. Never fails; unknown trail ids are kept and
    /// resolve to `None` in [`ViewState::selected_trail`].
    pub fn apply(self, action: Action) -> ViewState {
        match action {
            Action::ShowPanel(panel) => ViewState {
                panel,
                selected: None,
                ..self
            },
            Action::SetTerm(term) => ViewState {
                query: Query { term, ..self.query },
                ..self
            },
            Action::SetDifficulty(difficulty) => ViewState {
                query: Query {
                    difficulty,
                    ..self.query
                },
                ..self
            },
            Action::SetDuration(duration) => ViewState {
                query: Query {
                    duration,
                    ..self.query
                },
                ..self
            },
            Action::ClearFilters => ViewState {
                query: Query::all(),
                ..self
            },
            Action::SelectTrail(id) => ViewState {
                selected: Some(id),
                ..self
            },
            Action::CloseDetail => ViewState {
                selected: None,
                ..self
            },
        }
    }

    /// Trails matching the current query, in catalog order.
    pub fn visible_trails<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Trail> {
        search::filter(catalog.trails(), &self.query)
    }

    pub fn selected_trail<'a>(&self, catalog: &'a Catalog) -> Option<&'a Trail> {
        self.selected.as_deref().and_then(|id| catalog.get(id))
    }

    /// Output file for this snapshot, relative to the site root.
    pub fn page_path(&self) -> String {
        format!("{}index.html", self.dir())
    }

    /// Root-relative link to this snapshot's page.
    pub fn href(&self) -> String {
        format!("/{}", self.dir())
    }

    /// Directory part of the page path, with trailing slash (or empty for home).
    fn dir(&self) -> String {
        if let Some(id) = &self.selected {
            return format!("trail/{id}/");
        }
        match self.panel {
            Panel::Home => String::new(),
            Panel::Trails if self.query.difficulty.is_none() && self.query.duration.is_none() => {
                "trails/".to_string()
            }
            Panel::Trails => format!(
                "trails/{}/{}/",
                self.query.difficulty.map_or("all", Difficulty::slug),
                self.query.duration.map_or("any", DurationBucket::slug),
            ),
            panel => format!("{}/", panel.slug()),
        }
    }
}

/// Every trails-panel state with a categorical filter: all difficulty and
/// bucket combinations, `None` included, no term, nothing selected.
pub fn filter_states() -> Vec<ViewState> {
    let difficulties = std::iter::once(None).chain(Difficulty::ALL.into_iter().map(Some));
    difficulties
        .flat_map(|difficulty| {
            std::iter::once(None)
                .chain(DurationBucket::ALL.into_iter().map(Some))
                .map(move |duration| {
                    ViewState::at(Panel::Trails)
                        .apply(Action::SetDifficulty(difficulty))
                        .apply(Action::SetDuration(duration))
                })
        })
        .collect()
}
