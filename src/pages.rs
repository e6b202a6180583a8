//! Markdown content for the Safety and Planning panels.
//!
//! Both panels ship with built-in copy (`static/safety.md`,
//! `static/planning.md`). A content root can replace either by providing
//! `safety.md` or `planning.md` at its top level. The page title comes from
//! the first `# ` heading, falling back to the panel's nav title.

use crate::view::Panel;
use pulldown_cmark::{Options, Parser, html as md_html};
use std::fs;
use std::io;
use std::path::Path;

const SAFETY_MD: &str = include_str!("../static/safety.md");
const PLANNING_MD: &str = include_str!("../static/planning.md");

/// A markdown-backed panel, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelPage {
    pub panel: Panel,
    pub title: String,
    /// Raw markdown
    pub body: String,
    /// True when the body came from the content root rather than the built-in copy.
    pub overridden: bool,
}

impl PanelPage {
    fn new(panel: Panel, body: String, overridden: bool) -> Self {
        let title = body
            .lines()
            .find(|line| line.starts_with("# "))
            .map(|line| line.trim_start_matches("# ").trim().to_string())
            .unwrap_or_else(|| panel.title().to_string());
        Self {
            panel,
            title,
            body,
            overridden,
        }
    }

    /// Body rendered to HTML.
    pub fn to_html(&self) -> String {
        render_markdown(&self.body)
    }
}

/// Markdown panels in nav order. Only Safety and Planning are markdown-backed.
pub fn load_panel_pages(source_root: &Path) -> io::Result<Vec<PanelPage>> {
    [(Panel::Safety, SAFETY_MD), (Panel::Planning, PLANNING_MD)]
        .into_iter()
        .map(|(panel, builtin)| {
            let path = source_root.join(format!("{}.md", panel.slug()));
            if path.is_file() {
                Ok(PanelPage::new(panel, fs::read_to_string(path)?, true))
            } else {
                Ok(PanelPage::new(panel, builtin.to_string(), false))
            }
        })
        .collect()
}

/// CommonMark plus tables and task lists. Raw HTML in the source passes through.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}
