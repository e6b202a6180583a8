//! `NNN-slug` filename convention for extra trail files.
//!
//! Files under the content root's trail directory are ordered by an optional
//! numeric prefix, and a file that doesn't declare an `id` takes its id from
//! the rest of the stem:
//!
//! - `010-test-ridge.toml` → order `Some(10)`, slug `test-ridge`
//! - `summit-loop.toml` → order `None`, slug `summit-loop` (sorted after numbered files)
//! - `020.toml` → order `Some(20)`, slug `""` (must declare `id` itself)

/// Result of parsing a file stem like `010-test-ridge`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryName {
    /// Number prefix if present.
    pub order: Option<u32>,
    /// Stem after the `NNN-` prefix. For unnumbered stems, the full input.
    pub slug: String,
}

impl EntryName {
    /// Sort key: numbered entries first by number, then unnumbered by slug.
    pub fn sort_key(&self) -> (u32, String) {
        (self.order.unwrap_or(u32::MAX), self.slug.clone())
    }
}

/// Parse a file stem following the `NNN-slug` convention.
pub fn parse_entry_name(stem: &str) -> EntryName {
    if let Some((prefix, rest)) = stem.split_once('-')
        && let Ok(num) = prefix.parse::<u32>()
    {
        return EntryName {
            order: Some(num),
            slug: rest.to_string(),
        };
    }
    if let Ok(num) = stem.parse::<u32>() {
        return EntryName {
            order: Some(num),
            slug: String::new(),
        };
    }
    EntryName {
        order: None,
        slug: stem.to_string(),
    }
}

/// Whether `id` is usable as a URL path segment: non-empty `[a-z0-9-]`.
pub fn is_slug(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}
