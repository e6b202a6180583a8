//! Build manifest for incremental site output.
//!
//! Rendering every page is cheap; rewriting them is what shows up in
//! deploy diffs, rsync transfers and file-watcher reloads. This module lets
//! the generator skip writing a page whose HTML is byte-identical to what
//! the previous build wrote.
//!
//! # Design
//!
//! Every page is always rendered. After rendering, the generator hashes the
//! HTML and asks the manifest whether the page at that output path already
//! holds that content. A hit requires:
//!
//! 1. An entry for the output path with the same SHA-256 content hash
//! 2. The file still exists on disk
//!
//! Hashes are content-based rather than mtime-based so they survive
//! `git checkout` and CI cache restores, which reset modification times.
//!
//! ## Storage
//!
//! The manifest is a JSON file at `<output_dir>/.build-manifest.json`. It
//! lives alongside the pages so it travels with the output directory.
//!
//! ## Bypassing the cache
//!
//! Pass `--no-cache` to `build` to force every page to be rewritten. This
//! starts from an empty manifest; the old files are overwritten naturally.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the build manifest file within the output directory.
pub const MANIFEST_FILENAME: &str = ".build-manifest.json";

/// Version of the manifest format. Bump this to invalidate all existing
/// manifests when the format or hash computation changes.
const MANIFEST_VERSION: u32 = 1;

/// On-disk manifest mapping output paths (relative, `/`-separated) to the
/// SHA-256 of the content last written there.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BuildManifest {
    pub version: u32,
    pub pages: BTreeMap<String, String>,
}

impl BuildManifest {
    /// Create an empty manifest (used for `--no-cache` or first build).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            pages: BTreeMap::new(),
        }
    }

    /// Load from the output directory. Returns an empty manifest if the
    /// file doesn't exist or can't be parsed (version mismatch, corruption).
    pub fn load(output_dir: &Path) -> Self {
        let content = match std::fs::read_to_string(manifest_path(output_dir)) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        let manifest: Self = match serde_json::from_str(&content) {
            Ok(m) => m,
            Err(_) => return Self::empty(),
        };
        if manifest.version != MANIFEST_VERSION {
            return Self::empty();
        }
        manifest
    }

    /// Save to the output directory.
    pub fn save(&self, output_dir: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(manifest_path(output_dir), json)
    }

    /// Whether `output_dir/page_path` already holds content with `hash`.
    pub fn is_unchanged(&self, page_path: &str, hash: &str, output_dir: &Path) -> bool {
        self.pages.get(page_path).is_some_and(|h| h == hash)
            && output_dir.join(page_path).exists()
    }

    /// Record the content hash written to a page.
    pub fn insert(&mut self, page_path: String, hash: String) {
        self.pages.insert(page_path, hash);
    }
}

/// SHA-256 of a byte string, returned as a hex string.
pub fn hash_content(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Outcome of writing one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    Unchanged,
}

/// Write `content` to `output_dir/page_path` unless the manifest says it is
/// already there. Parent directories are created as needed.
pub fn write_if_changed(
    manifest: &BuildManifest,
    output_dir: &Path,
    page_path: &str,
    content: &[u8],
) -> io::Result<(WriteStatus, String)> {
    let hash = hash_content(content);
    if manifest.is_unchanged(page_path, &hash, output_dir) {
        return Ok((WriteStatus::Unchanged, hash));
    }
    let path = output_dir.join(page_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok((WriteStatus::Written, hash))
}

/// Summary of cache performance for a build run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub unchanged: u32,
    pub written: u32,
}

impl CacheStats {
    pub fn record(&mut self, status: WriteStatus) {
        match status {
            WriteStatus::Written => self.written += 1,
            WriteStatus::Unchanged => self.unchanged += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.unchanged + self.written
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unchanged > 0 {
            write!(
                f,
                "{} unchanged, {} written ({} total)",
                self.unchanged,
                self.written,
                self.total()
            )
        } else {
            write!(f, "{} written", self.written)
        }
    }
}

/// Resolve the build manifest path for an output directory.
pub fn manifest_path(output_dir: &Path) -> PathBuf {
    output_dir.join(MANIFEST_FILENAME)
}
