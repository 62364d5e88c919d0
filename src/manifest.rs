//! Module manifest for a directory of exported Markdown files.
//!
//! The manifest lists every `*.md` file in a directory as a module and
//! carries a static `config` block. Nothing in this crate reads the config
//! block back; it describes how the files were produced for downstream
//! consumers.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Descriptive settings recorded in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSettings {
    /// Pause between requests, in milliseconds
    pub wait_time_ms: u64,

    /// Whether pages were processed one at a time
    pub sequential: bool,

    /// Configured retry count
    pub retries: u32,
}

impl Default for ManifestSettings {
    fn default() -> Self {
        Self {
            wait_time_ms: 350,
            sequential: true,
            retries: 3,
        }
    }
}

/// One Markdown file listed as a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    /// File stem
    pub name: String,

    /// Human-readable title derived from the stem
    pub title: String,

    /// File name relative to the scanned directory
    pub file: String,
}

impl ModuleEntry {
    /// Derive an entry from a Markdown file name.
    pub fn from_file_name(file: &str) -> Self {
        let name = file.strip_suffix(".md").unwrap_or(file).to_string();
        Self {
            title: title_from_stem(&name),
            name,
            file: file.to_string(),
        }
    }
}

fn title_from_stem(stem: &str) -> String {
    let spaced = stem.replace(['-', '_'], " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Manifest describing a directory of Markdown modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// When the manifest was generated
    pub generated_at: DateTime<Utc>,

    /// Modules sorted by file name
    pub modules: Vec<ModuleEntry>,

    /// Static configuration block
    pub config: ManifestSettings,
}

impl Manifest {
    /// Scan `dir` (non-recursively) for Markdown files.
    pub fn scan(dir: impl AsRef<Path>, settings: ManifestSettings) -> Result<Self> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir.as_ref())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".md") {
                files.push(name);
            }
        }
        files.sort();

        Ok(Self {
            generated_at: Utc::now(),
            modules: files.iter().map(|f| ModuleEntry::from_file_name(f)).collect(),
            config: settings,
        })
    }

    /// Get the number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if no modules were found.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the manifest as JSON to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
