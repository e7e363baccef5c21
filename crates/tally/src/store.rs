//! Cumulative per-label sample counts and their JSON file.
//!
//! The file holds a single flat JSON object mapping canonical labels to
//! non-negative counts, e.g. `{"Editor": 42, "Browser": 17}`. Key order is not
//! significant.

use std::{
    collections::{HashMap, hash_map},
    fmt::{self, Write as _},
    fs::{self, File},
    io::{self, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::{Error, Result};

/// In-memory mapping from canonical label to sample count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityStore {
    /// Count per label.
    counts: HashMap<String, u64>,
}

impl ActivityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store persisted at `path`.
    ///
    /// - Missing file: an empty file is created and an empty store returned.
    /// - Empty (or whitespace-only) file: empty store.
    /// - Anything that is not a flat object of label to count: [`Error::Corrupt`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                File::create(path).map_err(|source| Error::Create {
                    path: path.to_path_buf(),
                    source,
                })?;
                debug!(path = %path.display(), "created empty activity store");
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(Error::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&content).map_err(|source| Error::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse persisted content. Blank content is an empty store.
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        serde_json::from_str(content)
    }

    /// Count one more sample for `label`.
    pub fn increment(&mut self, label: &str) {
        match self.counts.get_mut(label) {
            Some(count) => *count = count.saturating_add(1),
            None => {
                self.counts.insert(label.to_string(), 1);
            }
        }
    }

    /// Replace the file at `path` with the serialized store.
    ///
    /// The content is written to a temporary file in the same directory and
    /// renamed over `path`, so readers see either the old or the new content.
    /// An existing file's permissions carry over to the replacement.
    pub fn flush(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string(self).map_err(Error::Serialize)?;
        let write_err = |source: io::Error| Error::Write {
            path: path.to_path_buf(),
            source,
        };
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        if let Ok(existing) = fs::metadata(path) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(write_err)?;
        }
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|err| write_err(err.error))?;
        trace!(path = %path.display(), labels = self.counts.len(), "flushed activity store");
        Ok(())
    }

    /// Raw content of the file at `path`, or the empty string if it is
    /// missing or unreadable.
    pub fn report(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_else(|err| {
            debug!(path = %path.display(), error = %err, "activity store not readable");
            String::new()
        })
    }

    /// Count recorded for `label`, zero if never seen.
    pub fn get(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no label has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |acc, count| acc.saturating_add(*count))
    }

    /// Iterate over `(label, count)` pairs in arbitrary order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.counts.iter(),
        }
    }

    /// Entries sorted by descending count, ties broken by label.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Sorted view for display and logging; see [`ActivityStore::ranked`].
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            entries: self.ranked(),
        }
    }

    /// One `count<TAB>label` line per entry, highest count first.
    pub fn render_ranked(&self) -> String {
        let mut out = String::new();
        for (label, count) in self.ranked() {
            let _ignored = writeln!(out, "{count}\t{label}");
        }
        out
    }
}

impl From<HashMap<String, u64>> for ActivityStore {
    fn from(counts: HashMap<String, u64>) -> Self {
        Self { counts }
    }
}

/// Entries of an [`ActivityStore`] ordered by descending count.
///
/// Displays as `[Editor: 42, Browser: 17]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<'a> {
    /// Ranked `(label, count)` pairs.
    entries: Vec<(&'a str, u64)>,
}

impl<'a> Snapshot<'a> {
    /// Ranked `(label, count)` pairs.
    pub fn entries(&self) -> &[(&'a str, u64)] {
        &self.entries
    }
}

impl fmt::Display for Snapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (label, count)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{label}: {count}")?;
        }
        f.write_str("]")
    }
}

/// Iterator over the entries of an [`ActivityStore`].
pub struct Iter<'a> {
    /// Underlying map iterator.
    inner: hash_map::Iter<'a, String, u64>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, u64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(label, count)| (label.as_str(), *count))
    }
}
