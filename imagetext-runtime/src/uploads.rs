use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use imagetext_core::types::{ProcessingKind, UploadId};
use serde::{Deserialize, Serialize};

/// One row in the "My Uploads" list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadEntry {
    pub id: UploadId,
    pub url: String,
    pub name: String,
    pub ts_unix_ms: i64,
    pub kind: ProcessingKind,
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    path: PathBuf,
    max_entries: usize,
}

impl UploadStore {
    pub fn at_path(path: PathBuf) -> Self {
        Self { path, max_entries: 50 }
    }

    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max.max(1);
        self
    }

    pub fn load(&self) -> anyhow::Result<Vec<UploadEntry>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read uploads: {}", self.path.display()))?;
        let entries: Vec<UploadEntry> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse uploads: {}", self.path.display()))?;
        Ok(entries)
    }

    pub fn append(&self, entry: UploadEntry) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir: {}", parent.display()))?;
        }

        let mut entries = self.load()?;
        entries.push(entry);
        if entries.len() > self.max_entries {
            let start = entries.len() - self.max_entries;
            entries = entries.split_off(start);
        }

        self.write(&entries)
    }

    pub fn remove(&self, id: &UploadId) -> anyhow::Result<()> {
        let mut entries = self.load()?;
        entries.retain(|e| &e.id != id);
        self.write(&entries)
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove uploads: {}", self.path.display()))?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entries: &[UploadEntry]) -> anyhow::Result<()> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(entries)?)
            .with_context(|| format!("failed to write uploads temp: {}", tmp.display()))?;
        crate::files::replace_file(&tmp, &self.path)
            .with_context(|| format!("failed to replace uploads: {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> UploadEntry {
        UploadEntry {
            id: UploadId::new(),
            url: format!("https://example.com/{name}.jpg"),
            name: name.into(),
            ts_unix_ms: 1_700_000_000_000,
            kind: ProcessingKind::TextExtraction,
        }
    }

    #[test]
    fn appends_and_loads_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::at_path(dir.path().join("uploads.json"));

        store.append(entry("Handwritten Note")).unwrap();
        store.append(entry("Book Page")).unwrap();

        let entries = store.load().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Handwritten Note");
        assert_eq!(entries[1].name, "Book Page");
    }

    #[test]
    fn caps_the_list_at_max_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::at_path(dir.path().join("uploads.json")).with_max_entries(2);

        store.append(entry("a")).unwrap();
        store.append(entry("b")).unwrap();
        store.append(entry("c")).unwrap();

        let entries = store.load().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "b");
        assert_eq!(entries[1].name, "c");
    }

    #[test]
    fn removes_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::at_path(dir.path().join("uploads.json"));

        let keep = entry("keep");
        let gone = entry("gone");
        let gone_id = gone.id.clone();
        store.append(keep).unwrap();
        store.append(gone).unwrap();

        store.remove(&gone_id).unwrap();

        let entries = store.load().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "keep");
    }

    #[test]
    fn clear_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::at_path(dir.path().join("uploads.json"));

        store.append(entry("a")).unwrap();
        store.clear().unwrap();

        assert!(store.load().unwrap().is_empty());
        // Clearing twice is fine.
        store.clear().unwrap();
    }
}
