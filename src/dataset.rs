//! Per-element datasets and their JSON files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HarvestError, Result};

/// One anchor scraped from a listing page, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PseudopotentialEntry {
    pub label: String,
    pub href: String,
    pub meta: String,
}

/// The value stored under each label in the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub href: String,
    pub meta: String,
}

/// Label -> record. Sorted so that repeated runs write identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementDataset(BTreeMap<String, EntryRecord>);

impl ElementDataset {
    /// Builds the mapping. A repeated label keeps the later entry.
    pub fn from_entries(entries: impl IntoIterator<Item = PseudopotentialEntry>) -> Self {
        let mut map = BTreeMap::new();
        for entry in entries {
            let record = EntryRecord {
                href: entry.href,
                meta: entry.meta,
            };
            if map.insert(entry.label.clone(), record).is_some() {
                log::warn!("duplicate label '{}', keeping the later entry", entry.label);
            }
        }
        Self(map)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, label: &str) -> Option<&EntryRecord> {
        self.0.get(label)
    }

    #[cfg(test)]
    pub(crate) fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

pub fn dataset_path(output_dir: &Path, element: &str) -> PathBuf {
    output_dir.join(format!("{element}.json"))
}

/// Writes `<output_dir>/<element>.json`, replacing any previous file.
///
/// The JSON goes to a temp file next to the target and is renamed into place,
/// so a failure never leaves a truncated or half-written dataset behind.
pub fn write_dataset(output_dir: &Path, element: &str, dataset: &ElementDataset) -> Result<PathBuf> {
    let json = serde_json::to_vec(dataset)?;

    fs::create_dir_all(output_dir).map_err(|source| HarvestError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = dataset_path(output_dir, element);
    let tmp_path = output_dir.join(format!("{element}.json.tmp"));

    let written = fs::write(&tmp_path, &json).and_then(|()| fs::rename(&tmp_path, &path));
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(HarvestError::Write { path, source });
    }

    Ok(path)
}

pub fn read_dataset(path: &Path) -> Result<ElementDataset> {
    let bytes = fs::read(path).map_err(|source| HarvestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = serde_json::from_slice(&bytes)?;
    Ok(dataset)
}
