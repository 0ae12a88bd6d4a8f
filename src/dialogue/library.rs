//! Named dialogue resources and the loader that provisions them from disk.
use std::{
    collections::HashMap,
    fmt, fs,
    path::{Path, PathBuf},
};

use bevy::prelude::*;

use super::errors::{DialogueError, DialogueErrorKind};

const DIALOGUE_EXTENSION: &str = "txt";

/// A raw text resource and the name it is looked up by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueEntry {
    pub name: String,
    pub text: String,
}

impl DialogueEntry {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Ordered dialogue resources plus a name index built once at configuration.
///
/// The entry list is the source of truth; the index only caches the position
/// of the first entry carrying each name.
#[derive(Resource, Debug, Clone, Default)]
pub struct DialogueLibrary {
    entries: Vec<DialogueEntry>,
    lookup: HashMap<String, usize>,
}

impl DialogueLibrary {
    pub fn configure(entries: Vec<DialogueEntry>) -> Self {
        let mut lookup = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if lookup.contains_key(&entry.name) {
                warn!(
                    "DialogueLibrary: duplicate dialogue name '{}' at index {} ignored; keeping the first entry",
                    entry.name, index
                );
                continue;
            }
            debug!("DialogueLibrary: found file '{}'", entry.name);
            lookup.insert(entry.name.clone(), index);
        }

        Self { entries, lookup }
    }

    /// Exact-match lookup against configured names.
    pub fn lookup_by_name(&self, name: &str) -> Result<&str, DialogueError> {
        self.lookup
            .get(name)
            .map(|&index| self.entries[index].text.as_str())
            .ok_or_else(|| DialogueError::library(DialogueErrorKind::resource_not_found(name)))
    }

    /// Positional lookup in configuration order, duplicates included.
    pub fn lookup_by_index(&self, index: usize) -> Result<&DialogueEntry, DialogueError> {
        self.entries.get(index).ok_or_else(|| {
            DialogueError::library(DialogueErrorKind::index_out_of_range(
                index,
                self.entries.len(),
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Which library entry playback should use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueSelection {
    Name(String),
    /// Position in configuration order, for linear level-by-level scripts.
    Index(usize),
}

impl DialogueSelection {
    pub fn resolve<'a>(&self, library: &'a DialogueLibrary) -> Result<&'a str, DialogueError> {
        match self {
            Self::Name(name) => library.lookup_by_name(name),
            Self::Index(index) => library
                .lookup_by_index(*index)
                .map(|entry| entry.text.as_str()),
        }
    }
}

impl fmt::Display for DialogueSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "'{}'", name),
            Self::Index(index) => write!(f, "#{}", index),
        }
    }
}

/// Reads dialogue text files from `directory`.
///
/// A non-empty `files` list is loaded in the given order. Otherwise every
/// `.txt` file in the directory is loaded, sorted by file name. Entries are
/// named after the file stem. Unreadable files are skipped with a warning.
pub fn load_entries(directory: &Path, files: &[String]) -> Vec<DialogueEntry> {
    let paths = if files.is_empty() {
        match scan_directory(directory) {
            Ok(paths) => paths,
            Err(err) => {
                warn!(
                    "Failed to scan dialogue directory {} ({}). Library will be empty.",
                    directory.display(),
                    err
                );
                return Vec::new();
            }
        }
    } else {
        files.iter().map(|file| directory.join(file)).collect()
    };

    paths
        .iter()
        .filter_map(|path| match read_entry(path) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(
                    "Failed to read dialogue file {} ({}). Skipping.",
                    path.display(),
                    err
                );
                None
            }
        })
        .collect()
}

fn scan_directory(directory: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        let is_dialogue = path
            .extension()
            .is_some_and(|extension| extension == DIALOGUE_EXTENSION);
        if path.is_file() && is_dialogue {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn read_entry(path: &Path) -> std::io::Result<DialogueEntry> {
    let text = fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(DialogueEntry { name, text })
}
