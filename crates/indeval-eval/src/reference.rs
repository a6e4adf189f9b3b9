use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::EvalError;

/// Ground-truth dependency ids in file order, one entry per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    ids: Vec<String>,
    index: HashSet<String>,
}

impl ReferenceSet {
    /// Load a reference file with one canonical id per line.
    pub fn load(path: &Path) -> Result<Self, EvalError> {
        let file = File::open(path).map_err(|source| EvalError::ReferenceFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file)).map_err(|err| match err {
            EvalError::Io(source) => EvalError::ReferenceFile {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Read ids from a line-oriented source.
    ///
    /// Blank lines and lines starting with `#` are skipped; all whitespace is
    /// removed from the remaining lines. A repeated line is kept and scored
    /// again.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, EvalError> {
        let mut set = Self::default();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim_start().starts_with('#') {
                continue;
            }
            let id: String = line.chars().filter(|ch| !ch.is_whitespace()).collect();
            if id.is_empty() {
                continue;
            }
            if set.contains(&id) {
                tracing::warn!(event = "duplicate_reference_id", line = line_no + 1);
            }
            set.push(id);
        }
        tracing::info!(event = "reference_loaded", ids = set.len());
        Ok(set)
    }

    fn push(&mut self, id: String) {
        self.index.insert(id.clone());
        self.ids.push(id);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::default();
        for id in iter {
            set.push(id.into());
        }
        set
    }
}
