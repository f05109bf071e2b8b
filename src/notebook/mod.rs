// src/notebook/mod.rs
//! Minimal Jupyter notebook model.
//!
//! Only `cells` is modelled; every other field (and any unknown field on a
//! cell) round-trips untouched through a flattened map. Notebooks are
//! rewritten pretty-printed with two-space indentation, matching how the
//! site tooling formats them.

pub mod annotate;
pub mod assets;
pub mod badge;
pub mod metadata;

use crate::error::{LecternError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    pub cells: Vec<Cell>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: String,
    #[serde(default = "empty_object")]
    pub metadata: Value,
    #[serde(default)]
    pub source: Source,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Cell source, which nbformat stores either as one string or a list of
/// line strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source {
    Lines(Vec<String>),
    Text(String),
}

impl Default for Source {
    fn default() -> Self {
        Self::Lines(Vec::new())
    }
}

impl Source {
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::Lines(lines) => lines.concat(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl Cell {
    /// A raw cell carrying YAML front-matter used by the static site.
    #[must_use]
    pub fn is_front_matter(&self) -> bool {
        self.cell_type == "raw" && {
            let source = self.source.joined();
            source.trim_start().starts_with("---") && source.contains("title:")
        }
    }

    /// A markdown cell carrying the "Open In Colab" badge.
    #[must_use]
    pub fn is_badge(&self) -> bool {
        self.cell_type == "markdown" && {
            let source = self.source.joined();
            source.contains("colab.research.google.com") && source.contains("Open In Colab")
        }
    }

    #[must_use]
    pub fn markdown(source: String) -> Self {
        Self {
            cell_type: "markdown".to_string(),
            metadata: empty_object(),
            source: Source::Lines(vec![source]),
            rest: Map::new(),
        }
    }

    #[must_use]
    pub fn raw(source: String) -> Self {
        Self {
            cell_type: "raw".to_string(),
            metadata: empty_object(),
            source: Source::Lines(vec![source]),
            rest: Map::new(),
        }
    }
}

impl Notebook {
    /// First cell is the front-matter cell.
    #[must_use]
    pub fn has_front_matter(&self) -> bool {
        self.cells.first().is_some_and(Cell::is_front_matter)
    }

    /// Second cell is the badge cell (the canonical position, right after
    /// the front-matter).
    #[must_use]
    pub fn has_badge(&self) -> bool {
        self.cells.get(1).is_some_and(Cell::is_badge)
    }
}

/// Reads and parses a notebook.
///
/// # Errors
/// Returns error on I/O failure or malformed JSON.
pub fn read(path: &Path) -> Result<Notebook> {
    let raw = fs::read_to_string(path).map_err(|e| LecternError::io(e, path))?;
    serde_json::from_str(&raw).map_err(|source| LecternError::NotebookJson {
        source,
        path: path.to_path_buf(),
    })
}

/// Writes a notebook back, pretty-printed.
///
/// # Errors
/// Returns error on I/O or serialization failure.
pub fn write(path: &Path, notebook: &Notebook) -> Result<()> {
    let json = serde_json::to_string_pretty(notebook).map_err(|source| {
        LecternError::NotebookJson {
            source,
            path: path.to_path_buf(),
        }
    })?;
    fs::write(path, json).map_err(|e| LecternError::io(e, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_joins_both_shapes() {
        let lines = Source::Lines(vec!["a\n".into(), "b".into()]);
        assert_eq!(lines.joined(), "a\nb");
        let text = Source::Text("a\nb".into());
        assert_eq!(text.joined(), "a\nb");
    }

    #[test]
    fn front_matter_requires_raw_cell_with_title() {
        let cell = Cell::raw("---\ntitle: 'Entropy'\n---\n".into());
        assert!(cell.is_front_matter());
        let md = Cell::markdown("---\ntitle: 'Entropy'\n---\n".into());
        assert!(!md.is_front_matter());
        let raw = Cell::raw("just text".into());
        assert!(!raw.is_front_matter());
    }

    #[test]
    fn badge_detection_needs_both_markers() {
        let good = Cell::markdown(
            "[![Open In Colab](badge.svg)](https://colab.research.google.com/x)".into(),
        );
        assert!(good.is_badge());
        let partial = Cell::markdown("see https://colab.research.google.com/x".into());
        assert!(!partial.is_badge());
    }
}
