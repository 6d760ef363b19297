//! In-memory build graph over a fixed table.
//!
//! Stands in for the external query channel in tests and dry runs. Behaves
//! exactly like the real channel at the contract level: unknown labels are
//! `UnknownTarget`, exported targets are the suffix-marked ones.

use std::collections::BTreeMap;

use crate::label::Label;

use super::{BuildGraph, QueryError};

#[derive(Debug, Clone)]
struct Entry {
  name: String,
  dependencies: Vec<Label>,
}

/// A build graph served from a fixed in-memory table.
#[derive(Debug, Clone, Default)]
pub struct StaticGraph {
  entries: BTreeMap<Label, Entry>,
}

impl StaticGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a target with its declared module name and raw dependencies.
  pub fn insert(&mut self, label: Label, name: impl Into<String>, dependencies: Vec<Label>) {
    self.entries.insert(
      label,
      Entry {
        name: name.into(),
        dependencies,
      },
    );
  }

  /// Number of targets in the table.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl BuildGraph for StaticGraph {
  fn resolve_name(&self, label: &Label) -> Result<String, QueryError> {
    self
      .entries
      .get(label)
      .map(|entry| entry.name.clone())
      .ok_or_else(|| QueryError::UnknownTarget { label: label.clone() })
  }

  fn dependencies(&self, label: &Label) -> Result<Vec<Label>, QueryError> {
    self
      .entries
      .get(label)
      .map(|entry| entry.dependencies.clone())
      .ok_or_else(|| QueryError::UnknownTarget { label: label.clone() })
  }

  fn exported_targets(&self) -> Result<Vec<Label>, QueryError> {
    Ok(self.entries.keys().filter(|label| label.has_opt_suffix()).cloned().collect())
  }
}
