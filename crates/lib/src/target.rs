//! Target and output declaration types.
//!
//! `Target` captures what the build-graph query reports about one compiled
//! unit. `OutputDeclaration` is the entry generated for it in the output
//! artifact, with dependencies remapped into the artifact's own namespace.
//!
//! Targets are read-only facts produced by one introspection pass per
//! invocation. Declarations are created once by synthesis, have artifact
//! paths attached once, and are never mutated afterwards.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::label::Label;

/// A compiled unit discovered via build-graph introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
  /// Unique identifier in the build tool's namespace.
  pub label: Label,

  /// Short human-readable module name. May differ from the label's target
  /// name; unique across the target set.
  pub name: String,

  /// Dependency edges as reported by the build tool, in reported order.
  /// May include internal support targets not meant to be exposed.
  pub raw_dependencies: Vec<Label>,

  /// Whether the target is marked for external consumption (the
  /// optimized-variant naming suffix marks exported targets).
  pub is_exported: bool,
}

/// Per-platform file paths for a module's compiled artifacts.
///
/// Keyed by platform identifier (e.g. `macos_arm64`). `BTreeMap` keeps
/// serialization and rendering order deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
  /// Static archive per platform.
  pub archives: BTreeMap<String, PathBuf>,

  /// Module documentation file per platform.
  pub swiftdoc: BTreeMap<String, PathBuf>,

  /// Module interface file per platform.
  pub swiftinterface: BTreeMap<String, PathBuf>,
}

impl ArtifactPaths {
  /// Whether no paths have been attached yet.
  pub fn is_empty(&self) -> bool {
    self.archives.is_empty() && self.swiftdoc.is_empty() && self.swiftinterface.is_empty()
  }
}

/// One generated entry in the output artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDeclaration {
  /// Equals the source target's name.
  pub name: String,

  /// Module names of the target's dependencies, valid in the output
  /// artifact's own namespace. Deduplicated and sorted lexicographically.
  pub dependencies: Vec<String>,

  /// Per-platform artifact paths, attached after dependency remapping.
  #[serde(default)]
  pub artifacts: ArtifactPaths,
}
