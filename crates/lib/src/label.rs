//! Build-tool target labels and their naming conventions.
//!
//! A label is the build tool's canonical identifier for a target, e.g.
//! `//Sources/Core:Core_opt` or `@upstream//Sources/Core:Core`. The part
//! after the colon is the target name; the `_opt` suffix marks the
//! compiled/optimized variant of a module. Bare and suffixed forms refer
//! to the same logical module.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::OPT_SUFFIX;

/// Error parsing a label string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
  /// The label has no `//` package marker.
  #[error("label has no package marker: {0}")]
  MissingPackage(String),

  /// The label has no `:` target separator.
  #[error("label has no target separator: {0}")]
  MissingTarget(String),

  /// The target name after `:` is empty.
  #[error("label has an empty target name: {0}")]
  EmptyTarget(String),
}

/// A canonical build-tool label.
///
/// Stored as the full text form. Comparison and hashing use the full text,
/// so `//a:Foo` and `//a:Foo_opt` are distinct labels even though they
/// name the same logical module; use [`Label::short_name`] to compare at
/// the module level.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Label(String);

impl Label {
  /// Parse and validate a label string.
  ///
  /// Accepts `//package/path:name` and `@repo//package/path:name`.
  pub fn parse(s: &str) -> Result<Self, LabelError> {
    let marker = s.find("//").ok_or_else(|| LabelError::MissingPackage(s.to_string()))?;
    let rest = &s[marker + 2..];
    let colon = rest.find(':').ok_or_else(|| LabelError::MissingTarget(s.to_string()))?;
    if rest[colon + 1..].is_empty() {
      return Err(LabelError::EmptyTarget(s.to_string()));
    }
    Ok(Label(s.to_string()))
  }

  /// The full text form of the label.
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// The target name: everything after the `:` separator.
  pub fn target_name(&self) -> &str {
    // Parse validated the separator exists.
    match self.0.rfind(':') {
      Some(idx) => &self.0[idx + 1..],
      None => &self.0,
    }
  }

  /// The module name: the target name with the optimized-variant suffix
  /// stripped. `//a:Foo` and `//a:Foo_opt` both yield `Foo`.
  pub fn short_name(&self) -> &str {
    let name = self.target_name();
    name.strip_suffix(OPT_SUFFIX).unwrap_or(name)
  }

  /// Whether the target name carries the optimized-variant suffix.
  pub fn has_opt_suffix(&self) -> bool {
    self.target_name().ends_with(OPT_SUFFIX)
  }

  /// The same label with the optimized-variant suffix removed, if present.
  pub fn without_opt_suffix(&self) -> Label {
    match self.0.strip_suffix(OPT_SUFFIX) {
      Some(base) if self.has_opt_suffix() => Label(base.to_string()),
      _ => self.clone(),
    }
  }

  /// The same label with the optimized-variant suffix appended, if absent.
  pub fn with_opt_suffix(&self) -> Label {
    if self.has_opt_suffix() {
      self.clone()
    } else {
      Label(format!("{}{}", self.0, OPT_SUFFIX))
    }
  }
}

impl std::fmt::Display for Label {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Strip the namespace prefix from a dependency reference so it resolves in
/// the output artifact's own namespace.
///
/// `@upstream//Sources/Core:Core_opt` becomes `Core_opt`; a reference that
/// is already bare passes through unchanged.
pub fn strip_namespace(reference: &str) -> &str {
  match reference.rfind(':') {
    Some(idx) => &reference[idx + 1..],
    None => reference,
  }
}
