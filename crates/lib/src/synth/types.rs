//! Error types for configuration synthesis.
//!
//! Every error here is unrecoverable at this layer: synthesis aborts as a
//! whole and no partial artifact is written, since downstream packaging
//! requires a complete, internally consistent declaration set.

use thiserror::Error;

use crate::label::Label;
use crate::query::QueryError;

/// Errors that abort a synthesis run.
#[derive(Debug, Error)]
pub enum SynthError {
  /// No exported targets were discovered; downstream packaging has
  /// nothing to do.
  #[error("no exported targets discovered")]
  EmptyInput,

  /// The introspection query cannot resolve a target's identity. The
  /// target may have been removed or renamed upstream.
  #[error("cannot resolve target {label}: {source}")]
  NameResolution { label: Label, source: QueryError },

  /// A dependency label has no matching exported target: the upstream
  /// dependency graph is broken.
  #[error("target {target} depends on {dependency}, which matches no exported target")]
  UnresolvedDependency { target: String, dependency: String },

  /// Two targets resolve to the same output declaration name.
  #[error("targets {first} and {second} both resolve to module name {name}")]
  DuplicateName { name: String, first: Label, second: Label },

  /// The remapped declaration set contains a dependency cycle.
  #[error("dependency cycle detected involving {name}")]
  CycleDetected { name: String },

  /// The query channel failed for a reason other than name resolution.
  #[error("query error: {0}")]
  Query(#[from] QueryError),
}
