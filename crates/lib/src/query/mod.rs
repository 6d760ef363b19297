//! Build-graph introspection.
//!
//! The synthesizer never talks to the build tool directly; it goes through
//! the [`BuildGraph`] trait. `BazelGraph` shells out to the real query
//! binary, `StaticGraph` serves a fixed in-memory table for tests.
//!
//! Every call is a blocking request/response. Timeout and retry policy
//! belong to the external channel, not this layer.

mod bazel;
mod fixed;

pub use bazel::BazelGraph;
pub use fixed::StaticGraph;

use thiserror::Error;

use crate::label::{Label, LabelError};

/// Errors reported by a build-graph query channel.
#[derive(Debug, Error)]
pub enum QueryError {
  /// The query output contained a label the parser rejects.
  #[error("malformed label: {0}")]
  MalformedLabel(#[from] LabelError),

  /// The build tool cannot resolve a target. The target may have been
  /// removed or renamed upstream; fatal and non-retryable for this
  /// invocation.
  #[error("unknown target: {label}")]
  UnknownTarget { label: Label },

  /// The query binary exited with a failure status.
  #[error("query command failed with exit code {code:?}: {stderr}")]
  Tool { code: Option<i32>, stderr: String },

  /// The query binary could not be spawned.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// One target's introspection channel into the external build graph.
pub trait BuildGraph {
  /// The declared module name for a target.
  ///
  /// # Errors
  ///
  /// Returns `UnknownTarget` if the build tool cannot resolve the label.
  fn resolve_name(&self, label: &Label) -> Result<String, QueryError>;

  /// The raw dependency edges of a target, in the order the build tool
  /// reports them. May include internal support targets.
  fn dependencies(&self, label: &Label) -> Result<Vec<Label>, QueryError>;

  /// All targets marked for external consumption, identified by the
  /// optimized-variant naming suffix.
  fn exported_targets(&self) -> Result<Vec<Label>, QueryError>;
}
