//! Subprocess-backed build-graph queries.
//!
//! Shells out to a `bazel query`-style binary and parses its line-oriented
//! label output. Each call spawns one blocking process; the build tool's
//! own caching makes repeated queries cheap.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::label::Label;

use super::{BuildGraph, QueryError};

/// Build-graph queries via the external query binary.
#[derive(Debug)]
pub struct BazelGraph {
  /// The query binary to invoke (e.g. `bazel`).
  binary: String,

  /// Workspace directory the binary runs in.
  workspace: PathBuf,

  /// Universe pattern for target discovery (e.g. `//Sources/...`).
  pattern: String,
}

impl BazelGraph {
  pub fn new(binary: impl Into<String>, workspace: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
    Self {
      binary: binary.into(),
      workspace: workspace.into(),
      pattern: pattern.into(),
    }
  }

  /// Run one query expression and return stdout lines parsed as labels.
  fn query(&self, expression: &str) -> Result<Vec<Label>, QueryError> {
    debug!(binary = %self.binary, expression = %expression, "running graph query");

    let output = Command::new(&self.binary)
      .arg("query")
      .arg(expression)
      .arg("--output=label")
      .current_dir(&self.workspace)
      .output()?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
      return Err(QueryError::Tool {
        code: output.status.code(),
        stderr,
      });
    }

    String::from_utf8_lossy(&output.stdout)
      .lines()
      .map(str::trim)
      .filter(|line| !line.is_empty())
      .map(|line| Label::parse(line).map_err(QueryError::from))
      .collect()
  }
}

impl BuildGraph for BazelGraph {
  fn resolve_name(&self, label: &Label) -> Result<String, QueryError> {
    // The build tool resolves existence; the module name follows from the
    // target naming convention once the label is known to be live.
    let resolved = self.query(label.as_str()).map_err(|err| match &err {
      QueryError::Tool { stderr, .. } if is_missing_target(stderr) => {
        QueryError::UnknownTarget { label: label.clone() }
      }
      _ => err,
    })?;

    if resolved.is_empty() {
      return Err(QueryError::UnknownTarget { label: label.clone() });
    }

    Ok(label.short_name().to_string())
  }

  fn dependencies(&self, label: &Label) -> Result<Vec<Label>, QueryError> {
    let deps = self.query(&format!("deps({}, 1)", label))?;

    // deps() includes the target itself; drop it.
    Ok(deps.into_iter().filter(|dep| dep != label).collect())
  }

  fn exported_targets(&self) -> Result<Vec<Label>, QueryError> {
    let all = self.query(&self.pattern)?;
    Ok(all.into_iter().filter(Label::has_opt_suffix).collect())
  }
}

/// Whether a failed query's stderr reports a missing target, as opposed
/// to a channel failure (misconfigured workspace, crashed query server).
fn is_missing_target(stderr: &str) -> bool {
  let lower = stderr.to_lowercase();
  lower.contains("no such target") || lower.contains("no such package") || lower.contains("not declared in package")
}
