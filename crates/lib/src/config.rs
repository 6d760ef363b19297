//! Packaging run parameters.
//!
//! These are the environment-style inputs the pipeline consumes. All of
//! them are opaque identifiers at this layer; nothing here parses version
//! syntax.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Parameters for one packaging run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageConfig {
  /// Version identifier of the packaged library (e.g. `1.4.2`).
  pub version: String,

  /// Toolchain version identifier the artifacts were built with.
  pub toolchain: String,

  /// Minimum platform version the artifacts target.
  pub min_platform_version: String,

  /// Optional numeric build suffix appended to the artifact name.
  pub build: Option<u32>,

  /// Module that receives the private interface variant.
  pub primary_module: String,

  /// Support target names excluded from the public surface.
  pub internal_labels: BTreeSet<String>,
}

impl PackageConfig {
  /// The versioned stem of the output artifact,
  /// `<base>-<version>[.<build>]`.
  pub fn artifact_stem(&self, base: &str) -> String {
    match self.build {
      Some(build) => format!("{}-{}.{}", base, self.version, build),
      None => format!("{}-{}", base, self.version),
    }
  }
}
