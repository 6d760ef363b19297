//! Per-platform artifact attachment.
//!
//! After dependency remapping, each declaration gets the file paths of its
//! compiled outputs. The artifact tree is laid out by the build step as
//! one directory per platform:
//!
//! ```text
//! <root>/
//!   macos_arm64/
//!     libCore.a
//!     Core.swiftdoc
//!     Core.swiftinterface
//!     Core.private.swiftinterface
//!   ios_arm64/
//!     ...
//! ```
//!
//! Attached paths are relative to the root so the artifact tree stays
//! relocatable. An archive must exist for every module on every platform;
//! doc and interface files may legitimately be absent and are skipped.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::consts::{ARCHIVE_EXT, DOC_EXT, INTERFACE_EXT, PRIVATE_INTERFACE_EXT};
use crate::synth::{InterfaceVariant, Overrides};
use crate::target::OutputDeclaration;

/// Errors during artifact attachment.
#[derive(Debug, Error)]
pub enum ArtifactError {
  /// The artifact root has no platform directories.
  #[error("no platform directories under {root}")]
  NoPlatforms { root: PathBuf },

  /// A module's static archive is missing for a platform.
  #[error("missing archive for module {module} on platform {platform}")]
  MissingArchive { module: String, platform: String },

  /// The artifact tree could not be walked.
  #[error("failed to scan artifact tree: {message}")]
  Scan { message: String },
}

/// Attach per-platform artifact paths to every declaration.
///
/// The interface file variant is taken from the override table: the
/// primary module receives the private interface instead of the default
/// one, wherever it sits in the declaration list.
pub fn attach_artifacts(
  declarations: &mut [OutputDeclaration],
  root: &Path,
  overrides: &Overrides,
) -> Result<(), ArtifactError> {
  let platforms = discover_platforms(root)?;
  if platforms.is_empty() {
    return Err(ArtifactError::NoPlatforms { root: root.to_path_buf() });
  }

  debug!(platforms = platforms.len(), modules = declarations.len(), "attaching artifacts");

  for decl in declarations.iter_mut() {
    let interface_ext = match overrides.interface_variant(&decl.name) {
      InterfaceVariant::Default => INTERFACE_EXT,
      InterfaceVariant::Private => PRIVATE_INTERFACE_EXT,
    };

    for platform in &platforms {
      let archive = format!("lib{}.{}", decl.name, ARCHIVE_EXT);
      if !root.join(platform).join(&archive).is_file() {
        return Err(ArtifactError::MissingArchive {
          module: decl.name.clone(),
          platform: platform.clone(),
        });
      }
      decl
        .artifacts
        .archives
        .insert(platform.clone(), PathBuf::from(platform).join(&archive));

      let doc = format!("{}.{}", decl.name, DOC_EXT);
      if root.join(platform).join(&doc).is_file() {
        decl
          .artifacts
          .swiftdoc
          .insert(platform.clone(), PathBuf::from(platform).join(&doc));
      }

      let interface = format!("{}.{}", decl.name, interface_ext);
      if root.join(platform).join(&interface).is_file() {
        decl
          .artifacts
          .swiftinterface
          .insert(platform.clone(), PathBuf::from(platform).join(&interface));
      }
    }
  }

  Ok(())
}

/// Platform directory names directly under the artifact root, sorted.
fn discover_platforms(root: &Path) -> Result<Vec<String>, ArtifactError> {
  let mut platforms = Vec::new();

  for entry in WalkDir::new(root).min_depth(1).max_depth(1).sort_by_file_name() {
    let entry = entry.map_err(|e| ArtifactError::Scan { message: e.to_string() })?;
    if entry.file_type().is_dir()
      && let Some(name) = entry.file_name().to_str()
    {
      platforms.push(name.to_string());
    }
  }

  Ok(platforms)
}
