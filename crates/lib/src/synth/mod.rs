//! Configuration synthesis.
//!
//! Transforms the flat list of exported targets reported by the build-graph
//! query into the declaration set of the output artifact, with every
//! dependency remapped into the artifact's own namespace.
//!
//! The transform is two-pass: [`resolve_targets`] resolves every target's
//! module name and dependency edges through the query channel, then
//! [`remap_targets`] builds a label-to-name index over the whole set and
//! resolves each target's dependencies against it. A later target may be
//! depended on by an earlier one, so the index must be complete before any
//! dependency is resolved.
//!
//! Any failure aborts the whole run. A partial declaration set would be
//! inconsistent, so none is ever produced.

mod overrides;
mod types;

pub use overrides::{InterfaceVariant, Overrides};
pub use types::SynthError;

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::consts::OPT_SUFFIX;
use crate::label::{Label, strip_namespace};
use crate::query::{BuildGraph, QueryError};
use crate::target::{ArtifactPaths, OutputDeclaration, Target};

/// Synthesize one output declaration per exported target.
///
/// `internal_labels` holds target names (namespace already stripped) that
/// must never appear as a dependency reference: built-in support targets
/// excluded from the public surface. Matching is exact, never substring,
/// and covers both the bare and suffixed form of each dependency.
///
/// Declarations come back in input order with dependency lists
/// deduplicated and sorted lexicographically, so identical inputs render
/// byte-for-byte identically.
///
/// # Errors
///
/// - `EmptyInput` if `exported` is empty.
/// - `NameResolution` if the build tool cannot resolve a target.
/// - `DuplicateName` if two targets resolve to the same module name.
/// - `UnresolvedDependency` if a dependency matches no exported target and
///   no internal label.
pub fn synthesize(
  graph: &dyn BuildGraph,
  exported: &[Label],
  internal_labels: &BTreeSet<String>,
) -> Result<Vec<OutputDeclaration>, SynthError> {
  if exported.is_empty() {
    return Err(SynthError::EmptyInput);
  }

  info!(targets = exported.len(), "synthesizing declarations");

  let targets = resolve_targets(graph, exported)?;
  remap_targets(&targets, internal_labels)
}

/// Pass 1: resolve each exported label into a full [`Target`] via the
/// query channel.
///
/// # Errors
///
/// Returns `NameResolution` if the build tool cannot resolve a label;
/// other channel failures surface as `Query`.
pub fn resolve_targets(graph: &dyn BuildGraph, exported: &[Label]) -> Result<Vec<Target>, SynthError> {
  let mut targets = Vec::with_capacity(exported.len());

  for label in exported {
    let name = graph.resolve_name(label).map_err(|err| match err {
      QueryError::UnknownTarget { .. } => SynthError::NameResolution {
        label: label.clone(),
        source: err,
      },
      other => SynthError::Query(other),
    })?;

    let raw_dependencies = graph.dependencies(label)?;

    targets.push(Target {
      label: label.clone(),
      name,
      raw_dependencies,
      is_exported: label.has_opt_suffix(),
    });
  }

  Ok(targets)
}

/// Pass 2: remap every target's raw dependencies into the output
/// namespace.
///
/// Pure over the resolved target set; the query channel is no longer
/// involved.
pub fn remap_targets(
  targets: &[Target],
  internal_labels: &BTreeSet<String>,
) -> Result<Vec<OutputDeclaration>, SynthError> {
  let index = NameIndex::build(targets)?;

  let mut declarations = Vec::with_capacity(targets.len());
  for target in targets {
    debug!(target = %target.label, raw_deps = target.raw_dependencies.len(), "remapping dependencies");

    let mut dependencies = BTreeSet::new();
    for dep in &target.raw_dependencies {
      if is_internal(dep, internal_labels) {
        continue;
      }

      let dep_name = index
        .resolve(dep)
        .ok_or_else(|| SynthError::UnresolvedDependency {
          target: target.name.clone(),
          dependency: dep.to_string(),
        })?;

      // A module never lists itself; the bare variant of the target shows
      // up in its own optimized variant's edges.
      if dep_name != target.name {
        dependencies.insert(dep_name.to_string());
      }
    }

    declarations.push(OutputDeclaration {
      name: target.name.clone(),
      dependencies: dependencies.into_iter().collect(),
      artifacts: ArtifactPaths::default(),
    });
  }

  Ok(declarations)
}

/// Whether a dependency is one of the internal support targets.
///
/// Exact match after namespace stripping; the suffixed form of an internal
/// label is internal too.
fn is_internal(dep: &Label, internal_labels: &BTreeSet<String>) -> bool {
  let stripped = strip_namespace(dep.as_str());
  let bare = stripped.strip_suffix(OPT_SUFFIX).unwrap_or(stripped);
  internal_labels.contains(stripped) || internal_labels.contains(bare)
}

/// Label-to-name index over the full exported target set.
///
/// Indexes both the bare and suffixed form of every label, so a dependency
/// edge resolves to the same module name whichever variant the build tool
/// reports.
struct NameIndex {
  by_label: BTreeMap<String, String>,
}

impl NameIndex {
  fn build(targets: &[Target]) -> Result<Self, SynthError> {
    let mut by_label = BTreeMap::new();
    let mut by_name: BTreeMap<&str, &Label> = BTreeMap::new();

    for target in targets {
      if let Some(&first) = by_name.get(target.name.as_str()) {
        return Err(SynthError::DuplicateName {
          name: target.name.clone(),
          first: first.clone(),
          second: target.label.clone(),
        });
      }
      by_name.insert(&target.name, &target.label);

      by_label.insert(target.label.without_opt_suffix().as_str().to_string(), target.name.clone());
      by_label.insert(target.label.with_opt_suffix().as_str().to_string(), target.name.clone());
    }

    Ok(Self { by_label })
  }

  /// Resolve a dependency label to an exported module name, if any.
  fn resolve(&self, dep: &Label) -> Option<&str> {
    self.by_label.get(dep.as_str()).map(String::as_str)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::query::StaticGraph;

  fn label(s: &str) -> Label {
    Label::parse(s).unwrap()
  }

  fn internal(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
  }

  /// Graph with Core -> {Base, Codec, runtime-support} and Codec -> Base.
  fn sample_graph() -> (StaticGraph, Vec<Label>) {
    let mut graph = StaticGraph::new();
    graph.insert(
      label("//Sources/Core:Core_opt"),
      "Core",
      vec![
        label("//Sources/Base:Base_opt"),
        label("//Sources/Codec:Codec"),
        label("//Support:runtime-support"),
      ],
    );
    graph.insert(label("//Sources/Codec:Codec_opt"), "Codec", vec![label("//Sources/Base:Base")]);
    graph.insert(label("//Sources/Base:Base_opt"), "Base", vec![]);

    let exported = vec![
      label("//Sources/Core:Core_opt"),
      label("//Sources/Codec:Codec_opt"),
      label("//Sources/Base:Base_opt"),
    ];
    (graph, exported)
  }

  #[test]
  fn one_declaration_per_target_with_unique_names() {
    let (graph, exported) = sample_graph();
    let decls = synthesize(&graph, &exported, &internal(&["runtime-support"])).unwrap();

    assert_eq!(decls.len(), 3);
    let names: BTreeSet<_> = decls.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names.len(), 3);

    // Input order is preserved.
    assert_eq!(decls[0].name, "Core");
    assert_eq!(decls[1].name, "Codec");
    assert_eq!(decls[2].name, "Base");
  }

  #[test]
  fn resolved_targets_carry_the_reported_facts() {
    let (graph, exported) = sample_graph();
    let targets = resolve_targets(&graph, &exported).unwrap();

    assert_eq!(targets.len(), 3);
    assert_eq!(targets[0].name, "Core");
    assert!(targets[0].is_exported);
    assert_eq!(targets[0].raw_dependencies.len(), 3);
    assert!(targets[2].raw_dependencies.is_empty());
  }

  #[test]
  fn internal_deps_filtered_and_rest_sorted() {
    let (graph, exported) = sample_graph();
    let decls = synthesize(&graph, &exported, &internal(&["runtime-support"])).unwrap();

    // Core had three raw deps, one internal: exactly two remain, sorted.
    assert_eq!(decls[0].dependencies, vec!["Base".to_string(), "Codec".to_string()]);
    assert_eq!(decls[1].dependencies, vec!["Base".to_string()]);
    assert!(decls[2].dependencies.is_empty());
  }

  #[test]
  fn bare_and_suffixed_deps_resolve_to_same_name() {
    // Codec's dep on Base uses the bare form, Core's uses the suffixed
    // form; both must resolve to "Base".
    let (graph, exported) = sample_graph();
    let decls = synthesize(&graph, &exported, &internal(&["runtime-support"])).unwrap();

    assert!(decls[0].dependencies.contains(&"Base".to_string()));
    assert!(decls[1].dependencies.contains(&"Base".to_string()));
  }

  #[test]
  fn suffixed_internal_label_is_filtered() {
    let mut graph = StaticGraph::new();
    graph.insert(
      label("//Sources/Core:Core_opt"),
      "Core",
      vec![label("//Support:runtime-support_opt")],
    );
    let exported = vec![label("//Sources/Core:Core_opt")];

    let decls = synthesize(&graph, &exported, &internal(&["runtime-support"])).unwrap();
    assert!(decls[0].dependencies.is_empty());
  }

  #[test]
  fn internal_match_is_exact_not_substring() {
    // "Base" is internal; "BaseCompat" is a real exported module whose
    // name contains it. The dependency must survive.
    let mut graph = StaticGraph::new();
    graph.insert(
      label("//Sources/Core:Core_opt"),
      "Core",
      vec![label("//Sources/BaseCompat:BaseCompat_opt")],
    );
    graph.insert(label("//Sources/BaseCompat:BaseCompat_opt"), "BaseCompat", vec![]);
    let exported = vec![
      label("//Sources/Core:Core_opt"),
      label("//Sources/BaseCompat:BaseCompat_opt"),
    ];

    let decls = synthesize(&graph, &exported, &internal(&["Base"])).unwrap();
    assert_eq!(decls[0].dependencies, vec!["BaseCompat".to_string()]);
  }

  #[test]
  fn empty_input_is_rejected() {
    let graph = StaticGraph::new();
    let err = synthesize(&graph, &[], &BTreeSet::new()).unwrap_err();
    assert!(matches!(err, SynthError::EmptyInput));
  }

  #[test]
  fn unresolved_dependency_aborts_whole_run() {
    let mut graph = StaticGraph::new();
    graph.insert(label("//Sources/A:A_opt"), "A", vec![]);
    graph.insert(
      label("//Sources/B:B_opt"),
      "B",
      vec![label("//Sources/X:X_opt")],
    );
    let exported = vec![label("//Sources/A:A_opt"), label("//Sources/B:B_opt")];

    // X is neither exported nor internal: nothing is produced, not even
    // for A.
    let err = synthesize(&graph, &exported, &BTreeSet::new()).unwrap_err();
    match err {
      SynthError::UnresolvedDependency { target, dependency } => {
        assert_eq!(target, "B");
        assert_eq!(dependency, "//Sources/X:X_opt");
      }
      other => panic!("expected UnresolvedDependency, got {other:?}"),
    }
  }

  #[test]
  fn duplicate_names_are_rejected() {
    let mut graph = StaticGraph::new();
    graph.insert(label("//Sources/Foo:Foo_opt"), "Foo", vec![]);
    graph.insert(label("//Other/Foo:Foo2_opt"), "Foo", vec![]);
    let exported = vec![label("//Sources/Foo:Foo_opt"), label("//Other/Foo:Foo2_opt")];

    let err = synthesize(&graph, &exported, &BTreeSet::new()).unwrap_err();
    assert!(matches!(err, SynthError::DuplicateName { name, .. } if name == "Foo"));
  }

  #[test]
  fn name_comparison_is_case_sensitive() {
    let mut graph = StaticGraph::new();
    graph.insert(label("//Sources/Foo:Foo_opt"), "Foo", vec![]);
    graph.insert(label("//Other/foo:foo_opt"), "foo", vec![]);
    let exported = vec![label("//Sources/Foo:Foo_opt"), label("//Other/foo:foo_opt")];

    // "Foo" and "foo" are distinct names, so this succeeds.
    let decls = synthesize(&graph, &exported, &BTreeSet::new()).unwrap();
    assert_eq!(decls.len(), 2);
  }

  #[test]
  fn missing_target_is_name_resolution_error() {
    let graph = StaticGraph::new();
    let exported = vec![label("//Sources/Gone:Gone_opt")];

    let err = synthesize(&graph, &exported, &BTreeSet::new()).unwrap_err();
    assert!(matches!(err, SynthError::NameResolution { .. }));
  }

  #[test]
  fn synthesis_is_deterministic() {
    let (graph, exported) = sample_graph();
    let internal = internal(&["runtime-support"]);

    let first = synthesize(&graph, &exported, &internal).unwrap();
    let second = synthesize(&graph, &exported, &internal).unwrap();
    assert_eq!(first, second);
  }

  #[test]
  fn duplicate_raw_deps_are_deduplicated() {
    let mut graph = StaticGraph::new();
    graph.insert(
      label("//Sources/Core:Core_opt"),
      "Core",
      vec![
        label("//Sources/Base:Base"),
        label("//Sources/Base:Base_opt"),
      ],
    );
    graph.insert(label("//Sources/Base:Base_opt"), "Base", vec![]);
    let exported = vec![label("//Sources/Core:Core_opt"), label("//Sources/Base:Base_opt")];

    let decls = synthesize(&graph, &exported, &BTreeSet::new()).unwrap();
    assert_eq!(decls[0].dependencies, vec!["Base".to_string()]);
  }
}
