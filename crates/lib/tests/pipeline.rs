//! End-to-end pipeline tests: query, synthesize, attach, render.
//!
//! Uses the in-memory build graph so the whole transform runs against a
//! known target set, including a golden render of the final artifact.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use swiftdist_lib::artifacts::attach_artifacts;
use swiftdist_lib::emit::render;
use swiftdist_lib::graph::DeclGraph;
use swiftdist_lib::label::Label;
use swiftdist_lib::query::{BuildGraph, StaticGraph};
use swiftdist_lib::synth::{Overrides, synthesize};

fn label(s: &str) -> Label {
  Label::parse(s).unwrap()
}

/// Core depends on Base plus an internal support target; Base is a leaf.
fn sample_graph() -> StaticGraph {
  let mut graph = StaticGraph::new();
  graph.insert(
    label("//Sources/Core:Core_opt"),
    "Core",
    vec![label("//Sources/Base:Base_opt"), label("//Support:runtime-support")],
  );
  graph.insert(label("//Sources/Base:Base_opt"), "Base", vec![]);
  graph
}

fn write_platform(root: &Path, platform: &str, modules: &[&str]) {
  let dir = root.join(platform);
  fs::create_dir_all(&dir).unwrap();
  for module in modules {
    fs::write(dir.join(format!("lib{module}.a")), "archive").unwrap();
    fs::write(dir.join(format!("{module}.swiftdoc")), "doc").unwrap();
    fs::write(dir.join(format!("{module}.swiftinterface")), "interface").unwrap();
    fs::write(dir.join(format!("{module}.private.swiftinterface")), "private").unwrap();
  }
}

#[test]
fn full_pipeline_produces_golden_artifact() {
  let graph = sample_graph();
  let exported = graph.exported_targets().unwrap();
  let internal: BTreeSet<String> = ["runtime-support".to_string()].into();

  let mut declarations = synthesize(&graph, &exported, &internal).unwrap();
  DeclGraph::from_declarations(&declarations).verify_acyclic().unwrap();

  let temp = tempfile::tempdir().unwrap();
  write_platform(temp.path(), "macos_arm64", &["Core", "Base"]);

  let overrides = Overrides::for_primary_module("Core");
  attach_artifacts(&mut declarations, temp.path(), &overrides).unwrap();

  let rendered = render(&declarations);

  let expected = "\
# Generated by swiftdist. Do not edit.

load(\"@build_bazel_rules_swift//swift:swift.bzl\", \"swift_import\")

swift_import(
    name = \"Base\",
    deps = [],
    archives = {
        \"macos_arm64\": \"macos_arm64/libBase.a\",
    },
    swiftdoc = {
        \"macos_arm64\": \"macos_arm64/Base.swiftdoc\",
    },
    swiftinterface = {
        \"macos_arm64\": \"macos_arm64/Base.swiftinterface\",
    },
)

swift_import(
    name = \"Core\",
    deps = [
        \":Base\",
    ],
    archives = {
        \"macos_arm64\": \"macos_arm64/libCore.a\",
    },
    swiftdoc = {
        \"macos_arm64\": \"macos_arm64/Core.swiftdoc\",
    },
    swiftinterface = {
        \"macos_arm64\": \"macos_arm64/Core.private.swiftinterface\",
    },
)
";
  assert_eq!(rendered, expected);
}

#[test]
fn pipeline_is_idempotent() {
  let graph = sample_graph();
  let exported = graph.exported_targets().unwrap();
  let internal: BTreeSet<String> = ["runtime-support".to_string()].into();

  let temp = tempfile::tempdir().unwrap();
  write_platform(temp.path(), "ios_arm64", &["Core", "Base"]);
  write_platform(temp.path(), "macos_arm64", &["Core", "Base"]);

  let overrides = Overrides::for_primary_module("Core");

  let run = || {
    let mut decls = synthesize(&graph, &exported, &internal).unwrap();
    attach_artifacts(&mut decls, temp.path(), &overrides).unwrap();
    render(&decls)
  };

  assert_eq!(run(), run());
}

#[test]
fn internal_labels_never_reach_the_artifact() {
  let graph = sample_graph();
  let exported = graph.exported_targets().unwrap();
  let internal: BTreeSet<String> = ["runtime-support".to_string()].into();

  let declarations = synthesize(&graph, &exported, &internal).unwrap();
  let rendered = render(&declarations);

  assert!(!rendered.contains("runtime-support"));
}
