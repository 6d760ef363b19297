//! Implementation of the `swiftdist generate` command.
//!
//! Queries the build graph, synthesizes the declaration set, attaches
//! per-platform artifact paths, and writes the rendered file into the
//! artifact tree. The file is rendered fully in memory and written once,
//! so a failed run never leaves a partial artifact behind.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use swiftdist_lib::artifacts::attach_artifacts;
use swiftdist_lib::config::PackageConfig;
use swiftdist_lib::emit::render;
use swiftdist_lib::graph::DeclGraph;
use swiftdist_lib::query::{BazelGraph, BuildGraph};
use swiftdist_lib::synth::{Overrides, synthesize};

use crate::GraphArgs;
use crate::output::{print_stat, print_success};

pub struct GenerateParams {
  pub package: String,
  pub version: String,
  pub toolchain: String,
  pub min_platform: String,
  pub build: Option<u32>,
  pub primary_module: String,
  pub dry_run: bool,
}

pub fn cmd_generate(graph_args: &GraphArgs, artifacts: &Path, output: &Path, params: GenerateParams) -> Result<()> {
  if !artifacts.is_dir() {
    bail!("artifact tree not found: {}", artifacts.display());
  }

  let config = PackageConfig {
    version: params.version,
    toolchain: params.toolchain,
    min_platform_version: params.min_platform,
    build: params.build,
    primary_module: params.primary_module,
    internal_labels: graph_args.internal_labels.iter().cloned().collect(),
  };

  let graph = BazelGraph::new(
    graph_args.query_bin.clone(),
    graph_args.workspace.clone(),
    graph_args.pattern.clone(),
  );

  let exported = graph
    .exported_targets()
    .context("Failed to discover exported targets")?;
  info!(targets = exported.len(), "discovered exported targets");

  let mut declarations =
    synthesize(&graph, &exported, &config.internal_labels).context("Failed to synthesize declarations")?;

  DeclGraph::from_declarations(&declarations)
    .verify_acyclic()
    .context("Declaration set is inconsistent")?;

  let overrides = Overrides::for_primary_module(&config.primary_module);
  attach_artifacts(&mut declarations, artifacts, &overrides).context("Failed to attach artifact paths")?;

  let rendered = render(&declarations);

  if params.dry_run {
    print!("{}", rendered);
    return Ok(());
  }

  let output_path = artifacts.join(output);
  fs::write(&output_path, &rendered)
    .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

  print_success("Declaration file generated");
  print_stat("Modules", &declarations.len().to_string());
  print_stat("Artifact", &config.artifact_stem(&params.package));
  print_stat("Toolchain", &config.toolchain);
  print_stat("Min platform", &config.min_platform_version);
  print_stat("Output", &output_path.display().to_string());

  Ok(())
}
