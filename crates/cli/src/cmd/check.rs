//! Implementation of the `swiftdist check` command.
//!
//! Synthesizes the declaration set without touching artifacts and reports
//! it, so a broken upstream graph is caught before a packaging run.

use anyhow::{Context, Result};

use swiftdist_lib::graph::DeclGraph;
use swiftdist_lib::query::{BazelGraph, BuildGraph};
use swiftdist_lib::synth::synthesize;

use crate::GraphArgs;
use crate::output::{OutputFormat, print_info, print_json, print_stat, print_success};

pub fn cmd_check(graph_args: &GraphArgs, format: OutputFormat) -> Result<()> {
  let graph = BazelGraph::new(
    graph_args.query_bin.clone(),
    graph_args.workspace.clone(),
    graph_args.pattern.clone(),
  );

  let exported = graph
    .exported_targets()
    .context("Failed to discover exported targets")?;

  let internal = graph_args.internal_labels.iter().cloned().collect();
  let declarations = synthesize(&graph, &exported, &internal).context("Failed to synthesize declarations")?;

  let decl_graph = DeclGraph::from_declarations(&declarations);
  let order = decl_graph
    .topological_order()
    .context("Declaration set is inconsistent")?;

  if format.is_json() {
    return print_json(&declarations);
  }

  print_success(&format!("{} declaration(s), graph is consistent", declarations.len()));
  for decl in &declarations {
    print_stat(
      &decl.name,
      &format!(
        "{} dep(s), {} dependent(s)",
        decl.dependencies.len(),
        decl_graph.dependent_count(&decl.name)
      ),
    );
  }

  print_info(&format!("Build order: {}", order.join(" → ")));

  Ok(())
}
