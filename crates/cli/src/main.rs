use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use output::OutputFormat;

/// swiftdist - generate packaging declarations from a build graph
#[derive(Parser)]
#[command(name = "swiftdist")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

/// Query options shared by all subcommands.
#[derive(clap::Args)]
pub struct GraphArgs {
  /// Build workspace directory to query
  #[arg(long, default_value = ".")]
  pub workspace: PathBuf,

  /// Query binary to invoke
  #[arg(long, default_value = "bazel")]
  pub query_bin: String,

  /// Universe pattern for target discovery
  #[arg(long, default_value = "//Sources/...")]
  pub pattern: String,

  /// Support target excluded from the public surface (repeatable)
  #[arg(long = "internal", value_name = "NAME")]
  pub internal_labels: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate the packaging declaration file
  Generate {
    #[command(flatten)]
    graph: GraphArgs,

    /// Root of the per-platform artifact tree
    #[arg(long)]
    artifacts: PathBuf,

    /// Output file, written inside the artifact tree
    #[arg(long, default_value = "BUILD")]
    output: PathBuf,

    /// Name of the packaged library
    #[arg(long, default_value = "swiftdist")]
    package: String,

    /// Library version identifier
    #[arg(long = "lib-version")]
    version: String,

    /// Toolchain version identifier
    #[arg(long)]
    toolchain: String,

    /// Minimum platform version
    #[arg(long, default_value = "13.0")]
    min_platform: String,

    /// Optional numeric build suffix
    #[arg(long)]
    build: Option<u32>,

    /// Module that receives the private interface variant
    #[arg(long, default_value = "Core")]
    primary_module: String,

    /// Print the rendered file instead of writing it
    #[arg(long)]
    dry_run: bool,
  },

  /// Validate the declaration set without touching artifacts
  Check {
    #[command(flatten)]
    graph: GraphArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
  },
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Generate {
      graph,
      artifacts,
      output,
      package,
      version,
      toolchain,
      min_platform,
      build,
      primary_module,
      dry_run,
    } => cmd::cmd_generate(
      &graph,
      &artifacts,
      &output,
      cmd::GenerateParams {
        package,
        version,
        toolchain,
        min_platform,
        build,
        primary_module,
        dry_run,
      },
    ),
    Commands::Check { graph, format } => cmd::cmd_check(&graph, format),
  };

  if let Err(err) = result {
    output::print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}
