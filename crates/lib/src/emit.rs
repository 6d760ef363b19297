//! Rendering of the generated configuration file.
//!
//! Declarations are rendered in BUILD-file syntax through a small builder
//! whose operations mirror the external configuration-rewriting utility:
//! create a declaration of a given kind, then set fields. String values
//! are implicitly double-quoted.
//!
//! Field names and order are fixed by the consuming toolchain's schema:
//! `name`, `deps`, `archives`, `swiftdoc`, `swiftinterface`. Rendering is
//! byte-for-byte deterministic for identical inputs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::consts::{DECL_KIND, GENERATED_HEADER};
use crate::target::OutputDeclaration;

/// `load()` statement pulling in the declaration kind.
const LOAD_STATEMENT: &str = r#"load("@build_bazel_rules_swift//swift:swift.bzl", "swift_import")"#;

/// Builds one declaration's text, field by field.
pub struct DeclBuilder {
  kind: String,
  fields: Vec<String>,
}

impl DeclBuilder {
  /// Start a declaration of the given kind with its `name` field set.
  pub fn new(kind: &str, name: &str) -> Self {
    let mut builder = Self {
      kind: kind.to_string(),
      fields: Vec::new(),
    };
    builder.set_string("name", name);
    builder
  }

  /// Set a string-valued field. The value is quoted.
  pub fn set_string(&mut self, field: &str, value: &str) -> &mut Self {
    self.fields.push(format!("    {} = {},", field, quote(value)));
    self
  }

  /// Set a list-of-strings field. Each element is quoted; an empty list
  /// renders inline as `[]`.
  pub fn set_string_list(&mut self, field: &str, values: &[String]) -> &mut Self {
    if values.is_empty() {
      self.fields.push(format!("    {} = [],", field));
      return self;
    }

    let mut lines = vec![format!("    {} = [", field)];
    for value in values {
      lines.push(format!("        {},", quote(value)));
    }
    lines.push("    ],".to_string());
    self.fields.push(lines.join("\n"));
    self
  }

  /// Set a string-to-path dict field. Keys and values are quoted; an
  /// empty dict renders inline as `{}`.
  pub fn set_path_dict(&mut self, field: &str, map: &BTreeMap<String, PathBuf>) -> &mut Self {
    if map.is_empty() {
      self.fields.push(format!("    {} = {{}},", field));
      return self;
    }

    let mut lines = vec![format!("    {} = {{", field)];
    for (key, path) in map {
      lines.push(format!("        {}: {},", quote(key), quote(&path.display().to_string())));
    }
    lines.push("    },".to_string());
    self.fields.push(lines.join("\n"));
    self
  }

  /// Finish the declaration.
  pub fn build(self) -> String {
    let mut out = format!("{}(\n", self.kind);
    for field in &self.fields {
      out.push_str(field);
      out.push('\n');
    }
    out.push(')');
    out
  }
}

/// Quote a string value for the output syntax.
fn quote(value: &str) -> String {
  format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Render one declaration in the fixed field order.
pub fn render_declaration(decl: &OutputDeclaration) -> String {
  let deps: Vec<String> = decl.dependencies.iter().map(|name| format!(":{name}")).collect();

  let mut builder = DeclBuilder::new(DECL_KIND, &decl.name);
  builder
    .set_string_list("deps", &deps)
    .set_path_dict("archives", &decl.artifacts.archives)
    .set_path_dict("swiftdoc", &decl.artifacts.swiftdoc)
    .set_path_dict("swiftinterface", &decl.artifacts.swiftinterface);
  builder.build()
}

/// Render the whole artifact: header, load statement, then one
/// declaration per target in input order.
pub fn render(declarations: &[OutputDeclaration]) -> String {
  let mut out = String::new();
  out.push_str(GENERATED_HEADER);
  out.push_str("\n\n");
  out.push_str(LOAD_STATEMENT);
  out.push('\n');

  for decl in declarations {
    out.push('\n');
    out.push_str(&render_declaration(decl));
    out.push('\n');
  }

  out
}
