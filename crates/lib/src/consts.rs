//! Fixed naming conventions shared across the crate.

/// Suffix on target names that marks the compiled/optimized variant of a
/// module. `//Sources/Foo:Foo_opt` and `//Sources/Foo:Foo` are the same
/// logical module.
pub const OPT_SUFFIX: &str = "_opt";

/// Rule kind emitted for each declaration in the generated file.
pub const DECL_KIND: &str = "swift_import";

/// File extension of the default module interface artifact.
pub const INTERFACE_EXT: &str = "swiftinterface";

/// File extension of the alternate ("private") module interface artifact,
/// used for modules listed in the override table.
pub const PRIVATE_INTERFACE_EXT: &str = "private.swiftinterface";

/// File extension of the module documentation artifact.
pub const DOC_EXT: &str = "swiftdoc";

/// File extension of the static archive artifact.
pub const ARCHIVE_EXT: &str = "a";

/// Header written at the top of every generated file.
pub const GENERATED_HEADER: &str = "# Generated by swiftdist. Do not edit.";
