//! Name-keyed artifact overrides.
//!
//! Some modules receive non-default artifact variants. The only rule today
//! is that the primary module's interface file comes from the private
//! variant instead of the default one. Keeping this as an explicit table
//! rather than inline conditionals makes future special cases additive.

use std::collections::BTreeMap;

/// Which interface artifact variant a module receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterfaceVariant {
  /// The default `.swiftinterface` file.
  #[default]
  Default,
  /// The `.private.swiftinterface` file.
  Private,
}

/// Per-module artifact overrides, keyed by module name.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  interface: BTreeMap<String, InterfaceVariant>,
}

impl Overrides {
  /// No overrides at all.
  pub fn none() -> Self {
    Self::default()
  }

  /// The standard table: the primary module gets the private interface.
  pub fn for_primary_module(primary: &str) -> Self {
    let mut overrides = Self::default();
    overrides.set_interface(primary, InterfaceVariant::Private);
    overrides
  }

  /// Set the interface variant for one module.
  pub fn set_interface(&mut self, module: &str, variant: InterfaceVariant) {
    self.interface.insert(module.to_string(), variant);
  }

  /// The interface variant for a module, defaulting to [`InterfaceVariant::Default`].
  pub fn interface_variant(&self, module: &str) -> InterfaceVariant {
    self.interface.get(module).copied().unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_variant_for_unknown_module() {
    let overrides = Overrides::none();
    assert_eq!(overrides.interface_variant("Core"), InterfaceVariant::Default);
  }

  #[test]
  fn primary_module_gets_private_interface() {
    let overrides = Overrides::for_primary_module("Core");
    assert_eq!(overrides.interface_variant("Core"), InterfaceVariant::Private);
    assert_eq!(overrides.interface_variant("Codec"), InterfaceVariant::Default);
  }
}
