//! swiftdist-lib: Core types and logic for swiftdist
//!
//! This crate provides the fundamental types used throughout swiftdist:
//! - `Label`: build-tool target identifiers and their naming conventions
//! - `Target` / `OutputDeclaration`: the units discovered via introspection
//!   and the declarations emitted for them
//! - `synthesize`: the dependency remapping pass from build graph to
//!   output namespace
//! - `emit`: deterministic rendering of the generated configuration file

pub mod artifacts;
pub mod config;
pub mod consts;
pub mod emit;
pub mod graph;
pub mod label;
pub mod query;
pub mod synth;
pub mod target;
