#![forbid(unsafe_code)]

//! Sunburst hierarchy model (headless).
//!
//! - [`Node`]: the immutable input tree (`{name, children?, value?}`)
//! - [`build_weighted_tree`]: leaf-count weights with heaviest-first child order
//! - [`ConfigOverrides`]: dotted-path JSON overrides consumed by the renderer

pub mod config;
pub mod dataset;
pub mod error;
pub mod hierarchy;

pub use config::ConfigOverrides;
pub use error::{Error, Result};
pub use hierarchy::{Node, NodeId, WeightedNode, WeightedTree, build_weighted_tree};

#[cfg(test)]
mod tests;
