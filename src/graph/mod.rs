//! Undirected graph container.
//!
//! A [`Graph`] owns its [`Node`]s; nodes refer back to the graph only
//! through the [`GraphId`] embedded in every [`NodeId`]. Graphs are
//! populated once, explicitly or with [`Graph::fill_randomly`], and then
//! locked for the lifetime of the object.
//!
//! # Key Types
//!
//! - [`Graph`]: nodes, key index, edges and the lock latch
//! - [`Node`], [`Edge`], [`NodeId`], [`NodeSet`]
//! - [`GraphRecord`]: persistence form (keys and key pairs)

mod container;
mod generator;
mod record;
mod types;

pub use container::Graph;
pub use record::GraphRecord;
pub use types::{Edge, GraphId, Node, NodeId, NodeSet};
