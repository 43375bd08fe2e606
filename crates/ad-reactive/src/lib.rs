//! Dependency graph of input signals and memoized derived values.
//!
//! Every derived value is a pure function of named upstream nodes. Setting an
//! input to a new value bumps its revision; a derived node recomputes only
//! when the revision of one of its dependencies moved since it last ran.
//!
//! # Evaluation
//!
//! - [`ReactiveGraph::get`] pulls: it refreshes just the ancestors of the
//!   requested node, in topological order.
//! - [`ReactiveGraph::propagate`] pushes: it refreshes every derived node and
//!   reports which ones changed, so a renderer can redraw only those.
//!
//! A derived node whose recomputed value equals its previous value keeps its
//! revision, which stops the change from travelling further downstream.

pub mod error;
pub mod graph;
pub mod node;

pub use error::{ReactiveError, ReactiveResult};
pub use graph::ReactiveGraph;
pub use node::{ComputeFn, NodeId};
