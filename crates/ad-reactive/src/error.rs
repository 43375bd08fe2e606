//! Error types for graph wiring and evaluation.

use thiserror::Error;

/// Result type for reactive graph operations.
pub type ReactiveResult<T> = Result<T, ReactiveError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReactiveError {
    /// A node with this name already exists.
    #[error("Node '{node}' already exists")]
    DuplicateNode { node: String },

    /// The requested node does not exist.
    #[error("Unknown node '{node}'")]
    UnknownNode { node: String },

    /// A derived node depends on a node that was never added.
    #[error("Node '{node}' depends on unknown node '{dependency}'")]
    UnknownDependency { node: String, dependency: String },

    /// Derived nodes form a cycle.
    #[error("Graph topology error: {what}")]
    Cycle { what: String },

    /// `set_input` was called on a derived node.
    #[error("Node '{node}' is not an input")]
    NotAnInput { node: String },

    /// A node holds a value of a different kind than the caller expected.
    #[error("Node '{node}' does not hold a {expected}")]
    TypeMismatch { node: String, expected: &'static str },

    /// A compute function failed.
    #[error("Computing '{node}' failed: {what}")]
    Compute { node: String, what: String },
}
