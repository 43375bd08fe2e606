//! Node identifiers and storage.

use core::fmt;

use crate::error::ReactiveResult;

/// Name of a node in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Computes a derived value from its dependencies, in declaration order.
pub type ComputeFn<V> = Box<dyn Fn(&[&V]) -> ReactiveResult<V>>;

pub(crate) enum NodeKind<V> {
    Input,
    Derived {
        deps: Vec<NodeId>,
        compute: ComputeFn<V>,
        /// Dependency revisions observed at the last computation.
        seen: Option<Vec<u64>>,
    },
}

pub(crate) struct Node<V> {
    pub kind: NodeKind<V>,
    pub value: Option<V>,
    pub revision: u64,
}

impl<V> Node<V> {
    pub fn input(value: V) -> Self {
        Self {
            kind: NodeKind::Input,
            value: Some(value),
            revision: 1,
        }
    }

    pub fn derived(deps: Vec<NodeId>, compute: ComputeFn<V>) -> Self {
        Self {
            kind: NodeKind::Derived {
                deps,
                compute,
                seen: None,
            },
            value: None,
            revision: 0,
        }
    }

    pub fn deps(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Input => &[],
            NodeKind::Derived { deps, .. } => deps,
        }
    }
}
