//! Reactive graph structure and evaluation.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::error::{ReactiveError, ReactiveResult};
use crate::node::{ComputeFn, Node, NodeId, NodeKind};

/// Inputs plus derived values, evaluated lazily in dependency order.
///
/// Nodes may be declared in any order; dependencies are resolved when the
/// graph is first evaluated, and unknown names or cycles are reported then.
pub struct ReactiveGraph<V> {
    nodes: HashMap<NodeId, Node<V>>,
    /// Declaration order, used to keep evaluation order deterministic.
    declared: Vec<NodeId>,
    /// Cached topological order; cleared whenever a node is added.
    order: Option<Vec<NodeId>>,
}

impl<V: PartialEq> ReactiveGraph<V> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            declared: Vec::new(),
            order: None,
        }
    }

    fn insert(&mut self, id: NodeId, node: Node<V>) -> ReactiveResult<NodeId> {
        if self.nodes.contains_key(&id) {
            return Err(ReactiveError::DuplicateNode {
                node: id.as_str().to_string(),
            });
        }
        self.nodes.insert(id.clone(), node);
        self.declared.push(id.clone());
        self.order = None;
        Ok(id)
    }

    /// Add an input signal with its initial value.
    pub fn add_input(&mut self, id: impl Into<NodeId>, value: V) -> ReactiveResult<NodeId> {
        self.insert(id.into(), Node::input(value))
    }

    /// Add a value computed from `deps`.
    pub fn add_derived<F>(
        &mut self,
        id: impl Into<NodeId>,
        deps: &[&str],
        compute: F,
    ) -> ReactiveResult<NodeId>
    where
        F: Fn(&[&V]) -> ReactiveResult<V> + 'static,
    {
        let deps = deps.iter().map(|d| NodeId::from(*d)).collect();
        let compute: ComputeFn<V> = Box::new(compute);
        self.insert(id.into(), Node::derived(deps, compute))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(&NodeId::from(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: &NodeId) -> ReactiveResult<&Node<V>> {
        self.nodes.get(id).ok_or_else(|| ReactiveError::UnknownNode {
            node: id.as_str().to_string(),
        })
    }

    /// Replace an input's value. Returns whether the value changed; an equal
    /// value leaves the revision untouched and invalidates nothing.
    pub fn set_input(&mut self, id: &str, value: V) -> ReactiveResult<bool> {
        let id = NodeId::from(id);
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| ReactiveError::UnknownNode {
                node: id.as_str().to_string(),
            })?;
        if !matches!(node.kind, NodeKind::Input) {
            return Err(ReactiveError::NotAnInput {
                node: id.as_str().to_string(),
            });
        }
        if node.value.as_ref() == Some(&value) {
            return Ok(false);
        }
        node.value = Some(value);
        node.revision += 1;
        Ok(true)
    }

    /// Current value without recomputing anything.
    pub fn peek(&self, id: &str) -> Option<&V> {
        self.nodes.get(&NodeId::from(id))?.value.as_ref()
    }

    /// Number of times the node's value has changed.
    pub fn revision(&self, id: &str) -> ReactiveResult<u64> {
        Ok(self.node(&NodeId::from(id))?.revision)
    }

    /// Compute a topological evaluation order for the nodes.
    ///
    /// Every node appears after all of its dependencies.
    pub fn evaluation_order(&mut self) -> ReactiveResult<Vec<NodeId>> {
        if let Some(order) = &self.order {
            return Ok(order.clone());
        }

        let mut dependents: HashMap<&NodeId, Vec<&NodeId>> = HashMap::new();
        let mut in_degree: HashMap<&NodeId, usize> = HashMap::new();

        for id in &self.declared {
            in_degree.insert(id, 0);
        }

        for id in &self.declared {
            for dep in self.node(id)?.deps() {
                if !self.nodes.contains_key(dep) {
                    return Err(ReactiveError::UnknownDependency {
                        node: id.as_str().to_string(),
                        dependency: dep.as_str().to_string(),
                    });
                }
                dependents.entry(dep).or_default().push(id);
                if let Some(deg) = in_degree.get_mut(id) {
                    *deg += 1;
                }
            }
        }

        // Kahn's algorithm, seeded in declaration order
        let mut queue: VecDeque<&NodeId> = self
            .declared
            .iter()
            .filter(|id| in_degree.get(id).copied() == Some(0))
            .collect();
        let mut order = Vec::with_capacity(self.declared.len());

        while let Some(id) = queue.pop_front() {
            order.push(id.clone());
            if let Some(next) = dependents.get(id) {
                for &dependent in next {
                    if let Some(deg) = in_degree.get_mut(dependent) {
                        *deg -= 1;
                        if *deg == 0 {
                            queue.push_back(dependent);
                        }
                    }
                }
            }
        }

        if order.len() != self.declared.len() {
            let stuck: Vec<&str> = self
                .declared
                .iter()
                .filter(|id| !order.contains(id))
                .map(|id| id.as_str())
                .collect();
            return Err(ReactiveError::Cycle {
                what: format!("cycle among nodes: {}", stuck.join(", ")),
            });
        }

        self.order = Some(order.clone());
        Ok(order)
    }

    /// Validate the graph structure.
    pub fn validate(&mut self) -> ReactiveResult<()> {
        self.evaluation_order().map(|_| ())
    }

    fn ancestors(&self, id: &NodeId) -> ReactiveResult<HashSet<NodeId>> {
        let mut seen = HashSet::new();
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            stack.extend(self.node(&current)?.deps().iter().cloned());
        }
        Ok(seen)
    }

    /// Recompute one derived node if a dependency moved. Its dependencies
    /// must already be fresh. Returns whether the value changed.
    fn refresh(&mut self, id: &NodeId) -> ReactiveResult<bool> {
        let current: Vec<u64> = match &self.node(id)?.kind {
            NodeKind::Input => return Ok(false),
            NodeKind::Derived { deps, seen, .. } => {
                let revisions = deps
                    .iter()
                    .map(|d| self.node(d).map(|n| n.revision))
                    .collect::<ReactiveResult<Vec<u64>>>()?;
                if seen.as_ref() == Some(&revisions) {
                    return Ok(false);
                }
                revisions
            }
        };

        let Some(mut node) = self.nodes.remove(id) else {
            return Err(ReactiveError::UnknownNode {
                node: id.as_str().to_string(),
            });
        };

        debug!(node = %id, "recomputing derived value");
        let computed = match &node.kind {
            NodeKind::Input => Ok(None),
            NodeKind::Derived { deps, compute, .. } => deps
                .iter()
                .map(|d| {
                    self.nodes
                        .get(d)
                        .and_then(|n| n.value.as_ref())
                        .ok_or_else(|| ReactiveError::Compute {
                            node: id.as_str().to_string(),
                            what: format!("dependency '{}' has no value", d),
                        })
                })
                .collect::<ReactiveResult<Vec<&V>>>()
                .and_then(|values| compute(values.as_slice()))
                .map(Some),
        };

        let result = match computed {
            Ok(Some(value)) => {
                let changed = node.value.as_ref() != Some(&value);
                if changed {
                    node.value = Some(value);
                    node.revision += 1;
                }
                if let NodeKind::Derived { seen, .. } = &mut node.kind {
                    *seen = Some(current);
                }
                Ok(changed)
            }
            Ok(None) => Ok(false),
            Err(err) => Err(err),
        };

        self.nodes.insert(id.clone(), node);
        result
    }

    /// Value of `id`, recomputing stale ancestors first.
    pub fn get(&mut self, id: &str) -> ReactiveResult<&V> {
        let target = NodeId::from(id);
        let order = self.evaluation_order()?;
        let needed = self.ancestors(&target)?;
        for node_id in order.iter().filter(|n| needed.contains(*n)) {
            self.refresh(node_id)?;
        }
        self.node(&target)?
            .value
            .as_ref()
            .ok_or_else(|| ReactiveError::Compute {
                node: id.to_string(),
                what: "no value".to_string(),
            })
    }

    /// Bring every derived node up to date. Returns the derived nodes whose
    /// value changed, in evaluation order.
    pub fn propagate(&mut self) -> ReactiveResult<Vec<NodeId>> {
        let order = self.evaluation_order()?;
        let mut changed = Vec::new();
        for id in order {
            if self.refresh(&id)? {
                changed.push(id);
            }
        }
        Ok(changed)
    }
}

impl<V: PartialEq> Default for ReactiveGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}
