//! Node / edge value records and the graph that owns them.

use std::collections::HashSet;

use tracing::debug;

use crate::errors::GraphError;

/// A labelled point in the diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Identifier, unique within its graph.
    pub id: String,
    /// Display text. May contain line breaks and non-ASCII symbols.
    pub label: String,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A directed connection between two nodes, optionally labelled with the
/// condition under which it is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: None,
        }
    }

    pub fn labelled(
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: Some(label.into()),
        }
    }
}

/// A static directed graph.
///
/// Nodes are kept in insertion order so serialization is deterministic.
/// Edge order is draw order only; it carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    name: String,
    attrs: Vec<(String, String)>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Create an empty graph called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Assemble a graph from raw parts without checking it.
    ///
    /// Call [`validate`](Self::validate) before relying on the invariants.
    pub fn from_parts(name: impl Into<String>, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            nodes,
            edges,
        }
    }

    /// Set a graph-level attribute (e.g. `size`), replacing any earlier value.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.attrs.push((key, value)),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node by identifier.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// All edges leaving `id`, in draw order.
    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == id)
    }

    /// Add a node. Fails if the identifier is already taken.
    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<(), GraphError> {
        let node = Node::new(id, label);
        if self.node(&node.id).is_some() {
            return Err(GraphError::DuplicateNode(node.id));
        }
        debug!(id = %node.id, "added node");
        self.nodes.push(node);
        Ok(())
    }

    /// Add an edge. Both endpoints must already be present.
    pub fn add_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        label: Option<&str>,
    ) -> Result<(), GraphError> {
        let edge = Edge {
            source: source.into(),
            target: target.into(),
            label: label.map(str::to_owned),
        };
        for endpoint in [&edge.source, &edge.target] {
            if self.node(endpoint).is_none() {
                return Err(unknown_node(&edge, endpoint));
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Check that identifiers are unique and every edge endpoint exists.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(unknown_node(edge, endpoint));
                }
            }
        }
        Ok(())
    }
}

fn unknown_node(edge: &Edge, missing: &str) -> GraphError {
    GraphError::UnknownNode {
        source_id: edge.source.clone(),
        target_id: edge.target.clone(),
        missing: missing.to_owned(),
    }
}
