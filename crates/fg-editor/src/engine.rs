//! Document engine: the single owner of the current diagram.
//!
//! Every change goes through [`DocumentEngine::apply_mutation`]. Each applied
//! mutation bumps the revision and raises the render flag, which the host
//! polls to know when to redraw. The engine does no validation; callers hand
//! it well-formed nodes and edges.

use fg_core::id::NodeId;
use fg_core::model::*;
use fg_core::viewport::{Point, Viewport};

/// A change to the document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentMutation {
    /// Append a node (drag-drop placement).
    AddNode { node: Box<Node> },
    /// Append an edge between two nodes (connect gesture).
    Connect {
        source: NodeId,
        target: NodeId,
        label: Option<String>,
    },
    /// Replace every node (import, generation).
    ReplaceNodes { nodes: Vec<Node> },
    /// Replace every edge (import, generation).
    ReplaceEdges { edges: Vec<Edge> },
    /// Restore pan/zoom.
    SetViewport { viewport: Viewport },
    /// Write back a position after the canvas finished dragging a node.
    MoveNode { id: NodeId, position: Point },
    /// Interactive deletion; edges touching the node go with it.
    RemoveNode { id: NodeId },
    RemoveEdge { id: NodeId },
    /// Wipe all nodes and edges.
    Clear,
}

/// Edge id the canvas assigns on a connect gesture.
pub fn connect_edge_id(source: NodeId, target: NodeId) -> NodeId {
    NodeId::intern(&format!("reactflow__edge-{source}-{target}"))
}

pub struct DocumentEngine {
    /// The current document (single source of truth).
    pub document: Document,

    /// Incremented on every applied mutation.
    revision: u64,

    /// Set when the document changed since the host last rendered.
    render_dirty: bool,
}

impl Default for DocumentEngine {
    fn default() -> Self {
        Self::new(Document::seed())
    }
}

impl DocumentEngine {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            revision: 0,
            render_dirty: true,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply a mutation. Returns `true` if the document changed.
    pub fn apply_mutation(&mut self, mutation: DocumentMutation) -> bool {
        let changed = match mutation {
            DocumentMutation::AddNode { node } => {
                self.document.push_node(*node);
                true
            }
            DocumentMutation::Connect {
                source,
                target,
                label,
            } => {
                // The canvas ignores a second edge between the same pair.
                let exists = self
                    .document
                    .edges
                    .iter()
                    .any(|e| e.source == source && e.target == target);
                if exists {
                    false
                } else {
                    let mut edge = Edge::new(connect_edge_id(source, target), source, target);
                    edge.kind = Some("smoothstep".to_string());
                    edge.animated = true;
                    edge.label = label;
                    self.document.push_edge(edge);
                    true
                }
            }
            DocumentMutation::ReplaceNodes { nodes } => {
                self.document.replace_nodes(nodes);
                true
            }
            DocumentMutation::ReplaceEdges { edges } => {
                self.document.replace_edges(edges);
                true
            }
            DocumentMutation::SetViewport { viewport } => {
                let changed = self.document.viewport != viewport;
                self.document.set_viewport(viewport);
                changed
            }
            DocumentMutation::MoveNode { id, position } => match self.document.node_mut(id) {
                Some(node) if node.position != position => {
                    node.position = position;
                    true
                }
                _ => false,
            },
            DocumentMutation::RemoveNode { id } => {
                let before = self.document.nodes.len();
                self.document.nodes.retain(|n| n.id != id);
                let removed = self.document.nodes.len() != before;
                if removed {
                    self.document
                        .edges
                        .retain(|e| e.source != id && e.target != id);
                }
                removed
            }
            DocumentMutation::RemoveEdge { id } => {
                let before = self.document.edges.len();
                self.document.edges.retain(|e| e.id != id);
                self.document.edges.len() != before
            }
            DocumentMutation::Clear => {
                let had_content = !self.document.is_empty();
                self.document.clear();
                had_content
            }
        };

        if changed {
            self.revision += 1;
            self.render_dirty = true;
        }
        changed
    }

    /// Apply several mutations; `true` if any of them changed the document.
    pub fn apply_all(&mut self, mutations: impl IntoIterator<Item = DocumentMutation>) -> bool {
        mutations
            .into_iter()
            .fold(false, |changed, m| self.apply_mutation(m) || changed)
    }

    /// Whether the host should redraw. Clears the flag.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::intern(s)
    }

    #[test]
    fn connect_matches_canvas_edge_shape() {
        let mut engine = DocumentEngine::default();
        assert!(engine.apply_mutation(DocumentMutation::Connect {
            source: id("1"),
            target: id("2"),
            label: None,
        }));
        let edge = &engine.document.edges[0];
        assert_eq!(edge.id.as_str(), "reactflow__edge-1-2");
        assert_eq!(edge.kind.as_deref(), Some("smoothstep"));
        assert!(edge.animated);
    }

    #[test]
    fn duplicate_connect_is_ignored() {
        let mut engine = DocumentEngine::default();
        let connect = DocumentMutation::Connect {
            source: id("1"),
            target: id("1"),
            label: None,
        };
        assert!(engine.apply_mutation(connect.clone()));
        assert!(!engine.apply_mutation(connect));
        assert_eq!(engine.document.edges.len(), 1);
    }

    #[test]
    fn remove_node_drops_its_edges() {
        let mut engine = DocumentEngine::default();
        engine.apply_mutation(DocumentMutation::AddNode {
            node: Box::new(Node::new(id("b"), NodeKind::End, Point::new(0.0, 100.0), "End")),
        });
        engine.apply_mutation(DocumentMutation::Connect {
            source: id("1"),
            target: id("b"),
            label: None,
        });
        assert!(engine.apply_mutation(DocumentMutation::RemoveNode { id: id("b") }));
        assert_eq!(engine.document.nodes.len(), 1);
        assert!(engine.document.edges.is_empty());
    }

    #[test]
    fn revision_and_render_flag_track_changes() {
        let mut engine = DocumentEngine::default();
        assert!(engine.take_render_request());
        assert!(!engine.take_render_request());

        let rev = engine.revision();
        assert!(!engine.apply_mutation(DocumentMutation::MoveNode {
            id: id("missing"),
            position: Point::new(1.0, 1.0),
        }));
        assert_eq!(engine.revision(), rev);
        assert!(!engine.take_render_request());

        assert!(engine.apply_mutation(DocumentMutation::MoveNode {
            id: id("1"),
            position: Point::new(10.0, 10.0),
        }));
        assert_eq!(engine.revision(), rev + 1);
        assert!(engine.take_render_request());
    }

    #[test]
    fn clear_on_empty_document_is_not_a_change() {
        let mut engine = DocumentEngine::new(Document::empty());
        assert!(!engine.apply_mutation(DocumentMutation::Clear));
        assert!(engine.document.is_empty());
    }
}
