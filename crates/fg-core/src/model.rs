//! Diagram document model.
//!
//! A document is a flat, ordered list of nodes and edges plus the canvas
//! viewport. The shapes mirror the JSON the browser canvas produces, so a
//! document can be exported and imported without translation. Fields the
//! canvas adds that this crate does not interpret (selection flags, handle
//! ids, measured absolute positions) are kept in `extra` maps and written
//! back unchanged.
//!
//! No validation happens here; see [`crate::lint`] for diagnostics.

use crate::id::NodeId;
use crate::viewport::{Point, Rect, Viewport};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use smallvec::SmallVec;

/// Size assumed for nodes the canvas has not measured yet.
pub const DEFAULT_NODE_WIDTH: f64 = 150.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 40.0;

/// Short ordered list of UML member strings.
pub type Members = SmallVec<[String; 4]>;

// ─── Colors ──────────────────────────────────────────────────────────────

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

// ─── Node kinds ──────────────────────────────────────────────────────────

/// The node type tag. The wire names are the ones the canvas registers
/// renderers for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// A process step (`default`).
    #[default]
    Process,
    /// Flow entry point (`input`).
    Start,
    /// Flow exit point (`output`).
    End,
    /// Conditional branch (`decision`).
    Decision,
    /// UML class box with attributes and methods (`umlClass`).
    UmlClass,
    /// Any other tag. Kept verbatim so foreign documents survive a round-trip.
    Other(String),
}

impl NodeKind {
    /// Parse a wire tag. Never fails; unknown tags become [`NodeKind::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "default" => Self::Process,
            "input" => Self::Start,
            "output" => Self::End,
            "decision" => Self::Decision,
            "umlClass" => Self::UmlClass,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::Process => "default",
            Self::Start => "input",
            Self::End => "output",
            Self::Decision => "decision",
            Self::UmlClass => "umlClass",
            Self::Other(tag) => tag,
        }
    }

    /// Whether this tag is one of the five kinds the editor renders.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Fill and border assigned at placement time. Decision and class nodes
    /// have their own renderers and get no inline style.
    pub fn default_style(&self) -> Option<NodeStyle> {
        let (fill, border) = match self {
            Self::Start => (Color::rgb(0xD1, 0xFA, 0xE5), Color::rgb(0x10, 0xB9, 0x81)),
            Self::End => (Color::rgb(0xFE, 0xE2, 0xE2), Color::rgb(0xEF, 0x44, 0x44)),
            Self::Process => (Color::rgb(0xFF, 0xFF, 0xFF), Color::rgb(0x33, 0x41, 0x55)),
            _ => return None,
        };
        Some(NodeStyle {
            background_color: Some(fill.to_hex()),
            border_color: Some(border.to_hex()),
            extra: Map::new(),
        })
    }

    /// Swatch used for this kind in the minimap.
    pub fn minimap_color(&self) -> Color {
        match self {
            Self::Start => Color::rgb(0x10, 0xB9, 0x81),
            Self::End => Color::rgb(0xEF, 0x44, 0x44),
            Self::Decision => Color::rgb(0xF5, 0x9E, 0x0B),
            _ => Color::rgb(0x64, 0x74, 0x8B),
        }
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NodeKind::from_tag(&s))
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// Payload rendered inside a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default)]
    pub label: String,
    /// UML attributes, meaningful only for [`NodeKind::UmlClass`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Members>,
    /// UML methods, meaningful only for [`NodeKind::UmlClass`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<Members>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeData {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }
}

/// Inline style the canvas applies to the node container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A typed, positioned diagram element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub position: Point,
    #[serde(default)]
    pub data: NodeData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
    /// Measured size reported by the canvas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, position: Point, label: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            position,
            data: NodeData::label(label),
            style: None,
            width: None,
            height: None,
            extra: Map::new(),
        }
    }

    /// Bounding box in flow coordinates, falling back to the default size
    /// for unmeasured nodes.
    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.position.x,
            y: self.position.y,
            width: self.width.unwrap_or(DEFAULT_NODE_WIDTH),
            height: self.height.unwrap_or(DEFAULT_NODE_HEIGHT),
        }
    }
}

// ─── Edges ───────────────────────────────────────────────────────────────

fn is_false(b: &bool) -> bool {
    !*b
}

/// A directed connection between two node ids. Self-loops are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: NodeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Path style understood by the canvas (e.g. `smoothstep`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub animated: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    pub fn new(id: NodeId, source: NodeId, target: NodeId) -> Self {
        Self {
            id,
            source,
            target,
            label: None,
            kind: None,
            animated: false,
            extra: Map::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

// ─── Document ────────────────────────────────────────────────────────────

/// The complete in-memory diagram: nodes, edges and the canvas viewport.
///
/// Replaced wholesale on import and on generation; there is no partial
/// persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub viewport: Viewport,
}

impl Document {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The document every session starts with: a single Start node.
    pub fn seed() -> Self {
        let mut start = Node::new(
            NodeId::intern("1"),
            NodeKind::Start,
            Point::new(250.0, 25.0),
            "Start",
        );
        start.style = NodeKind::Start.default_style();
        Self {
            nodes: vec![start],
            edges: Vec::new(),
            viewport: Viewport::default(),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn edge(&self, id: NodeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn push_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn replace_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
    }

    pub fn replace_edges(&mut self, edges: Vec<Edge>) {
        self.edges = edges;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Remove every node and edge. The viewport is left where it is.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Union of all node bounds, or `None` for an empty document.
    pub fn bounds(&self) -> Option<Rect> {
        self.nodes
            .iter()
            .map(Node::bounds)
            .reduce(|acc, r| acc.union(&r))
    }
}
