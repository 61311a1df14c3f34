//! Placement: turning a palette drop into a new node.
//!
//! Drops that cannot be resolved (no canvas to map the coordinate, or no
//! type tag on the payload) are dropped silently. They come from the host
//! wiring, not from the user, so there is nothing to report.

use crate::input::DropPayload;
use fg_core::id::NodeId;
use fg_core::model::{Node, NodeKind};
use fg_core::palette::{default_uml_attributes, default_uml_methods};
use fg_core::viewport::{CanvasTransform, Point};

/// Build the node for a drop at screen position `screen`.
///
/// `canvas` is `None` while no canvas is mounted.
pub fn place(
    payload: &DropPayload,
    screen: Point,
    canvas: Option<&dyn CanvasTransform>,
    id: NodeId,
) -> Option<Node> {
    let canvas = canvas?;
    let kind = payload.node_kind()?;
    let position = canvas.screen_to_flow(screen);

    let mut node = Node::new(id, kind.clone(), position, payload.label.clone());
    if kind == NodeKind::UmlClass {
        node.data.attributes = Some(default_uml_attributes());
        node.data.methods = Some(default_uml_methods());
    }
    node.style = kind.default_style();
    Some(node)
}
