pub mod editor;
pub mod engine;
pub mod input;
pub mod placement;

pub use editor::{
    Alert, AlertKind, DiagramEditor, EditorConfig, EditorError, EditorEvent, GenerationTicket,
};
pub use engine::{DocumentEngine, DocumentMutation, connect_edge_id};
pub use input::{DRAG_LABEL_KEY, DRAG_TYPE_KEY, DropPayload};
pub use placement::place;
