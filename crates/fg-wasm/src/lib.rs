//! WASM bridge for FlowGenius. Exposes the editor state to the web page.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the canvas
//! widget, the sidebar and the `fetch` to the generative service; this side
//! owns the document. Results that can fail come back as JSON strings.

mod download;
mod events;

use fg_ai::{
    GenerateContentRequest, GenerateContentResponse, GenerateError, SYSTEM_INSTRUCTION,
    ServiceError, interpret_response,
};
use fg_core::id::NodeId;
use fg_core::model::NodeKind;
use fg_core::palette::palette;
use fg_core::viewport::{Point, Viewport};
use fg_editor::{DiagramEditor, DropPayload, EditorConfig, EditorError, GenerationTicket};
use wasm_bindgen::prelude::*;

/// Grid that palette drops snap to on the page.
const SNAP_GRID: (f64, f64) = (15.0, 15.0);

/// The main WASM-facing controller.
///
/// Holds the editor and the ticket of the generation in flight, if any.
#[wasm_bindgen]
pub struct DiagramCanvas {
    editor: DiagramEditor,
    pending: Option<GenerationTicket>,
}

impl Default for DiagramCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl DiagramCanvas {
    /// A canvas holding the seed document.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        Self {
            editor: DiagramEditor::new()
                .with_clock(now_ms)
                .with_config(EditorConfig {
                    snap_grid: Some(SNAP_GRID),
                    ..EditorConfig::default()
                }),
            pending: None,
        }
    }

    /// Handle a palette drop. `origin_*` is the canvas's top-left corner in
    /// client coordinates; `has_canvas` is false before the canvas mounted.
    /// Returns true if a node was added.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_drop(
        &mut self,
        kind: &str,
        label: &str,
        client_x: f64,
        client_y: f64,
        origin_x: f64,
        origin_y: f64,
        has_canvas: bool,
    ) -> bool {
        let origin = has_canvas.then(|| Point::new(origin_x, origin_y));
        self.editor.handle_drop_at(
            &DropPayload::new(kind, label),
            Point::new(client_x, client_y),
            origin,
        )
    }

    /// Record the canvas's pan/zoom after the user moved it.
    pub fn set_viewport(&mut self, x: f64, y: f64, zoom: f64) -> bool {
        self.editor.set_viewport(Viewport { x, y, zoom })
    }

    /// Fit the view to the content. Returns the viewport JSON, or `null`
    /// for an empty document.
    pub fn fit_view(&mut self, width: f64, height: f64) -> String {
        match self.editor.fit_view(width, height) {
            Some(viewport) => serde_json::to_string(&viewport).unwrap_or_else(|_| "null".into()),
            None => "null".to_string(),
        }
    }

    pub fn connect(&mut self, source: &str, target: &str) -> bool {
        self.editor
            .connect(NodeId::intern(source), NodeId::intern(target))
    }

    /// Write back a node position after the canvas finished dragging it.
    pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.editor.apply(fg_editor::DocumentMutation::MoveNode {
            id: NodeId::intern(id),
            position: Point::new(x, y),
        })
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        self.editor.apply(fg_editor::DocumentMutation::RemoveNode {
            id: NodeId::intern(id),
        })
    }

    pub fn remove_edge(&mut self, id: &str) -> bool {
        self.editor.apply(fg_editor::DocumentMutation::RemoveEdge {
            id: NodeId::intern(id),
        })
    }

    pub fn clear(&mut self) {
        self.editor.clear();
    }

    // ─── Import / export ─────────────────────────────────────────────────

    /// The document as pretty-printed JSON, or an empty string on failure.
    pub fn export_json(&self) -> String {
        self.editor.export_json().unwrap_or_else(|e| {
            log::error!("{e}");
            String::new()
        })
    }

    /// Save the document as `diagram.json`.
    pub fn download(&self) -> Result<(), JsValue> {
        let json = self
            .editor
            .export_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        download::offer_download(&json)
    }

    /// Load a diagram file's text. Returns `{"ok":true}` or
    /// `{"ok":false,"error":"..."}`; on failure the document is unchanged.
    pub fn import_json(&mut self, text: &str) -> String {
        events::result_json(self.editor.import_json(text))
    }

    pub fn nodes_json(&self) -> String {
        serde_json::to_string(&self.editor.document().nodes).unwrap_or_else(|_| "[]".into())
    }

    pub fn edges_json(&self) -> String {
        serde_json::to_string(&self.editor.document().edges).unwrap_or_else(|_| "[]".into())
    }

    pub fn viewport_json(&self) -> String {
        serde_json::to_string(&self.editor.document().viewport).unwrap_or_else(|_| "null".into())
    }

    // ─── Generation ──────────────────────────────────────────────────────
    //
    // The page drives the request: begin_generation → generation_request →
    // fetch → finish_generation (or fail_generation).

    /// Raise the busy flag. Returns false while a request is in flight.
    pub fn begin_generation(&mut self) -> bool {
        match self.editor.begin_generation() {
            Ok(ticket) => {
                self.pending = Some(ticket);
                true
            }
            Err(EditorError::Busy) => false,
            Err(e) => {
                log::error!("{e}");
                false
            }
        }
    }

    pub fn is_generating(&self) -> bool {
        self.editor.is_generating()
    }

    /// The `generateContent` request body for `prompt`, or an empty string
    /// for a blank prompt.
    pub fn generation_request(&self, prompt: &str) -> String {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return String::new();
        }
        serde_json::to_string(&GenerateContentRequest::new(prompt, SYSTEM_INSTRUCTION))
            .unwrap_or_default()
    }

    /// Apply the service's response body. Returns `{"ok":...}`.
    pub fn finish_generation(&mut self, response_body: &str) -> String {
        let outcome = match serde_json::from_str::<GenerateContentResponse>(response_body) {
            Ok(response) => interpret_response(response.text().as_deref()),
            Err(e) => Err(GenerateError::from(ServiceError::Decode(e.to_string()))),
        };
        self.settle(outcome)
    }

    /// Report a failed request. `missing_credential` is set when the page
    /// had no API key to send.
    pub fn fail_generation(&mut self, message: &str, missing_credential: bool) -> String {
        let err = if missing_credential {
            GenerateError::MissingCredential
        } else {
            GenerateError::Connection(ServiceError::Transport(message.to_string()))
        };
        self.settle(Err(err))
    }

    /// Drain pending events as a JSON array.
    pub fn take_events_json(&mut self) -> String {
        events::events_to_json(&self.editor.take_events())
    }
}

impl DiagramCanvas {
    fn settle(&mut self, outcome: Result<fg_ai::Generation, GenerateError>) -> String {
        let Some(ticket) = self.pending.take() else {
            return events::result_json(Err("no generation in flight"));
        };
        events::result_json(self.editor.finish_generation(ticket, outcome))
    }
}

// ─── Standalone functions (no canvas needed) ─────────────────────────────

/// Sidebar palette entries as JSON.
#[wasm_bindgen]
pub fn palette_json() -> String {
    serde_json::to_string(&palette()).unwrap_or_else(|_| "[]".into())
}

/// Minimap swatch for a node type tag, as `#RRGGBB`.
#[wasm_bindgen]
pub fn minimap_color(kind: &str) -> String {
    NodeKind::from_tag(kind).minimap_color().to_hex()
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("FlowGenius WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
