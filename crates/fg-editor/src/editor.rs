//! Editor application state.
//!
//! [`DiagramEditor`] is the one place the diagram lives while the app runs:
//! the document engine, the id allocator, the clock and the generation busy
//! flag. Hosts (the browser bridge, the CLI) own an editor value and pass it
//! around explicitly; there is no global instance.
//!
//! Everything the host must react to is queued as an [`EditorEvent`] and
//! drained with [`DiagramEditor::take_events`].

use crate::engine::{DocumentEngine, DocumentMutation};
use crate::input::DropPayload;
use crate::placement::place;
use fg_ai::{DiagramGenerator, GenerateError, Generation, GenerativeService};
use fg_core::format::{FormatError, export_document, parse_diagram_file};
use fg_core::id::{IdAllocator, NodeId};
use fg_core::lint::lint_document;
use fg_core::model::Document;
use fg_core::viewport::{CanvasTransform, FitOptions, Point, ViewTransform, Viewport, fit_view};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub const IMPORT_FAILED_MESSAGE: &str = "Failed to parse JSON file.";
pub const NO_DIAGRAM_MESSAGE: &str = "AI could not generate a diagram for this prompt.";
pub const CONNECTION_MESSAGE: &str = "Error connecting to the generative service. Check API key.";
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "API key is missing. Please check your environment configuration.";

/// Editor options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Grid that dropped nodes snap to, if any.
    pub snap_grid: Option<(f64, f64)>,
    /// How long the host should wait before fitting the view to freshly
    /// generated content, so the canvas can measure the new nodes first.
    pub fit_view_delay: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_grid: None,
            fit_view_delay: Duration::from_millis(100),
        }
    }
}

/// Category of a user-visible alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Missing credential; generation stays unavailable.
    Configuration,
    /// Malformed import file.
    Parse,
    /// The generative service could not be reached or failed.
    Connectivity,
    /// The service answered without a usable diagram.
    NoDiagram,
}

/// A dismissable message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    fn new(kind: AlertKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }

    /// The alert for a failed generation, or `None` when the failure is not
    /// worth telling the user about (blank prompt).
    pub fn for_generation(err: &GenerateError) -> Option<Self> {
        match err {
            GenerateError::EmptyPrompt => None,
            GenerateError::MissingCredential => Some(Self::new(
                AlertKind::Configuration,
                MISSING_CREDENTIAL_MESSAGE,
            )),
            GenerateError::Connection(_) => {
                Some(Self::new(AlertKind::Connectivity, CONNECTION_MESSAGE))
            }
            GenerateError::NoDiagram(_) => {
                Some(Self::new(AlertKind::NoDiagram, NO_DIAGRAM_MESSAGE))
            }
        }
    }
}

/// Something the host has to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The document changed; redraw.
    Render,
    /// Restore this pan/zoom on the canvas.
    SetViewport(Viewport),
    /// Fit the view to the content after `delay`.
    FitView { delay: Duration },
    Alert(Alert),
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Failed to parse JSON file: {0}")]
    Import(#[source] FormatError),

    #[error("could not serialize the diagram: {0}")]
    Export(#[source] FormatError),

    #[error("a generation request is already in flight")]
    Busy,

    #[error(transparent)]
    Generation(#[from] GenerateError),
}

/// Proof that a generation was started. Consumed by
/// [`DiagramEditor::finish_generation`].
#[derive(Debug)]
#[must_use = "a started generation must be finished to clear the busy flag"]
pub struct GenerationTicket {
    seq: u64,
}

fn system_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

pub struct DiagramEditor {
    engine: DocumentEngine,
    config: EditorConfig,
    ids: IdAllocator,
    clock: fn() -> u64,
    /// Set while a generation request is in flight.
    generating: bool,
    generation_seq: u64,
    events: Vec<EditorEvent>,
}

impl Default for DiagramEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramEditor {
    /// An editor holding the seed document.
    pub fn new() -> Self {
        Self::with_document(Document::seed())
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            engine: DocumentEngine::new(document),
            config: EditorConfig::default(),
            ids: IdAllocator::new(),
            clock: system_millis,
            generating: false,
            generation_seq: 0,
            events: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the wall clock used for time-based ids.
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    pub fn document(&self) -> &Document {
        &self.engine.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn revision(&self) -> u64 {
        self.engine.revision()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Apply a change reported by the canvas (drag end, delete, connect).
    pub fn apply(&mut self, mutation: DocumentMutation) -> bool {
        self.engine.apply_mutation(mutation)
    }

    // ─── Placement ───────────────────────────────────────────────────────

    /// Handle a palette drop. Returns `true` if a node was added; invalid
    /// drops are ignored without an alert.
    pub fn handle_drop(
        &mut self,
        payload: &DropPayload,
        screen: Point,
        canvas: Option<&dyn CanvasTransform>,
    ) -> bool {
        let now = (self.clock)();
        let doc = &self.engine.document;
        // Peek first so an ignored drop does not consume an id.
        if canvas.is_none() || payload.node_kind().is_none() {
            log::trace!("drop ignored: {payload:?}");
            return false;
        }
        let id = self.ids.next(now, |id| doc.contains_node(id));
        match place(payload, screen, canvas, id) {
            Some(node) => {
                log::debug!(
                    "placed {} `{}` at {:?}",
                    node.kind.as_tag(),
                    node.id,
                    node.position
                );
                self.engine.apply_mutation(DocumentMutation::AddNode {
                    node: Box::new(node),
                })
            }
            None => false,
        }
    }

    /// Handle a drop on a canvas whose top-left corner is at `origin`, using
    /// the document's viewport and the configured snap grid. `origin` is
    /// `None` while no canvas is mounted.
    pub fn handle_drop_at(
        &mut self,
        payload: &DropPayload,
        screen: Point,
        origin: Option<Point>,
    ) -> bool {
        let transform = origin.map(|origin| {
            ViewTransform::new(origin, self.engine.document.viewport)
                .with_snap_grid(self.config.snap_grid)
        });
        self.handle_drop(
            payload,
            screen,
            transform.as_ref().map(|t| t as &dyn CanvasTransform),
        )
    }

    // ─── Edges / view / clear ────────────────────────────────────────────

    pub fn connect(&mut self, source: NodeId, target: NodeId) -> bool {
        self.engine.apply_mutation(DocumentMutation::Connect {
            source,
            target,
            label: None,
        })
    }

    /// Record the canvas's current pan/zoom.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        self.engine
            .apply_mutation(DocumentMutation::SetViewport { viewport })
    }

    /// Fit the viewport to the content of a `width` × `height` canvas.
    /// Returns the new viewport, or `None` for an empty document.
    pub fn fit_view(&mut self, width: f64, height: f64) -> Option<Viewport> {
        let bounds = self.engine.document.bounds()?;
        let viewport = fit_view(bounds, width, height, FitOptions::default());
        self.set_viewport(viewport);
        Some(viewport)
    }

    /// Remove every node and edge.
    pub fn clear(&mut self) {
        log::info!("clearing document");
        self.engine.apply_mutation(DocumentMutation::Clear);
    }

    // ─── Import / export ─────────────────────────────────────────────────

    pub fn export_json(&self) -> Result<String, EditorError> {
        export_document(&self.engine.document).map_err(EditorError::Export)
    }

    /// Load a diagram file. On a parse error the document is untouched and a
    /// parse alert is queued.
    pub fn import_json(&mut self, text: &str) -> Result<(), EditorError> {
        let file = match parse_diagram_file(text) {
            Ok(file) => file,
            Err(err) => {
                log::warn!("import rejected: {err}");
                let alert = Alert::new(AlertKind::Parse, IMPORT_FAILED_MESSAGE);
                self.events.push(EditorEvent::Alert(alert));
                return Err(EditorError::Import(err));
            }
        };

        let mut mutations = Vec::with_capacity(3);
        if let Some(nodes) = file.nodes {
            mutations.push(DocumentMutation::ReplaceNodes { nodes });
        }
        if let Some(edges) = file.edges {
            mutations.push(DocumentMutation::ReplaceEdges { edges });
        }
        if let Some(viewport) = file.viewport {
            mutations.push(DocumentMutation::SetViewport { viewport });
            self.events.push(EditorEvent::SetViewport(viewport));
        }
        self.engine.apply_all(mutations);

        for diag in lint_document(&self.engine.document) {
            log::warn!("imported diagram: [{}] {}", diag.rule, diag.message);
        }
        Ok(())
    }

    // ─── Generation ──────────────────────────────────────────────────────

    /// Raise the busy flag. Fails while another request is in flight.
    pub fn begin_generation(&mut self) -> Result<GenerationTicket, EditorError> {
        if self.generating {
            return Err(EditorError::Busy);
        }
        self.generating = true;
        self.generation_seq += 1;
        Ok(GenerationTicket {
            seq: self.generation_seq,
        })
    }

    /// Clear the busy flag and apply the outcome.
    ///
    /// On success each part present in the reply replaces the current one
    /// (no merge), even if the user edited the document meanwhile; a part
    /// the reply left out is kept. A delayed fit-view is requested. On
    /// failure the document is untouched and an alert is queued.
    pub fn finish_generation(
        &mut self,
        ticket: GenerationTicket,
        outcome: Result<Generation, GenerateError>,
    ) -> Result<(), EditorError> {
        log::trace!("finishing generation #{}", ticket.seq);
        self.generating = false;

        match outcome {
            Ok(generation) => {
                let diagram = generation.diagram;
                log::info!(
                    "applying generated diagram: nodes={:?} edges={:?}",
                    diagram.nodes.as_ref().map(Vec::len),
                    diagram.edges.as_ref().map(Vec::len)
                );
                let nodes = diagram
                    .nodes
                    .map(|nodes| DocumentMutation::ReplaceNodes { nodes });
                let edges = diagram
                    .edges
                    .map(|edges| DocumentMutation::ReplaceEdges { edges });
                self.engine.apply_all(nodes.into_iter().chain(edges));
                self.events.push(EditorEvent::FitView {
                    delay: self.config.fit_view_delay,
                });
                Ok(())
            }
            Err(err) => {
                if let Some(alert) = Alert::for_generation(&err) {
                    self.events.push(EditorEvent::Alert(alert));
                }
                Err(EditorError::Generation(err))
            }
        }
    }

    /// Run one generation end to end. A blank prompt is ignored and returns
    /// `Ok(false)`.
    pub async fn generate<S: GenerativeService>(
        &mut self,
        generator: &DiagramGenerator<S>,
        prompt: &str,
    ) -> Result<bool, EditorError> {
        if prompt.trim().is_empty() {
            return Ok(false);
        }
        let ticket = self.begin_generation()?;
        let outcome = generator.generate(prompt).await;
        self.finish_generation(ticket, outcome)?;
        Ok(true)
    }

    // ─── Host events ─────────────────────────────────────────────────────

    /// Drain queued events. A pending redraw is reported first.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        let mut events = Vec::with_capacity(self.events.len() + 1);
        if self.engine.take_render_request() {
            events.push(EditorEvent::Render);
        }
        events.append(&mut self.events);
        events
    }
}
