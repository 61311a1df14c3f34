//! JSON file format for export, import and generated diagrams.
//!
//! Export is a direct snapshot of the document. Import accepts any subset
//! of `nodes`, `edges` and `viewport`; parsing always finishes before the
//! document is touched, so a bad file never leaves a half-loaded diagram.

use crate::model::{Document, Edge, Node};
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// File name offered for downloads.
pub const EXPORT_FILE_NAME: &str = "diagram.json";
/// MIME type of exported files.
pub const EXPORT_MIME: &str = "application/json";

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("input is empty")]
    Empty,

    #[error("invalid diagram JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),
}

/// Pretty-printed JSON with all three document parts.
pub fn export_document(doc: &Document) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// A parsed import file. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<Edge>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

impl DiagramFile {
    /// Replace the parts present in the file; absent parts stay as they are.
    pub fn apply_to(self, doc: &mut Document) {
        log::debug!(
            "import: nodes={:?} edges={:?} viewport={}",
            self.nodes.as_ref().map(Vec::len),
            self.edges.as_ref().map(Vec::len),
            self.viewport.is_some()
        );
        if let Some(nodes) = self.nodes {
            doc.replace_nodes(nodes);
        }
        if let Some(edges) = self.edges {
            doc.replace_edges(edges);
        }
        if let Some(viewport) = self.viewport {
            doc.set_viewport(viewport);
        }
    }
}

/// Parse an import file.
pub fn parse_diagram_file(text: &str) -> Result<DiagramFile, FormatError> {
    let value = parse_object(text)?;
    Ok(serde_json::from_value(value)?)
}

/// The `{ nodes, edges }` shape returned by the generative service.
///
/// A part the service left out (or sent as `null`) is `None` and leaves the
/// matching part of the document alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDiagram {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<Edge>>,
}

impl GeneratedDiagram {
    pub fn node_count(&self) -> usize {
        self.nodes.as_ref().map_or(0, Vec::len)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.as_ref().map_or(0, Vec::len)
    }

    /// Swap in the parts present in the reply. The viewport is kept.
    pub fn replace_in(self, doc: &mut Document) {
        if let Some(nodes) = self.nodes {
            doc.replace_nodes(nodes);
        }
        if let Some(edges) = self.edges {
            doc.replace_edges(edges);
        }
    }
}

/// Parse a generation response. Tolerates a Markdown code fence around the
/// payload; missing or `null` arrays are read as absent.
pub fn parse_generated(text: &str) -> Result<GeneratedDiagram, FormatError> {
    let value = parse_object(strip_code_fence(text))?;
    Ok(serde_json::from_value(value)?)
}

fn parse_object(text: &str) -> Result<Value, FormatError> {
    if text.trim().is_empty() {
        return Err(FormatError::Empty);
    }
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Object(_) => Ok(value),
        Value::Null => Err(FormatError::NotAnObject("null")),
        Value::Bool(_) => Err(FormatError::NotAnObject("a boolean")),
        Value::Number(_) => Err(FormatError::NotAnObject("a number")),
        Value::String(_) => Err(FormatError::NotAnObject("a string")),
        Value::Array(_) => Err(FormatError::NotAnObject("an array")),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
