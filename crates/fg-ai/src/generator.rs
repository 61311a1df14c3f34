//! Prompt → diagram generation.
//!
//! One request per call, no retry. The service's JSON is accepted without
//! schema checks beyond deserialization; structural problems such as
//! dangling edges are reported as lint diagnostics next to the diagram.

use crate::error::GenerateError;
use crate::prompt::SYSTEM_INSTRUCTION;
use crate::service::GenerativeService;
use fg_core::{Document, GeneratedDiagram, LintDiagnostic, lint_document, parse_generated};

/// A successfully parsed generation result.
#[derive(Debug, Clone)]
pub struct Generation {
    pub diagram: GeneratedDiagram,
    pub diagnostics: Vec<LintDiagnostic>,
}

pub struct DiagramGenerator<S> {
    service: S,
}

impl<S: GenerativeService> DiagramGenerator<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn generate(&self, prompt: &str) -> Result<Generation, GenerateError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }
        if !self.service.is_configured() {
            log::error!("generation requested without an API key");
            return Err(GenerateError::MissingCredential);
        }

        let chars = prompt.len();
        log::info!("generating diagram for a {chars}-character prompt");
        let text = self
            .service
            .complete(prompt, SYSTEM_INSTRUCTION)
            .await
            .map_err(|err| {
                log::error!("generation failed: {err}");
                GenerateError::from(err)
            })?;

        interpret_response(text.as_deref())
    }
}

/// Turn the service's raw text into a [`Generation`].
///
/// Shared by the native generator and the browser bridge, where the request
/// itself is performed by the host page.
pub fn interpret_response(text: Option<&str>) -> Result<Generation, GenerateError> {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return Err(GenerateError::NoDiagram("the service returned no text".into()));
    };
    let diagram = match parse_generated(text) {
        Ok(diagram) => diagram,
        Err(err) => return Err(GenerateError::NoDiagram(err.to_string())),
    };

    let mut scratch = Document::empty();
    diagram.clone().replace_in(&mut scratch);
    let diagnostics = lint_document(&scratch);
    for diag in &diagnostics {
        log::warn!("generated diagram: [{}] {}", diag.rule, diag.message);
    }
    log::info!(
        "generated {} nodes and {} edges",
        diagram.node_count(),
        diagram.edge_count()
    );

    Ok(Generation {
        diagram,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_no_diagram() {
        for text in [None, Some("  \n")] {
            let err = interpret_response(text).unwrap_err();
            assert!(matches!(err, GenerateError::NoDiagram(_)));
        }
    }

    #[test]
    fn prose_is_no_diagram() {
        let err = interpret_response(Some("Sorry, I can't draw that.")).unwrap_err();
        assert!(matches!(err, GenerateError::NoDiagram(_)));
    }

    #[test]
    fn dangling_edges_are_reported_not_rejected() {
        let g = interpret_response(Some(
            r#"{"nodes":[{"id":"a","type":"input","position":{"x":0,"y":0},"data":{"label":"A"}}],
                "edges":[{"id":"e","source":"a","target":"b"}]}"#,
        ))
        .unwrap();
        assert_eq!(g.diagram.edge_count(), 1);
        assert!(g.diagnostics.iter().any(|d| d.rule == "dangling-edge"));
    }
}
