//! Lint diagnostics for diagram documents.
//!
//! Reports structural issues without modifying the document. Imports and
//! generated diagrams are accepted as-is; these findings are only logged
//! and shown to the user.

use crate::id::NodeId;
use crate::model::{Document, NodeKind};
use std::collections::HashSet;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Likely to render wrongly or not at all.
    Warning,
    /// Informational.
    Info,
}

/// A single lint diagnostic for a node or edge.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// The node or edge this diagnostic refers to.
    pub id: NodeId,
    /// Human-readable message.
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "dangling-edge").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all lint rules over the document and return diagnostics.
#[must_use]
pub fn lint_document(doc: &Document) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    lint_duplicate_ids(doc, &mut diags);
    lint_dangling_edges(doc, &mut diags);
    lint_unknown_types(doc, &mut diags);
    lint_uml_fields(doc, &mut diags);
    diags
}

// ─── Rules ────────────────────────────────────────────────────────────────

fn lint_duplicate_ids(doc: &Document, diags: &mut Vec<LintDiagnostic>) {
    let mut seen = HashSet::new();
    for node in &doc.nodes {
        if !seen.insert(node.id) {
            diags.push(LintDiagnostic {
                id: node.id,
                message: format!("Node id `{}` is used more than once.", node.id),
                severity: LintSeverity::Warning,
                rule: "duplicate-id",
            });
        }
    }
    let mut seen = HashSet::new();
    for edge in &doc.edges {
        if !seen.insert(edge.id) {
            diags.push(LintDiagnostic {
                id: edge.id,
                message: format!("Edge id `{}` is used more than once.", edge.id),
                severity: LintSeverity::Warning,
                rule: "duplicate-id",
            });
        }
    }
}

/// Edges whose source or target names no node in the document.
fn lint_dangling_edges(doc: &Document, diags: &mut Vec<LintDiagnostic>) {
    let ids: HashSet<NodeId> = doc.nodes.iter().map(|n| n.id).collect();
    for edge in &doc.edges {
        for (end, id) in [("source", edge.source), ("target", edge.target)] {
            if !ids.contains(&id) {
                diags.push(LintDiagnostic {
                    id: edge.id,
                    message: format!("Edge `{}` {end} `{id}` does not exist.", edge.id),
                    severity: LintSeverity::Warning,
                    rule: "dangling-edge",
                });
            }
        }
    }
}

fn lint_unknown_types(doc: &Document, diags: &mut Vec<LintDiagnostic>) {
    for node in &doc.nodes {
        if let NodeKind::Other(tag) = &node.kind {
            diags.push(LintDiagnostic {
                id: node.id,
                message: format!(
                    "Node `{}` has unknown type `{tag}`; it will render as a process step.",
                    node.id
                ),
                severity: LintSeverity::Warning,
                rule: "unknown-type",
            });
        }
    }
}

fn lint_uml_fields(doc: &Document, diags: &mut Vec<LintDiagnostic>) {
    for node in &doc.nodes {
        let has_members = node.data.attributes.is_some() || node.data.methods.is_some();
        if has_members && node.kind != NodeKind::UmlClass {
            diags.push(LintDiagnostic {
                id: node.id,
                message: format!(
                    "Node `{}` lists attributes or methods but is not a class; they are ignored.",
                    node.id
                ),
                severity: LintSeverity::Info,
                rule: "uml-fields-on-non-class",
            });
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
