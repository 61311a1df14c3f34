pub mod format;
pub mod id;
pub mod lint;
pub mod model;
pub mod palette;
pub mod viewport;

pub use format::{
    DiagramFile, EXPORT_FILE_NAME, EXPORT_MIME, FormatError, GeneratedDiagram, export_document,
    parse_diagram_file, parse_generated,
};
pub use id::{IdAllocator, NodeId};
pub use lint::{LintDiagnostic, LintSeverity, lint_document};
pub use model::*;
pub use palette::{PaletteItem, PaletteSection, palette};
pub use viewport::{CanvasTransform, FitOptions, Point, Rect, ViewTransform, Viewport, fit_view};
