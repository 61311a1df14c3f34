use fg_ai::ServiceError;
use fg_editor::EditorError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{}` is not a diagram file: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: EditorError,
    },

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("could not set up the generative service: {0}")]
    Service(#[from] ServiceError),

    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("nothing placed: the node type is empty")]
    NothingPlaced,

    #[error("{0} lint warning(s)")]
    Lint(usize),
}
