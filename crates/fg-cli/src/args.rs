//! Command-line argument definitions for the `fg` tool.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Create, generate, lint and edit FlowGenius diagram files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the starter diagram (a single Start node)
    New {
        #[arg(short, long, default_value = "diagram.json")]
        output: PathBuf,
    },

    /// Ask the generative service for a diagram and write it out
    Generate {
        /// Plain-language description of the diagram
        prompt: String,

        /// Diagram to start from; its viewport is kept
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long, default_value = "diagram.json")]
        output: PathBuf,

        /// API key for the generative service
        #[arg(long, env = "API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Report structural problems in a diagram file
    Lint { file: PathBuf },

    /// Drop a node onto a diagram as if dragged from the palette
    Place {
        file: PathBuf,

        /// Node type tag (default, input, output, decision, umlClass)
        #[arg(long = "type")]
        kind: String,

        #[arg(long)]
        label: String,

        /// Screen x relative to the canvas corner
        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        /// Screen y relative to the canvas corner
        #[arg(long, allow_hyphen_values = true)]
        y: f64,

        /// Where to write the result; defaults to FILE
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
