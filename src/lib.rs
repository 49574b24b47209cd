//
// lib.rs
// CTP-DicomEdit
//
// Exposes the crate's modules and re-exports the conversion entry points for both binary and library consumers.
//
// Thales Matheus Mendonça Santos - October 2026

// Translation core: pure, no file I/O.
pub mod classify;
pub mod models;
pub mod report;
pub mod rules;
pub mod script;
pub mod tag;
pub mod translate;

// Collaborators around the core: XML reading, output files, CLI.
pub mod batch;
pub mod cli;
pub mod convert;
pub mod logging;
pub mod output;
pub mod parse;

pub use cli::{run as run_cli, Cli, Commands};
pub use convert::{convert_str, convert_tree, Conversion};
pub use models::{CommandNode, CommandTree, TranslateSettings};
