//
// main.rs
// CTP-DicomEdit
//
// Entry point that hands off execution to the CLI layer.
//
// Thales Matheus Mendonça Santos - October 2026

use ctp_dicomedit::cli;

fn main() -> anyhow::Result<()> {
    // Delegate all argument parsing and dispatching to the CLI module.
    cli::run()
}
