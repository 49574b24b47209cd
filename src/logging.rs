//
// logging.rs
// CTP-DicomEdit
//
// Installs the tracing subscriber used for progress and diagnostic output. Logs go to stderr.
//
// Thales Matheus Mendonça Santos - October 2026

use tracing_subscriber::EnvFilter;

/// Map `-v` repetitions to a default level. Warnings (diagnostics) are always shown.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialise the global subscriber once. `RUST_LOG` takes precedence over `verbosity`.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ctp_dicomedit={}", level_for(verbosity))));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
