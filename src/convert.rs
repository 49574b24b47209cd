//
// convert.rs
// CTP-DicomEdit
//
// End-to-end conversion: classify, translate, assemble and report, for in-memory trees and for files on disk.
//
// Thales Matheus Mendonça Santos - October 2026

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::classify::classify;
use crate::models::{CommandTree, SkipReason, TranslateSettings, TranslatedScript, Untranslated};
use crate::output::{Confirm, FileSink, OverwritePolicy};
use crate::parse::{self, ParseError};
use crate::report::DiagnosticReport;
use crate::rules::RuleTable;
use crate::script;
use crate::translate::{translate, translate_parameters};

/// Translated script plus the account of everything that was not translated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub script: TranslatedScript,
    pub translated: usize,
    pub report: DiagnosticReport,
}

impl Conversion {
    /// Full DicomEdit text, preamble included.
    pub fn render(&self) -> String {
        script::render(&self.script)
    }
}

/// Translate an already parsed command tree.
pub fn convert_tree(tree: CommandTree, settings: &TranslateSettings) -> Conversion {
    let classified = classify(tree.children);

    let parameters = translate_parameters(classified.parameters);
    let elements = translate(
        classified.elements,
        &RuleTable::element_commands(),
        settings,
    );
    let removes = translate(
        classified.global_removes,
        &RuleTable::global_removes(),
        settings,
    );

    let unrecognized = classified
        .unrecognized
        .into_iter()
        .map(|node| Untranslated::new(node, SkipReason::UnrecognizedCommand))
        .collect();

    Conversion {
        translated: parameters.translated.len() + elements.translated.len() + removes.translated.len(),
        script: TranslatedScript {
            parameters: parameters.lines,
            elements: elements.lines,
            global_removes: removes.lines,
        },
        report: DiagnosticReport {
            unprocessed_elements: elements.unprocessed,
            unprocessed_global_removes: removes.unprocessed,
            unprocessed_parameters: parameters.unprocessed,
            unrecognized,
        },
    }
}

/// Parse and translate CTP XML text.
pub fn convert_str(xml: &str, settings: &TranslateSettings) -> Result<Conversion, ParseError> {
    Ok(convert_tree(parse::parse_script(xml)?, settings))
}

/// Result of converting one file.
#[derive(Debug)]
pub enum FileOutcome {
    Written {
        output: PathBuf,
        conversion: Conversion,
    },
    /// Output existed and the overwrite policy said no. The conversion is still
    /// returned so its diagnostics are not lost.
    Skipped {
        output: PathBuf,
        conversion: Conversion,
    },
}

impl FileOutcome {
    pub fn conversion(&self) -> &Conversion {
        match self {
            FileOutcome::Written { conversion, .. } | FileOutcome::Skipped { conversion, .. } => conversion,
        }
    }
}

/// Convert `input` into `output`. Translation happens fully in memory; the file
/// is only touched once the overwrite policy allows it.
pub fn convert_file(
    input: &Path,
    output: &Path,
    policy: OverwritePolicy,
    confirm: &mut dyn Confirm,
    settings: &TranslateSettings,
) -> Result<FileOutcome> {
    let tree = parse::read_script(input)?;
    let conversion = convert_tree(tree, settings);
    // Diagnostics belong to the translation, not to the write.
    conversion.report.emit();

    let allowed = policy
        .allows_write(output, confirm)
        .context("Failed to confirm overwrite")?;
    if !allowed {
        tracing::info!(output = %output.display(), "output exists, skipping");
        return Ok(FileOutcome::Skipped {
            output: output.to_path_buf(),
            conversion,
        });
    }

    script::assemble(FileSink::new(output), &conversion.script)
        .with_context(|| format!("Failed to write DicomEdit script {}", output.display()))?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        translated = conversion.translated,
        untranslated = conversion.report.len(),
        "converted CTP script"
    );
    Ok(FileOutcome::Written {
        output: output.to_path_buf(),
        conversion,
    })
}
