//
// batch.rs
// CTP-DicomEdit
//
// Converts every CTP script found under a directory in parallel, writing each DicomEdit script next to its source.
//
// Thales Matheus Mendonça Santos - October 2026

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::convert::{self, FileOutcome};
use crate::models::TranslateSettings;
use crate::output::{default_output_path, Decline, OverwritePolicy};

/// Extensions recognised as CTP scripts.
const SCRIPT_EXTENSIONS: [&str; 2] = ["xml", "script"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: Vec<PathBuf>,
    /// Commands left untranslated across all converted files.
    pub untranslated: usize,
}

pub fn find_scripts(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, |ext| SCRIPT_EXTENSIONS.contains(&ext))
        })
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Batch runs never prompt: existing outputs are overwritten with `force`, skipped otherwise.
pub fn process_directory(dir: &Path, force: bool, settings: &TranslateSettings) -> Result<BatchSummary> {
    let files = find_scripts(dir);
    tracing::info!(directory = %dir.display(), files = files.len(), "starting batch conversion");

    let policy = if force {
        OverwritePolicy::Overwrite
    } else {
        OverwritePolicy::Skip
    };

    let mut summary = BatchSummary::default();
    let mut jobs = Vec::with_capacity(files.len());
    for (output, inputs) in group_by_output(files) {
        if inputs.len() > 1 {
            // `anon.xml` and `anon.script` would both land in `anon.das`.
            for input in &inputs {
                tracing::error!(
                    file = %input.display(),
                    output = %output.display(),
                    sources = inputs.len(),
                    "another script in this directory maps to the same output"
                );
            }
            summary.failed.extend(inputs);
        } else {
            jobs.extend(inputs.into_iter().map(|input| (input, output.clone())));
        }
    }

    let outcomes: Vec<(PathBuf, Result<FileOutcome>)> = jobs
        .into_par_iter()
        .map(|(path, output)| {
            let outcome = convert::convert_file(&path, &output, policy, &mut Decline, settings);
            (path, outcome)
        })
        .collect();

    for (path, outcome) in outcomes {
        match outcome {
            Ok(FileOutcome::Written { conversion, .. }) => {
                summary.converted += 1;
                summary.untranslated += conversion.report.len();
            }
            Ok(FileOutcome::Skipped { .. }) => summary.skipped += 1,
            Err(e) => {
                tracing::error!(file = %path.display(), error = %format!("{e:#}"), "conversion failed");
                summary.failed.push(path);
            }
        }
    }

    summary.failed.sort();
    Ok(summary)
}

/// Inputs keyed by the output path they would be written to.
fn group_by_output(files: Vec<PathBuf>) -> BTreeMap<PathBuf, Vec<PathBuf>> {
    let mut groups: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        groups.entry(default_output_path(&file)).or_default().push(file);
    }
    groups
}
