//
// report.rs
// CTP-DicomEdit
//
// Collects every command the translator could not consume and surfaces it through tracing or as JSON.
//
// Thales Matheus Mendonça Santos - October 2026

use serde::{Deserialize, Serialize};

use crate::models::Untranslated;
use crate::tag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCategory {
    UnprocessedElement,
    UnprocessedGlobalRemove,
    UnprocessedParameter,
    UnrecognizedCommand,
}

impl DiagnosticCategory {
    pub fn label(self) -> &'static str {
        match self {
            DiagnosticCategory::UnprocessedElement => "unprocessed element command",
            DiagnosticCategory::UnprocessedGlobalRemove => "unprocessed global remove command",
            DiagnosticCategory::UnprocessedParameter => "unprocessed parameter",
            DiagnosticCategory::UnrecognizedCommand => "unrecognized command",
        }
    }
}

/// Everything left over after translation, one list per tracked collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub unprocessed_elements: Vec<Untranslated>,
    pub unprocessed_global_removes: Vec<Untranslated>,
    pub unprocessed_parameters: Vec<Untranslated>,
    pub unrecognized: Vec<Untranslated>,
}

impl DiagnosticReport {
    pub fn is_clean(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.unprocessed_elements.len()
            + self.unprocessed_global_removes.len()
            + self.unprocessed_parameters.len()
            + self.unrecognized.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = (DiagnosticCategory, &Untranslated)> {
        tagged(DiagnosticCategory::UnprocessedElement, &self.unprocessed_elements)
            .chain(tagged(
                DiagnosticCategory::UnprocessedGlobalRemove,
                &self.unprocessed_global_removes,
            ))
            .chain(tagged(
                DiagnosticCategory::UnprocessedParameter,
                &self.unprocessed_parameters,
            ))
            .chain(tagged(DiagnosticCategory::UnrecognizedCommand, &self.unrecognized))
    }

    /// Log one warning per leftover command. Read-only.
    pub fn emit(&self) {
        for (category, item) in self.entries() {
            let node = &item.node;
            let tag_id = node.attribute("t").unwrap_or_default();
            // Only element commands carry DICOM tags; removes use names like "curves".
            let grouped = if category == DiagnosticCategory::UnprocessedElement {
                tag::format_tag_lossy(tag_id)
            } else {
                String::new()
            };
            tracing::warn!(
                category = category.label(),
                element = %node.tag,
                t = tag_id,
                grouped = %grouped,
                attributes = ?node.attributes,
                body = %node.body,
                reason = %item.reason,
                "command was not translated"
            );
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn tagged(
    category: DiagnosticCategory,
    items: &[Untranslated],
) -> impl Iterator<Item = (DiagnosticCategory, &Untranslated)> {
    items.iter().map(move |item| (category, item))
}
