//
// classify.rs
// CTP-DicomEdit
//
// Partitions the top-level script entries into element, global-remove, parameter and unrecognized commands.
//
// Thales Matheus Mendonça Santos - October 2026

use crate::models::{CommandKind, CommandNode};

/// The four disjoint command lists produced from one script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub elements: Vec<CommandNode>,
    pub global_removes: Vec<CommandNode>,
    pub parameters: Vec<CommandNode>,
    /// Entries whose tag is none of `e`, `r`, `p`.
    pub unrecognized: Vec<CommandNode>,
}

impl Classified {
    pub fn len(&self) -> usize {
        self.elements.len() + self.global_removes.len() + self.parameters.len() + self.unrecognized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `nodes` by tag name. Relative order is kept inside every list and each
/// node lands in exactly one of them.
pub fn classify<I>(nodes: I) -> Classified
where
    I: IntoIterator<Item = CommandNode>,
{
    let mut classified = Classified::default();
    for node in nodes {
        match node.kind() {
            CommandKind::Element => classified.elements.push(node),
            CommandKind::GlobalRemove => classified.global_removes.push(node),
            CommandKind::Parameter => classified.parameters.push(node),
            CommandKind::Unrecognized => classified.unrecognized.push(node),
        }
    }

    tracing::debug!(
        elements = classified.elements.len(),
        global_removes = classified.global_removes.len(),
        parameters = classified.parameters.len(),
        unrecognized = classified.unrecognized.len(),
        "classified script entries"
    );
    classified
}
