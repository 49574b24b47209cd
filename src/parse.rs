//
// parse.rs
// CTP-DicomEdit
//
// Reads CTP DicomAnonymizer XML scripts into the command tree consumed by the translator.
//
// Thales Matheus Mendonça Santos - October 2026

use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::models::{CommandNode, CommandTree};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("CTP script is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Parse the XML text of a CTP script. Only element children of the root are
/// commands; comments and whitespace between them are ignored.
pub fn parse_script(xml: &str) -> Result<CommandTree, ParseError> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();

    let children: Vec<CommandNode> = root
        .children()
        .filter(|node| node.is_element())
        .map(command_node)
        .collect();

    tracing::debug!(root = root.tag_name().name(), commands = children.len(), "parsed CTP script");
    Ok(CommandTree {
        root: root.tag_name().name().to_string(),
        children,
    })
}

/// Read and parse a CTP script from disk.
pub fn read_script(path: &Path) -> Result<CommandTree> {
    let xml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read CTP script {}", path.display()))?;
    parse_script(&xml).with_context(|| format!("Failed to parse CTP script {}", path.display()))
}

fn command_node(node: roxmltree::Node<'_, '_>) -> CommandNode {
    let attributes = node
        .attributes()
        .map(|attr| (attr.name().to_string(), attr.value().to_string()))
        .collect();
    // Bodies are kept verbatim: rule matching is exact, so no trimming here.
    let body = node
        .descendants()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect();

    CommandNode {
        tag: node.tag_name().name().to_string(),
        attributes,
        body,
    }
}
