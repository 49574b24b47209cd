//
// models.rs
// CTP-DicomEdit
//
// Defines the command nodes read from CTP scripts and the serializable translation and diagnostic structures.
//
// Thales Matheus Mendonça Santos - October 2026

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Root of a parsed CTP script: the root element name and its ordered command children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandTree {
    pub root: String,
    pub children: Vec<CommandNode>,
}

/// One CTP script entry, e.g. `<e t="00100010" n="PatientName">@remove()</e>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandNode {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub body: String,
}

impl CommandNode {
    pub fn new(tag: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            body: body.into(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn kind(&self) -> CommandKind {
        CommandKind::from_tag(&self.tag)
    }

    /// CTP marks switched-off entries with `en="F"`.
    pub fn is_disabled(&self) -> bool {
        self.attribute("en") == Some("F")
    }
}

/// Command categories, keyed by the XML tag name of the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Element,
    GlobalRemove,
    Parameter,
    Unrecognized,
}

impl CommandKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "e" => CommandKind::Element,
            "r" => CommandKind::GlobalRemove,
            "p" => CommandKind::Parameter,
            _ => CommandKind::Unrecognized,
        }
    }
}

/// Body sections of the generated script, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Parameters,
    Elements,
    GlobalRemoves,
}

impl Section {
    pub const ORDER: [Section; 3] = [Section::Parameters, Section::Elements, Section::GlobalRemoves];
}

/// Translated lines grouped by origin; the preamble is added by the assembler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedScript {
    pub parameters: Vec<String>,
    pub elements: Vec<String>,
    pub global_removes: Vec<String>,
}

impl TranslatedScript {
    pub fn section(&self, section: Section) -> &[String] {
        match section {
            Section::Parameters => &self.parameters,
            Section::Elements => &self.elements,
            Section::GlobalRemoves => &self.global_removes,
        }
    }

    pub fn line_count(&self) -> usize {
        self.parameters.len() + self.elements.len() + self.global_removes.len()
    }
}

/// Knobs for the translator. Everything defaults to the strict literal behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateSettings {
    /// Leave `en="F"` element and remove commands untranslated.
    pub skip_disabled: bool,
}

/// Why a command was not turned into DicomEdit output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoMatchingRule,
    Disabled,
    MissingAttribute(String),
    MalformedTag(String),
    UnrecognizedCommand,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoMatchingRule => write!(f, "no matching rule"),
            SkipReason::Disabled => write!(f, "disabled"),
            SkipReason::MissingAttribute(name) => write!(f, "missing attribute `{name}`"),
            SkipReason::MalformedTag(detail) => write!(f, "malformed tag: {detail}"),
            SkipReason::UnrecognizedCommand => write!(f, "unrecognized command"),
        }
    }
}

/// A command left behind by the translator, with the reason it was left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Untranslated {
    #[serde(flatten)]
    pub node: CommandNode,
    pub reason: SkipReason,
}

impl Untranslated {
    pub fn new(node: CommandNode, reason: SkipReason) -> Self {
        Self { node, reason }
    }
}
