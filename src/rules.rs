//
// rules.rs
// CTP-DicomEdit
//
// Literal rule tables mapping known CTP command bodies to the DicomEdit lines they translate to.
//
// Thales Matheus Mendonça Santos - October 2026

use std::fmt;

use thiserror::Error;

use crate::models::{CommandNode, SkipReason};
use crate::tag::{self, TagFormatError};

/// Spacing between a DicomEdit directive and its trailing comment.
const COMMENT_GAP: &str = "     ";

/// A template turns one matched command into DicomEdit lines.
pub type Template = fn(&CommandNode) -> Result<Vec<String>, TranslateError>;

/// Reasons a matched rule could still not be applied to a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("missing attribute `{0}`")]
    MissingAttribute(&'static str),
    #[error(transparent)]
    MalformedTag(#[from] TagFormatError),
}

impl From<TranslateError> for SkipReason {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::MissingAttribute(name) => SkipReason::MissingAttribute(name.to_string()),
            TranslateError::MalformedTag(inner) => SkipReason::MalformedTag(inner.to_string()),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Rule {
    /// Exact CTP body text this rule answers to.
    pub body: &'static str,
    pub summary: &'static str,
    template: Template,
}

impl Rule {
    pub const fn new(body: &'static str, summary: &'static str, template: Template) -> Self {
        Self {
            body,
            summary,
            template,
        }
    }

    pub fn emit(&self, node: &CommandNode) -> Result<Vec<String>, TranslateError> {
        (self.template)(node)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("body", &self.body)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

const ELEMENT_RULES: &[Rule] = &[
    Rule::new("@remove()", "delete the element", remove_element),
    Rule::new("@empty()", "set the element to an empty string", empty_element),
    Rule::new(
        "@incrementdate(this,@DATEINC)",
        "shift the date by DATEINC",
        increment_date,
    ),
    Rule::new(
        "@hashuid(@UIDROOT,this)",
        "hash the UID under UIDROOT",
        hash_uid,
    ),
];

const GLOBAL_REMOVE_RULES: &[Rule] = &[
    Rule::new("Remove curves", "delete curve groups (50xx)", remove_curves),
    Rule::new(
        "Remove private groups",
        "delete all private tags",
        remove_private_groups,
    ),
    Rule::new("Remove overlays", "delete overlay groups (60xx)", remove_overlays),
];

/// Ordered list of rules, matched by exact body equality.
#[derive(Debug, Clone)]
pub struct RuleTable {
    name: &'static str,
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(name: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            name,
            rules: rules.into_iter().collect(),
        }
    }

    /// Rules for `<e>` entries.
    pub fn element_commands() -> Self {
        Self::new("element commands", ELEMENT_RULES.iter().copied())
    }

    /// Rules for `<r>` entries.
    pub fn global_removes() -> Self {
        Self::new("global removes", GLOBAL_REMOVE_RULES.iter().copied())
    }

    /// Append a rule; earlier rules keep precedence for the same body.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// First rule whose body equals `body` exactly. No trimming, no patterns.
    pub fn lookup(&self, body: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.body == body)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn annotate(directive: String, note: &str) -> String {
    format!("{directive}{COMMENT_GAP}// {note}")
}

/// Raw `t` attribute and its `(gggg,eeee)` form.
fn element_tag(node: &CommandNode) -> Result<(&str, String), TranslateError> {
    let raw = node
        .attribute("t")
        .ok_or(TranslateError::MissingAttribute("t"))?;
    let formatted = tag::format_tag(raw)?;
    Ok((raw, formatted))
}

fn remove_element(node: &CommandNode) -> Result<Vec<String>, TranslateError> {
    let (raw, tag) = element_tag(node)?;
    Ok(vec![annotate(format!("-{tag}"), &format!("remove {raw}"))])
}

fn empty_element(node: &CommandNode) -> Result<Vec<String>, TranslateError> {
    let (raw, tag) = element_tag(node)?;
    Ok(vec![annotate(format!("{tag} := \"\""), &format!("empty {raw}"))])
}

fn increment_date(node: &CommandNode) -> Result<Vec<String>, TranslateError> {
    let (raw, tag) = element_tag(node)?;
    Ok(vec![annotate(
        format!("{tag} ?= shiftDateByIncrement[ {tag}, DATEINC]"),
        &format!("increment date {raw}"),
    )])
}

fn hash_uid(node: &CommandNode) -> Result<Vec<String>, TranslateError> {
    let (raw, tag) = element_tag(node)?;
    Ok(vec![annotate(
        format!("{tag} ?= hashUID[ {tag}, UIDROOT ]"),
        &format!("hash uid {raw}"),
    )])
}

fn remove_curves(_: &CommandNode) -> Result<Vec<String>, TranslateError> {
    Ok(vec![annotate("-(50X@,XXXX)".to_string(), "delete curves")])
}

fn remove_private_groups(_: &CommandNode) -> Result<Vec<String>, TranslateError> {
    Ok(vec![annotate(
        "removeAllPrivateTags".to_string(),
        "delete private tags",
    )])
}

fn remove_overlays(_: &CommandNode) -> Result<Vec<String>, TranslateError> {
    Ok(vec![annotate("-(60X@,XXXX)".to_string(), "delete overlays")])
}
