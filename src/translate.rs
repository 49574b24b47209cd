//
// translate.rs
// CTP-DicomEdit
//
// Applies rule tables to classified command lists and turns parameters into DicomEdit variable assignments.
//
// Thales Matheus Mendonça Santos - October 2026

use crate::models::{CommandNode, SkipReason, TranslateSettings, Untranslated};
use crate::rules::{Rule, RuleTable};
use crate::tag;

/// Outcome of translating one command list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    /// DicomEdit lines in input order.
    pub lines: Vec<String>,
    pub translated: Vec<CommandNode>,
    pub unprocessed: Vec<Untranslated>,
}

/// Run every command through `table`. A command is either consumed by its first
/// matching rule or left in `unprocessed`, never both.
pub fn translate(
    commands: Vec<CommandNode>,
    table: &RuleTable,
    settings: &TranslateSettings,
) -> Translation {
    let mut out = Translation::default();

    for node in commands {
        if settings.skip_disabled && node.is_disabled() {
            tracing::debug!(body = %node.body, "skipping disabled command");
            out.unprocessed.push(Untranslated::new(node, SkipReason::Disabled));
            continue;
        }

        let Some(rule) = table.lookup(&node.body) else {
            tracing::debug!(table = table.name(), body = %node.body, "no rule matches command body");
            out.unprocessed
                .push(Untranslated::new(node, SkipReason::NoMatchingRule));
            continue;
        };

        match rule.emit(&node) {
            Ok(lines) => {
                log_progress(&node, rule);
                out.lines.extend(lines);
                out.translated.push(node);
            }
            Err(err) => {
                tracing::warn!(body = %node.body, error = %err, "matched rule could not be applied");
                out.unprocessed.push(Untranslated::new(node, err.into()));
            }
        }
    }

    out
}

/// Parameters are translated unconditionally to `<t> := "<body>"`.
pub fn translate_parameters(parameters: Vec<CommandNode>) -> Translation {
    let mut out = Translation::default();

    for node in parameters {
        match node.attribute("t") {
            Some(name) => {
                tracing::info!(parameter = name, value = %node.body, "translated parameter");
                if has_embedded_quote(&node.body) {
                    tracing::warn!(
                        parameter = name,
                        value = %node.body,
                        "parameter value contains a double quote; the DicomEdit string literal will break"
                    );
                }
                out.lines.push(format!("{name} := \"{}\"", node.body));
                out.translated.push(node);
            }
            None => {
                tracing::warn!(value = %node.body, "parameter has no name");
                out.unprocessed.push(Untranslated::new(
                    node,
                    SkipReason::MissingAttribute("t".to_string()),
                ));
            }
        }
    }

    out
}

/// Values go into the script verbatim, so a `"` ends the literal early.
fn has_embedded_quote(value: &str) -> bool {
    value.contains('"')
}

fn log_progress(node: &CommandNode, rule: &Rule) {
    let raw = node.attribute("t").unwrap_or_default();
    let name = node.attribute("n").unwrap_or_default();
    tracing::info!(tag = raw, name, rule = rule.body, "translated command");

    // Element names in CTP scripts are free text; flag the ones the dictionary disagrees with.
    let alias = tag::parse_tag(raw).ok().and_then(tag::dictionary_alias);
    if let Some(alias) = alias {
        if !name.is_empty() && alias != name {
            tracing::debug!(tag = raw, name, dictionary = %alias, "element name differs from dictionary keyword");
        }
    }
}
