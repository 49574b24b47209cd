//
// conversion_workflows.rs
// CTP-DicomEdit
//
// Integration-style tests covering classification, translation, script assembly, diagnostics and file output.
//
// Thales Matheus Mendonça Santos - October 2026

use std::fs;
use std::io;
use std::path::PathBuf;

use ctp_dicomedit::convert::{convert_file, FileOutcome};
use ctp_dicomedit::models::{SkipReason, TranslateSettings};
use ctp_dicomedit::output::{Confirm, Decline, OverwritePolicy};
use ctp_dicomedit::{convert_str, script, CommandNode};
use tempfile::{tempdir, TempDir};

const SAMPLE_SCRIPT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<script>
   <e en="T" t="00080020" n="StudyDate">@incrementdate(this,@DATEINC)</e>
   <e en="T" t="00100010" n="PatientName">@remove()</e>
   <e en="T" t="00100020" n="PatientID">@empty()</e>
   <e en="T" t="0020000D" n="StudyInstanceUID">@hashuid(@UIDROOT,this)</e>
   <e en="T" t="00100030" n="PatientBirthDate">@customrule()</e>
   <p t="DATEINC">-3210</p>
   <p t="UIDROOT">1.2.840.113654.2.70.1</p>
   <k en="F" t="0018" n="Keep group 0018"></k>
   <r en="T" t="curves">Remove curves</r>
   <r en="T" t="overlays">Remove overlays</r>
   <r en="T" t="privategroups">Remove private groups</r>
   <r en="T" t="unspecifiedelements">Remove unchecked elements</r>
</script>"#;

fn write_sample() -> (TempDir, PathBuf) {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("anonymizer.script");
    fs::write(&path, SAMPLE_SCRIPT).expect("write sample script");
    (dir, path)
}

fn convert(xml: &str) -> ctp_dicomedit::Conversion {
    convert_str(xml, &TranslateSettings::default()).expect("convert")
}

struct Answer(bool);

impl Confirm for Answer {
    fn confirm(&mut self, _question: &str) -> io::Result<bool> {
        Ok(self.0)
    }
}

#[test]
fn remove_element_end_to_end() {
    let conversion = convert(r#"<script><e t="00100010" n="PatientName">@remove()</e></script>"#);

    assert!(conversion
        .render()
        .lines()
        .any(|line| line == "-(0010,0010)     // remove 00100010"));
    assert!(conversion.report.unprocessed_elements.is_empty());
}

#[test]
fn private_groups_end_to_end() {
    let conversion = convert(r#"<script><r t="privategroups">Remove private groups</r></script>"#);
    assert!(conversion
        .render()
        .contains("removeAllPrivateTags     // delete private tags\n"));
}

#[test]
fn parameter_end_to_end() {
    let conversion = convert(r#"<script><p t="UIDROOT">1.2.3</p></script>"#);
    assert!(conversion.render().contains("UIDROOT := \"1.2.3\"\n"));
}

#[test]
fn unknown_element_is_reported_with_attributes_intact() {
    let conversion = convert(
        r#"<script><e en="T" t="00100010" n="PatientName">@customrule()</e></script>"#,
    );

    assert_eq!(conversion.script.line_count(), 0);
    assert!(!conversion.render().contains("00100010"));

    let expected = CommandNode::new("e", "@customrule()")
        .with_attribute("en", "T")
        .with_attribute("t", "00100010")
        .with_attribute("n", "PatientName");
    let leftover = &conversion.report.unprocessed_elements[0];
    assert_eq!(leftover.node, expected);
    assert_eq!(leftover.reason, SkipReason::NoMatchingRule);
}

#[test]
fn full_script_is_ordered_and_accounted_for() {
    let conversion = convert(SAMPLE_SCRIPT);
    let text = conversion.render();
    assert_eq!(text.lines().count(), 4 + 2 + 4 + 3);

    let body: Vec<&str> = text.lines().skip(script::PREAMBLE.len()).collect();
    assert_eq!(
        body,
        vec![
            "DATEINC := \"-3210\"",
            "UIDROOT := \"1.2.840.113654.2.70.1\"",
            "(0008,0020) ?= shiftDateByIncrement[ (0008,0020), DATEINC]     // increment date 00080020",
            "-(0010,0010)     // remove 00100010",
            "(0010,0020) := \"\"     // empty 00100020",
            "(0020,000D) ?= hashUID[ (0020,000D), UIDROOT ]     // hash uid 0020000D",
            "-(50X@,XXXX)     // delete curves",
            "-(60X@,XXXX)     // delete overlays",
            "removeAllPrivateTags     // delete private tags",
        ]
    );

    let report = &conversion.report;
    assert_eq!(report.unprocessed_elements.len(), 1);
    assert_eq!(report.unprocessed_elements[0].node.body, "@customrule()");
    assert_eq!(report.unprocessed_global_removes.len(), 1);
    assert_eq!(
        report.unprocessed_global_removes[0].node.body,
        "Remove unchecked elements"
    );
    assert!(report.unprocessed_parameters.is_empty());
    assert_eq!(report.unrecognized.len(), 1);
    assert_eq!(report.unrecognized[0].node.tag, "k");

    // 12 commands in, each either translated or reported.
    assert_eq!(conversion.translated + report.len(), 12);
}

#[test]
fn preamble_is_bit_exact() {
    let text = convert("<script/>").render();
    assert_eq!(
        text,
        "// This DicomEdit script was automatically generated.\n\
         // Converted from a CTP DicomAnonymizer script by ctp-dicomedit.\n\
         version \"6.6\"\n\
         \n"
    );
}

#[test]
fn malformed_tag_is_reported_not_written() {
    let conversion = convert(r#"<script><e t="001000" n="Short">@remove()</e></script>"#);

    assert_eq!(conversion.script.line_count(), 0);
    let leftover = &conversion.report.unprocessed_elements[0];
    assert!(matches!(leftover.reason, SkipReason::MalformedTag(_)));
    assert_eq!(leftover.node.attribute("t"), Some("001000"));
}

#[test]
fn skip_disabled_leaves_switched_off_entries() {
    let xml = r#"<script>
        <e en="F" t="00100010" n="PatientName">@remove()</e>
        <e en="T" t="00100020" n="PatientID">@remove()</e>
    </script>"#;
    let conversion = convert_str(
        xml,
        &TranslateSettings {
            skip_disabled: true,
        },
    )
    .expect("convert");

    assert_eq!(conversion.script.elements, vec!["-(0010,0020)     // remove 00100020"]);
    assert_eq!(
        conversion.report.unprocessed_elements[0].reason,
        SkipReason::Disabled
    );
}

#[test]
fn file_conversion_matches_in_memory_rendering() {
    let (_dir, input) = write_sample();
    let output = input.with_extension("das");

    let outcome = convert_file(
        &input,
        &output,
        OverwritePolicy::Prompt,
        &mut Decline,
        &TranslateSettings::default(),
    )
    .expect("convert file");

    let conversion = match outcome {
        FileOutcome::Written { output: written, conversion } => {
            assert_eq!(written, output);
            conversion
        }
        FileOutcome::Skipped { .. } => panic!("fresh output must be written"),
    };

    let on_disk = fs::read_to_string(&output).expect("read output");
    assert_eq!(on_disk, conversion.render());
    assert_eq!(on_disk, convert(SAMPLE_SCRIPT).render());
}

#[test]
fn existing_output_follows_overwrite_policy() {
    let (_dir, input) = write_sample();
    let output = input.with_extension("das");
    fs::write(&output, "previous\n").expect("seed output");
    let settings = TranslateSettings::default();

    let declined = convert_file(&input, &output, OverwritePolicy::Prompt, &mut Answer(false), &settings)
        .expect("declined");
    assert!(matches!(declined, FileOutcome::Skipped { .. }));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous\n");

    let skipped = convert_file(&input, &output, OverwritePolicy::Skip, &mut Answer(true), &settings)
        .expect("skipped");
    assert!(matches!(skipped, FileOutcome::Skipped { .. }));

    let accepted = convert_file(&input, &output, OverwritePolicy::Prompt, &mut Answer(true), &settings)
        .expect("accepted");
    assert!(matches!(accepted, FileOutcome::Written { .. }));
    assert!(fs::read_to_string(&output)
        .unwrap()
        .starts_with("// This DicomEdit script was automatically generated."));
}

#[test]
fn skipped_output_still_reports_untranslated_commands() {
    let (_dir, input) = write_sample();
    let output = input.with_extension("das");
    fs::write(&output, "previous\n").expect("seed output");

    let outcome = convert_file(
        &input,
        &output,
        OverwritePolicy::Skip,
        &mut Decline,
        &TranslateSettings::default(),
    )
    .expect("skipped");

    let report = match &outcome {
        FileOutcome::Skipped { conversion, .. } => &conversion.report,
        FileOutcome::Written { .. } => panic!("existing output must be kept"),
    };
    assert_eq!(report.unprocessed_elements.len(), 1);
    assert_eq!(report.unprocessed_global_removes.len(), 1);
    assert_eq!(report.unrecognized.len(), 1);
    assert_eq!(outcome.conversion().report, *report);
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous\n");
}

#[test]
fn unreadable_input_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("missing.script");
    let result = convert_file(
        &missing,
        &dir.path().join("missing.das"),
        OverwritePolicy::Overwrite,
        &mut Decline,
        &TranslateSettings::default(),
    );
    assert!(result.is_err());
    assert!(!dir.path().join("missing.das").exists());
}
