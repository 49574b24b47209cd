//
// tag.rs
// CTP-DicomEdit
//
// Formats CTP tag identifiers (ggggeeee) into DicomEdit (gggg,eeee) notation and resolves dictionary names.
//
// Thales Matheus Mendonça Santos - October 2026

use dicom::core::dictionary::DataDictionary;
use dicom::core::Tag;
use dicom::dictionary_std::StandardDataDictionary;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagFormatError {
    #[error("tag identifier {raw:?} must be 8 characters long, found {len}")]
    WrongLength { raw: String, len: usize },
    #[error("tag identifier {raw:?} contains non-hexadecimal characters")]
    NotHex { raw: String },
}

/// Format an 8 hex digit identifier as `(gggg,eeee)`, keeping the original characters.
///
/// Identifiers that are not exactly 8 hex digits are rejected rather than sliced,
/// so a bad CTP entry never becomes a DicomEdit rule pointing at the wrong element.
pub fn format_tag(raw: &str) -> Result<String, TagFormatError> {
    parse_tag(raw)?;
    // Validated as ASCII hex, so byte slicing is safe.
    Ok(format!("({},{})", &raw[..4], &raw[4..]))
}

/// Legacy slicing rule for display purposes: first four characters, then the next four.
/// Never panics, whatever the input looks like.
pub fn format_tag_lossy(raw: &str) -> String {
    let group: String = raw.chars().take(4).collect();
    let element: String = raw.chars().skip(4).take(4).collect();
    format!("({group},{element})")
}

pub fn parse_tag(raw: &str) -> Result<Tag, TagFormatError> {
    let len = raw.chars().count();
    if len != 8 {
        return Err(TagFormatError::WrongLength {
            raw: raw.to_string(),
            len,
        });
    }
    if !raw.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TagFormatError::NotHex {
            raw: raw.to_string(),
        });
    }

    let not_hex = || TagFormatError::NotHex {
        raw: raw.to_string(),
    };
    let group = u16::from_str_radix(&raw[..4], 16).map_err(|_| not_hex())?;
    let element = u16::from_str_radix(&raw[4..], 16).map_err(|_| not_hex())?;
    Ok(Tag(group, element))
}

/// Keyword of the tag in the standard data dictionary, e.g. `PatientName`.
pub fn dictionary_alias(tag: Tag) -> Option<String> {
    StandardDataDictionary
        .by_tag(tag)
        .map(|entry| entry.alias.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_patient_name_tag() {
        assert_eq!(format_tag("00100010").unwrap(), "(0010,0010)");
    }

    #[test]
    fn keeps_original_hex_case() {
        assert_eq!(format_tag("0008103e").unwrap(), "(0008,103e)");
        assert_eq!(format_tag("0008103E").unwrap(), "(0008,103E)");
    }

    #[test]
    fn rejects_wrong_length() {
        let err = format_tag("0010001").unwrap_err();
        assert_eq!(
            err,
            TagFormatError::WrongLength {
                raw: "0010001".into(),
                len: 7
            }
        );
        assert!(format_tag("").is_err());
        assert!(format_tag("001000100").is_err());
    }

    #[test]
    fn rejects_non_hex_digits() {
        assert!(matches!(
            format_tag("0010ZZZZ"),
            Err(TagFormatError::NotHex { .. })
        ));
        // Eight characters but not eight bytes.
        assert!(format_tag("0010001é").is_err());
    }

    #[test]
    fn lossy_formatting_never_panics() {
        assert_eq!(format_tag_lossy("00100010"), "(0010,0010)");
        assert_eq!(format_tag_lossy("0010"), "(0010,)");
        assert_eq!(format_tag_lossy(""), "(,)");
        assert_eq!(format_tag_lossy("ééééééééé"), "(éééé,éééé)");
    }

    #[test]
    fn parses_into_dicom_tag() {
        assert_eq!(parse_tag("7FE00010").unwrap(), Tag(0x7FE0, 0x0010));
    }

    #[test]
    fn resolves_dictionary_keyword() {
        let alias = dictionary_alias(Tag(0x0010, 0x0010));
        assert_eq!(alias.as_deref(), Some("PatientName"));
    }
}
