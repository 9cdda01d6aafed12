//! Pattern matching: every raw capture of a field, not just the first.

use tracing::trace;

use super::registry::FieldSpec;
use super::rules::patterns::LABEL_LINE;

/// One pattern match of a field in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCapture<'a> {
    /// Byte offset of the captured value in the source text.
    pub offset: usize,
    /// Captured substring.
    pub text: &'a str,
    /// Index of the pattern that produced the match.
    pub pattern_index: usize,
}

/// Apply every pattern of `field` to `text`, in priority order.
///
/// Captures are clipped at the first line break so a single-line value never
/// runs into the next label. Empty captures are dropped, as are captures that
/// open a line starting with a passport label: those belong to the next field,
/// not to a blank label above them.
pub fn match_field<'a>(field: &FieldSpec, text: &'a str) -> Vec<RawCapture<'a>> {
    let mut captures = Vec::new();

    for (pattern_index, pattern) in field.patterns.iter().enumerate() {
        for caps in pattern.captures_iter(text) {
            let Some(value) = caps.name("value").or_else(|| caps.get(1)) else {
                continue;
            };

            let clipped = match value.as_str().find(['\r', '\n']) {
                Some(end) => &value.as_str()[..end],
                None => value.as_str(),
            };
            if clipped.trim().is_empty() {
                continue;
            }
            if opens_label_line(text, value.start()) {
                trace!("Field {}: skipped label line at {}", field.key, value.start());
                continue;
            }

            captures.push(RawCapture {
                offset: value.start(),
                text: clipped,
                pattern_index,
            });
        }
    }

    trace!("Field {} matched {} raw captures", field.key, captures.len());
    captures
}

/// Whether the capture at `start` is the first text on a line that begins with a label.
fn opens_label_line(text: &str, start: usize) -> bool {
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    text[line_start..start].trim().is_empty() && LABEL_LINE.is_match(&text[line_start..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passport::registry::FieldRegistry;
    use crate::passport::rules::FieldKind;
    use pretty_assertions::assert_eq;

    fn field(key: &str) -> FieldSpec {
        FieldRegistry::passport().unwrap().get(key).unwrap().clone()
    }

    #[test]
    fn test_collects_all_matches() {
        let text = "Passport No: AB1234567\nfoo\nPassport No: CD7654321";
        let captures = match_field(&field("passportNumber"), text);
        let values: Vec<&str> = captures.iter().map(|c| c.text).collect();
        assert_eq!(values, vec!["AB1234567", "CD7654321"]);
        assert!(captures[0].offset < captures[1].offset);
        assert_eq!(captures[0].pattern_index, 0);
    }

    #[test]
    fn test_rest_of_line_stops_at_line_break() {
        let text = "Place of Birth: NEW DELHI\r\nPlace of Issue: MUMBAI\n";
        let captures = match_field(&field("placeOfBirth"), text);
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].text, "NEW DELHI");
    }

    #[test]
    fn test_label_and_value_on_separate_lines() {
        let text = "Surname\nDOE\nGiven Name(s)\nJANE";
        let captures = match_field(&field("surname"), text);
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].text, "DOE");
        assert_eq!(captures[0].pattern_index, 1);
    }

    #[test]
    fn test_mrz_lines() {
        let text = "P<INDDOE<<JANE<MARY<<<<<<<<<<<<<<<<<<<<<<<<<\nAB12345674IND9001011F3001019<<<<<<<<<<<<<<02";
        let number = match_field(&field("passportNumber"), text);
        assert_eq!(number.len(), 1);
        assert_eq!(number[0].text, "AB1234567");
        assert_eq!(number[0].pattern_index, 2);

        let surname = match_field(&field("surname"), text);
        assert_eq!(surname[0].text, "DOE");

        let given = match_field(&field("givenName"), text);
        assert_eq!(given[0].text, "JANE<MARY");
    }

    #[test]
    fn test_custom_pattern_clipped_at_newline() {
        let spec = FieldSpec::from_sources("note", FieldKind::Text, &[r"(?s)Note:\s*(.+)"]).unwrap();
        let captures = match_field(&spec, "Note: first line\nsecond line");
        assert_eq!(captures[0].text, "first line");
    }

    #[test]
    fn test_named_value_group() {
        let spec = FieldSpec::from_sources(
            "visa",
            FieldKind::Code { min_len: 1 },
            &[r"(Visa|VISA)\s+No:\s*(?P<value>\w+)"],
        )
        .unwrap();
        let captures = match_field(&spec, "VISA No: V998877");
        assert_eq!(captures[0].text, "V998877");
    }

    #[test]
    fn test_blank_label_does_not_take_next_label() {
        let text = "Surname:\nGiven Name: JANE\nPlace of Birth:\nPlace of Issue: MUMBAI";
        assert!(match_field(&field("surname"), text).is_empty());
        assert!(match_field(&field("placeOfBirth"), text).is_empty());
    }

    #[test]
    fn test_bare_separator_is_not_a_value() {
        let text = "Place of Issue:\n\nPlace of Birth: -";
        assert!(match_field(&field("placeOfIssue"), text).is_empty());
        assert!(match_field(&field("placeOfBirth"), text).is_empty());
    }

    #[test]
    fn test_date_token_ends_on_digit() {
        let captures = match_field(&field("dateOfBirth"), "Date of Birth: 15/08/1990.");
        assert_eq!(captures[0].text, "15/08/1990");
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(match_field(&field("fileNumber"), "nothing here").is_empty());
    }
}
