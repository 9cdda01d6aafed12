//! Common regex patterns for passport field extraction.
//!
//! Every labeled pattern keeps the value on one line: gaps use `[ \t]`, never
//! `\s`. The `*_NEXT_LINE` variants cover OCR output where the label and its
//! value were recognised as separate text boxes, one per line.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Passport number
    pub static ref PASSPORT_NUMBER: Regex = Regex::new(
        r"(?i)\bpassport[ \t]*(?:number|num|no)\b\.?[ \t]*[:\-]?[ \t]*([A-Z0-9]+)"
    ).unwrap();

    pub static ref PASSPORT_NUMBER_NEXT_LINE: Regex = Regex::new(
        r"(?i)\bpassport[ \t]*(?:number|num|no)\b\.?[ \t]*[:\-]?[ \t]*\r?\n[ \t]*([A-Z0-9]+)"
    ).unwrap();

    // MRZ line 2 (TD3): document number, check digit, nationality, birth date, check digit, sex
    pub static ref MRZ_DOCUMENT_NUMBER: Regex = Regex::new(
        r"(?m)^[ \t]*([A-Z0-9<]{9})[0-9][A-Z<]{3}[0-9]{6}[0-9][MF<]"
    ).unwrap();

    // Names
    pub static ref SURNAME: Regex = Regex::new(
        r"(?i)\bsurname[ \t]*[:.\-]?[ \t]*(\p{L}[\p{L}' \t\-]*)"
    ).unwrap();

    pub static ref SURNAME_NEXT_LINE: Regex = Regex::new(
        r"(?i)\bsurname[ \t]*[:.\-]?[ \t]*\r?\n[ \t]*(\p{L}[\p{L}' \t\-]*)"
    ).unwrap();

    // MRZ line 1 (TD3): P, type, issuing state, SURNAME<<GIVEN<NAMES
    pub static ref MRZ_SURNAME: Regex = Regex::new(
        r"(?m)^[ \t]*P[A-Z<][A-Z<]{3}([A-Z]+(?:<[A-Z]+)*)<<"
    ).unwrap();

    pub static ref GIVEN_NAME: Regex = Regex::new(
        r"(?i)\bgiven[ \t]*names?(?:\(s\))?[ \t]*[:.\-]?[ \t]*(\p{L}[\p{L}' \t\-]*)"
    ).unwrap();

    pub static ref GIVEN_NAME_NEXT_LINE: Regex = Regex::new(
        r"(?i)\bgiven[ \t]*names?(?:\(s\))?[ \t]*[:.\-]?[ \t]*\r?\n[ \t]*(\p{L}[\p{L}' \t\-]*)"
    ).unwrap();

    pub static ref MRZ_GIVEN_NAME: Regex = Regex::new(
        r"(?m)^[ \t]*P[A-Z<][A-Z<]{3}[A-Z]+(?:<[A-Z]+)*<<([A-Z]+(?:<[A-Z]+)*)"
    ).unwrap();

    pub static ref NATIONALITY: Regex = Regex::new(
        r"(?i)\bnationality[ \t]*[:.\-]?[ \t]*(\p{L}+)"
    ).unwrap();

    pub static ref NATIONALITY_NEXT_LINE: Regex = Regex::new(
        r"(?i)\bnationality[ \t]*[:.\-]?[ \t]*\r?\n[ \t]*(\p{L}+)"
    ).unwrap();

    // Dates (the token is captured loosely so malformed dates still surface,
    // but always ends on a digit)
    pub static ref DATE_OF_BIRTH: Regex = Regex::new(
        r"(?i)\bdate[ \t]+of[ \t]+birth[ \t]*[:\-]?[ \t]*(\d(?:[\d/.\-]*\d)?)"
    ).unwrap();

    pub static ref DATE_OF_BIRTH_NEXT_LINE: Regex = Regex::new(
        r"(?i)\bdate[ \t]+of[ \t]+birth[ \t]*[:\-]?[ \t]*\r?\n[ \t]*(\d(?:[\d/.\-]*\d)?)"
    ).unwrap();

    pub static ref DOB: Regex = Regex::new(
        r"(?i)\bd\.?o\.?b\b\.?[ \t]*[:\-]?[ \t]*(\d(?:[\d/.\-]*\d)?)"
    ).unwrap();

    pub static ref DATE_OF_ISSUE: Regex = Regex::new(
        r"(?i)\bdate[ \t]+of[ \t]+issue[ \t]*[:\-]?[ \t]*(\d(?:[\d/.\-]*\d)?)"
    ).unwrap();

    pub static ref DATE_OF_ISSUE_NEXT_LINE: Regex = Regex::new(
        r"(?i)\bdate[ \t]+of[ \t]+issue[ \t]*[:\-]?[ \t]*\r?\n[ \t]*(\d(?:[\d/.\-]*\d)?)"
    ).unwrap();

    pub static ref DATE_OF_EXPIRY: Regex = Regex::new(
        r"(?i)\bdate[ \t]+of[ \t]+expir(?:y|ation)[ \t]*[:\-]?[ \t]*(\d(?:[\d/.\-]*\d)?)"
    ).unwrap();

    pub static ref DATE_OF_EXPIRY_NEXT_LINE: Regex = Regex::new(
        r"(?i)\bdate[ \t]+of[ \t]+expir(?:y|ation)[ \t]*[:\-]?[ \t]*\r?\n[ \t]*(\d(?:[\d/.\-]*\d)?)"
    ).unwrap();

    // Places (rest of line)
    pub static ref PLACE_OF_BIRTH: Regex = Regex::new(
        r"(?i)\bplace[ \t]+of[ \t]+birth[ \t]*(?:[:.\-][ \t]*)?([^\s:.\-](?:[^\r\n]*[^\s])?)"
    ).unwrap();

    pub static ref PLACE_OF_BIRTH_NEXT_LINE: Regex = Regex::new(
        r"(?i)\bplace[ \t]+of[ \t]+birth[ \t]*[:.\-]?[ \t]*\r?\n[ \t]*([^\s:.\-](?:[^\r\n]*[^\s])?)"
    ).unwrap();

    pub static ref PLACE_OF_ISSUE: Regex = Regex::new(
        r"(?i)\bplace[ \t]+of[ \t]+issue[ \t]*(?:[:.\-][ \t]*)?([^\s:.\-](?:[^\r\n]*[^\s])?)"
    ).unwrap();

    pub static ref PLACE_OF_ISSUE_NEXT_LINE: Regex = Regex::new(
        r"(?i)\bplace[ \t]+of[ \t]+issue[ \t]*[:.\-]?[ \t]*\r?\n[ \t]*([^\s:.\-](?:[^\r\n]*[^\s])?)"
    ).unwrap();

    // Sex
    pub static ref SEX: Regex = Regex::new(
        r"(?i)\bsex[ \t]*[:.\-/]?[ \t]*(\p{L}+)"
    ).unwrap();

    pub static ref SEX_NEXT_LINE: Regex = Regex::new(
        r"(?i)\bsex[ \t]*[:.\-/]?[ \t]*\r?\n[ \t]*(\p{L}+)"
    ).unwrap();

    // File number
    pub static ref FILE_NUMBER: Regex = Regex::new(
        r"(?i)\bfile[ \t]*(?:number|no)\b\.?[ \t]*[:\-]?[ \t]*([A-Z0-9]+)"
    ).unwrap();

    pub static ref FILE_NUMBER_NEXT_LINE: Regex = Regex::new(
        r"(?i)\bfile[ \t]*(?:number|no)\b\.?[ \t]*[:\-]?[ \t]*\r?\n[ \t]*([A-Z0-9]+)"
    ).unwrap();

    // A line that opens with one of the passport labels above
    pub static ref LABEL_LINE: Regex = Regex::new(
        r"(?i)^[ \t]*(?:passport[ \t]*(?:number|num|no)\b|surname\b|given[ \t]*names?\b|nationality\b|date[ \t]+of[ \t]+(?:birth|issue|expir)|d\.?o\.?b\b|place[ \t]+of[ \t]+(?:birth|issue)\b|sex\b|file[ \t]*(?:number|no)\b)"
    ).unwrap();

    // Shape of a normalized date
    pub static ref DATE_DMY: Regex = Regex::new(
        r"^(\d{2})/(\d{2})/(\d{4})$"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}
