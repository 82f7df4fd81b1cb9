//! Human-readable identifiers for patients and doctors.
//!
//! Identifiers are mnemonics, not keys: two registrations with the same
//! inputs in the same year produce the same identifier, and nothing here
//! tries to prevent that.
//!
//! - Patient: `{YY}-{last 4 of contact}-{first 4 of name, X-padded}`
//! - Doctor: `DOC-{YY}{last 4 of registration no.}-{initials, X-padded to 2}`
//!
//! Short contact and registration numbers are used whole, without padding.
//! Doctor initials are padded to two characters but never truncated, so a
//! three-word name yields three initials.

use chrono::Datelike;

/// Character used to pad short name segments.
pub const PAD_CHAR: char = 'X';

/// Prefix carried by every doctor identifier.
pub const DOCTOR_PREFIX: &str = "DOC-";

/// Length of the name segment of a patient identifier.
const PATIENT_NAME_LEN: usize = 4;

/// Number of trailing characters kept from contact / registration numbers.
const TAIL_LEN: usize = 4;

/// Minimum length of the initials segment of a doctor identifier.
const MIN_INITIALS: usize = 2;

/// Current calendar year in local time.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Last two digits of `year`, zero padded.
pub fn year_suffix(year: i32) -> String {
    format!("{:02}", year.rem_euclid(100))
}

/// Derive a patient identifier using the current year.
pub fn patient_id(name: &str, contact: &str) -> String {
    patient_id_in_year(name, contact, current_year())
}

/// Derive a patient identifier for an explicit year.
pub fn patient_id_in_year(name: &str, contact: &str, year: i32) -> String {
    let last4 = tail(contact, TAIL_LEN);
    let first4 = pad(name.chars().take(PATIENT_NAME_LEN).collect(), PATIENT_NAME_LEN)
        .to_uppercase();

    format!("{}-{}-{}", year_suffix(year), last4, first4)
}

/// Derive a doctor identifier using the current year.
pub fn doctor_id(name: &str, reg_no: &str) -> String {
    doctor_id_in_year(name, reg_no, current_year())
}

/// Derive a doctor identifier for an explicit year.
pub fn doctor_id_in_year(name: &str, reg_no: &str, year: i32) -> String {
    let reg4 = tail(reg_no, TAIL_LEN);
    let initials = pad(initials(name).to_uppercase(), MIN_INITIALS);

    format!("{}{}{}-{}", DOCTOR_PREFIX, year_suffix(year), reg4, initials)
}

/// First character of each whitespace-separated word.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Last `n` characters of `s`, or all of `s` when shorter.
fn tail(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// Right-pad with [`PAD_CHAR`] up to `min_len` characters. Never truncates.
fn pad(mut s: String, min_len: usize) -> String {
    let len = s.chars().count();
    s.extend(std::iter::repeat(PAD_CHAR).take(min_len.saturating_sub(len)));
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_suffix() {
        assert_eq!(year_suffix(2026), "26");
        assert_eq!(year_suffix(2005), "05");
        assert_eq!(year_suffix(2100), "00");
    }

    #[test]
    fn test_patient_id_basic() {
        assert_eq!(patient_id_in_year("Jane Doe", "9998887777", 2026), "26-7777-JANE");
    }

    #[test]
    fn test_patient_id_short_name_padded() {
        assert_eq!(patient_id_in_year("Al", "12345678", 2026), "26-5678-ALXX");
        assert_eq!(patient_id_in_year("", "12345678", 2026), "26-5678-XXXX");
    }

    #[test]
    fn test_patient_id_name_with_space() {
        // The space is kept; only the first four characters matter.
        assert_eq!(patient_id_in_year("Jo Bo", "5550001", 2026), "26-0001-JO B");
    }

    #[test]
    fn test_patient_id_short_contact_unpadded() {
        assert_eq!(patient_id_in_year("Maria", "12", 2026), "26-12-MARI");
        assert_eq!(patient_id_in_year("Maria", "", 2026), "26--MARI");
    }

    #[test]
    fn test_doctor_id_three_initials() {
        assert_eq!(doctor_id_in_year("John Q Public", "RN123456", 2026), "DOC-263456-JQP");
    }

    #[test]
    fn test_doctor_id_single_word_padded() {
        assert_eq!(doctor_id_in_year("Al", "12", 2026), "DOC-2612-AX");
        assert_eq!(doctor_id_in_year("", "REG9", 2026), "DOC-26REG9-XX");
    }

    #[test]
    fn test_doctor_id_lowercase_and_extra_spaces() {
        assert_eq!(doctor_id_in_year("  asha   rao ", "MCI-0042", 2026), "DOC-260042-AR");
    }

    #[test]
    fn test_tail_handles_multibyte() {
        assert_eq!(tail("ééééé", 4), "éééé");
        assert_eq!(tail("ab", 4), "ab");
        assert_eq!(tail("abc", 0), "");
    }

    #[test]
    fn test_current_year_is_used() {
        let yy = year_suffix(current_year());
        assert!(patient_id("Jane", "1234").starts_with(&yy));
        assert!(doctor_id("Jane Roe", "1234").starts_with(&format!("DOC-{}", yy)));
    }
}
