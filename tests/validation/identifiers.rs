//! Naming convention and identifier table cross-reference

use gocad_qc::parser::scan;
use gocad_qc::validator::{NameCollector, check_identifiers};
use gocad_qc::{IdentifierSet, NamingRule, ObjectClass, Severity};
use tempfile::tempdir;

use crate::common::{FAULTS, write_fixture};

fn collect(text: &str) -> Vec<gocad_qc::validator::NameOccurrence> {
    let mut names = NameCollector::new();
    scan(text, &mut [&mut names]);
    names.finish()
}

#[test]
fn test_table_symmetric_difference() {
    let rule = ObjectClass::Fault.naming_rule().unwrap().unwrap();
    let table: IdentifierSet = ["FLT_0001_001", "FLT_0001_003"].into_iter().collect();
    let check = check_identifiers(&collect(FAULTS), Some(&rule), Some(&table));

    let subjects: Vec<(Severity, &str)> = check
        .findings
        .iter()
        .map(|f| (f.severity, f.subject.as_deref().unwrap_or_default()))
        .collect();
    assert_eq!(
        subjects,
        vec![
            (Severity::Error, "FLT_0001_002"),
            (Severity::Warning, "FLT_0001_003"),
        ]
    );
    assert_eq!(check.findings[0].line, Some(23));
    assert_eq!(check.matches_table, Some(false));
}

#[test]
fn test_wrong_prefix_reports_value_and_pattern() {
    let rule = NamingRule::new("SRF").unwrap();
    let check = check_identifiers(&collect(FAULTS), Some(&rule), None);
    assert_eq!(check.findings.len(), 2);
    assert!(check.found.is_empty());
    assert_eq!(
        check.findings[0].message,
        "invalid id format 'FLT_0001_001', expected SRF_XXXX_XXX"
    );
}

#[test]
fn test_malformed_numbers_rejected() {
    let rule = NamingRule::new("UNT").unwrap();
    for bad in ["UNT_001_001", "UNT_0001_01", "UNT_0001_0011", "unt_0001_001", "UNT_0001_001 x"] {
        assert!(!rule.matches(bad), "{} should not match", bad);
    }
    assert!(rule.matches("UNT_1234_567"));
}

#[test]
fn test_duplicate_names_are_errors() {
    let text = format!("{}{}", FAULTS, FAULTS);
    let rule = NamingRule::new("FLT").unwrap();
    let check = check_identifiers(&collect(&text), Some(&rule), None);
    assert_eq!(check.found.len(), 2);
    assert_eq!(check.findings.len(), 2);
    assert!(check.findings.iter().all(|f| f.message.contains("appears 2 times")));
}

#[test]
fn test_csv_table_drives_cross_reference() {
    let dir = tempdir().unwrap();
    let csv = write_fixture(
        dir.path(),
        "faults.csv",
        "id,code_model,name_fault\nFLT_0001_001,M1,North\nFLT_0001_002,M1,South\n",
    );
    let table = IdentifierSet::from_csv_path(&csv).unwrap();
    let rule = NamingRule::new("FLT").unwrap();
    let check = check_identifiers(&collect(FAULTS), Some(&rule), Some(&table));
    assert!(check.findings.is_empty());
    assert_eq!(check.matches_table, Some(true));
}
