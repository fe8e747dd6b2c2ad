//! Section and keyword grammar through the public API

use gocad_qc::validator::validate_keywords;
use gocad_qc::{KeywordConfig, Severity};

fn header_only_config() -> KeywordConfig {
    KeywordConfig::empty()
        .with_header_keyword("GOCAD")
        .with_header_keyword("HEADER")
        .with_header_keyword("name:")
        .with_coordinate_keyword("VRTX")
        .with_connectivity_keyword("TRGL")
}

#[test]
fn test_reference_bundle_is_clean() {
    let faults = validate_keywords(crate::common::FAULTS, &KeywordConfig::default());
    assert!(faults.is_valid(), "{:?}", faults.findings);
    assert!(faults.invalid_keywords.is_empty());

    let units = validate_keywords(crate::common::UNITS, &KeywordConfig::default());
    assert!(units.is_valid(), "{:?}", units.findings);
}

#[test]
fn test_unknown_header_keyword_names_token_and_line() {
    let report = validate_keywords("GOCAD TSurf 1\nHEADER {\nFOO bar\n}\n", &header_only_config());
    assert_eq!(report.findings.len(), 1);
    let finding = &report.findings[0];
    assert_eq!(finding.severity, Severity::Error);
    assert_eq!(finding.line, Some(3));
    assert!(finding.message.contains("'FOO'"));
    assert!(finding.message.contains("header"));
}

#[test]
fn test_repeated_token_reported_per_line() {
    let report = validate_keywords("GOCAD TSurf 1\nFOO bar\nFOO bar\n", &header_only_config());
    let lines: Vec<Option<usize>> = report.findings.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![Some(2), Some(3)]);
    assert_eq!(report.invalid_keywords, vec!["FOO".to_string()]);
}

#[test]
fn test_header_keyword_in_connectivity() {
    let text = "GOCAD TSurf 1\nname:X\nVRTX 1 0 0 0\nTRGL 1 2 3\nHEADER {\n";
    let report = validate_keywords(text, &header_only_config());
    assert_eq!(report.findings.len(), 1);
    assert!(report.findings[0].message.contains("connectivity"));
    assert_eq!(report.findings[0].line, Some(5));
}

#[test]
fn test_json_vocabulary() {
    let json = r#"{
        "header_keywords": ["GOCAD", "HEADER", "name:"],
        "coordinate_keywords": ["VRTX"],
        "connectivity_keywords": ["TRGL"],
        "special_keyword_rules": [
            {"prefix": "*visible:", "rule": "values", "values": ["true", "false"]}
        ],
        "check_special_values": true
    }"#;
    let config = KeywordConfig::from_json_str(json).unwrap();
    let report = validate_keywords("GOCAD TSurf 1\n*visible:perhaps\nname:A\n", &config);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].severity, Severity::Warning);
    assert!(report.is_valid());
}

#[test]
fn test_empty_vocabulary_rejected() {
    let json = r#"{"header_keywords": [], "coordinate_keywords": ["VRTX"], "connectivity_keywords": ["TRGL"]}"#;
    let err = KeywordConfig::from_json_str(json).unwrap_err();
    assert!(err.to_string().contains("header_keywords"));
}

#[test]
fn test_unknown_token_outside_sections_reported_per_line() {
    let text = "GOCAD TSurf 1\nEND_ORIGINAL_COORDINATE_SYSTEM\nBSTONE 1\nBSTONE 2\n";
    let report = validate_keywords(text, &KeywordConfig::default());
    let lines: Vec<Option<usize>> = report.findings.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![Some(3), Some(4)]);
    assert_eq!(report.invalid_keywords, vec!["BSTONE".to_string()]);
}

#[test]
fn test_property_class_header_inside_header_is_clean() {
    let text = "\
GOCAD TSurf 1
HEADER {
name:FLT_0001_001
}
PROPERTY_CLASS_HEADER Z {
*painted:true
SOLID
TFACE
";
    let report = validate_keywords(text, &KeywordConfig::default());
    assert!(report.is_valid(), "{:?}", report.findings);
    assert!(report.invalid_keywords.is_empty());
}
