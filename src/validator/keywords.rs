//! Section and keyword grammar validation
//!
//! Tracks which structural section each line belongs to and checks that the
//! line's leading keyword is legal there. Vocabularies come from
//! [`KeywordConfig`]; nothing about the dialect is hardcoded here except the
//! structural markers below.

use std::collections::HashSet;

use crate::model::{FindingSource, KeywordConfig, ValidationFinding};
use crate::parser::{LineSink, SourceLine, scan};

/// Keyword that opens the header section
const DOCUMENT_KEYWORD: &str = "GOCAD";
/// Prefix that closes the current section
const SECTION_END: &str = "END";
/// Lines starting with these are never checked
const IGNORED_PREFIXES: [&str; 4] = ["{", "}", "#", "//"];
/// Bare terminator lines that are never checked
const IGNORED_LINES: [&str; 3] = ["END", "PROPERTIES", "ESIZES"];
/// Prefixes tolerated anywhere without being in a vocabulary
const TOLERATED_PREFIXES: [&str; 3] = ["*", "PROPERTY", "SOLID"];

fn is_tolerated(text: &str) -> bool {
    TOLERATED_PREFIXES.iter().any(|p| text.starts_with(p))
}

/// Structural section of a GOCAD file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionState {
    /// Outside any section
    #[default]
    None,
    /// Object header and metadata
    Header,
    /// Vertex records
    Coordinates,
    /// Triangle and tetrahedron records
    Connectivity,
}

impl SectionState {
    fn description(&self) -> &'static str {
        match self {
            SectionState::None => "outside sections",
            SectionState::Header => "header",
            SectionState::Coordinates => "coordinates",
            SectionState::Connectivity => "connectivity",
        }
    }
}

/// Outcome of keyword validation for one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordReport {
    /// Errors for illegal keywords, warnings for rejected special values
    pub findings: Vec<ValidationFinding>,
    /// Distinct rejected keywords, in order of first appearance
    pub invalid_keywords: Vec<String>,
}

impl KeywordReport {
    /// True when no keyword error was found
    pub fn is_valid(&self) -> bool {
        !self.findings.iter().any(ValidationFinding::is_error)
    }
}

/// Line sink checking keywords section by section
#[derive(Debug)]
pub struct KeywordValidator<'c> {
    config: &'c KeywordConfig,
    section: SectionState,
    messages: HashSet<String>,
    report: KeywordReport,
}

impl<'c> KeywordValidator<'c> {
    /// Create a validator over a validated configuration
    pub fn new(config: &'c KeywordConfig) -> Self {
        Self {
            config,
            section: SectionState::None,
            messages: HashSet::new(),
            report: KeywordReport::default(),
        }
    }

    /// Current section
    pub fn section(&self) -> SectionState {
        self.section
    }

    /// Consume the validator and return its findings
    pub fn finish(self) -> KeywordReport {
        self.report
    }

    fn transition(&mut self, text: &str) {
        if text.starts_with(DOCUMENT_KEYWORD) {
            self.section = SectionState::Header;
        } else if self.config.is_coordinate_line(text) {
            self.section = SectionState::Coordinates;
        } else if self.config.is_connectivity_line(text) {
            self.section = SectionState::Connectivity;
        } else if text.starts_with(SECTION_END) {
            self.section = SectionState::None;
        }
    }

    fn legal_in_section(&self, text: &str) -> bool {
        if is_tolerated(text) {
            return true;
        }
        match self.section {
            SectionState::None => true,
            SectionState::Header => self.config.is_header_line(text),
            SectionState::Coordinates => self.config.is_coordinate_line(text),
            SectionState::Connectivity => self.config.is_connectivity_line(text),
        }
    }

    fn check_special_value(&mut self, line: &SourceLine<'_>) {
        let Some(special) = self.config.special_keyword_for(line.text) else {
            return;
        };
        let value = &line.text[special.prefix.len()..];
        if !special.rule.accepts(value) {
            let message = format!(
                "invalid value '{}' for '{}'",
                value.trim(),
                special.prefix
            );
            self.report.findings.push(
                ValidationFinding::warning(FindingSource::Keywords, message)
                    .line(Some(line.number)),
            );
        }
    }

    fn reject(&mut self, line: &SourceLine<'_>, keyword: &str, message: String) {
        if !self.messages.insert(message.clone()) {
            return;
        }
        self.report.findings.push(
            ValidationFinding::error(FindingSource::Keywords, message).line(Some(line.number)),
        );
        if !self.report.invalid_keywords.iter().any(|k| k == keyword) {
            self.report.invalid_keywords.push(keyword.to_string());
        }
    }
}

impl LineSink for KeywordValidator<'_> {
    fn accept(&mut self, line: &SourceLine<'_>) {
        let text = line.text;
        if text.is_empty()
            || IGNORED_PREFIXES.iter().any(|p| text.starts_with(p))
            || IGNORED_LINES.contains(&text)
        {
            return;
        }

        if self.config.special_keyword_for(text).is_some() {
            if self.config.check_special_values {
                self.check_special_value(line);
            }
            return;
        }

        self.transition(text);

        let Some(keyword) = line.keyword() else {
            return;
        };

        if !self.legal_in_section(text) {
            let message = format!(
                "invalid keyword in {}: '{}' (line {})",
                self.section.description(),
                keyword,
                line.number
            );
            self.reject(line, keyword, message);
        } else if !self.config.is_known_line(text) && !is_tolerated(text) {
            let message = format!("unknown keyword: '{}' (line {})", keyword, line.number);
            self.reject(line, keyword, message);
        }
    }
}

/// Validate keywords of a whole text on its own pass
pub fn validate_keywords(text: &str, config: &KeywordConfig) -> KeywordReport {
    let mut validator = KeywordValidator::new(config);
    scan(text, &mut [&mut validator]);
    validator.finish()
}
