//! Keyword vocabularies and naming rules
//!
//! Everything the keyword validator knows about the GOCAD dialect lives in
//! [`KeywordConfig`]. Supporting a new dialect means widening these tables,
//! not changing the validator.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Value rule attached to a special (decoration) keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "lowercase")]
pub enum SpecialRule {
    /// Value must be one of the listed tokens (case-insensitive)
    Values {
        /// Accepted tokens
        values: Vec<String>,
    },
    /// Value must be an RGB(A) colour
    Color,
}

impl SpecialRule {
    /// Boolean flag rule: `true`, `false`, `1`, `0`, `on`, `off`
    pub fn boolean() -> Self {
        SpecialRule::Values {
            values: ["true", "false", "1", "0", "on", "off"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Check a keyword value against this rule
    ///
    /// Colours are accepted as three or four components, either all in
    /// `0.0..=1.0` or all integers in `0..=255`, or as a `#rrggbb` hex string.
    pub fn accepts(&self, value: &str) -> bool {
        let value = value.trim();
        match self {
            SpecialRule::Values { values } => values.iter().any(|v| v.eq_ignore_ascii_case(value)),
            SpecialRule::Color => is_color(value),
        }
    }
}

fn is_color(value: &str) -> bool {
    if let Some(hex) = value.strip_prefix('#') {
        return hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit());
    }

    let components: Vec<&str> = value.split_whitespace().collect();
    if components.len() != 3 && components.len() != 4 {
        return false;
    }

    let unit = components
        .iter()
        .all(|c| c.parse::<f64>().is_ok_and(|v| (0.0..=1.0).contains(&v)));
    let byte = components.iter().all(|c| c.parse::<u8>().is_ok());
    unit || byte
}

/// A special keyword prefix and its value rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialKeyword {
    /// Line prefix, e.g. `*visible:`
    pub prefix: String,
    /// Rule for the value that follows the prefix
    #[serde(flatten)]
    pub rule: SpecialRule,
}

/// Keyword vocabularies for the section/keyword validator
///
/// Vocabulary entries are matched as line prefixes, so `VRTX` also admits
/// `VRTX` records and `GOCAD` admits `GOCAD_ORIGINAL_COORDINATE_SYSTEM`.
///
/// The configuration is validated once with [`KeywordConfig::validate`]
/// and then passed by reference into every analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Keywords legal in the header section
    pub header_keywords: Vec<String>,
    /// Keywords legal in the coordinates section; each also opens it
    pub coordinate_keywords: Vec<String>,
    /// Keywords legal in the connectivity section; each also opens it
    pub connectivity_keywords: Vec<String>,
    /// Decoration prefixes recognized in any section
    pub special_keyword_rules: Vec<SpecialKeyword>,
    /// Report special keyword values that break their rule as warnings
    pub check_special_values: bool,
}

impl KeywordConfig {
    /// Create a configuration with empty vocabularies
    ///
    /// An empty configuration does not pass [`validate`](Self::validate);
    /// fill it with the `with_*` builders first.
    pub fn empty() -> Self {
        Self {
            header_keywords: Vec::new(),
            coordinate_keywords: Vec::new(),
            connectivity_keywords: Vec::new(),
            special_keyword_rules: Vec::new(),
            check_special_values: false,
        }
    }

    /// Add a header keyword
    pub fn with_header_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.header_keywords.push(keyword.into());
        self
    }

    /// Add a coordinate keyword
    pub fn with_coordinate_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.coordinate_keywords.push(keyword.into());
        self
    }

    /// Add a connectivity keyword
    pub fn with_connectivity_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.connectivity_keywords.push(keyword.into());
        self
    }

    /// Add a special keyword prefix with its value rule
    pub fn with_special_keyword(mut self, prefix: impl Into<String>, rule: SpecialRule) -> Self {
        self.special_keyword_rules.push(SpecialKeyword {
            prefix: prefix.into(),
            rule,
        });
        self
    }

    /// Enable or disable value checks for special keywords
    pub fn with_special_value_checks(mut self, enabled: bool) -> Self {
        self.check_special_values = enabled;
        self
    }

    /// Check the configuration is usable
    ///
    /// Rejects empty vocabularies, blank keywords and prefixes, and value
    /// rules without any accepted value.
    pub fn validate(&self) -> Result<()> {
        let vocabularies = [
            ("header_keywords", &self.header_keywords),
            ("coordinate_keywords", &self.coordinate_keywords),
            ("connectivity_keywords", &self.connectivity_keywords),
        ];

        for (setting, keywords) in vocabularies {
            if keywords.is_empty() {
                return Err(Error::invalid_config(setting, "vocabulary is empty"));
            }
            if let Some(pos) = keywords.iter().position(|k| k.trim().is_empty()) {
                return Err(Error::invalid_config(
                    setting,
                    &format!("keyword {} is blank", pos),
                ));
            }
        }

        for special in &self.special_keyword_rules {
            if special.prefix.trim().is_empty() {
                return Err(Error::invalid_config(
                    "special_keyword_rules",
                    "special keyword prefix is blank",
                ));
            }
            if let SpecialRule::Values { values } = &special.rule {
                if values.is_empty() {
                    return Err(Error::invalid_config(
                        "special_keyword_rules",
                        &format!("'{}' accepts no values", special.prefix),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration
    ///
    /// Missing fields take their values from [`KeywordConfig::default`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: KeywordConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Special keyword whose prefix starts `line`
    pub fn special_keyword_for(&self, line: &str) -> Option<&SpecialKeyword> {
        self.special_keyword_rules
            .iter()
            .find(|s| line.starts_with(s.prefix.as_str()))
    }

    /// True when `line` starts with a header keyword
    pub fn is_header_line(&self, line: &str) -> bool {
        starts_with_any(line, &self.header_keywords)
    }

    /// True when `line` starts with a coordinate keyword
    pub fn is_coordinate_line(&self, line: &str) -> bool {
        starts_with_any(line, &self.coordinate_keywords)
    }

    /// True when `line` starts with a connectivity keyword
    pub fn is_connectivity_line(&self, line: &str) -> bool {
        starts_with_any(line, &self.connectivity_keywords)
    }

    /// True when `line` starts with any vocabulary keyword or special prefix
    pub fn is_known_line(&self, line: &str) -> bool {
        self.is_header_line(line)
            || self.is_coordinate_line(line)
            || self.is_connectivity_line(line)
            || self.special_keyword_for(line).is_some()
    }
}

impl Default for KeywordConfig {
    /// Vocabulary of a TSurf/TSolid export bundle
    fn default() -> Self {
        let mut config = Self::empty();
        for keyword in [
            "GOCAD",
            "TSurf",
            "HEADER",
            "name:",
            "NAME",
            "AXIS_NAME",
            "AXIS_UNIT",
            "ZPOSITIVE",
            "GOCAD_ORIGINAL_COORDINATE_SYSTEM",
            "END_ORIGINAL_COORDINATE_SYSTEM",
            "PROPERTIES",
            "PROP_LEGAL_RANGES",
            "NO_DATA_VALUES",
            "PROPERTY_CLASSES",
            "PROPERTY_KINDS",
            "PROPERTY_SUBCLASSES",
            "ESIZES",
            "UNITS",
        ] {
            config = config.with_header_keyword(keyword);
        }
        for keyword in ["TFACE", "TSOLID", "VRTX", "PVRTX"] {
            config = config.with_coordinate_keyword(keyword);
        }
        for keyword in ["TRGL", "TETRA"] {
            config = config.with_connectivity_keyword(keyword);
        }
        config
            .with_special_keyword("*visible:", SpecialRule::boolean())
            .with_special_keyword("*solid*color:", SpecialRule::Color)
    }
}

fn starts_with_any(line: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| line.starts_with(k.as_str()))
}

/// Class of geological object held by a mesh file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectClass {
    /// Fault surfaces, ids `FLT_NNNN_NNN`
    Fault,
    /// Horizon surfaces, ids `SRF_NNNN_NNN`
    Horizon,
    /// Stratigraphic units, ids `UNT_NNNN_NNN`
    Unit,
    /// Terrain model; no naming convention
    Terrain,
}

impl ObjectClass {
    /// Identifier prefix for this class
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            ObjectClass::Fault => Some("FLT"),
            ObjectClass::Horizon => Some("SRF"),
            ObjectClass::Unit => Some("UNT"),
            ObjectClass::Terrain => None,
        }
    }

    /// Naming rule for this class, if it has one
    pub fn naming_rule(&self) -> Result<Option<NamingRule>> {
        self.prefix().map(NamingRule::new).transpose()
    }
}

/// Object naming convention `PREFIX_NNNN_NNN`
#[derive(Debug, Clone)]
pub struct NamingRule {
    prefix: String,
    pattern: Regex,
}

impl NamingRule {
    /// Compile the rule for an identifier prefix
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.trim().is_empty() {
            return Err(Error::invalid_config("naming prefix", "prefix is blank"));
        }
        let pattern = Regex::new(&format!(r"^{}_\d{{4}}_\d{{3}}$", regex::escape(&prefix)))?;
        Ok(Self { prefix, pattern })
    }

    /// The identifier prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// True when `name` follows the convention exactly
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }

    /// Human-readable form of the expected pattern
    pub fn expected_format(&self) -> String {
        format!("{}_XXXX_XXX", self.prefix)
    }
}
