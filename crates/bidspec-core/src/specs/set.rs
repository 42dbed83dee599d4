use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::BidspecError;
use crate::specs::schema::{Catalog, SpecificationRecord};

static LADOTD_2016_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"^\d{3}-\d{2}(-\d{5})?$", // 203-01, 701-01-00100
        r"^\d{3}-\d{2}-\d{2}$",    // 203-01-00
        r"^\d{3}-\d{2}-\d{3}$",    // 203-01-001
        r"^\d{3}-\d{2}-\d{4}$",    // 203-01-0000
    ])
});

static TXDOT_2024_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"^\d{3}$",          // 100, 200
        r"^\d{3}\.\d{1,3}$", // 100.1, 200.10
        r"^\d{4}$",          // 1000 (special items)
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("built-in item number pattern must compile"))
        .collect()
}

/// How an item number without an exact catalog entry is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// First catalog entry whose item number starts with the token's first `n` characters.
    Prefix(usize),
    /// Catalog entry whose item number equals the token up to its first decimal point.
    BeforeDecimal,
}

/// A known specification set: a numbering grammar paired with a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecSet {
    #[serde(rename = "ladotd-2016")]
    #[default]
    LaDotd2016,
    #[serde(rename = "txdot-2024")]
    TxDot2024,
}

impl fmt::Display for SpecSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl SpecSet {
    pub const ALL: &'static [SpecSet] = &[SpecSet::LaDotd2016, SpecSet::TxDot2024];

    pub fn from_id(id: &str) -> Result<SpecSet, BidspecError> {
        let id = id.trim();
        SpecSet::ALL
            .iter()
            .copied()
            .find(|set| set.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| BidspecError::UnknownSpecSet(id.to_string()))
    }

    /// Identifier, also the catalog directory name.
    pub fn id(&self) -> &'static str {
        match self {
            SpecSet::LaDotd2016 => "ladotd-2016",
            SpecSet::TxDot2024 => "txdot-2024",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SpecSet::LaDotd2016 => "LA DOTD 2016 Standard Specifications",
            SpecSet::TxDot2024 => "TxDOT 2024 Standard Specifications",
        }
    }

    /// Ordered item-number grammar of this set. Each pattern matches a whole token.
    pub fn item_number_patterns(&self) -> &'static [Regex] {
        match self {
            SpecSet::LaDotd2016 => LADOTD_2016_PATTERNS.as_slice(),
            SpecSet::TxDot2024 => TXDOT_2024_PATTERNS.as_slice(),
        }
    }

    pub fn resolution(&self) -> Resolution {
        match self {
            SpecSet::LaDotd2016 => Resolution::Prefix(3),
            SpecSet::TxDot2024 => Resolution::BeforeDecimal,
        }
    }

    /// Whether `token` is an item number in this set's grammar.
    ///
    /// No looser fallback applies: anything outside the grammar is rejected.
    pub fn is_valid_item_number(&self, token: &str) -> bool {
        !token.is_empty()
            && self
                .item_number_patterns()
                .iter()
                .any(|pattern| pattern.is_match(token))
    }

    /// Resolve a grammar-conforming token that has no exact catalog entry.
    pub fn resolve<'c>(&self, token: &str, catalog: &'c Catalog) -> Option<&'c SpecificationRecord> {
        match self.resolution() {
            Resolution::Prefix(n) => {
                let prefix = token.get(..n)?;
                catalog.find_by_prefix(prefix)
            }
            Resolution::BeforeDecimal => {
                let main = token.split('.').next().unwrap_or(token);
                catalog.find_exact(main)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(item_number: &str) -> SpecificationRecord {
        SpecificationRecord {
            item_number: item_number.into(),
            section: format!("Section {}", &item_number[..3]),
            title: "Title".into(),
            content: String::new(),
        }
    }

    #[test]
    fn test_ladotd_grammar() {
        let set = SpecSet::LaDotd2016;
        for token in ["203-01", "201-01-00100", "203-01-00", "203-01-001", "203-01-0000"] {
            assert!(set.is_valid_item_number(token), "{token}");
        }
        for token in ["203", "203-1", "203-01-000001", " 203-01", "203-01a", "", "ITEM"] {
            assert!(!set.is_valid_item_number(token), "{token}");
        }
    }

    #[test]
    fn test_txdot_grammar() {
        let set = SpecSet::TxDot2024;
        for token in ["100", "100.1", "200.10", "247.123", "1000"] {
            assert!(set.is_valid_item_number(token), "{token}");
        }
        for token in ["10", "100.", "100.1234", "203-01", "10000"] {
            assert!(!set.is_valid_item_number(token), "{token}");
        }
    }

    #[test]
    fn test_validator_is_deterministic() {
        let set = SpecSet::LaDotd2016;
        let first = set.is_valid_item_number("701-01-00100");
        for _ in 0..10 {
            assert_eq!(set.is_valid_item_number("701-01-00100"), first);
        }
    }

    #[test]
    fn test_from_id() {
        assert_eq!(SpecSet::from_id("ladotd-2016").unwrap(), SpecSet::LaDotd2016);
        assert_eq!(SpecSet::from_id(" TXDOT-2024 ").unwrap(), SpecSet::TxDot2024);
        assert!(matches!(
            SpecSet::from_id("nhdot-2010"),
            Err(BidspecError::UnknownSpecSet(_))
        ));
    }

    #[test]
    fn test_prefix_resolution() {
        let catalog = Catalog {
            specifications: vec![record("203-01"), record("201-01")],
            supplementals: vec![],
        };
        let hit = SpecSet::LaDotd2016.resolve("201-01-00100", &catalog).unwrap();
        assert_eq!(hit.item_number, "201-01");
        assert!(SpecSet::LaDotd2016.resolve("999-99", &catalog).is_none());
    }

    #[test]
    fn test_decimal_resolution() {
        let catalog = Catalog {
            specifications: vec![record("1000"), record("100")],
            supplementals: vec![],
        };
        let hit = SpecSet::TxDot2024.resolve("100.10", &catalog).unwrap();
        assert_eq!(hit.item_number, "100");
        assert!(SpecSet::TxDot2024.resolve("110.1", &catalog).is_none());
    }
}
