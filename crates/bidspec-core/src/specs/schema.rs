use serde::{Deserialize, Serialize};

/// One main specification entry from `specifications.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationRecord {
    pub item_number: String,
    pub section: String,
    pub title: String,
    /// Full specification text.
    #[serde(rename = "specContent", alias = "content", default)]
    pub content: String,
}

impl SpecificationRecord {
    /// Reference string shown for a match: section followed by title.
    pub fn reference(&self) -> String {
        format!("{} {}", self.section, self.title)
    }
}

/// One supplemental specification from `supplementalSpecs.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementalSpecRecord {
    /// Short code cited from within main specification text.
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Both datasets of one specification set, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub specifications: Vec<SpecificationRecord>,
    pub supplementals: Vec<SupplementalSpecRecord>,
}

impl Catalog {
    pub fn find_exact(&self, item_number: &str) -> Option<&SpecificationRecord> {
        self.specifications
            .iter()
            .find(|s| s.item_number == item_number)
    }

    pub fn find_by_prefix(&self, prefix: &str) -> Option<&SpecificationRecord> {
        self.specifications
            .iter()
            .find(|s| s.item_number.starts_with(prefix))
    }

    pub fn find_by_reference(&self, reference: &str) -> Option<&SpecificationRecord> {
        self.specifications
            .iter()
            .find(|s| s.reference() == reference)
    }

    pub fn find_supplemental(&self, code: &str) -> Option<&SupplementalSpecRecord> {
        self.supplementals.iter().find(|s| s.code == code)
    }

    /// Supplementals whose code occurs anywhere in `content`, in catalog order.
    ///
    /// Plain substring containment: a short code also matches inside a longer token.
    pub fn supplementals_cited_in(&self, content: &str) -> Vec<SupplementalSpecRecord> {
        if content.is_empty() {
            return Vec::new();
        }
        self.supplementals
            .iter()
            .filter(|s| content.contains(s.code.as_str()))
            .cloned()
            .collect()
    }
}
