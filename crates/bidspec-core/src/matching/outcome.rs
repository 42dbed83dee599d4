use serde::{Deserialize, Serialize};

use crate::specs::schema::{SpecificationRecord, SupplementalSpecRecord};

/// Reference string reported for an item with no catalog entry.
pub const NO_SPECIFICATION_FOUND: &str = "No specification found";

/// Catalog match for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationMatch {
    /// Item number as it appeared in the input.
    pub item_number: String,
    /// `"<section> <title>"` of the matched entry, or [`NO_SPECIFICATION_FOUND`].
    pub spec_reference: String,
    /// Full text of the matched entry; empty when unmatched.
    pub spec_content: String,
    /// Supplementals cited in `spec_content`, in catalog order.
    pub supplemental_refs: Vec<SupplementalSpecRecord>,
}

impl SpecificationMatch {
    pub fn not_found(item_number: impl Into<String>) -> Self {
        SpecificationMatch {
            item_number: item_number.into(),
            spec_reference: NO_SPECIFICATION_FOUND.into(),
            spec_content: String::new(),
            supplemental_refs: Vec::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        self.spec_reference != NO_SPECIFICATION_FOUND
    }
}

/// Deduplicated full-text records for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledSpecifications {
    pub main_specs: Vec<SpecificationRecord>,
    pub supplemental_specs: Vec<SupplementalSpecRecord>,
}

impl CompiledSpecifications {
    pub fn is_empty(&self) -> bool {
        self.main_specs.is_empty() && self.supplemental_specs.is_empty()
    }
}
