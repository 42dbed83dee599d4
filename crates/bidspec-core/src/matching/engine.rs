use std::collections::HashSet;

use crate::matching::outcome::{CompiledSpecifications, SpecificationMatch};
use crate::model::Item;
use crate::specs::schema::{Catalog, SpecificationRecord, SupplementalSpecRecord};
use crate::specs::set::SpecSet;

const MAIN_PLACEHOLDER_TITLE: &str = "Unknown";
const MAIN_PLACEHOLDER_CONTENT: &str = "Specification content not available";
const SUPPLEMENTAL_PLACEHOLDER_TITLE: &str = "Unknown Supplemental Specification";
const SUPPLEMENTAL_PLACEHOLDER_CONTENT: &str = "Supplemental specification content not available";

/// Match one item number against a catalog.
///
/// 1. Exact item-number match.
/// 2. If the token is in the set's grammar, the set's resolution rule.
/// 3. Otherwise the "No specification found" sentinel.
pub fn match_item_number(set: SpecSet, catalog: &Catalog, item_number: &str) -> SpecificationMatch {
    let token = item_number.trim();

    let record = catalog.find_exact(token).or_else(|| {
        if set.is_valid_item_number(token) {
            set.resolve(token, catalog)
        } else {
            None
        }
    });

    match record {
        Some(record) => SpecificationMatch {
            item_number: item_number.to_string(),
            spec_reference: record.reference(),
            spec_content: record.content.clone(),
            supplemental_refs: catalog.supplementals_cited_in(&record.content),
        },
        None => {
            log::debug!("no specification for item {}", token);
            SpecificationMatch::not_found(item_number)
        }
    }
}

/// Match every item, preserving input order.
pub fn match_items(set: SpecSet, catalog: &Catalog, items: &[Item]) -> Vec<SpecificationMatch> {
    items
        .iter()
        .map(|item| match_item_number(set, catalog, &item.item_number))
        .collect()
}

/// Collect the distinct specifications and supplementals cited by `matches`.
///
/// Order follows first appearance. A reference the catalog cannot resolve
/// again is replaced by a placeholder record.
pub fn compile(catalog: &Catalog, matches: &[SpecificationMatch]) -> CompiledSpecifications {
    let mut references: Vec<&str> = Vec::new();
    let mut codes: Vec<&str> = Vec::new();
    let mut seen_refs = HashSet::new();
    let mut seen_codes = HashSet::new();

    for m in matches.iter().filter(|m| m.is_found()) {
        if seen_refs.insert(m.spec_reference.as_str()) {
            references.push(&m.spec_reference);
        }
        for supplemental in &m.supplemental_refs {
            if seen_codes.insert(supplemental.code.as_str()) {
                codes.push(&supplemental.code);
            }
        }
    }

    let main_specs = references
        .into_iter()
        .map(|reference| match catalog.find_by_reference(reference) {
            Some(record) => record.clone(),
            None => {
                log::warn!("specification '{}' not in catalog", reference);
                SpecificationRecord {
                    item_number: String::new(),
                    section: reference.to_string(),
                    title: MAIN_PLACEHOLDER_TITLE.into(),
                    content: MAIN_PLACEHOLDER_CONTENT.into(),
                }
            }
        })
        .collect();

    let supplemental_specs = codes
        .into_iter()
        .map(|code| match catalog.find_supplemental(code) {
            Some(record) => record.clone(),
            None => {
                log::warn!("supplemental specification '{}' not in catalog", code);
                SupplementalSpecRecord {
                    code: code.to_string(),
                    title: SUPPLEMENTAL_PLACEHOLDER_TITLE.into(),
                    content: SUPPLEMENTAL_PLACEHOLDER_CONTENT.into(),
                }
            }
        })
        .collect();

    CompiledSpecifications {
        main_specs,
        supplemental_specs,
    }
}
