use std::path::Path;

use crate::error::BidspecError;
use crate::specs::schema::Catalog;
use crate::specs::set::SpecSet;
use crate::specs::{parse_catalog, CatalogSource};

const LADOTD_2016_SPECS_JSON: &str =
    include_str!("../../../../catalogs/ladotd-2016/specifications.json");
const LADOTD_2016_SUPPLEMENTALS_JSON: &str =
    include_str!("../../../../catalogs/ladotd-2016/supplementalSpecs.json");
const TXDOT_2024_SPECS_JSON: &str =
    include_str!("../../../../catalogs/txdot-2024/specifications.json");
const TXDOT_2024_SUPPLEMENTALS_JSON: &str =
    include_str!("../../../../catalogs/txdot-2024/supplementalSpecs.json");

/// Catalogs compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledCatalogs;

impl CatalogSource for BundledCatalogs {
    fn load(&self, set: SpecSet) -> Result<Catalog, BidspecError> {
        let (specs, supplementals) = match set {
            SpecSet::LaDotd2016 => (LADOTD_2016_SPECS_JSON, LADOTD_2016_SUPPLEMENTALS_JSON),
            SpecSet::TxDot2024 => (TXDOT_2024_SPECS_JSON, TXDOT_2024_SUPPLEMENTALS_JSON),
        };
        let dir = Path::new("catalogs").join(set.id());
        parse_catalog(
            specs,
            &dir.join(crate::specs::SPECIFICATIONS_FILE),
            supplementals,
            &dir.join(crate::specs::SUPPLEMENTALS_FILE),
        )
    }

    fn describe(&self) -> String {
        "bundled catalogs".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalogs_load() {
        for set in SpecSet::ALL {
            let catalog = BundledCatalogs.load(*set).unwrap();
            assert!(!catalog.specifications.is_empty(), "{set}");
            assert!(!catalog.supplementals.is_empty(), "{set}");
        }
    }

    #[test]
    fn test_bundled_item_numbers_follow_grammar() {
        for set in SpecSet::ALL {
            let catalog = BundledCatalogs.load(*set).unwrap();
            for spec in &catalog.specifications {
                assert!(
                    set.is_valid_item_number(&spec.item_number),
                    "{} is not a {} item number",
                    spec.item_number,
                    set
                );
            }
        }
    }
}
