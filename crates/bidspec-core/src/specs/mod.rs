pub mod builtin;
pub mod schema;
pub mod set;

use crate::error::BidspecError;
use schema::{Catalog, SpecificationRecord, SupplementalSpecRecord};
use set::SpecSet;
use std::path::{Path, PathBuf};

pub const SPECIFICATIONS_FILE: &str = "specifications.json";
pub const SUPPLEMENTALS_FILE: &str = "supplementalSpecs.json";

/// Where the catalog of a specification set comes from.
pub trait CatalogSource: Send + Sync {
    /// Load both datasets of `set`. Any failure is fatal to the caller.
    fn load(&self, set: SpecSet) -> Result<Catalog, BidspecError>;

    /// Human-readable location (for diagnostics).
    fn describe(&self) -> String;
}

/// Catalogs stored on disk as `<root>/<set id>/specifications.json` and
/// `<root>/<set id>/supplementalSpecs.json`.
#[derive(Debug, Clone)]
pub struct DirCatalogSource {
    root: PathBuf,
}

impl DirCatalogSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirCatalogSource { root: root.into() }
    }

    pub fn set_dir(&self, set: SpecSet) -> PathBuf {
        self.root.join(set.id())
    }
}

impl CatalogSource for DirCatalogSource {
    fn load(&self, set: SpecSet) -> Result<Catalog, BidspecError> {
        let dir = self.set_dir(set);
        load_catalog_dir(&dir)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Load a catalog from a directory holding both JSON datasets.
pub fn load_catalog_dir(dir: &Path) -> Result<Catalog, BidspecError> {
    let spec_path = dir.join(SPECIFICATIONS_FILE);
    let supp_path = dir.join(SUPPLEMENTALS_FILE);
    let specifications = read_to_string(&spec_path)?;
    let supplementals = read_to_string(&supp_path)?;
    parse_catalog(&specifications, &spec_path, &supplementals, &supp_path)
}

fn read_to_string(path: &Path) -> Result<String, BidspecError> {
    std::fs::read_to_string(path).map_err(|e| BidspecError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Parse both catalog datasets from JSON strings.
pub fn parse_catalog(
    specifications_json: &str,
    specifications_source: &Path,
    supplementals_json: &str,
    supplementals_source: &Path,
) -> Result<Catalog, BidspecError> {
    let specifications: Vec<SpecificationRecord> = serde_json::from_str(specifications_json)
        .map_err(|e| BidspecError::CatalogLoad {
            path: specifications_source.to_path_buf(),
            reason: e.to_string(),
        })?;
    let supplementals: Vec<SupplementalSpecRecord> = serde_json::from_str(supplementals_json)
        .map_err(|e| BidspecError::CatalogLoad {
            path: supplementals_source.to_path_buf(),
            reason: e.to_string(),
        })?;

    let catalog = Catalog {
        specifications,
        supplementals,
    };
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Validate that a catalog is well-formed.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), BidspecError> {
    for (i, spec) in catalog.specifications.iter().enumerate() {
        if spec.item_number.trim().is_empty() {
            return Err(BidspecError::CatalogInvalid(format!(
                "specification #{} ('{}') has an empty itemNumber",
                i + 1,
                spec.title
            )));
        }
    }

    for (i, supp) in catalog.supplementals.iter().enumerate() {
        if supp.code.trim().is_empty() {
            return Err(BidspecError::CatalogInvalid(format!(
                "supplemental specification #{} ('{}') has an empty code",
                i + 1,
                supp.title
            )));
        }
    }

    Ok(())
}
