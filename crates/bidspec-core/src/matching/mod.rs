pub mod engine;
pub mod outcome;

pub use engine::{compile, match_item_number, match_items};
pub use outcome::{CompiledSpecifications, SpecificationMatch, NO_SPECIFICATION_FOUND};

use crate::error::BidspecError;
use crate::model::Item;
use crate::specs::schema::Catalog;
use crate::specs::set::SpecSet;
use crate::specs::CatalogSource;

/// Active specification set and its loaded catalog.
///
/// Construct once and pass to every matching call. The catalog is loaded
/// lazily and reloaded whenever the active set changes.
pub struct SpecContext {
    source: Box<dyn CatalogSource>,
    active: SpecSet,
    catalog: Option<Catalog>,
}

impl SpecContext {
    pub fn new(source: Box<dyn CatalogSource>, active: SpecSet) -> Self {
        SpecContext {
            source,
            active,
            catalog: None,
        }
    }

    pub fn active_set(&self) -> SpecSet {
        self.active
    }

    /// Switch the active set. Returns whether it changed; a change drops the loaded catalog.
    pub fn set_active(&mut self, set: SpecSet) -> bool {
        if set == self.active {
            return false;
        }
        log::info!("switching specification set {} -> {}", self.active, set);
        self.active = set;
        self.catalog = None;
        true
    }

    /// Make `set` active and return its catalog.
    ///
    /// The cached catalog is reused while `set` stays active; switching sets
    /// loads the new one from the source.
    pub fn load_catalog(&mut self, set: SpecSet) -> Result<&Catalog, BidspecError> {
        self.set_active(set);
        let catalog = match self.catalog.take() {
            Some(cached) => cached,
            None => {
                let catalog = self.source.load(set)?;
                log::info!(
                    "loaded {} catalog from {}: {} specifications, {} supplementals",
                    set,
                    self.source.describe(),
                    catalog.specifications.len(),
                    catalog.supplementals.len()
                );
                catalog
            }
        };
        Ok(self.catalog.insert(catalog))
    }

    /// Catalog of the active set, loading it on first use.
    pub fn catalog(&mut self) -> Result<&Catalog, BidspecError> {
        self.load_catalog(self.active)
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    /// Match items against the active set, in input order.
    pub fn match_items(&mut self, items: &[Item]) -> Result<Vec<SpecificationMatch>, BidspecError> {
        let set = self.active;
        let catalog = self.catalog()?;
        let matches = engine::match_items(set, catalog, items);
        let found = matches.iter().filter(|m| m.is_found()).count();
        log::info!("matched {} of {} item(s) against {}", found, matches.len(), set);
        Ok(matches)
    }

    /// Full-text records for the distinct specifications in `matches`.
    pub fn compile(
        &mut self,
        matches: &[SpecificationMatch],
    ) -> Result<CompiledSpecifications, BidspecError> {
        if matches.is_empty() {
            return Ok(CompiledSpecifications::default());
        }
        let catalog = self.catalog()?;
        Ok(engine::compile(catalog, matches))
    }

    pub fn describe_source(&self) -> String {
        self.source.describe()
    }
}

/// `(id, display name)` of every known specification set.
pub fn available_sets() -> Vec<(&'static str, &'static str)> {
    SpecSet::ALL
        .iter()
        .map(|set| (set.id(), set.display_name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::schema::SpecificationRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSource {
        loads: Arc<AtomicUsize>,
    }

    impl CatalogSource for CountingSource {
        fn load(&self, set: SpecSet) -> Result<Catalog, BidspecError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            let item_number = match set {
                SpecSet::LaDotd2016 => "203-01",
                SpecSet::TxDot2024 => "110",
            };
            Ok(Catalog {
                specifications: vec![SpecificationRecord {
                    item_number: item_number.into(),
                    section: "Section".into(),
                    title: set.id().into(),
                    content: String::new(),
                }],
                supplementals: vec![],
            })
        }

        fn describe(&self) -> String {
            "counting".into()
        }
    }

    struct FailingSource;

    impl CatalogSource for FailingSource {
        fn load(&self, set: SpecSet) -> Result<Catalog, BidspecError> {
            Err(BidspecError::CatalogLoad {
                path: set.id().into(),
                reason: "unreachable".into(),
            })
        }

        fn describe(&self) -> String {
            "failing".into()
        }
    }

    fn item(n: &str) -> Item {
        Item {
            item_number: n.into(),
            description: String::new(),
            quantity: String::new(),
            unit: String::new(),
        }
    }

    fn counting_context() -> (SpecContext, Arc<AtomicUsize>) {
        let loads = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            loads: Arc::clone(&loads),
        };
        (SpecContext::new(Box::new(source), SpecSet::LaDotd2016), loads)
    }

    #[test]
    fn test_catalog_loaded_once_per_set() {
        let (mut ctx, loads) = counting_context();
        assert!(!ctx.is_loaded());
        ctx.match_items(&[item("203-01")]).unwrap();
        ctx.match_items(&[item("203-01")]).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_switching_set_forces_reload() {
        let (mut ctx, loads) = counting_context();
        ctx.match_items(&[item("203-01")]).unwrap();

        assert!(!ctx.set_active(SpecSet::LaDotd2016));
        assert!(ctx.is_loaded());
        assert!(ctx.set_active(SpecSet::TxDot2024));
        assert!(!ctx.is_loaded());

        let matches = ctx.match_items(&[item("110")]).unwrap();
        assert!(matches[0].is_found());
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_load_catalog_switches_set() {
        let (mut ctx, _) = counting_context();
        let catalog = ctx.load_catalog(SpecSet::TxDot2024).unwrap();
        assert_eq!(catalog.specifications[0].item_number, "110");
        assert_eq!(ctx.active_set(), SpecSet::TxDot2024);
    }

    #[test]
    fn test_load_catalog_reuses_cache_for_active_set() {
        let (mut ctx, loads) = counting_context();
        ctx.load_catalog(SpecSet::LaDotd2016).unwrap();
        ctx.load_catalog(SpecSet::LaDotd2016).unwrap();
        ctx.catalog().unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        ctx.load_catalog(SpecSet::TxDot2024).unwrap();
        ctx.load_catalog(SpecSet::TxDot2024).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_catalog_failure_is_fatal() {
        let mut ctx = SpecContext::new(Box::new(FailingSource), SpecSet::LaDotd2016);
        assert!(matches!(
            ctx.match_items(&[item("203-01")]),
            Err(BidspecError::CatalogLoad { .. })
        ));
    }

    #[test]
    fn test_compile_empty_needs_no_catalog() {
        let mut ctx = SpecContext::new(Box::new(FailingSource), SpecSet::LaDotd2016);
        let compiled = ctx.compile(&[]).unwrap();
        assert!(compiled.main_specs.is_empty());
        assert!(compiled.supplemental_specs.is_empty());
    }

    #[test]
    fn test_available_sets() {
        let sets = available_sets();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0], ("ladotd-2016", "LA DOTD 2016 Standard Specifications"));
    }
}
