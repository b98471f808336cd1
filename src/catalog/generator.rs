use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::CatalogRecord;

/// Attribute names every synthetic catalog carries.
pub const ATTRIBUTES: [&str; 6] = [
    "labeling",
    "display_regulations",
    "branding_authenticity",
    "image_present",
    "price_present",
    "product_details",
];

/// Produces synthetic catalogs with every attribute drawn uniformly from `0.0..=1.0`.
///
/// The random source is owned by the generator, so a seeded generator yields
/// the same sequence of catalogs on every run.
#[derive(Debug, Clone)]
pub struct CatalogGenerator<R = StdRng> {
    rng: R,
}

impl CatalogGenerator<StdRng> {
    /// Reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> CatalogGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self) -> CatalogRecord {
        ATTRIBUTES
            .iter()
            .map(|name| (*name, self.rng.random_range(0.0..=1.0)))
            .collect()
    }

    pub fn generate_batch(&mut self, count: usize) -> Vec<CatalogRecord> {
        (0..count).map(|_| self.generate()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_catalog_has_all_attributes_in_range() {
        let mut generator = CatalogGenerator::seeded(7);
        for _ in 0..100 {
            let catalog = generator.generate();
            assert_eq!(catalog.len(), ATTRIBUTES.len());
            for name in ATTRIBUTES {
                let value = catalog.get(name);
                assert!((0.0..=1.0).contains(&value), "{} out of range: {}", name, value);
            }
        }
    }

    #[test]
    fn test_same_seed_same_catalogs() {
        let a = CatalogGenerator::seeded(42).generate_batch(10);
        let b = CatalogGenerator::seeded(42).generate_batch(10);
        assert_eq!(a, b);
    }

    #[test]
    fn test_consecutive_samples_differ() {
        let mut generator = CatalogGenerator::seeded(42);
        let first = generator.generate();
        let second = generator.generate();
        assert_ne!(first, second);
    }

    #[test]
    fn test_generate_batch_count() {
        let batch = CatalogGenerator::from_entropy().generate_batch(25);
        assert_eq!(batch.len(), 25);
    }
}
