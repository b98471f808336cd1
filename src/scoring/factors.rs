use crate::catalog::CatalogRecord;

/// One quality dimension of a catalog.
///
/// Implementations must be pure and return a non-negative sub-score. Absent
/// attributes read as `0.0` through [`CatalogRecord::get`], so evaluation never
/// fails on a sparse record.
pub trait EvaluationFunction: Send + Sync {
    fn evaluate(&self, catalog: &CatalogRecord) -> f64;
}

impl<F> EvaluationFunction for F
where
    F: Fn(&CatalogRecord) -> f64 + Send + Sync,
{
    fn evaluate(&self, catalog: &CatalogRecord) -> f64 {
        self(catalog)
    }
}

/// Regulatory compliance: labeling and display regulations.
pub fn compliance(catalog: &CatalogRecord) -> f64 {
    catalog.get("labeling") * 0.3 + catalog.get("display_regulations") * 0.2
}

/// Listing correctness: branding authenticity.
pub fn correctness(catalog: &CatalogRecord) -> f64 {
    catalog.get("branding_authenticity") * 0.4
}

/// Listing completeness: image, price and product details.
pub fn completeness(catalog: &CatalogRecord) -> f64 {
    catalog.get("image_present") * 0.1
        + catalog.get("price_present") * 0.2
        + catalog.get("product_details") * 0.2
}

/// Weighted sum over an arbitrary set of attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearEvaluation {
    terms: Vec<(String, f64)>,
}

impl LinearEvaluation {
    pub fn new<K: Into<String>>(terms: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self {
            terms: terms.into_iter().map(|(k, w)| (k.into(), w)).collect(),
        }
    }
}

impl EvaluationFunction for LinearEvaluation {
    fn evaluate(&self, catalog: &CatalogRecord) -> f64 {
        self.terms
            .iter()
            .map(|(attribute, weight)| catalog.get(attribute) * weight)
            .sum()
    }
}

/// Built-in evaluation functions.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Compliance,
    Correctness,
    Completeness,
    Linear(LinearEvaluation),
}

impl EvaluationFunction for Evaluation {
    fn evaluate(&self, catalog: &CatalogRecord) -> f64 {
        match self {
            Evaluation::Compliance => compliance(catalog),
            Evaluation::Correctness => correctness(catalog),
            Evaluation::Completeness => completeness(catalog),
            Evaluation::Linear(linear) => linear.evaluate(catalog),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ATTRIBUTES;

    fn all_ones() -> CatalogRecord {
        ATTRIBUTES.iter().map(|name| (*name, 1.0)).collect()
    }

    #[test]
    fn test_reference_functions_on_full_catalog() {
        let catalog = all_ones();
        assert!((compliance(&catalog) - 0.5).abs() < 1e-12);
        assert!((correctness(&catalog) - 0.4).abs() < 1e-12);
        assert!((completeness(&catalog) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_reference_functions_on_empty_catalog() {
        let catalog = CatalogRecord::new();
        assert_eq!(compliance(&catalog), 0.0);
        assert_eq!(correctness(&catalog), 0.0);
        assert_eq!(completeness(&catalog), 0.0);
    }

    #[test]
    fn test_partial_catalog() {
        let catalog = CatalogRecord::new().with("labeling", 1.0);
        assert!((compliance(&catalog) - 0.3).abs() < 1e-12);
        assert_eq!(completeness(&catalog), 0.0);
    }

    #[test]
    fn test_unrelated_attributes_ignored() {
        let catalog = CatalogRecord::new().with("shipping_speed", 1.0);
        assert_eq!(Evaluation::Compliance.evaluate(&catalog), 0.0);
        assert_eq!(Evaluation::Correctness.evaluate(&catalog), 0.0);
    }

    #[test]
    fn test_enum_matches_free_functions() {
        let catalog = CatalogRecord::new()
            .with("labeling", 0.2)
            .with("display_regulations", 0.9)
            .with("price_present", 0.4);
        assert_eq!(Evaluation::Compliance.evaluate(&catalog), compliance(&catalog));
        assert_eq!(Evaluation::Completeness.evaluate(&catalog), completeness(&catalog));
    }

    #[test]
    fn test_linear_evaluation() {
        let linear = LinearEvaluation::new([("price_present", 0.5), ("image_present", 0.25)]);
        let catalog = CatalogRecord::new()
            .with("price_present", 1.0)
            .with("image_present", 0.8);
        assert!((linear.evaluate(&catalog) - 0.7).abs() < 1e-12);
        assert_eq!(linear.evaluate(&CatalogRecord::new()), 0.0);
    }

    #[test]
    fn test_closure_is_evaluation_function() {
        let doubled = |c: &CatalogRecord| c.get("labeling") * 2.0;
        let catalog = CatalogRecord::new().with("labeling", 0.25);
        assert_eq!(doubled.evaluate(&catalog), 0.5);
    }
}
