use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Canonical reference tier in gallons. Pricing-table totals are normalized
/// against this tier, and running-total pages price exactly this quantity.
pub const DEFAULT_REFERENCE_GALLONS: u32 = 150;

/// The closed set of extraction strategies. One supplier page shape each;
/// onboarding a new supplier means picking (or adding) a named variant here,
/// never widening an existing pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// `"<qty> gallons or more-$<price> per gallon"`, one match per element.
    TierList,
    /// Storefront widget, price group before quantity: `"$ <price> ... For <qty> Gallons"`.
    StorefrontPriceFirst,
    /// Storefront widget after a page revision swapped the group order:
    /// `"For <qty> Gallons ... $ <price>"`.
    StorefrontQuantityFirst,
    /// Single promo sentence; absence of the exact phrase means no tier.
    PromoBlurb,
    /// One block listing several `"<qty> Gallons or more: $<price>"` tiers.
    MultiTier,
    /// Pricing-table widget with nested title and price sub-elements.
    PricingTable,
    /// Trailing running-total element priced at the reference tier.
    RunningTotal,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StrategyKind::TierList => "tier-list",
            StrategyKind::StorefrontPriceFirst => "storefront-price-first",
            StrategyKind::StorefrontQuantityFirst => "storefront-quantity-first",
            StrategyKind::PromoBlurb => "promo-blurb",
            StrategyKind::MultiTier => "multi-tier",
            StrategyKind::PricingTable => "pricing-table",
            StrategyKind::RunningTotal => "running-total",
        };
        write!(f, "{s}")
    }
}

/// Element selection bound to a supplier. `class` may hold several
/// space-separated class names that must all be present on the element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Restrict matching to a tag name (e.g. `span`). Any tag when unset.
    pub tag: Option<String>,
    /// Exact class name(s) the element must carry.
    pub class: Option<String>,
    /// Match elements carrying a class that starts with this prefix
    /// (pricing-table outer containers have run-numbered classes).
    pub class_prefix: Option<String>,
    /// Class of the nested title sub-element (pricing-table only).
    pub title_class: Option<String>,
    /// Class of the nested price sub-element (pricing-table only).
    pub price_class: Option<String>,
}

fn default_reference_gallons() -> u32 {
    DEFAULT_REFERENCE_GALLONS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierConfig {
    pub name: String,
    pub url: String,
    pub strategy: StrategyKind,
    pub selector: SelectorConfig,
    /// Tier used to normalize bulk totals into a per-gallon rate.
    #[serde(default = "default_reference_gallons")]
    pub reference_gallons: u32,
    /// Attach `If-Modified-Since`/`If-None-Match` validators on refetch.
    /// Only worthwhile for origins that send reliable caching headers.
    #[serde(default)]
    pub conditional_fetch: bool,
}

impl SupplierConfig {
    /// Generate a URL-safe slug from the supplier name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

#[derive(Debug, Deserialize)]
pub struct SuppliersFile {
    pub suppliers: Vec<SupplierConfig>,
}

/// Load and validate the supplier registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_suppliers(path: &Path) -> Result<SuppliersFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SuppliersFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let suppliers_file: SuppliersFile =
        serde_yaml::from_str(&content).map_err(ConfigError::SuppliersFileParse)?;

    validate_suppliers(&suppliers_file)?;

    Ok(suppliers_file)
}

fn validate_suppliers(suppliers_file: &SuppliersFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for supplier in &suppliers_file.suppliers {
        if supplier.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "supplier name must be non-empty".to_string(),
            ));
        }

        if !supplier.url.starts_with("http://") && !supplier.url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "supplier '{}' has non-HTTP url '{}'",
                supplier.name, supplier.url
            )));
        }

        if supplier.reference_gallons == 0 {
            return Err(ConfigError::Validation(format!(
                "supplier '{}' has reference_gallons 0; must be positive",
                supplier.name
            )));
        }

        validate_selector(supplier)?;

        let lower_name = supplier.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate supplier name: '{}'",
                supplier.name
            )));
        }

        let slug = supplier.slug();
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate supplier slug: '{}' (from supplier '{}')",
                slug, supplier.name
            )));
        }
    }

    Ok(())
}

/// Each strategy reads a specific subset of the selector fields; a supplier
/// entry missing those fields would silently match nothing, so reject it at
/// load time instead.
fn validate_selector(supplier: &SupplierConfig) -> Result<(), ConfigError> {
    let sel = &supplier.selector;
    match supplier.strategy {
        StrategyKind::PricingTable => {
            if sel.class_prefix.is_none() || sel.title_class.is_none() || sel.price_class.is_none()
            {
                return Err(ConfigError::Validation(format!(
                    "supplier '{}' uses strategy {} which requires selector.class_prefix, \
                     selector.title_class, and selector.price_class",
                    supplier.name, supplier.strategy
                )));
            }
        }
        _ => {
            if sel.class.is_none() {
                return Err(ConfigError::Validation(format!(
                    "supplier '{}' uses strategy {} which requires selector.class",
                    supplier.name, supplier.strategy
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier(name: &str, strategy: StrategyKind) -> SupplierConfig {
        SupplierConfig {
            name: name.to_string(),
            url: "https://example.com/".to_string(),
            strategy,
            selector: SelectorConfig {
                class: Some("kvtext".to_string()),
                ..SelectorConfig::default()
            },
            reference_gallons: DEFAULT_REFERENCE_GALLONS,
            conditional_fetch: false,
        }
    }

    #[test]
    fn slug_simple_name() {
        let s = supplier("Dan Bell Oil", StrategyKind::TierList);
        assert_eq!(s.slug(), "dan-bell-oil");
    }

    #[test]
    fn slug_special_characters() {
        let s = supplier("O'Leary's Fuel", StrategyKind::TierList);
        assert_eq!(s.slug(), "olearys-fuel");
    }

    #[test]
    fn strategy_kind_round_trips_through_yaml() {
        let parsed: StrategyKind = serde_yaml::from_str("storefront-price-first").unwrap();
        assert_eq!(parsed, StrategyKind::StorefrontPriceFirst);
        assert_eq!(parsed.to_string(), "storefront-price-first");
    }

    #[test]
    fn validate_rejects_empty_name() {
        let file = SuppliersFile {
            suppliers: vec![supplier("  ", StrategyKind::TierList)],
        };
        let err = validate_suppliers(&file).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let mut s = supplier("Dan Bell Oil", StrategyKind::TierList);
        s.url = "ftp://example.com/".to_string();
        let file = SuppliersFile { suppliers: vec![s] };
        let err = validate_suppliers(&file).unwrap_err();
        assert!(err.to_string().contains("non-HTTP"));
    }

    #[test]
    fn validate_rejects_duplicate_name() {
        let file = SuppliersFile {
            suppliers: vec![
                supplier("Dan Bell Oil", StrategyKind::TierList),
                supplier("dan bell oil", StrategyKind::MultiTier),
            ],
        };
        let err = validate_suppliers(&file).unwrap_err();
        assert!(err.to_string().contains("duplicate supplier name"));
    }

    #[test]
    fn validate_rejects_pricing_table_without_nested_classes() {
        let s = supplier("Oil Depot Inc", StrategyKind::PricingTable);
        // selector.class alone is not enough for a nested-lookup strategy
        let file = SuppliersFile { suppliers: vec![s] };
        let err = validate_suppliers(&file).unwrap_err();
        assert!(err.to_string().contains("class_prefix"));
    }

    #[test]
    fn validate_rejects_missing_class_for_text_strategy() {
        let mut s = supplier("Dan Bell Oil", StrategyKind::TierList);
        s.selector.class = None;
        let file = SuppliersFile { suppliers: vec![s] };
        let err = validate_suppliers(&file).unwrap_err();
        assert!(err.to_string().contains("requires selector.class"));
    }

    #[test]
    fn validate_rejects_zero_reference_gallons() {
        let mut s = supplier("Dan Bell Oil", StrategyKind::TierList);
        s.reference_gallons = 0;
        let file = SuppliersFile { suppliers: vec![s] };
        let err = validate_suppliers(&file).unwrap_err();
        assert!(err.to_string().contains("reference_gallons"));
    }

    #[test]
    fn validate_accepts_full_pricing_table_selector() {
        let mut s = supplier("Oil Depot Inc", StrategyKind::PricingTable);
        s.selector = SelectorConfig {
            class_prefix: Some("et_pb_pricing_table_".to_string()),
            title_class: Some("et_pb_pricing_title".to_string()),
            price_class: Some("et_pb_et_price".to_string()),
            ..SelectorConfig::default()
        };
        let file = SuppliersFile { suppliers: vec![s] };
        assert!(validate_suppliers(&file).is_ok());
    }

    #[test]
    fn reference_gallons_defaults_when_omitted() {
        let yaml = r"
suppliers:
  - name: Dan Bell Oil
    url: https://example.com/
    strategy: tier-list
    selector:
      class: kvtext
";
        let file: SuppliersFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.suppliers[0].reference_gallons, 150);
        assert!(!file.suppliers[0].conditional_fetch);
    }
}
