//! Read-only reference data: products, supplier profiles, demand history.

use serde::{Deserialize, Serialize};

/// A sellable product. Immutable for the duration of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub unit_cost: f64,
    pub sell_price: f64,
    pub holding_cost_per_unit_per_month: f64,
    /// Fallback demand baseline when no demand history exists.
    pub base_monthly_demand: i64,
}

/// A supplier profile: a cost tier plus a reliability-derived delay risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    /// Per-unit price when sourcing directly from this supplier.
    pub unit_cost: f64,
    /// Multiplier applied to the product's own unit cost in Planning.
    pub cost_multiplier: f64,
    pub lead_time_days_mean: i64,
    pub reliability_pct: f64,
}

impl Supplier {
    /// Probability that an order from this supplier is delayed.
    #[must_use]
    pub fn delay_risk(&self) -> f64 {
        crate::numbers::clamp_probability(1.0 - self.reliability_pct / 100.0)
    }
}

/// One month of observed demand for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    pub product_id: String,
    /// `YYYY-MM`; lexicographic order is chronological order.
    pub month: String,
    pub demand: i64,
}

/// The full reference data set supplied by the data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReferenceData {
    pub products: Vec<Product>,
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub demand: Vec<DemandPoint>,
}

impl ReferenceData {
    /// An empty data set, useful for fixtures.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse reference data from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or validation fails.
    pub fn from_json(json_str: &str) -> Result<Self, String> {
        let data: Self =
            serde_json::from_str(json_str).map_err(|e| format!("JSON parse error: {e}"))?;
        data.validate()?;
        Ok(data)
    }

    /// Validate id uniqueness and referential integrity.
    fn validate(&self) -> Result<(), String> {
        for (i, product) in self.products.iter().enumerate() {
            if self.products[..i].iter().any(|p| p.id == product.id) {
                return Err(format!("duplicate product id: {}", product.id));
            }
        }
        for (i, supplier) in self.suppliers.iter().enumerate() {
            if self.suppliers[..i].iter().any(|s| s.id == supplier.id) {
                return Err(format!("duplicate supplier id: {}", supplier.id));
            }
        }
        for point in &self.demand {
            if !self.products.iter().any(|p| p.id == point.product_id) {
                return Err(format!(
                    "demand row references unknown product: {}",
                    point.product_id
                ));
            }
        }
        Ok(())
    }

    /// Get embedded default reference data.
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(include_str!("../assets/data/reference.json"))
            .expect("embedded reference data is valid")
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a supplier by id.
    #[must_use]
    pub fn supplier(&self, id: &str) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    /// Latest observed demand for a product, if any history exists.
    #[must_use]
    pub fn latest_demand(&self, product_id: &str) -> Option<i64> {
        self.demand
            .iter()
            .filter(|d| d.product_id == product_id)
            .max_by(|a, b| a.month.cmp(&b.month))
            .map(|d| d.demand)
    }

    /// Planning baseline: latest demand history, else the product's base rate.
    #[must_use]
    pub fn baseline_demand(&self, product: &Product) -> i64 {
        self.latest_demand(&product.id)
            .unwrap_or(product.base_monthly_demand)
    }
}
