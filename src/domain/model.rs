use crate::utils::error::{PredictorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Feature columns in the order the trained model expects them.
pub const FEATURE_COLUMNS: [&str; 5] = ["name", "company", "fuel_type", "year", "kms_driven"];

/// One historical listing from the reference dataset.
///
/// Empty or malformed cells are `None`; they are dropped from the derived
/// option lists rather than failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub name: Option<String>,
    pub company: Option<String>,
    pub fuel_type: Option<String>,
    pub year: Option<i32>,
    pub kms_driven: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionCatalog {
    pub companies: Vec<String>,
    pub fuels: Vec<String>,
    /// Most recent first.
    pub years: Vec<i32>,
    pub models_by_company: BTreeMap<String, Vec<String>>,
}

impl OptionCatalog {
    pub fn models_for(&self, company: &str) -> &[String] {
        self.models_by_company
            .get(company)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub name: String,
    pub company: String,
    pub fuel_type: String,
    pub year: i32,
    pub kms_driven: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Number(f64),
}

/// Named, ordered record handed to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    fields: Vec<(String, FeatureValue)>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn with(mut self, name: &str, value: FeatureValue) -> Self {
        self.fields.push((name.to_string(), value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(field, _)| field.as_str()).collect()
    }
}

impl Default for FeatureRow {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&PredictionInput> for FeatureRow {
    fn from(input: &PredictionInput) -> Self {
        FeatureRow::new()
            .with("name", FeatureValue::Text(input.name.clone()))
            .with("company", FeatureValue::Text(input.company.clone()))
            .with("fuel_type", FeatureValue::Text(input.fuel_type.clone()))
            .with("year", FeatureValue::Number(f64::from(input.year)))
            .with("kms_driven", FeatureValue::Number(input.kms_driven as f64))
    }
}

/// Predicted price in whole currency units, truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct PredictionResult {
    pub price: u64,
}

impl PredictionResult {
    pub fn from_estimate(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(PredictorError::InvalidPredictionError { value });
        }
        Ok(Self {
            price: value.trunc() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_result_truncates() {
        assert_eq!(PredictionResult::from_estimate(425999.99).unwrap().price, 425999);
        assert_eq!(PredictionResult::from_estimate(0.0).unwrap().price, 0);
    }

    #[test]
    fn test_prediction_result_rejects_unusable_values() {
        assert!(PredictionResult::from_estimate(-1.0).is_err());
        assert!(PredictionResult::from_estimate(f64::NAN).is_err());
        assert!(PredictionResult::from_estimate(f64::INFINITY).is_err());
    }

    #[test]
    fn test_feature_row_follows_column_order() {
        let input = PredictionInput {
            name: "Swift VDI".to_string(),
            company: "Maruti".to_string(),
            fuel_type: "Diesel".to_string(),
            year: 2017,
            kms_driven: 30000,
        };
        let row = FeatureRow::from(&input);

        assert_eq!(row.column_names(), FEATURE_COLUMNS.to_vec());
        assert_eq!(row.get("year"), Some(&FeatureValue::Number(2017.0)));
        assert_eq!(
            row.get("company"),
            Some(&FeatureValue::Text("Maruti".to_string()))
        );
        assert_eq!(row.get("Price"), None);
    }
}
