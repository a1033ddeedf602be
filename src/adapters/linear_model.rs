use crate::domain::model::{FeatureRow, FeatureValue};
use crate::domain::ports::PriceModel;
use crate::utils::error::{PredictorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCategory {
    #[default]
    Error,
    Ignore,
}

/// Linear regression over one-hot encoded categorical columns plus
/// passthrough numeric columns, exported as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressionModel {
    pub intercept: f64,
    #[serde(default)]
    pub categorical: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    pub numeric: BTreeMap<String, f64>,
    #[serde(default)]
    pub handle_unknown: UnknownCategory,
}

impl LinearRegressionModel {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading model artifact from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let model = Self::from_json_str(&content)?;
        tracing::info!(
            "🧠 Loaded model artifact {} ({} categorical, {} numeric features)",
            path.display(),
            model.categorical.len(),
            model.numeric.len()
        );
        tracing::debug!(
            "Model features: {}",
            model.feature_names().collect::<Vec<_>>().join(", ")
        );
        Ok(model)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(content)?;
        model.check()?;
        Ok(model)
    }

    fn check(&self) -> Result<()> {
        if self.categorical.is_empty() && self.numeric.is_empty() {
            return Err(PredictorError::ModelArtifactError {
                message: "artifact declares no features".to_string(),
            });
        }
        if let Some(feature) = self.categorical.keys().find(|f| self.numeric.contains_key(*f)) {
            return Err(PredictorError::ModelArtifactError {
                message: format!("feature '{}' is both categorical and numeric", feature),
            });
        }
        let non_finite = self
            .categorical
            .values()
            .flat_map(|levels| levels.values())
            .chain(self.numeric.values())
            .any(|w| !w.is_finite());
        if !self.intercept.is_finite() || non_finite {
            return Err(PredictorError::ModelArtifactError {
                message: "artifact contains non-finite weights".to_string(),
            });
        }
        Ok(())
    }

    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.categorical
            .keys()
            .chain(self.numeric.keys())
            .map(String::as_str)
    }

    fn categorical_term(
        &self,
        feature: &str,
        levels: &BTreeMap<String, f64>,
        row: &FeatureRow,
    ) -> Result<f64> {
        let value = match row.get(feature) {
            Some(FeatureValue::Text(value)) => value.clone(),
            Some(FeatureValue::Number(n)) => n.to_string(),
            None => {
                return Err(PredictorError::MissingFeatureError {
                    feature: feature.to_string(),
                })
            }
        };

        match (levels.get(&value), self.handle_unknown) {
            (Some(weight), _) => Ok(*weight),
            (None, UnknownCategory::Ignore) => Ok(0.0),
            (None, UnknownCategory::Error) => Err(PredictorError::UnknownCategoryError {
                feature: feature.to_string(),
                value,
            }),
        }
    }

    fn numeric_term(feature: &str, coefficient: f64, row: &FeatureRow) -> Result<f64> {
        match row.get(feature) {
            Some(FeatureValue::Number(n)) => Ok(coefficient * n),
            Some(FeatureValue::Text(text)) => Err(PredictorError::ModelArtifactError {
                message: format!("feature '{}' expects a number, got '{}'", feature, text),
            }),
            None => Err(PredictorError::MissingFeatureError {
                feature: feature.to_string(),
            }),
        }
    }
}

impl PriceModel for LinearRegressionModel {
    fn predict(&self, row: &FeatureRow) -> Result<f64> {
        let mut estimate = self.intercept;
        for (feature, levels) in &self.categorical {
            estimate += self.categorical_term(feature, levels, row)?;
        }
        for (feature, coefficient) in &self.numeric {
            estimate += Self::numeric_term(feature, *coefficient, row)?;
        }
        Ok(estimate)
    }
}
