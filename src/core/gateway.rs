use crate::domain::model::{FeatureRow, PredictionInput};
use crate::domain::ports::PriceModel;
use crate::utils::error::Result;
use std::time::Instant;

/// Thin synchronous wrapper around a trained [`PriceModel`].
///
/// The gateway only shapes the input into the feature record the model was
/// fitted on; the raw estimate is returned unchecked.
pub struct InferenceGateway<M: PriceModel> {
    model: M,
}

impl<M: PriceModel> InferenceGateway<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn predict(&self, input: &PredictionInput) -> Result<f64> {
        let row = FeatureRow::from(input);
        let started = Instant::now();
        let estimate = self.model.predict(&row);

        tracing::debug!(
            "Model call for {} {} ({}, {}, {} km) took {:?}",
            input.company,
            input.name,
            input.fuel_type,
            input.year,
            input.kms_driven,
            started.elapsed()
        );

        estimate
    }
}
