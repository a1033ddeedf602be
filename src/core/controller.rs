use crate::core::context::AppContext;
use crate::core::gateway::InferenceGateway;
use crate::domain::model::{PredictionInput, PredictionResult};
use crate::domain::ports::PriceModel;
use crate::utils::error::{PredictorError, Result};
use crate::utils::format::format_currency;

pub const KMS_STEP: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    CollectingInput,
    Submitted,
}

/// Cosmetic presentation mode; never affects data or predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    SelectCompany(String),
    SelectModel(String),
    SelectYear(i32),
    SelectFuel(String),
    SetKmsDriven(i64),
    StepKmsUp,
    StepKmsDown,
    ToggleTheme,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub company: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub fuel_type: Option<String>,
    pub kms_driven: u64,
    /// Model options for the selected company.
    pub models: Vec<String>,
}

impl FormState {
    fn to_input(&self) -> Result<PredictionInput> {
        let company = required(&self.company, "company")?;
        if self.models.is_empty() {
            return Err(PredictorError::ValidationError {
                message: format!("no car models are available for {}", company),
            });
        }

        Ok(PredictionInput {
            name: required(&self.model, "car model")?.clone(),
            company: company.clone(),
            fuel_type: required(&self.fuel_type, "fuel type")?.clone(),
            year: *required(&self.year, "year of purchase")?,
            kms_driven: self.kms_driven,
        })
    }
}

fn required<'a, T>(value: &'a Option<T>, field: &str) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PredictorError::ValidationError {
        message: format!("{} must be selected", field),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Estimate {
    pub result: PredictionResult,
    pub formatted_price: String,
    pub disclaimer: String,
}

#[derive(Debug)]
pub enum Outcome {
    Updated,
    Rejected(PredictorError),
    Estimated(Estimate),
    PredictionFailed(PredictorError),
}

/// Drives one interactive session over the shared read-only context.
pub struct InteractionController<'a, M: PriceModel> {
    context: &'a AppContext,
    gateway: &'a InferenceGateway<M>,
    state: ControllerState,
    form: FormState,
    theme: Theme,
}

impl<'a, M: PriceModel> InteractionController<'a, M> {
    pub fn new(context: &'a AppContext, gateway: &'a InferenceGateway<M>) -> Self {
        let catalog = context.catalog();
        let company = catalog.companies.first().cloned();
        let models = company
            .as_deref()
            .map(|c| context.models_for(c))
            .unwrap_or_default();

        let form = FormState {
            model: models.first().cloned(),
            company,
            year: catalog.years.first().copied(),
            fuel_type: catalog.fuels.first().cloned(),
            kms_driven: 0,
            models,
        };

        let theme = if context.display().dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        };

        Self {
            context,
            gateway,
            state: ControllerState::Idle,
            form,
            theme,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn context(&self) -> &AppContext {
        self.context
    }

    pub fn handle(&mut self, event: UserEvent) -> Outcome {
        match self.apply(event) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!("Rejected input: {}", e);
                Outcome::Rejected(e)
            }
        }
    }

    fn apply(&mut self, event: UserEvent) -> Result<Outcome> {
        self.state = ControllerState::CollectingInput;

        let context = self.context;
        let catalog = context.catalog();
        match event {
            UserEvent::SelectCompany(company) => {
                ensure_offered("company", &catalog.companies, &company)?;
                self.form.models = context.models_for(&company);
                self.form.model = self.form.models.first().cloned();
                tracing::debug!(
                    "Company changed to {}: {} models available",
                    company,
                    self.form.models.len()
                );
                self.form.company = Some(company);
            }
            UserEvent::SelectModel(model) => {
                ensure_offered("car model", &self.form.models, &model)?;
                self.form.model = Some(model);
            }
            UserEvent::SelectYear(year) => {
                if !catalog.years.contains(&year) {
                    return Err(PredictorError::InvalidSelectionError {
                        field: "year".to_string(),
                        value: year.to_string(),
                    });
                }
                self.form.year = Some(year);
            }
            UserEvent::SelectFuel(fuel) => {
                ensure_offered("fuel type", &catalog.fuels, &fuel)?;
                self.form.fuel_type = Some(fuel);
            }
            UserEvent::SetKmsDriven(kms) => {
                self.form.kms_driven =
                    u64::try_from(kms).map_err(|_| PredictorError::ValidationError {
                        message: format!("kilometres driven must be at least 0, got {}", kms),
                    })?;
            }
            UserEvent::StepKmsUp => {
                self.form.kms_driven = self.form.kms_driven.saturating_add(KMS_STEP);
            }
            UserEvent::StepKmsDown => {
                self.form.kms_driven = self.form.kms_driven.saturating_sub(KMS_STEP);
            }
            UserEvent::ToggleTheme => {
                self.theme = self.theme.toggled();
            }
            UserEvent::Submit => return Ok(self.submit()),
        }
        Ok(Outcome::Updated)
    }

    fn submit(&mut self) -> Outcome {
        self.state = ControllerState::Submitted;

        let input = match self.form.to_input() {
            Ok(input) => input,
            Err(e) => {
                self.state = ControllerState::CollectingInput;
                return Outcome::Rejected(e);
            }
        };

        match self
            .gateway
            .predict(&input)
            .and_then(PredictionResult::from_estimate)
        {
            Ok(result) => {
                let display = self.context.display();
                tracing::info!(
                    "💰 Predicted {} for {} {} ({})",
                    result.price,
                    input.company,
                    input.name,
                    input.year
                );
                self.state = ControllerState::Idle;
                Outcome::Estimated(Estimate {
                    result,
                    formatted_price: format_currency(&display.currency_symbol, result.price),
                    disclaimer: display.disclaimer.clone(),
                })
            }
            Err(e) => {
                tracing::warn!("❌ Prediction failed: {}", e);
                self.state = ControllerState::CollectingInput;
                Outcome::PredictionFailed(e)
            }
        }
    }
}

fn ensure_offered(field: &str, options: &[String], value: &str) -> Result<()> {
    if options.iter().any(|option| option == value) {
        Ok(())
    } else {
        Err(PredictorError::InvalidSelectionError {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}
