use crate::adapters::linear_model::LinearRegressionModel;
use crate::adapters::terminal::TerminalSession;
use crate::core::context::AppContext;
use crate::core::controller::InteractionController;
use crate::core::gateway::InferenceGateway;
use crate::domain::ports::{ConfigProvider, PriceModel};
use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// Startup wiring: owns the read-only context and the model for the
/// lifetime of the process.
pub struct PredictorApp<M: PriceModel> {
    context: AppContext,
    gateway: InferenceGateway<M>,
}

impl PredictorApp<LinearRegressionModel> {
    /// 載入資料集與模型，任何一個失敗都無法進入互動狀態
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let context = AppContext::from_config(config)?;
        let model = LinearRegressionModel::from_path(config.model_path())?;
        Ok(Self::new(context, model))
    }
}

impl<M: PriceModel> PredictorApp<M> {
    pub fn new(context: AppContext, model: M) -> Self {
        tracing::info!(
            "🚗 Ready: {} companies, {} fuel types, {} years",
            context.catalog().companies.len(),
            context.catalog().fuels.len(),
            context.catalog().years.len()
        );
        Self {
            context,
            gateway: InferenceGateway::new(model),
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Each session gets its own form state over the shared context.
    pub fn controller(&self) -> InteractionController<'_, M> {
        InteractionController::new(&self.context, &self.gateway)
    }

    /// Runs one terminal session; `color` selects ANSI styling or plain text.
    pub fn run_terminal<R: BufRead, W: Write>(
        &self,
        input: R,
        output: W,
        color: bool,
    ) -> std::io::Result<W> {
        let mut session =
            TerminalSession::new(self.controller(), input, output).with_color(color);
        session.run()?;
        Ok(session.into_output())
    }
}
