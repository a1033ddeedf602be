use anyhow::Context;
use car_price_predictor::utils::error::ErrorSeverity;
use car_price_predictor::utils::{logger, validation::Validate};
use car_price_predictor::{CliConfig, PredictorApp, PredictorError};
use clap::Parser;
use std::io::IsTerminal;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting car-price-predictor");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => fail(e),
    };

    // 資料集或模型載入失敗時不進入互動狀態
    let app = match PredictorApp::from_config(&settings) {
        Ok(app) => app,
        Err(e) => fail(e),
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let color = stdout.is_terminal();
    app.run_terminal(stdin.lock(), stdout.lock(), color)
        .context("terminal session failed")?;

    tracing::info!("👋 Session closed");
    Ok(())
}

fn fail(e: PredictorError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
