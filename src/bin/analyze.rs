//! One-shot analysis from the command line.
//!
//! Prints the full report as JSON on stdout; logs go to stderr.

use clap::{Parser, ValueEnum};
use dotenvy::dotenv;
use pause::config::Config;
use pause::ledger::Ledger;
use pause::logging;
use pause::models::market::{Horizon, RiskProfile};
use pause::signals::engine::{AnalysisEngine, AnalysisRequest};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HorizonArg {
    Momentum,
    Swing,
}

impl From<HorizonArg> for Horizon {
    fn from(value: HorizonArg) -> Self {
        match value {
            HorizonArg::Momentum => Horizon::Momentum,
            HorizonArg::Swing => Horizon::Swing,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RiskArg {
    Conservative,
    Moderate,
    Aggressive,
}

impl From<RiskArg> for RiskProfile {
    fn from(value: RiskArg) -> Self {
        match value {
            RiskArg::Conservative => RiskProfile::Conservative,
            RiskArg::Moderate => RiskProfile::Moderate,
            RiskArg::Aggressive => RiskProfile::Aggressive,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "analyze", about = "Think before you trade: analyze one ticker")]
struct Args {
    /// Ticker symbol, e.g. NVDA
    ticker: String,

    #[arg(long, value_enum, default_value = "swing")]
    horizon: HorizonArg,

    #[arg(long, value_enum, default_value = "moderate")]
    risk: RiskArg,

    /// Compact single-line JSON
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    logging::init_logging();
    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let engine = AnalysisEngine::from_config(&config, Arc::new(Ledger::new()));
    let request = AnalysisRequest {
        ticker: args.ticker,
        horizon: args.horizon.into(),
        risk_profile: args.risk.into(),
    };

    let report = match engine.analyze(request).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let rendered = if args.compact {
        serde_json::to_string(&report)
    } else {
        serde_json::to_string_pretty(&report)
    };
    match rendered {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "could not render report");
            ExitCode::FAILURE
        }
    }
}
