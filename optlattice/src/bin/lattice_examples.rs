//! Prices a handful of reference scenarios and logs the results.
//!
//! `RUST_LOG=debug` also shows the calibrated factors of every lattice.
//! Engine limits come from `OPTLATTICE_MAX_STEPS` / `OPTLATTICE_STEP_POLICY`,
//! optionally set in a `.env` file.

use optlattice::pricingengines::black_scholes_merton;
use optlattice::{
    EngineConfig, ExerciseType, LatticeEngine, LatticeMethod, ModelParameters, OptionType,
};
use tracing::{error, info};

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match EngineConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("config error: {e}");
            std::process::exit(1);
        }
    };
    info!(max_steps = config.max_steps, policy = ?config.step_limit, "engine configured");
    let engine = LatticeEngine::new(config);

    let mut failures = 0;
    for (label, params) in scenarios() {
        match engine.price(&params) {
            Ok(npv) => info!(
                scenario = label,
                method = params.method.name(),
                option_type = %params.option_type,
                exercise = %params.exercise,
                steps = params.steps,
                npv,
                "priced"
            ),
            Err(e) => {
                failures += 1;
                error!(scenario = label, "pricing failed: {e}");
            }
        }
    }

    // Closed-form reference for the index call
    let index = index_call(LatticeMethod::CoxRossRubinstein);
    let bs = black_scholes_merton(
        index.option_type,
        index.spot,
        index.strike,
        index.rate,
        index.dividend_yield,
        index.volatility,
        index.maturity,
    );
    info!(
        npv = bs.npv,
        delta = bs.delta,
        gamma = bs.gamma,
        vega = bs.vega,
        theta = bs.theta,
        rho = bs.rho,
        "Black-Scholes index call"
    );

    if failures > 0 {
        std::process::exit(1);
    }
}

fn index_call(method: LatticeMethod) -> ModelParameters {
    ModelParameters::new(3246.23, 2000.0, 21.0 / 252.0, 0.025, 0.1498878078948466, 21)
        .with_dividend_yield(0.015)
        .with_method(method)
}

fn scenarios() -> Vec<(&'static str, ModelParameters)> {
    let trinomial = ModelParameters::new(100.0, 101.0, 1.0, 0.04, 0.2, 3)
        .with_method(LatticeMethod::Trinomial);
    vec![
        ("index call", index_call(LatticeMethod::CoxRossRubinstein)),
        ("index call", index_call(LatticeMethod::JarrowRudd)),
        ("small trinomial", trinomial),
        ("small trinomial", trinomial.with_option_type(OptionType::Put)),
        (
            "small trinomial",
            trinomial
                .with_option_type(OptionType::Put)
                .with_exercise(ExerciseType::American),
        ),
        ("small trinomial", trinomial.with_exercise(ExerciseType::American)),
    ]
}
