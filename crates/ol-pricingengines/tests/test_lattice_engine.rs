//! Regression and property tests for the lattice engine.
//!
//! Reference values were produced once by walking the trees by hand at
//! full double precision and are pinned here as baselines.

use approx::assert_abs_diff_eq;
use ol_core::Error;
use ol_instruments::{
    ExerciseType, LatticeMethod, ModelParameters, OptionType, PricingEngine,
};
use ol_pricingengines::{black_scholes_merton, price, EngineConfig, LatticeEngine};
use proptest::prelude::*;

const TOL: f64 = 1e-9;

fn atm(steps: usize) -> ModelParameters {
    ModelParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, steps)
}

fn index_call(method: LatticeMethod) -> ModelParameters {
    ModelParameters::new(3246.23, 2000.0, 21.0 / 252.0, 0.025, 0.1498878078948466, 21)
        .with_dividend_yield(0.015)
        .with_method(method)
}

fn small_trinomial(option_type: OptionType, exercise: ExerciseType) -> ModelParameters {
    ModelParameters::new(100.0, 101.0, 1.0, 0.04, 0.2, 3)
        .with_method(LatticeMethod::Trinomial)
        .with_option_type(option_type)
        .with_exercise(exercise)
}

// ───────────────────────── pinned scenarios ─────────────────────────

#[test]
fn trinomial_three_step_fixtures() {
    let cases = [
        (OptionType::Call, ExerciseType::European, 8.864947577500798),
        (OptionType::Put, ExerciseType::European, 5.911341375414385),
        (OptionType::Put, ExerciseType::American, 6.331856646010892),
        (OptionType::Call, ExerciseType::American, 8.864947577500798),
    ];
    for (option_type, exercise, expected) in cases {
        let npv = price(&small_trinomial(option_type, exercise)).unwrap();
        assert_abs_diff_eq!(npv, expected, epsilon = TOL);
    }
}

#[test]
fn trinomial_single_step() {
    let params = small_trinomial(OptionType::Call, ExerciseType::European).with_steps(1);
    assert_abs_diff_eq!(price(&params).unwrap(), 7.589504325357642, epsilon = TOL);
}

#[test]
fn index_call_with_dividend() {
    let crr = price(&index_call(LatticeMethod::CoxRossRubinstein)).unwrap();
    let jr = price(&index_call(LatticeMethod::JarrowRudd)).unwrap();
    assert_abs_diff_eq!(crr, 1246.3370769621977, epsilon = 1e-8);
    assert_abs_diff_eq!(jr, 1246.3370318672155, epsilon = 1e-8);

    let bs = black_scholes_merton(
        OptionType::Call,
        3246.23,
        2000.0,
        0.025,
        0.015,
        0.1498878078948466,
        21.0 / 252.0,
    )
    .npv;
    assert_abs_diff_eq!(bs, 1246.3370769622036, epsilon = 1e-8);
    assert_abs_diff_eq!(crr, bs, epsilon = 1e-6);
}

#[test]
fn far_out_of_the_money_put_is_worthless() {
    let params = index_call(LatticeMethod::CoxRossRubinstein).with_option_type(OptionType::Put);
    assert_eq!(price(&params).unwrap(), 0.0);
}

#[test]
fn american_put_premium() {
    let european = price(&atm(200).with_option_type(OptionType::Put)).unwrap();
    let american = price(
        &atm(200)
            .with_option_type(OptionType::Put)
            .with_exercise(ExerciseType::American),
    )
    .unwrap();
    assert_abs_diff_eq!(european, 5.563533709930564, epsilon = TOL);
    assert_abs_diff_eq!(american, 6.086382749916067, epsilon = TOL);
}

#[test]
fn american_call_with_dividend_exercises_early() {
    let base = atm(100).with_dividend_yield(0.08);
    let european = price(&base).unwrap();
    let american = price(&base.with_exercise(ExerciseType::American)).unwrap();
    assert_abs_diff_eq!(european, 6.124156748242461, epsilon = TOL);
    assert_abs_diff_eq!(american, 6.532701570973831, epsilon = TOL);
}

#[test]
fn american_call_without_dividend_equals_european() {
    let european = price(&atm(100)).unwrap();
    let american = price(&atm(100).with_exercise(ExerciseType::American)).unwrap();
    assert_abs_diff_eq!(european, 10.430611662249081, epsilon = TOL);
    assert_abs_diff_eq!(american, european, epsilon = 1e-12);
}

// ───────────────────────── convergence ─────────────────────────

#[test]
fn crr_converges_monotonically_to_black_scholes() {
    let bs = black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.2, 1.0).npv;
    assert_abs_diff_eq!(bs, 10.450583572185565, epsilon = TOL);

    let expected = [
        (50, 10.410691540732635),
        (100, 10.430611662249081),
        (200, 10.440591259859966),
        (400, 10.445585841283883),
        (800, 10.448084314882387),
    ];
    let mut previous_error = f64::INFINITY;
    for (steps, pinned) in expected {
        let npv = price(&atm(steps)).unwrap();
        assert_abs_diff_eq!(npv, pinned, epsilon = TOL);
        let error = (bs - npv).abs();
        assert!(error < previous_error, "N={steps}: error {error} did not shrink");
        // Error roughly halves with each doubling of N
        assert!(error * (steps as f64) < 2.5, "N={steps}: error {error} not O(1/N)");
        previous_error = error;
    }
}

#[test]
fn trinomial_converges_alongside_crr() {
    let expected = [
        (50, 10.41060082332445),
        (100, 10.430642091045272),
        (200, 10.44062505963314),
        (400, 10.445607343426092),
        (800, 10.44809621106779),
    ];
    for (steps, pinned) in expected {
        let tri = price(&atm(steps).with_method(LatticeMethod::Trinomial)).unwrap();
        let crr = price(&atm(steps)).unwrap();
        assert_abs_diff_eq!(tri, pinned, epsilon = TOL);
        assert_abs_diff_eq!(tri, crr, epsilon = 1e-3);
    }
}

#[test]
fn first_steps_oscillate_around_the_limit() {
    assert_abs_diff_eq!(price(&atm(1)).unwrap(), 12.162284964623943, epsilon = TOL);
    assert_abs_diff_eq!(price(&atm(2)).unwrap(), 9.540501338582954, epsilon = TOL);
}

// ───────────────────────── boundaries ─────────────────────────

#[test]
fn zero_steps_is_discounted_payoff_at_spot() {
    let call = ModelParameters::new(100.0, 90.0, 1.0, 0.05, 0.2, 0);
    assert_abs_diff_eq!(price(&call).unwrap(), 9.51229424500714, epsilon = 1e-12);

    // Out of the money at spot: nothing to discount
    let put = call.with_option_type(OptionType::Put);
    assert_eq!(price(&put).unwrap(), 0.0);

    for method in [LatticeMethod::JarrowRudd, LatticeMethod::Trinomial] {
        assert_eq!(price(&call.with_method(method)).unwrap(), price(&call).unwrap());
    }
}

#[test]
fn vanishing_volatility_approaches_deterministic_payoff() {
    let params = ModelParameters::new(100.0, 90.0, 1.0, 0.05, 1e-4, 100)
        .with_method(LatticeMethod::JarrowRudd);
    let deterministic = 100.0 - 90.0 * (-0.05_f64).exp();
    let npv = price(&params).unwrap();
    assert_abs_diff_eq!(npv, 14.389351794936033, epsilon = TOL);
    assert_abs_diff_eq!(npv, deterministic, epsilon = 1e-9);

    let with_dividend = price(&params.with_dividend_yield(0.02)).unwrap();
    let deterministic = 100.0 * (-0.02_f64).exp() - 90.0 * (-0.05_f64).exp();
    assert_abs_diff_eq!(with_dividend, 12.40921912561107, epsilon = TOL);
    assert_abs_diff_eq!(with_dividend, deterministic, epsilon = 1e-9);
}

#[test]
fn vanishing_volatility_destabilises_crr_and_trinomial() {
    let params = ModelParameters::new(100.0, 90.0, 1.0, 0.05, 1e-4, 100);
    for method in [LatticeMethod::CoxRossRubinstein, LatticeMethod::Trinomial] {
        match price(&params.with_method(method)) {
            Err(Error::NumericalInstability { method: name, dt, .. }) => {
                assert_eq!(name, method.name());
                assert_abs_diff_eq!(dt, 0.01, epsilon = 1e-15);
            }
            other => panic!("{method}: expected instability, got {other:?}"),
        }
    }
}

#[test]
fn overflowing_lattice_is_reported_not_priced() {
    // σ√(T·N) = 4·√(50·2000) ≈ 1265 > ln(f64::MAX): the top node is infinite
    let params = ModelParameters::new(100.0, 100.0, 50.0, 0.0, 4.0, 2000);
    assert!(params.validate().is_ok());
    let methods = [
        LatticeMethod::CoxRossRubinstein,
        LatticeMethod::JarrowRudd,
        LatticeMethod::Trinomial,
    ];
    for method in methods {
        for option_type in [OptionType::Call, OptionType::Put] {
            match price(&params.with_method(method).with_option_type(option_type)) {
                Err(Error::NumericalInstability { method: name, dt, detail }) => {
                    assert_eq!(name, method.name());
                    assert_abs_diff_eq!(dt, 0.025, epsilon = 1e-15);
                    assert!(detail.contains("overflow"), "{detail}");
                }
                other => panic!("{method} {option_type}: expected overflow, got {other:?}"),
            }
        }
    }

    // The closed form is unaffected
    let bs = black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.0, 0.0, 4.0, 50.0).npv;
    assert!(bs.is_finite() && bs <= 100.0);
}

// ───────────────────────── errors ─────────────────────────

#[test]
fn invalid_inputs_are_rejected() {
    let bad = [
        ModelParameters { spot: 0.0, ..atm(10) },
        ModelParameters { strike: 0.0, ..atm(10) },
        ModelParameters { maturity: -1.0, ..atm(10) },
        ModelParameters { volatility: 0.0, ..atm(10) },
        ModelParameters { dividend_yield: -0.01, ..atm(10) },
    ];
    for params in bad {
        assert!(matches!(price(&params), Err(Error::InvalidParameter(_))), "{params:?}");
    }
}

#[test]
fn unknown_tags_are_unsupported() {
    assert!(matches!("binomial-x".parse::<LatticeMethod>(), Err(Error::UnsupportedMethod(_))));
    assert!(matches!("straddle".parse::<OptionType>(), Err(Error::UnsupportedOptionType(_))));
    assert!(matches!("asian".parse::<ExerciseType>(), Err(Error::UnsupportedOptionType(_))));
}

#[test]
fn bermudan_exercise_is_unsupported() {
    let params = atm(10).with_exercise(ExerciseType::Bermudan);
    assert!(matches!(price(&params), Err(Error::UnsupportedOptionType(_))));
}

#[test]
fn oversized_lattice_is_rejected_before_allocation() {
    let engine = LatticeEngine::new(EngineConfig::default().with_max_steps(100));
    assert!(matches!(engine.price(&atm(101)), Err(Error::InvalidParameter(_))));
    assert!(engine.price(&atm(100)).is_ok());
}

#[test]
fn failed_call_leaves_engine_usable() {
    let engine = LatticeEngine::default();
    let before = engine.price(&atm(50)).unwrap();
    assert!(engine.price(&ModelParameters { volatility: 1e-4, ..atm(50) }).is_err());
    assert_eq!(engine.price(&atm(50)).unwrap(), before);
}

#[test]
fn chain_pricing_matches_single_calls() {
    let rows: Vec<_> = [90.0, 100.0, 110.0]
        .into_iter()
        .map(|strike| ModelParameters { strike, ..atm(60) })
        .collect();
    let engine = LatticeEngine::default();
    for (row, result) in rows.iter().zip(engine.price_all(&rows)) {
        assert_eq!(result.unwrap(), engine.price(row).unwrap());
    }
}

#[test]
fn calculate_reports_the_same_npv_as_price() {
    let params = small_trinomial(OptionType::Put, ExerciseType::American);
    let results = LatticeEngine::default().calculate(&params).unwrap();
    assert_eq!(results.npv, price(&params).unwrap());
    assert!(results.result("p_mid").is_some());
}

// ───────────────────────── properties ─────────────────────────

fn any_method() -> impl Strategy<Value = LatticeMethod> {
    prop_oneof![
        Just(LatticeMethod::CoxRossRubinstein),
        Just(LatticeMethod::JarrowRudd),
        Just(LatticeMethod::Trinomial),
    ]
}

fn any_option_type() -> impl Strategy<Value = OptionType> {
    prop_oneof![Just(OptionType::Call), Just(OptionType::Put)]
}

prop_compose! {
    // Ranges chosen so every method calibrates without instability
    fn stable_params()(
        spot in 50.0..150.0_f64,
        strike in 50.0..150.0_f64,
        maturity in 0.1..2.0_f64,
        rate in 0.0..0.1_f64,
        volatility in 0.1..0.5_f64,
        dividend_yield in 0.0..0.05_f64,
        steps in 10_usize..60,
        method in any_method(),
        option_type in any_option_type(),
    ) -> ModelParameters {
        ModelParameters::new(spot, strike, maturity, rate, volatility, steps)
            .with_dividend_yield(dividend_yield)
            .with_method(method)
            .with_option_type(option_type)
    }
}

proptest! {
    #[test]
    fn american_never_below_european(params in stable_params()) {
        let european = price(&params).unwrap();
        let american = price(&params.with_exercise(ExerciseType::American)).unwrap();
        prop_assert!(american >= european - 1e-12, "{american} < {european}");
        prop_assert!(european >= 0.0);
    }

    #[test]
    fn pricing_is_idempotent(params in stable_params()) {
        let first = LatticeEngine::default().calculate(&params).unwrap();
        let second = LatticeEngine::default().calculate(&params).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn calibrated_probabilities_sum_to_one(params in stable_params()) {
        let results = LatticeEngine::default().calculate(&params).unwrap();
        let sum = results.result("p_up").unwrap()
            + results.result("p_mid").unwrap_or(0.0)
            + results.result("p_down").unwrap();
        prop_assert!((sum - 1.0).abs() < 1e-12, "sum = {sum}");
    }

    #[test]
    fn crr_american_call_without_dividend_is_european(
        params in stable_params(),
    ) {
        let call = params
            .with_method(LatticeMethod::CoxRossRubinstein)
            .with_option_type(OptionType::Call)
            .with_dividend_yield(0.0);
        let european = price(&call).unwrap();
        let american = price(&call.with_exercise(ExerciseType::American)).unwrap();
        prop_assert!((american - european).abs() <= 1e-9 * (1.0 + european));
    }
}
