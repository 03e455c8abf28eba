use consorcio_core::render;
use consorcio_core::simulation::{simulate, SimulationInput};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Reference scenarios
// ===========================================================================

fn scenario_a() -> SimulationInput {
    // R$ 100k credit, 20% admin fee, 120 months, no bid, no reducer,
    // insurance on, term-shortening strategy.
    SimulationInput {
        credit_value: dec!(100_000),
        admin_fee_rate: dec!(0.20),
        total_months: 120,
        months_paid: 0,
        free_bid_rate: Decimal::ZERO,
        embedded_bid_rate: Decimal::ZERO,
        dilute_bid: false,
        reducer_rate: Decimal::ZERO,
        insurance_active: true,
    }
}

#[test]
fn test_scenario_a_no_bid() {
    let r = simulate(&scenario_a()).result;

    assert_eq!(r.total_debt, dec!(120_000));
    assert_eq!(r.full_installment, dec!(1000));
    assert_eq!(r.monthly_insurance, dec!(40));
    assert_eq!(r.base_installment, dec!(1040));
    assert_eq!(r.total_bid_value, Decimal::ZERO);
    assert_eq!(r.final_debt_to_settle, dec!(120_000));
    assert_eq!(r.installment_count_to_pay, 120);
    assert_eq!(r.final_installment_value, dec!(1040));
    assert_eq!(r.available_credit, dec!(100_000));
}

#[test]
fn test_scenario_b_free_bid_term_shortening() {
    let mut input = scenario_a();
    input.free_bid_rate = dec!(0.10);

    let r = simulate(&input).result;
    assert_eq!(r.free_bid_value, dec!(10_000));
    assert_eq!(r.total_bid_value, dec!(10_000));
    assert_eq!(r.final_debt_to_settle, dec!(110_000));
    // 110000 / 1000, rounded up
    assert_eq!(r.installment_count_to_pay, 110);
    assert_eq!(r.final_installment_value, dec!(1040));
    assert_eq!(r.installments_offset_count, dec!(10));
}

#[test]
fn test_scenario_b_free_bid_diluted() {
    let mut input = scenario_a();
    input.free_bid_rate = dec!(0.10);
    input.dilute_bid = true;

    let r = simulate(&input).result;
    assert_eq!(r.installment_count_to_pay, 120);
    // 110000 / 120 = 916.67 to the cent
    assert_eq!(
        (r.final_installment_value - r.monthly_insurance).round_dp(2),
        dec!(916.67)
    );
}

#[test]
fn test_scenario_c_reducer_accrual() {
    let mut input = scenario_a();
    input.reducer_rate = dec!(0.30);
    input.months_paid = 5;

    let r = simulate(&input).result;
    assert_eq!(r.reduced_installment, dec!(700));
    assert_eq!(r.residual_per_month, dec!(300));
    assert_eq!(r.accrued_residual, dec!(1500));
    assert_eq!(r.base_installment, dec!(740));
    // The deferred residual is owed on top of the debt at settlement
    assert_eq!(r.final_debt_to_settle, dec!(121_500));
}

// ===========================================================================
// Invariants and guards
// ===========================================================================

#[test]
fn test_total_debt_identity() {
    let mut input = scenario_a();
    input.admin_fee_rate = dec!(0.1775);
    let r = simulate(&input).result;
    assert_eq!(r.total_debt, input.credit_value * dec!(1.1775));
}

#[test]
fn test_zero_term_yields_zero_not_division_error() {
    let mut input = scenario_a();
    input.total_months = 0;

    let r = simulate(&input).result;
    assert_eq!(r.full_installment, Decimal::ZERO);
    assert_eq!(r.installment_count_to_pay, 0);
    assert_eq!(r.installments_offset_count, Decimal::ZERO);
    // Insurance still applies to the credit itself
    assert_eq!(r.final_installment_value, dec!(40));
}

#[test]
fn test_zero_credit_all_outputs_zero() {
    let input = SimulationInput {
        total_months: 60,
        ..SimulationInput::default()
    };
    let r = simulate(&input).result;
    assert_eq!(r.total_debt, Decimal::ZERO);
    assert_eq!(r.base_installment, Decimal::ZERO);
    assert_eq!(r.final_installment_value, Decimal::ZERO);
    assert_eq!(r.available_credit, Decimal::ZERO);
}

#[test]
fn test_non_negative_outputs_for_well_formed_input() {
    let input = SimulationInput {
        credit_value: dec!(250_000),
        admin_fee_rate: dec!(0.22),
        total_months: 180,
        months_paid: 24,
        free_bid_rate: dec!(0.25),
        embedded_bid_rate: dec!(0.10),
        dilute_bid: true,
        reducer_rate: dec!(0.25),
        insurance_active: true,
    };
    let r = simulate(&input).result;
    for value in [
        r.total_debt,
        r.monthly_insurance,
        r.full_installment,
        r.reduced_installment,
        r.residual_per_month,
        r.accrued_residual,
        r.base_installment,
        r.free_bid_value,
        r.embedded_bid_value,
        r.total_bid_value,
        r.final_debt_to_settle,
        r.final_installment_value,
        r.installments_offset_count,
        r.available_credit,
    ] {
        assert!(value >= Decimal::ZERO, "negative output: {value}");
    }
}

#[test]
fn test_idempotent_for_identical_input() {
    let mut input = scenario_a();
    input.free_bid_rate = dec!(0.137);
    input.reducer_rate = dec!(0.15);
    input.months_paid = 17;

    let first = simulate(&input).result;
    let second = simulate(&input).result;
    assert_eq!(first, second);
}

#[test]
fn test_term_shortening_ceiling_property() {
    // Sweep bids that leave a partial final installment; the count must cover
    // the full remaining debt and must not overshoot by a whole installment.
    for bid_bp in [1, 33, 777, 1234, 4999] {
        let mut input = scenario_a();
        input.free_bid_rate = Decimal::new(bid_bp, 4);

        let r = simulate(&input).result;
        let installment = r.full_installment;
        let count = Decimal::from(r.installment_count_to_pay);

        assert!(count * installment >= r.final_debt_to_settle);
        assert!((count - Decimal::ONE) * installment < r.final_debt_to_settle);
    }
}

#[test]
fn test_dilute_preserves_term_and_total() {
    let mut input = scenario_a();
    input.free_bid_rate = dec!(0.05);
    input.months_paid = 20;
    input.dilute_bid = true;

    let r = simulate(&input).result;
    assert_eq!(r.installment_count_to_pay, 100);
    // 114000 spread over the remaining 100 months
    let no_insurance = r.final_installment_value - r.monthly_insurance;
    assert_eq!(no_insurance, dec!(1140));
}

// ===========================================================================
// Rendering of a full scenario
// ===========================================================================

#[test]
fn test_scenario_a_rendered_slots() {
    let input = scenario_a();
    let r = simulate(&input).result;
    let slots = render::render_slots(&input, &r);

    assert_eq!(slots["saldo-devedor-inicial"], "R$ 120.000,00");
    assert_eq!(slots["valor-parcela-base"], "R$ 1.040,00");
    assert_eq!(slots["saldo-devedor-final"], "R$ 120.000,00");
    assert_eq!(slots["parc-a-pagar-qtd"], "120");
    assert_eq!(slots["parc-a-pagar-valor"], "R$ 1.040,00");
    assert_eq!(slots["qtd-parc-abatidas"], "0.00");
    assert_eq!(slots["diluir-lance-label"], "Não (Abate Prazo)");
    assert_eq!(slots["redutor-label"], "0%");
    assert_eq!(slots["credito-disponivel"], "R$ 100.000,00");
}

#[test]
fn test_offset_count_rendered_to_two_decimals() {
    let mut input = scenario_a();
    input.free_bid_rate = dec!(0.10333);

    let r = simulate(&input).result;
    let slots = render::render_slots(&input, &r);
    assert_eq!(slots["qtd-parc-abatidas"], "10.33");
}
