//! Formatting of simulation results into pt-BR display strings, keyed by the
//! stable slot names the form layer binds to.

use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

use crate::simulation::{SimulationInput, SimulationResult};
use crate::types::{Money, Rate};

/// Format a monetary value as BRL: `R$ 1.234,56`.
pub fn format_brl(value: Money) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let cents = format!("{abs:.2}");
    let (int_part, frac_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let grouped = group_thousands(int_part);

    if negative {
        format!("-R$ {grouped},{frac_part}")
    } else {
        format!("R$ {grouped},{frac_part}")
    }
}

/// Format a fractional rate as a whole-number percentage: `0.2` -> `20%`.
pub fn format_percent(rate: Rate) -> String {
    let pct = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{pct}%")
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Render every display value under its stable slot key.
///
/// Slot keys follow the form element ids; monetary slots are BRL-formatted,
/// the offset count is reported with 2 decimals, and the reducer label as a
/// whole-number percentage.
pub fn render_slots(
    input: &SimulationInput,
    result: &SimulationResult,
) -> BTreeMap<&'static str, String> {
    let mut slots = BTreeMap::new();
    slots.insert("saldo-devedor-inicial", format_brl(result.total_debt));
    slots.insert("valor-parcela-base", format_brl(result.base_installment));
    slots.insert("valor-lance-ofertado", format_brl(result.free_bid_value));
    slots.insert("lance-embutido", format_brl(result.embedded_bid_value));
    slots.insert("credito-disponivel", format_brl(result.available_credit));
    slots.insert("saldo-devedor-final", format_brl(result.final_debt_to_settle));
    slots.insert(
        "parc-a-pagar-qtd",
        result.installment_count_to_pay.to_string(),
    );
    slots.insert(
        "parc-a-pagar-valor",
        format_brl(result.final_installment_value),
    );
    slots.insert(
        "qtd-parc-abatidas",
        format!(
            "{:.2}",
            result
                .installments_offset_count
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
    );
    slots.insert(
        "diluir-lance-label",
        if input.dilute_bid {
            "Sim (Reduz Parcela)".to_string()
        } else {
            "Não (Abate Prazo)".to_string()
        },
    );
    slots.insert("redutor-label", format_percent(input.reducer_rate));
    slots
}
