//! Total parse-or-zero conversion of raw form-field text into typed inputs.
//!
//! Numeric contract: thousands separators (`.`), currency (`R$`) and percent
//! symbols are stripped, the comma is the decimal separator, and anything
//! empty or unparseable yields zero. Nothing in this module ever fails.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::simulation::SimulationInput;
use crate::types::{Money, Rate};

/// Parse a pt-BR monetary or plain numeric string, defaulting to zero.
///
/// `"R$ 1.234,56"` -> `1234.56`, `"20%"` -> `20`, `""` -> `0`.
pub fn parse_money(raw: &str) -> Money {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '.' | 'R' | '$' | '%' | ' '))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

/// Parse a whole-number percentage field into a fractional rate.
///
/// The value is treated as an already-scaled percentage whether or not a `%`
/// suffix is present: `"25"` and `"25%"` both yield `0.25`.
pub fn parse_percent(raw: &str) -> Rate {
    parse_money(raw) / Decimal::ONE_HUNDRED
}

/// Parse a month/installment count, defaulting to zero.
pub fn parse_count(raw: &str) -> u32 {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Parse a boolean form field. The upstream forms submit `"1"` for yes;
/// `"sim"` and `"true"` are accepted as well.
pub fn parse_flag(raw: &str) -> bool {
    let v = raw.trim();
    v == "1" || v.eq_ignore_ascii_case("sim") || v.eq_ignore_ascii_case("true")
}

/// Raw form-field values exactly as typed, one per recognized input.
///
/// Fields absent from a given plan's form stay `None`. A missing insurance
/// field means the plan has no toggle and insurance is always charged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFields {
    /// "credito" — principal, e.g. `"100.000,00"`
    pub credit: String,
    /// "taxa-adm" — admin fee percentage, e.g. `"20%"`
    pub admin_fee: String,
    /// "qtd-meses" — contracted term
    pub months: String,
    /// "qtd-parc-pagas" — installments paid before the award
    pub months_paid: String,
    /// "perc-lance-ofertado" — free bid percentage
    pub free_bid: String,
    /// "perc-lance-embutido" — embedded bid percentage
    pub embedded_bid: Option<String>,
    /// "diluir-lance" — `"1"` to dilute, anything else shortens the term
    pub dilute_bid: String,
    /// "redutor-opc" — reducer percentage
    pub reducer: Option<String>,
    /// "seguro-ativo" — insurance toggle; absent means always active
    pub insurance: Option<String>,
}

impl SimulationInput {
    /// Assemble a typed input from raw form fields, coercing every malformed
    /// value to its documented default.
    pub fn from_form(form: &FormFields) -> Self {
        SimulationInput {
            credit_value: parse_money(&form.credit),
            admin_fee_rate: parse_percent(&form.admin_fee),
            total_months: parse_count(&form.months),
            months_paid: parse_count(&form.months_paid),
            free_bid_rate: parse_percent(&form.free_bid),
            embedded_bid_rate: form
                .embedded_bid
                .as_deref()
                .map(parse_percent)
                .unwrap_or(Decimal::ZERO),
            dilute_bid: parse_flag(&form.dilute_bid),
            reducer_rate: form
                .reducer
                .as_deref()
                .map(parse_percent)
                .unwrap_or(Decimal::ZERO),
            insurance_active: form.insurance.as_deref().map(parse_flag).unwrap_or(true),
        }
    }
}
