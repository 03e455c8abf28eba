use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::SimulatorError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::SimulatorResult;

/// Monthly insurance premium as a fraction of the credit (0.04% per month).
pub const MONTHLY_INSURANCE_RATE: Decimal = dec!(0.0004);

/// Input for a consórcio bid ("lance") simulation.
///
/// All fields default to zero when absent, except `insurance_active` which
/// defaults to `true`: plans without an insurance toggle always charge it.
/// This single parameterization covers the plan variants that differ only in
/// which optional fields (embedded bid, insurance toggle, reducer) exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Financed principal ("crédito")
    #[serde(default)]
    pub credit_value: Money,
    /// Administrative fee as a fraction of the principal (e.g. 0.20 = 20%)
    #[serde(default)]
    pub admin_fee_rate: Rate,
    /// Total contracted term in months
    #[serde(default)]
    pub total_months: u32,
    /// Installments already paid before the bid is accepted ("contemplação")
    #[serde(default)]
    pub months_paid: u32,
    /// Bid fraction funded from the bidder's own resources ("lance livre")
    #[serde(default)]
    pub free_bid_rate: Rate,
    /// Bid fraction funded from the credit itself ("lance embutido")
    #[serde(default)]
    pub embedded_bid_rate: Rate,
    /// true = dilute the settled balance over the remaining term (smaller
    /// installment); false = keep the full installment and shorten the term
    #[serde(default)]
    pub dilute_bid: bool,
    /// Pre-award installment discount ("redutor"), in [0, 1). The discounted
    /// portion accrues as a residual balance owed after contemplation.
    #[serde(default)]
    pub reducer_rate: Rate,
    /// Whether the fixed monthly insurance surcharge applies
    #[serde(default = "default_insurance")]
    pub insurance_active: bool,
}

fn default_insurance() -> bool {
    true
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self {
            credit_value: Decimal::ZERO,
            admin_fee_rate: Decimal::ZERO,
            total_months: 0,
            months_paid: 0,
            free_bid_rate: Decimal::ZERO,
            embedded_bid_rate: Decimal::ZERO,
            dilute_bid: false,
            reducer_rate: Decimal::ZERO,
            insurance_active: true,
        }
    }
}

impl SimulationInput {
    /// Strict precondition check for explicitly supplied inputs (CLI flags,
    /// JSON files). The engine itself is total and never calls this: form
    /// input goes through the parse-or-zero adapter instead.
    pub fn validate(&self) -> SimulatorResult<()> {
        if self.credit_value < Decimal::ZERO {
            return Err(SimulatorError::InvalidInput {
                field: "credit_value".into(),
                reason: "Credit value cannot be negative".into(),
            });
        }
        if self.admin_fee_rate < Decimal::ZERO {
            return Err(SimulatorError::InvalidInput {
                field: "admin_fee_rate".into(),
                reason: "Administrative fee rate cannot be negative".into(),
            });
        }
        if self.free_bid_rate < Decimal::ZERO {
            return Err(SimulatorError::InvalidInput {
                field: "free_bid_rate".into(),
                reason: "Free bid rate cannot be negative".into(),
            });
        }
        if self.embedded_bid_rate < Decimal::ZERO {
            return Err(SimulatorError::InvalidInput {
                field: "embedded_bid_rate".into(),
                reason: "Embedded bid rate cannot be negative".into(),
            });
        }
        if self.reducer_rate < Decimal::ZERO || self.reducer_rate >= Decimal::ONE {
            return Err(SimulatorError::InvalidInput {
                field: "reducer_rate".into(),
                reason: "Reducer rate must be in [0, 1)".into(),
            });
        }
        if self.months_paid > self.total_months {
            return Err(SimulatorError::InvalidInput {
                field: "months_paid".into(),
                reason: format!(
                    "Months paid ({}) exceeds the contracted term ({})",
                    self.months_paid, self.total_months
                ),
            });
        }
        Ok(())
    }
}

/// Derived figures for one simulation. Every value is recomputed from scratch
/// on each call; nothing persists across invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Credit plus administrative fee ("saldo devedor inicial")
    pub total_debt: Money,
    /// Fixed monthly insurance surcharge (zero when insurance is off)
    pub monthly_insurance: Money,
    /// Undiscounted installment: total debt spread over the full term
    pub full_installment: Money,
    /// Installment after the reducer discount ("parcela flex")
    pub reduced_installment: Money,
    /// Discounted portion deferred each month by the reducer
    pub residual_per_month: Money,
    /// Residual accrued over the installments already paid
    pub accrued_residual: Money,
    /// Displayed pre-award installment, insurance included
    pub base_installment: Money,
    /// Bid amount paid from the member's own funds ("lance livre")
    pub free_bid_value: Money,
    /// Bid amount deducted from the credit line ("lance embutido")
    pub embedded_bid_value: Money,
    /// Free plus embedded bid
    pub total_bid_value: Money,
    /// Debt remaining after the bid, residual included ("saldo devedor final")
    pub final_debt_to_settle: Money,
    /// Months left of the original term at contemplation
    pub remaining_months: u32,
    /// Number of installments still owed after the award
    pub installment_count_to_pay: u32,
    /// Post-award installment, insurance included
    pub final_installment_value: Money,
    /// How many full installments the bid offsets (informational, 2 dp display)
    pub installments_offset_count: Decimal,
    /// Credit actually released to the member after the embedded bid
    pub available_credit: Money,
}

/// Run a consórcio bid simulation.
///
/// Total function: every division is guarded, so a zero term or zero
/// installment yields zero rather than an error. Deterministic and
/// side-effect free; identical inputs produce identical outputs.
pub fn simulate(input: &SimulationInput) -> ComputationOutput<SimulationResult> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let monthly_insurance = if input.insurance_active {
        input.credit_value * MONTHLY_INSURANCE_RATE
    } else {
        Decimal::ZERO
    };

    let total_debt = input.credit_value * (Decimal::ONE + input.admin_fee_rate);

    let full_installment = if input.total_months > 0 {
        total_debt / Decimal::from(input.total_months)
    } else {
        Decimal::ZERO
    };

    // Reducer: the member pays a discounted installment before the award and
    // the discounted portion accrues as a residual owed at settlement.
    let reduced_installment = full_installment * (Decimal::ONE - input.reducer_rate);
    let residual_per_month = full_installment * input.reducer_rate;
    let accrued_residual = residual_per_month * Decimal::from(input.months_paid);

    let base_installment = if input.reducer_rate > Decimal::ZERO {
        reduced_installment + monthly_insurance
    } else {
        full_installment + monthly_insurance
    };

    let embedded_bid_value = input.credit_value * input.embedded_bid_rate;
    let free_bid_value = input.credit_value * input.free_bid_rate;
    let total_bid_value = free_bid_value + embedded_bid_value;

    if total_bid_value > total_debt {
        warnings.push(format!(
            "Total bid ({total_bid_value}) exceeds the total debt ({total_debt}); \
             the remaining balance is negative"
        ));
    }

    let final_debt_to_settle = total_debt - total_bid_value + accrued_residual;

    if input.months_paid > input.total_months {
        warnings.push(format!(
            "Months paid ({}) exceeds the contracted term ({}); remaining term clamped to zero",
            input.months_paid, input.total_months
        ));
    }
    let remaining_months = input.total_months.saturating_sub(input.months_paid);

    let (installment_count_to_pay, final_installment_no_insurance) = if input.dilute_bid {
        // Dilute: keep the remaining term, shrink the installment.
        let count = remaining_months;
        let installment = if count > 0 {
            final_debt_to_settle / Decimal::from(count)
        } else {
            Decimal::ZERO
        };
        (count, installment)
    } else {
        // Shorten the term: keep the full installment and round the count up
        // so the member never pays less than the remaining debt.
        let installment = full_installment;
        let count = if installment > Decimal::ZERO {
            (final_debt_to_settle / installment)
                .ceil()
                .to_u32()
                .unwrap_or(0)
        } else {
            0
        };
        (count, installment)
    };

    let final_installment_value = final_installment_no_insurance + monthly_insurance;

    let installments_offset_count = if full_installment > Decimal::ZERO {
        total_bid_value / full_installment
    } else {
        Decimal::ZERO
    };

    let available_credit = input.credit_value - embedded_bid_value;

    let result = SimulationResult {
        total_debt,
        monthly_insurance,
        full_installment,
        reduced_installment,
        residual_per_month,
        accrued_residual,
        base_installment,
        free_bid_value,
        embedded_bid_value,
        total_bid_value,
        final_debt_to_settle,
        remaining_months,
        installment_count_to_pay,
        final_installment_value,
        installments_offset_count,
        available_credit,
    };

    with_metadata(
        "Consórcio contemplation: straight-line installments, bid settlement \
         with reducer residual, ceiling term shortening",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    )
}
