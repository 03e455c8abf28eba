use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use consorcio_core::adapter::FormFields;
use consorcio_core::render;
use consorcio_core::simulation::{simulate, SimulationInput};

use crate::input;

/// Arguments for a typed simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Financed principal, e.g. 100000
    #[arg(long)]
    pub credit: Option<Decimal>,

    /// Administrative fee rate as a fraction (e.g. 0.20 for 20%)
    #[arg(long)]
    pub admin_fee_rate: Option<Decimal>,

    /// Total contracted term in months
    #[arg(long)]
    pub months: Option<u32>,

    /// Installments already paid before the award
    #[arg(long, default_value = "0")]
    pub months_paid: u32,

    /// Free bid ("lance livre") as a fraction of the credit
    #[arg(long, default_value = "0")]
    pub free_bid_rate: Decimal,

    /// Embedded bid ("lance embutido") as a fraction of the credit
    #[arg(long, default_value = "0")]
    pub embedded_bid_rate: Decimal,

    /// Dilute the settled balance over the remaining term instead of
    /// shortening it
    #[arg(long)]
    pub dilute: bool,

    /// Pre-award installment reducer as a fraction (e.g. 0.30 for 30%)
    #[arg(long, default_value = "0")]
    pub reducer_rate: Decimal,

    /// Disable the monthly insurance surcharge
    #[arg(long)]
    pub no_insurance: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a simulation from raw form-field text
#[derive(Args)]
pub struct FormArgs {
    /// "credito" field as typed, e.g. "R$ 100.000,00"
    #[arg(long, default_value = "")]
    pub credit: String,

    /// "taxa-adm" field as typed, e.g. "20%"
    #[arg(long, default_value = "")]
    pub admin_fee: String,

    /// "qtd-meses" field as typed
    #[arg(long, default_value = "")]
    pub months: String,

    /// "qtd-parc-pagas" field as typed
    #[arg(long, default_value = "")]
    pub months_paid: String,

    /// "perc-lance-ofertado" field as typed, e.g. "10%"
    #[arg(long, default_value = "")]
    pub free_bid: String,

    /// "perc-lance-embutido" field as typed; omit for plans without it
    #[arg(long)]
    pub embedded_bid: Option<String>,

    /// "diluir-lance" field: "1" dilutes, anything else shortens the term
    #[arg(long, default_value = "")]
    pub dilute: String,

    /// "redutor-opc" field as typed; omit for plans without a reducer
    #[arg(long)]
    pub reducer: Option<String>,

    /// "seguro-ativo" field; omit for plans where insurance is always on
    #[arg(long)]
    pub insurance: Option<String>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input: SimulationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SimulationInput {
            credit_value: args.credit.ok_or("--credit is required (or provide --input)")?,
            admin_fee_rate: args
                .admin_fee_rate
                .ok_or("--admin-fee-rate is required (or provide --input)")?,
            total_months: args.months.ok_or("--months is required (or provide --input)")?,
            months_paid: args.months_paid,
            free_bid_rate: args.free_bid_rate,
            embedded_bid_rate: args.embedded_bid_rate,
            dilute_bid: args.dilute,
            reducer_rate: args.reducer_rate,
            insurance_active: !args.no_insurance,
        }
    };

    sim_input.validate()?;
    let result = simulate(&sim_input);
    Ok(serde_json::to_value(result)?)
}

pub fn run_form(args: FormArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let form = FormFields {
        credit: args.credit,
        admin_fee: args.admin_fee,
        months: args.months,
        months_paid: args.months_paid,
        free_bid: args.free_bid,
        embedded_bid: args.embedded_bid,
        dilute_bid: args.dilute,
        reducer: args.reducer,
        insurance: args.insurance,
    };

    // Form input follows the parse-or-zero contract: no validation, no failure.
    let sim_input = SimulationInput::from_form(&form);
    let output = simulate(&sim_input);
    let slots = render::render_slots(&sim_input, &output.result);

    Ok(serde_json::json!({
        "result": slots,
        "warnings": output.warnings,
    }))
}
