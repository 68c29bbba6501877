use clap::Args;
use serde::Serialize;

use crate::core::Inputs;
use crate::error::{Error, Result};

pub const DEFAULT_DEPOSIT_YEARS: u32 = 11;
pub const DEFAULT_GROWTH_YEARS: u32 = 5;
pub const DEFAULT_ANNUAL_DEPOSIT: f64 = 10_200.0;
pub const DEFAULT_SAVINGS_RATE: f64 = 2.0;
pub const DEFAULT_GROWTH_RATE: f64 = 5.0;
pub const DEFAULT_INFLATION_RATE: f64 = 2.0;
pub const DEFAULT_PHASE1_TARGET: f64 = 5_000.0;
pub const DEFAULT_PHASE2_TARGET: f64 = 10_000.0;
pub const DEFAULT_PHASE1_YEARS: u32 = 3;

/// Upper bound on deposit plus growth years accepted from any front end.
pub const MAX_TOTAL_YEARS: u32 = 200;

/// Scenario parameters as entered by a user. Rates are in percent.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ScenarioArgs {
    #[arg(long, default_value_t = DEFAULT_DEPOSIT_YEARS, help = "Years with rental income")]
    pub deposit_years: u32,
    #[arg(
        long,
        default_value_t = DEFAULT_GROWTH_YEARS,
        help = "Further years without rental income (growth only)"
    )]
    pub growth_years: u32,
    #[arg(
        long,
        default_value_t = DEFAULT_ANNUAL_DEPOSIT,
        help = "Net rental income paid in each year, in euros"
    )]
    pub annual_deposit: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_SAVINGS_RATE,
        help = "Savings account interest in percent, e.g. 2"
    )]
    pub savings_rate: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_GROWTH_RATE,
        help = "Expected index fund return in percent, e.g. 5"
    )]
    pub growth_rate: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_INFLATION_RATE,
        help = "Expected annual inflation in percent"
    )]
    pub inflation_rate: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_PHASE1_TARGET,
        help = "Hybrid: savings balance target during phase 1, in euros"
    )]
    pub phase1_target: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_PHASE1_YEARS,
        help = "Hybrid: number of years the phase 1 target applies"
    )]
    pub phase1_years: u32,
    #[arg(
        long,
        default_value_t = DEFAULT_PHASE2_TARGET,
        help = "Hybrid: savings balance target from phase 2 on, in euros"
    )]
    pub phase2_target: f64,
}

impl Default for ScenarioArgs {
    fn default() -> Self {
        Self {
            deposit_years: DEFAULT_DEPOSIT_YEARS,
            growth_years: DEFAULT_GROWTH_YEARS,
            annual_deposit: DEFAULT_ANNUAL_DEPOSIT,
            savings_rate: DEFAULT_SAVINGS_RATE,
            growth_rate: DEFAULT_GROWTH_RATE,
            inflation_rate: DEFAULT_INFLATION_RATE,
            phase1_target: DEFAULT_PHASE1_TARGET,
            phase1_years: DEFAULT_PHASE1_YEARS,
            phase2_target: DEFAULT_PHASE2_TARGET,
        }
    }
}

pub fn build_inputs(args: ScenarioArgs) -> Result<Inputs> {
    for (name, value) in [
        ("--annual-deposit", args.annual_deposit),
        ("--savings-rate", args.savings_rate),
        ("--growth-rate", args.growth_rate),
        ("--inflation-rate", args.inflation_rate),
        ("--phase1-target", args.phase1_target),
        ("--phase2-target", args.phase2_target),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::invalid(name, "must be a number >= 0"));
        }
    }

    if args.phase1_years == 0 {
        return Err(Error::invalid("--phase1-years", "must be >= 1"));
    }

    match args.deposit_years.checked_add(args.growth_years) {
        Some(0) => {
            return Err(Error::invalid(
                "--deposit-years",
                "plus --growth-years must be > 0",
            ));
        }
        Some(total) if total <= MAX_TOTAL_YEARS => {}
        _ => {
            return Err(Error::invalid(
                "--deposit-years",
                format!("plus --growth-years must not exceed {MAX_TOTAL_YEARS}"),
            ));
        }
    }

    Ok(Inputs {
        deposit_years: args.deposit_years,
        growth_years: args.growth_years,
        annual_deposit: args.annual_deposit,
        savings_rate: args.savings_rate / 100.0,
        growth_rate: args.growth_rate / 100.0,
        inflation_rate: args.inflation_rate / 100.0,
        phase1_target: args.phase1_target,
        phase2_target: args.phase2_target,
        phase1_years: args.phase1_years,
    })
}

/// Control bounds for the dashboard. These constrain the UI only; `build_inputs`
/// accepts anything finite and non-negative.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterBounds {
    pub key: &'static str,
    pub label: &'static str,
    pub section: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

pub static PARAMETER_BOUNDS: [ParameterBounds; 9] = [
    ParameterBounds {
        key: "depositYears",
        label: "Years with rental income",
        section: "Period",
        unit: "years",
        min: 1.0,
        max: 50.0,
        step: 1.0,
        default: DEFAULT_DEPOSIT_YEARS as f64,
    },
    ParameterBounds {
        key: "growthYears",
        label: "Further years without rental income",
        section: "Period",
        unit: "years",
        min: 0.0,
        max: 50.0,
        step: 1.0,
        default: DEFAULT_GROWTH_YEARS as f64,
    },
    ParameterBounds {
        key: "annualDeposit",
        label: "Annual rental income",
        section: "Amounts & rates",
        unit: "€",
        min: 0.0,
        max: 100_000.0,
        step: 100.0,
        default: DEFAULT_ANNUAL_DEPOSIT,
    },
    ParameterBounds {
        key: "savingsRate",
        label: "Savings account interest",
        section: "Amounts & rates",
        unit: "%",
        min: 0.0,
        max: 10.0,
        step: 0.1,
        default: DEFAULT_SAVINGS_RATE,
    },
    ParameterBounds {
        key: "growthRate",
        label: "Index fund return",
        section: "Amounts & rates",
        unit: "%",
        min: 0.0,
        max: 15.0,
        step: 0.1,
        default: DEFAULT_GROWTH_RATE,
    },
    ParameterBounds {
        key: "inflationRate",
        label: "Inflation",
        section: "Amounts & rates",
        unit: "%",
        min: 0.0,
        max: 10.0,
        step: 0.1,
        default: DEFAULT_INFLATION_RATE,
    },
    ParameterBounds {
        key: "phase1Target",
        label: "Savings target, phase 1",
        section: "Hybrid strategy",
        unit: "€",
        min: 0.0,
        max: 50_000.0,
        step: 500.0,
        default: DEFAULT_PHASE1_TARGET,
    },
    ParameterBounds {
        key: "phase1Years",
        label: "Years with phase 1 target",
        section: "Hybrid strategy",
        unit: "years",
        min: 1.0,
        max: 20.0,
        step: 1.0,
        default: DEFAULT_PHASE1_YEARS as f64,
    },
    ParameterBounds {
        key: "phase2Target",
        label: "Savings target from phase 2",
        section: "Hybrid strategy",
        unit: "€",
        min: 0.0,
        max: 50_000.0,
        step: 500.0,
        default: DEFAULT_PHASE2_TARGET,
    },
];
