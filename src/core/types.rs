use serde::Serialize;

/// Length of the projection and the size of the yearly inflow.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Horizon {
    pub deposit_years: u32,
    pub growth_years: u32,
    pub annual_deposit: f64,
}

impl Horizon {
    /// Saturates at `u32::MAX` rather than overflowing.
    pub fn total_years(&self) -> u32 {
        self.deposit_years.saturating_add(self.growth_years)
    }

    /// Inflow for a 1-based year: the full deposit during the deposit phase, nothing afterwards.
    pub fn deposit_for_year(&self, year: u32) -> f64 {
        if year <= self.deposit_years {
            self.annual_deposit
        } else {
            0.0
        }
    }
}

/// Ceiling for the low-yield bucket in the hybrid strategy.
///
/// `phase1_target` applies for years `1..=phase1_years`, `phase2_target` afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TargetSchedule {
    pub phase1_target: f64,
    pub phase2_target: f64,
    pub phase1_years: u32,
}

impl TargetSchedule {
    pub fn target_for_year(&self, year: u32) -> f64 {
        if year <= self.phase1_years {
            self.phase1_target
        } else {
            self.phase2_target
        }
    }
}

/// How each year's deposit is split between the two buckets and how they grow.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Strategy {
    SavingsOnly {
        rate: f64,
    },
    GrowthOnly {
        rate: f64,
    },
    Hybrid {
        low_yield_rate: f64,
        growth_rate: f64,
        targets: TargetSchedule,
    },
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::SavingsOnly { .. } => StrategyKind::SavingsOnly,
            Strategy::GrowthOnly { .. } => StrategyKind::GrowthOnly,
            Strategy::Hybrid { .. } => StrategyKind::Hybrid,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    SavingsOnly,
    GrowthOnly,
    Hybrid,
}

impl StrategyKind {
    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::SavingsOnly => "Savings account only",
            StrategyKind::GrowthOnly => "Index fund only",
            StrategyKind::Hybrid => "Hybrid (savings + index fund)",
        }
    }
}

/// Validated parameters for one comparison run. Rates are fractions (0.02 = 2 %).
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub deposit_years: u32,
    pub growth_years: u32,
    pub annual_deposit: f64,
    pub savings_rate: f64,
    pub growth_rate: f64,
    pub inflation_rate: f64,
    pub phase1_target: f64,
    pub phase2_target: f64,
    pub phase1_years: u32,
}

impl Inputs {
    pub fn horizon(&self) -> Horizon {
        Horizon {
            deposit_years: self.deposit_years,
            growth_years: self.growth_years,
            annual_deposit: self.annual_deposit,
        }
    }

    pub fn targets(&self) -> TargetSchedule {
        TargetSchedule {
            phase1_target: self.phase1_target,
            phase2_target: self.phase2_target,
            phase1_years: self.phase1_years,
        }
    }

    /// The three strategies in report order: savings, index fund, hybrid.
    pub fn strategies(&self) -> [Strategy; 3] {
        [
            Strategy::SavingsOnly {
                rate: self.savings_rate,
            },
            Strategy::GrowthOnly {
                rate: self.growth_rate,
            },
            Strategy::Hybrid {
                low_yield_rate: self.savings_rate,
                growth_rate: self.growth_rate,
                targets: self.targets(),
            },
        ]
    }
}

/// End-of-year state of one simulated year.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSnapshot {
    pub year: u32,
    pub deposit: f64,
    pub low_yield_balance: f64,
    pub growth_balance: f64,
    pub total_nominal: f64,
    pub total_real: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub strategy: StrategyKind,
    pub years: Vec<YearSnapshot>,
}

impl ScenarioResult {
    pub fn total_deposits(&self) -> f64 {
        self.years.iter().map(|row| row.deposit).sum()
    }

    pub fn final_snapshot(&self) -> Option<&YearSnapshot> {
        self.years.last()
    }

    /// Final nominal total, or zero when no year was simulated.
    pub fn final_nominal(&self) -> f64 {
        self.final_snapshot().map_or(0.0, |row| row.total_nominal)
    }

    pub fn final_real(&self) -> f64 {
        self.final_snapshot().map_or(0.0, |row| row.total_real)
    }
}
