mod engine;
mod types;

pub use engine::{
    real_value, run_comparison, run_scenario, simulate, simulate_growth, simulate_hybrid,
    simulate_savings,
};
pub use types::{
    Horizon, Inputs, ScenarioResult, Strategy, StrategyKind, TargetSchedule, YearSnapshot,
};
