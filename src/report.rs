//! Console rendering of projection results.
//!
//! Amounts use European notation: `.` groups thousands, `,` separates cents and the
//! currency symbol trails (`1.234,56 €`).

use std::io::Write;

use crate::core::{Inputs, ScenarioResult};

const WIDTH: usize = 80;

/// Formats an amount with two decimals in European notation.
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let euros = (cents / 100).to_string();

    let mut grouped = String::with_capacity(euros.len() + euros.len() / 3);
    for (idx, digit) in euros.chars().enumerate() {
        if idx > 0 && (euros.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{grouped},{:02} €", cents % 100)
}

pub fn format_percent(rate: f64) -> String {
    format!("{:.2} %", rate * 100.0)
}

pub fn write_header<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    let rule = "=".repeat(WIDTH);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{}", format!("{title:^width$}", width = WIDTH).trim_end())?;
    writeln!(out, "{rule}")
}

pub fn write_scenario_table<W: Write>(
    out: &mut W,
    title: &str,
    result: &ScenarioResult,
    inflation_rate: f64,
) -> std::io::Result<()> {
    write_header(out, &format!("Scenario: {title}"))?;

    let header = format!(
        "{:>4} | {:>12} | {:>12} | {:>12} | {:>12} | {:>14}",
        "Year", "Deposit", "Savings", "Index fund", "Total", "Real (today)"
    );
    let rule = "-".repeat(header.chars().count());
    writeln!(out, "{header}")?;
    writeln!(out, "{rule}")?;

    for row in &result.years {
        writeln!(
            out,
            "{:>4} | {:>12} | {:>12} | {:>12} | {:>12} | {:>14}",
            row.year,
            format_money(row.deposit),
            format_money(row.low_yield_balance),
            format_money(row.growth_balance),
            format_money(row.total_nominal),
            format_money(row.total_real),
        )?;
    }

    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "{:<20} {}",
        "Total deposits:",
        format_money(result.total_deposits())
    )?;
    match result.final_snapshot() {
        Some(last) => {
            writeln!(
                out,
                "{:<20} {}",
                "Final nominal:",
                format_money(last.total_nominal)
            )?;
            writeln!(out, "{:<20} {}", "Final real:", format_money(last.total_real))?;
        }
        None => writeln!(out, "(no years simulated)")?,
    }
    writeln!(
        out,
        "{:<20} {}",
        "Inflation p.a.:",
        format_percent(inflation_rate)
    )?;
    writeln!(out)
}

/// Final balances of every strategy side by side.
pub fn write_comparison<W: Write>(out: &mut W, results: &[ScenarioResult]) -> std::io::Result<()> {
    write_header(out, "Comparison of final balances")?;

    let header = format!(
        "{:<32} | {:>16} | {:>16}",
        "Strategy", "Final nominal", "Final real"
    );
    writeln!(out, "{header}")?;
    writeln!(out, "{}", "-".repeat(header.chars().count()))?;
    for result in results {
        writeln!(
            out,
            "{:<32} | {:>16} | {:>16}",
            result.strategy.label(),
            format_money(result.final_nominal()),
            format_money(result.final_real()),
        )?;
    }
    writeln!(out)
}

pub fn write_report<W: Write>(
    out: &mut W,
    inputs: &Inputs,
    results: &[ScenarioResult],
) -> std::io::Result<()> {
    for (letter, result) in ('A'..='Z').zip(results) {
        let title = format!("{letter}) {}", result.strategy.label());
        write_scenario_table(out, &title, result, inputs.inflation_rate)?;
    }
    write_comparison(out, results)?;
    writeln!(
        out,
        "Note: 'Real (today)' accounts for the entered inflation rate."
    )
}
