//! Line-based parameter entry.
//!
//! Every question shows its default in brackets; an empty line (or end of input)
//! accepts it. Decimal commas are accepted (`2,5` reads as `2.5`).

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::config::ScenarioArgs;
use crate::error::{Error, Result};

fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: &str,
) -> Result<Option<String>> {
    write!(output, "{label} [{default}]: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }

    let answer = line.trim();
    if answer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(answer.to_string()))
    }
}

fn parse_number<T: FromStr>(answer: &str) -> Result<T> {
    answer
        .replace(',', ".")
        .parse::<T>()
        .map_err(|_| Error::InvalidNumber(answer.to_string()))
}

fn ask<T, R, W>(input: &mut R, output: &mut W, label: &str, default: T) -> Result<T>
where
    T: FromStr + ToString,
    R: BufRead,
    W: Write,
{
    loop {
        let Some(answer) = read_answer(input, output, label, &default.to_string())? else {
            return Ok(default);
        };
        match parse_number::<T>(&answer) {
            Ok(value) => return Ok(value),
            Err(err) => {
                tracing::debug!(%answer, "rejected prompt input");
                writeln!(output, "  {err}, please try again.")?;
            }
        }
    }
}

pub fn ask_f64<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: f64,
) -> Result<f64> {
    ask(input, output, label, default)
}

pub fn ask_u32<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: u32,
) -> Result<u32> {
    ask(input, output, label, default)
}

/// Asks for every scenario parameter, starting from `defaults`.
pub fn prompt_scenario<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    defaults: &ScenarioArgs,
) -> Result<ScenarioArgs> {
    let deposit_years = ask_u32(
        input,
        output,
        "Years with rental income",
        defaults.deposit_years,
    )?;
    let growth_years = ask_u32(
        input,
        output,
        "Further years without rental income (growth only)",
        defaults.growth_years,
    )?;
    let annual_deposit = ask_f64(
        input,
        output,
        "Annual deposit (child's net rental income, €)",
        defaults.annual_deposit,
    )?;
    let savings_rate = ask_f64(
        input,
        output,
        "Savings account interest in % (e.g. 2)",
        defaults.savings_rate,
    )?;
    let growth_rate = ask_f64(
        input,
        output,
        "Index fund return in % (e.g. 5)",
        defaults.growth_rate,
    )?;
    let inflation_rate = ask_f64(
        input,
        output,
        "Inflation in % (e.g. 2)",
        defaults.inflation_rate,
    )?;

    writeln!(output)?;
    writeln!(output, "Hybrid strategy (savings account + index fund):")?;
    let phase1_target = ask_f64(
        input,
        output,
        "Savings target in phase 1 (e.g. 5000)",
        defaults.phase1_target,
    )?;
    let phase1_years = ask_u32(
        input,
        output,
        "Number of years with the phase 1 target",
        defaults.phase1_years,
    )?;
    let phase2_target = ask_f64(
        input,
        output,
        "Savings target from phase 2 on (e.g. 10000)",
        defaults.phase2_target,
    )?;

    Ok(ScenarioArgs {
        deposit_years,
        growth_years,
        annual_deposit,
        savings_rate,
        growth_rate,
        inflation_rate,
        phase1_target,
        phase1_years,
        phase2_target,
    })
}
