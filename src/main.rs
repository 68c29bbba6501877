use std::io::{self, BufRead, BufWriter, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use usufruct::api::{build_simulate_response, run_http_server};
use usufruct::config::{ScenarioArgs, build_inputs};
use usufruct::core::run_comparison;
use usufruct::logging::init_logging;
use usufruct::prompt::prompt_scenario;
use usufruct::report::{write_header, write_report};

#[derive(Parser, Debug)]
#[command(
    name = "usufruct",
    about = "Projects a child's rental income under savings, index fund and hybrid strategies"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute all three strategies from command-line flags and print them
    Run {
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Ask for every parameter on the terminal, then print the report
    Interactive,
    /// Serve the web dashboard and the JSON API
    Serve {
        #[arg(long, env = "USUFRUCT_PORT", default_value_t = 8080)]
        port: u16,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let outcome = match cli.command {
        Command::Run { scenario, format } => {
            let mut out = BufWriter::new(io::stdout().lock());
            run(&mut out, scenario, format)
        }
        Command::Interactive => interactive(&mut io::stdin().lock(), &mut io::stdout().lock()),
        Command::Serve { port } => run_http_server(port).await.map_err(usufruct::Error::from),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run<W: Write>(out: &mut W, args: ScenarioArgs, format: OutputFormat) -> usufruct::Result<()> {
    let inputs = build_inputs(args)?;
    let results = run_comparison(&inputs);

    match format {
        OutputFormat::Table => write_report(out, &inputs, &results)?,
        OutputFormat::Json => {
            let response = build_simulate_response(&inputs, results);
            serde_json::to_writer_pretty(&mut *out, &response)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn interactive<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> usufruct::Result<()> {
    write_header(out, "Usufruct scenario calculator: the child's rental income")?;
    let args = prompt_scenario(input, out, &ScenarioArgs::default())?;
    let inputs = build_inputs(args)?;
    let results = run_comparison(&inputs);

    write_report(out, &inputs, &results)?;
    writeln!(
        out,
        "Run it again with other answers to compare further scenarios."
    )?;
    out.flush()?;
    Ok(())
}
