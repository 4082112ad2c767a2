//! finlit CLI
//!
//! Command-line front end over the calculator dispatch table. Every
//! subcommand builds a [`ToolRequest`], so the CLI and the JSON `run`
//! command go through exactly the same handlers.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};

use finlit_engine::export::write_response_csv;
use finlit_engine::{
    BudgetInput, Calculator, CompoundInput, DebtPayoffInput, HealthScoreInput, LoanInput, ToolOutcome,
    ToolRequest,
};
use finlit_engine::savings::{RequiredSavingsInput, SavingsGoalInput};

#[derive(Parser)]
#[command(
    name = "finlit",
    version,
    about = "Financial literacy calculators for students",
    long_about = "Loan, savings, budget, debt and financial health calculators. \
                  Results print as plain-language summaries, or as JSON with --json."
)]
struct Cli {
    /// Engine limits as JSON (any subset of fields)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the structured result as JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment and amortization schedule for a loan
    Loan {
        principal: f64,
        /// Annual rate in percent
        rate: f64,
        years: u32,
        /// First payment date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// Write the schedule to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// How much sooner extra payments retire a loan
    Scenarios {
        principal: f64,
        /// Annual rate in percent
        rate: f64,
        years: u32,
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Compound growth of savings with monthly deposits
    Compound {
        /// Annual rate in percent
        rate: f64,
        years: u32,
        /// Starting balance
        #[arg(long, default_value_t = 0.0)]
        principal: f64,
        /// Deposit at the end of each month
        #[arg(long, default_value_t = 0.0)]
        contribution: f64,
        /// Write the yearly breakdown to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Monthly deposit needed to reach a target
    RequiredSavings {
        target: f64,
        years: u32,
        /// Annual rate in percent earned on deposits
        #[arg(long, default_value_t = 0.0)]
        rate: f64,
    },

    /// Monthly and weekly plan for a savings goal
    Goal {
        goal: f64,
        months: u32,
        /// Amount already saved
        #[arg(long, default_value_t = 0.0)]
        current: f64,
        /// Monthly deposit you already plan to make
        #[arg(long)]
        contribution: Option<f64>,
    },

    /// Split monthly income across budget categories
    Budget {
        income: f64,
        #[arg(long, default_value = "Student")]
        name: String,
        /// Custom category as NAME=PERCENT; repeat to replace the default set
        #[arg(long = "category", value_parser = parse_category)]
        categories: Vec<(String, f64)>,
        /// Write the budget sheet to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Minimum-payment vs accelerated payoff of one debt
    Debt {
        balance: f64,
        /// Annual rate in percent
        rate: f64,
        minimum: f64,
        #[arg(long, default_value_t = 0.0)]
        extra: f64,
    },

    /// 0-100 financial health score with letter grade
    Health {
        income: f64,
        expenses: f64,
        #[arg(long, default_value_t = 0.0)]
        debt_payments: f64,
        #[arg(long, default_value_t = 0.0)]
        emergency_fund: f64,
        #[arg(long, default_value_t = 0.0)]
        savings: f64,
        #[arg(long, default_value_t = 0.0)]
        savings_goal: f64,
    },

    /// Run JSON tool requests: one object or an array of them
    Run {
        /// Request file; reads stdin when omitted
        path: Option<PathBuf>,
        /// Write the table of a single request to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn parse_category(s: &str) -> Result<(String, f64), String> {
    let (name, pct) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=PERCENT, got '{}'", s))?;
    let pct = pct
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid percentage '{}': {}", pct, e))?;
    Ok((name.trim().to_string(), pct))
}

impl Commands {
    /// Translate the subcommand into dispatch requests plus an optional CSV target
    fn into_requests(self) -> Result<(Vec<ToolRequest>, Option<PathBuf>)> {
        let single = |request: ToolRequest, csv: Option<PathBuf>| -> Result<(Vec<ToolRequest>, Option<PathBuf>)> {
            Ok((vec![request], csv))
        };

        match self {
            Commands::Loan { principal, rate, years, start_date, csv } => {
                let mut input = LoanInput::new(principal, rate, years);
                input.start_date = start_date;
                single(ToolRequest::Loan(input), csv)
            }
            Commands::Scenarios { principal, rate, years, csv } => {
                single(ToolRequest::LoanScenarios(LoanInput::new(principal, rate, years)), csv)
            }
            Commands::Compound { rate, years, principal, contribution, csv } => single(
                ToolRequest::Compound(CompoundInput::new(principal, contribution, rate, years)),
                csv,
            ),
            Commands::RequiredSavings { target, years, rate } => single(
                ToolRequest::RequiredSavings(RequiredSavingsInput {
                    target_amount: target,
                    years,
                    annual_rate: rate,
                }),
                None,
            ),
            Commands::Goal { goal, months, current, contribution } => single(
                ToolRequest::SavingsGoal(SavingsGoalInput {
                    goal_amount: goal,
                    months,
                    current_savings: current,
                    monthly_contribution: contribution,
                }),
                None,
            ),
            Commands::Budget { income, name, categories, csv } => {
                let mut input = BudgetInput::new(income).for_user(name);
                if !categories.is_empty() {
                    input = input.with_overrides(categories.into_iter().collect());
                }
                single(ToolRequest::Budget(input), csv)
            }
            Commands::Debt { balance, rate, minimum, extra } => single(
                ToolRequest::DebtPayoff(DebtPayoffInput::new(balance, rate, minimum, extra)),
                None,
            ),
            Commands::Health { income, expenses, debt_payments, emergency_fund, savings, savings_goal } => single(
                ToolRequest::HealthScore(HealthScoreInput {
                    monthly_income: income,
                    monthly_expenses: expenses,
                    monthly_debt_payments: debt_payments,
                    emergency_fund,
                    current_savings: savings,
                    savings_goal,
                }),
                None,
            ),
            Commands::Run { path, csv } => {
                let requests = read_requests(path.as_deref())?;
                if csv.is_some() && requests.len() != 1 {
                    bail!("--csv needs exactly one request, got {}", requests.len());
                }
                Ok((requests, csv))
            }
        }
    }
}

/// Parse one request object or an array of them
fn read_requests(path: Option<&Path>) -> Result<Vec<ToolRequest>> {
    let raw = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read request file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            buf
        }
    };

    let value: serde_json::Value = serde_json::from_str(&raw).context("request is not valid JSON")?;
    let requests: Vec<ToolRequest> = if value.is_array() {
        serde_json::from_value(value).context("invalid tool request in array")?
    } else {
        vec![serde_json::from_value(value).context("invalid tool request")?]
    };
    debug!("parsed {} tool request(s)", requests.len());
    Ok(requests)
}

fn print_outcomes(outcomes: &[ToolOutcome], json: bool) -> Result<()> {
    if json {
        let responses: Vec<_> = outcomes.iter().map(|o| &o.response).collect();
        let text = if let [single] = responses.as_slice() {
            serde_json::to_string_pretty(single)?
        } else {
            serde_json::to_string_pretty(&responses)?
        };
        println!("{}", text);
    } else {
        for (i, outcome) in outcomes.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", outcome.summary);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let calculator = match &cli.config {
        Some(path) => {
            info!("loading engine config from {}", path.display());
            Calculator::from_json_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => Calculator::new(),
    };

    let (requests, csv_path) = cli.command.into_requests()?;

    let mut outcomes = Vec::with_capacity(requests.len());
    let mut failures = 0;
    for (request, result) in requests.iter().zip(calculator.dispatch_batch(&requests)) {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) if requests.len() == 1 => {
                return Err(e).with_context(|| format!("{} calculation failed", request.name()));
            }
            Err(e) => {
                eprintln!("{}: {}", request.name(), e);
                failures += 1;
            }
        }
    }

    print_outcomes(&outcomes, cli.json)?;

    if let (Some(path), [outcome]) = (csv_path, outcomes.as_slice()) {
        let file = File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        write_response_csv(&outcome.response, BufWriter::new(file))
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote CSV to {}", path.display());
    }

    if failures > 0 {
        bail!("{} of {} requests failed", failures, requests.len());
    }
    Ok(())
}
