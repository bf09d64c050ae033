use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use csv::Writer;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use k_ledger::calendar::{DateFilter, SystemClock};
use k_ledger::config::LedgerConfig;
use k_ledger::engine::AsyncEngine;
use k_ledger::report::{Dashboard, ReportService};
use k_ledger::storage::{LedgerStorage, Storage};

const TOTALS_HEADER: [&str; 7] = ["owner", "net_worth", "income", "expense", "savings", "investment", "transfer"];
const BUDGETS_HEADER: [&str; 8] = ["owner", "budget", "category", "period", "limit", "spent", "percent", "over"];
const RULES_HEADER: [&str; 6] = ["owner", "rule", "target", "actual", "fired", "message"];
const INSIGHTS_HEADER: [&str; 2] = ["owner", "insight"];

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: k-ledger [ledger_dir] [filter:optional] [log_level:optional] > [report].csv");
        eprintln!("Available filters: all, today, week, month, year (default: all)");
        eprintln!("Available log levels: off, error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let directory = &args[1];
    let filter = match args.get(2) {
        Some(value) => DateFilter::from_str(value)?,
        None => DateFilter::All
    };

    init_logging(args.get(3).map(String::as_str));

    let config = LedgerConfig::from_env();
    let storage = Arc::new(LedgerStorage::new());
    let engine = AsyncEngine::new(storage.clone(), config.clone());

    let timer = Instant::now();
    let stats = engine.run(directory).await?;

    info!("Imported {} rows ({} rejected) in: {:?}", stats.accepted, stats.rejected, timer.elapsed());

    let service = ReportService::new(storage.clone(), Arc::new(SystemClock), &config);
    let mut dashboards = Vec::new();

    for owner_id in storage.owners() {
        match service.dashboard(&owner_id, filter).await {
            Ok(dashboard) => dashboards.push(dashboard),
            Err(report_error) => error!("Skipping owner [{owner_id}]: {report_error}")
        }
    }

    write_report(&mut BufWriter::new(stdout().lock()), &dashboards)?;

    Ok(())
}

/// Installs a stderr fmt layer; stdout carries the report.
fn init_logging(level: Option<&str>) {
    let level = match level.map(LevelFilter::from_str) {
        None => LevelFilter::ERROR,
        Some(Ok(level)) => level,
        Some(Err(_)) => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level.unwrap_or_default());
            LevelFilter::ERROR
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(stderr).with_filter(level))
        .init();
}

/// Writes the four report sections as CSV, separated by a blank line.
fn write_report<W: Write>(output: &mut W, dashboards: &[Arc<Dashboard>]) -> Result<()> {
    write_section(output, &TOTALS_HEADER, dashboards.iter().map(|dashboard| {
        let summary = &dashboard.summary;
        let totals = &summary.period_totals;

        vec![
            dashboard.owner_id.clone(),
            summary.net_worth.to_string(),
            totals.income.to_string(),
            totals.expense.to_string(),
            totals.savings.to_string(),
            totals.investment.to_string(),
            totals.transfer.to_string()
        ]
    }))?;

    writeln!(output)?;

    write_section(output, &BUDGETS_HEADER, dashboards.iter().flat_map(|dashboard| {
        dashboard.budgets.iter().map(move |status| vec![
            dashboard.owner_id.clone(),
            status.budget.budget_id.to_string(),
            status.budget.category.clone(),
            status.budget.period.to_string(),
            status.budget.limit.to_string(),
            status.spent.to_string(),
            status.percent.round_dp(2).to_string(),
            status.is_over.to_string()
        ])
    }))?;

    writeln!(output)?;

    write_section(output, &RULES_HEADER, dashboards.iter().flat_map(|dashboard| {
        dashboard.rules.iter().map(move |outcome| vec![
            dashboard.owner_id.clone(),
            outcome.rule.rule_id.to_string(),
            outcome.rule.target.to_string(),
            outcome.actual.round_dp(2).to_string(),
            outcome.fired.to_string(),
            outcome.rule.message.clone()
        ])
    }))?;

    writeln!(output)?;

    write_section(output, &INSIGHTS_HEADER, dashboards.iter().flat_map(|dashboard| {
        dashboard.insights.iter().map(move |insight| vec![dashboard.owner_id.clone(), insight.to_string()])
    }))?;

    output.flush()?;

    Ok(())
}

fn write_section<W, I>(output: &mut W, header: &[&str], rows: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = Writer::from_writer(&mut *output);
    writer.write_record(header)?;

    for row in rows {
        writer.write_record(&row)?;
    }

    writer.flush()?;

    Ok(())
}
