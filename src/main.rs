mod aggregate;
mod engine;
mod models;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::{Report, ReportEngine};

#[derive(Debug, Clone, Copy)]
enum ReportKind {
    Monthly,
    Categories,
    Transactions
}

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: If I was making a much more sophisticated CLI application, I would have used the clap crate
    //      to handle the CLI parsing and execution.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: transaction-aggregator [input].csv [report:optional] [log_level:optional] > [output].csv");
        eprintln!("Available reports: monthly, categories, transactions (default: monthly)");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let path = &args[1];
    let report_kind = args.get(2)
        .map(|s| parse_report_kind(s)).unwrap_or(ReportKind::Monthly);
    let log_level = args.get(3)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let engine = ReportEngine::new();

    let timer = Instant::now();
    let report = engine.run(path).await?;
    let duration = timer.elapsed();

    info!("Aggregated {} unique transactions in: {duration:?}", report.transactions.len());

    write_report_to_stdout(&report, report_kind)?;

    Ok(())
}

fn parse_report_kind(kind: &str) -> ReportKind {
    match kind.to_lowercase().as_str() {
        "monthly" => ReportKind::Monthly,
        "categories" => ReportKind::Categories,
        "transactions" => ReportKind::Transactions,
        _ => {
            eprintln!("Invalid report '{}', defaulting to 'monthly'", kind);
            ReportKind::Monthly
        }
    }
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Because we are doing stdout redirection, we will need to utilize stderr to display logging
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_report_to_stdout(report: &Report, kind: ReportKind) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    match kind {
        ReportKind::Monthly => {
            writeln!(output, "month,count,total,average,largest")?;

            for statistics in &report.monthly {
                writeln!(
                    output,
                    "{},{},{},{},{}",
                    statistics.month,
                    statistics.transaction_count,
                    statistics.total_amount,
                    statistics.average_amount,
                    statistics.largest_transaction_amount
                )?;
            }
        }
        ReportKind::Categories => {
            writeln!(output, "category,total")?;

            //NOTE: HashMap iteration order is arbitrary; sort by name so redirected output diffs cleanly
            let mut totals: Vec<_> = report.category_totals.iter().collect();
            totals.sort_by(|left, right| left.0.cmp(right.0));

            for (category, total) in totals {
                writeln!(output, "{category},{total}")?;
            }
        }
        ReportKind::Transactions => {
            writeln!(output, "id,date,amount,merchant,category")?;

            for transaction in &report.transactions {
                writeln!(
                    output,
                    "{},{},{},{},{}",
                    transaction.id,
                    transaction.date,
                    transaction.amount,
                    transaction.merchant,
                    transaction.category
                )?;
            }
        }
    }

    output.flush()?;

    Ok(())
}
