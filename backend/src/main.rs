use std::path::PathBuf;
use std::process::exit;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use clap::Parser;
use log::{error, info};
use shared::GoalReport;

use goal_tracker::io::mappers::ReadoutMapper;
use goal_tracker::io::snapshot::{load_snapshot, save_snapshot};
use goal_tracker::{Backend, LedgerConfig};

/// Print goal progress and survival allowances from an exported ledger snapshot.
#[derive(Parser, Debug)]
#[command(name = "goal-report", version, about, long_about = None)]
struct Args {
    /// JSON file with the `goals` and `transactions` collections
    #[arg(long, short)]
    snapshot: PathBuf,

    /// Report as of this RFC 3339 timestamp (defaults to the local clock)
    #[arg(long)]
    now: Option<String>,

    /// Optional YAML config file
    #[arg(long, default_value = "goal_tracker.yaml")]
    config: PathBuf,

    /// Include hidden goals
    #[arg(long)]
    include_hidden: bool,

    /// Also print every transaction grouped by day
    #[arg(long)]
    history: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Write the checked ledger back out to this snapshot file
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let now: DateTime<FixedOffset> = match &args.now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("--now is not an RFC 3339 timestamp: {raw}"))?,
        None => Local::now().into(),
    };

    let config = LedgerConfig::load_or_default(&args.config)?;
    let snapshot = load_snapshot(&args.snapshot)?;
    let backend = Backend::from_snapshot(snapshot, config)?;

    if let Err(err) = backend.transaction_service.verify_all() {
        error!("Snapshot failed the ledger consistency check: {err}");
        eprintln!("Ledger check failed: {err}");
        exit(2);
    }

    if let Some(path) = &args.export {
        save_snapshot(path, &backend.connection.export_snapshot()?)?;
    }

    let reports = backend.report(&now, args.include_hidden)?;
    info!("Built {} goal reports as of {}", reports.len(), now);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!("Goal report as of {}", now.format("%Y-%m-%d %H:%M %:z"));
        for report in &reports {
            print_report(report);
        }
    }

    if args.history {
        let history: Vec<shared::TransactionDay> = backend
            .transaction_service
            .transaction_history(now.offset())?
            .into_iter()
            .map(ReadoutMapper::day_to_dto)
            .collect();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&history)?);
        } else {
            for day in &history {
                println!("\n{}", day.date.format("%d.%m.%Y"));
                for transaction in &day.transactions {
                    println!(
                        "  {:>12}  {}  [{}]",
                        transaction.amount, transaction.description, transaction.goal_id
                    );
                }
            }
        }
    }

    Ok(())
}

fn print_report(report: &GoalReport) {
    match report {
        GoalReport::Standard(progress) => {
            println!(
                "\n{} [{}]: {} / {} ({}%)",
                progress.title,
                progress.goal_id,
                progress.current_amount,
                progress.amount,
                progress.percent_complete
            );
            let status = if progress.is_past_due {
                "past due".to_string()
            } else if progress.is_due_today {
                "due today".to_string()
            } else {
                format!("{} days left", progress.days_until_deadline)
            };
            println!("  remaining {}, {}", progress.remaining, status);
        }
        GoalReport::Survival(readout) => {
            println!(
                "\n{} [{}]: {} .. {} (day {} of {}, {} remaining)",
                readout.title,
                readout.goal_id,
                readout.period_start,
                readout.period_end,
                readout.days_elapsed,
                readout.total_days,
                readout.days_remaining
            );
            println!(
                "  budget {}, spent {}, remaining {}",
                readout.ceiling, readout.spent, readout.remaining
            );
            println!(
                "  today {} of {} (spent {}), tomorrow {}",
                readout.today_allowance.round_dp(2),
                readout.daily_allowance.round_dp(2),
                readout.todays_expenses,
                readout.tomorrow_allowance.round_dp(2)
            );
            if readout.is_over_budget {
                println!("  OVER BUDGET");
            } else if readout.is_today_depleted {
                println!("  today's allowance is used up");
            }
        }
    }
}
