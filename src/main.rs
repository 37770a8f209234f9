use std::time::Duration;

use agecalc::cli::CliArgs;
use agecalc::{AgeReport, AppConfig, local_midnight, logger, parse_birth_date, svg};
use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use clap::Parser;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    logger::init_cli_logger(args.verbose);
    debug!("CLI args: {:?}", args);

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    let birth_date = parse_birth_date(&args.birth_date).context("invalid birth date")?;

    match args.now {
        Some(fixed) => {
            let tz = fixed.timezone();
            let birth = local_midnight(birth_date, &tz);
            run(&args, &config, birth, move |tick| {
                fixed + chrono::Duration::seconds(tick as i64)
            })
            .await
        }
        None => {
            let birth = local_midnight(birth_date, &Local);
            run(&args, &config, birth, |_| Local::now()).await
        }
    }
}

/// Computes and prints the report, then keeps refreshing it in watch mode.
async fn run<Tz, F>(args: &CliArgs, config: &AppConfig, birth: DateTime<Tz>, clock: F) -> Result<()>
where
    Tz: TimeZone,
    F: Fn(u64) -> DateTime<Tz>,
{
    let report = AgeReport::compute(&birth, &clock(0), &config.assumptions)?;

    if let Some(dir) = &args.svg_dir {
        let written = svg::export_cards(&report, dir, &config.export)
            .with_context(|| format!("failed to export SVG cards to {}", dir.display()))?;
        info!("exported {} SVG cards", written.len());
    }

    emit(&report, args)?;
    if !args.watch {
        return Ok(());
    }

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.tick().await;

    let mut tick = 1u64;
    loop {
        if args.ticks.is_some_and(|limit| tick >= limit) {
            break;
        }

        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, stopping watch");
                break;
            }
        }

        let report = AgeReport::compute(&birth, &clock(tick), &config.assumptions)?;
        emit(&report, args)?;
        tick += 1;
    }

    Ok(())
}

fn emit(report: &AgeReport, args: &CliArgs) -> Result<()> {
    if args.watch && !args.json {
        // Clear the terminal so each refresh replaces the previous one.
        print!("\x1B[2J\x1B[1;1H");
    }

    if args.json {
        let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
        println!("{json}");
    } else {
        print!("{}", report.share_text());
    }

    Ok(())
}
