//! Helm host simulator
//!
//! Runs one autonomous period against simulated hardware on the embassy
//! std executor.
//!
//! Usage:
//!   cargo run -p helm-sim -- [SELECTOR] [--config PATH] [--end-after MS]
//!
//! SELECTOR defaults to 1 (Odom). `--end-after` ends the period early, as
//! the field controller would.

use std::convert::Infallible;
use std::path::PathBuf;

use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Timer};

use helm_core::routine::{RoutineId, RoutineOutcome};
use helm_core::tracking::{MultiTracker, PositionSource};
use helm_runtime::{PeriodEnd, RobotContext, Sequencer};

mod config;
mod sim;

use crate::config::load_config;
use crate::sim::{ConsoleAlert, SimDrive, SimEncoder, SimIntake};

/// Distance from the start to the object the capture routine picks up
const OBJECT_DISTANCE_IN: f64 = 12.0;

/// Command line options
#[derive(Debug, Default)]
struct Args {
    selector: u16,
    config: Option<PathBuf>,
    end_after_ms: Option<u64>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args {
        selector: RoutineId::Odom.id(),
        ..Default::default()
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--end-after" => {
                let ms = args.next().ok_or("--end-after needs milliseconds")?;
                parsed.end_after_ms = Some(ms.parse().map_err(|_| format!("bad duration: {ms}"))?);
            }
            selector => {
                parsed.selector = selector
                    .parse()
                    .map_err(|_| format!("bad selector: {selector}"))?;
            }
        }
    }

    Ok(parsed)
}

fn usage() {
    eprintln!("usage: helm-sim [SELECTOR] [--config PATH] [--end-after MS]");
    for routine in RoutineId::ALL {
        eprintln!(
            "  {}  {:<12} {}",
            routine.id(),
            routine.title(),
            routine.description()
        );
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    std::process::exit(run().await);
}

/// Run one period and return the process exit code
async fn run() -> i32 {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            usage();
            return 2;
        }
    };

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return 2;
        }
    };

    println!("=== Helm autonomous simulation ===");
    match RoutineId::try_from(args.selector) {
        Ok(routine) => println!("Selected auto: {}", routine.title()),
        Err(_) => println!("Selected auto: <unknown {}>", args.selector),
    }

    let encoder = SimEncoder::default();
    let intake = SimIntake::default();
    let drive = SimDrive::new(&encoder, &intake, OBJECT_DISTANCE_IN);
    let trackers = MultiTracker::new(PositionSource::rotation_sensor(&encoder));
    let mut ctx = RobotContext::new(drive, trackers, &intake, ConsoleAlert, config);
    let period = PeriodEnd::new();

    let mut sequencer = Sequencer::new(&mut ctx, &period);
    sequencer.prepare().await;

    let end_early = async {
        if let Some(ms) = args.end_after_ms {
            Timer::after(Duration::from_millis(ms)).await;
            println!("[SIM] field controller ended the period");
            period.end();
        }
        core::future::pending::<Infallible>().await
    };

    let report = match select(sequencer.run(args.selector), end_early).await {
        Either::First(report) => report,
        Either::Second(never) => match never {},
    };

    println!(
        "Routine {} finished: {:?}, {} primitives, {} ms",
        report.selector, report.outcome, report.primitives, report.elapsed_ms
    );

    match report.outcome {
        RoutineOutcome::UnknownRoutine => 1,
        _ => 0,
    }
}
