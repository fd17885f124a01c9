use bsp_init::{IDLE_INTERVAL, SilentLoop};
use bsp_tools::logging;
use clap::Parser;
use log::debug;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "silentloop")]
#[command(version, about = "Idle init: sleep and reap orphaned children", long_about = None)]
struct Cli {
    /// Stop after N sleep/reap passes (default: run forever)
    #[arg(long, value_name = "N")]
    cycles: Option<u64>,

    /// Sleep between reaping passes
    #[arg(long, value_name = "SECS", default_value_t = IDLE_INTERVAL.as_secs())]
    interval_secs: u64,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let silent = SilentLoop {
        interval: Duration::from_secs(cli.interval_secs),
        cycles: cli.cycles,
    };
    let reaped = silent.run();
    debug!("reaped {} children", reaped);
}
