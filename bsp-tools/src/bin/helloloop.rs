use bsp_init::{HELLO_INTERVAL, HelloLoop};
use bsp_tools::{OrExit, logging};
use clap::Parser;
use std::io;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "helloloop")]
#[command(version, about = "Print the local time once a second", long_about = None)]
struct Cli {
    /// Stop after N lines (default: run forever)
    #[arg(long, value_name = "N")]
    cycles: Option<u64>,

    /// Pause between lines
    #[arg(long, value_name = "MS", default_value_t = HELLO_INTERVAL.as_millis() as u64)]
    interval_ms: u64,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let hello = HelloLoop {
        interval: Duration::from_millis(cli.interval_ms),
        cycles: cli.cycles,
    };
    hello.run(&mut io::stdout().lock()).or_exit();
}
