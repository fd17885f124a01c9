//! Summarise which board facilities this host offers

use bsp_caps::ProcessInfo;
use bsp_core::HostFeatures;
use bsp_tools::logging;
use clap::Parser;
use log::info;

#[derive(Parser)]
#[command(name = "bsp-check")]
#[command(version, about = "Check which board facilities the demo programs can use", long_about = None)]
struct Cli {
    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    info!("Detecting host facilities");
    println!("Checking board facilities...\n");
    println!("{}", HostFeatures::detect().summary());
    println!("\n{}", ProcessInfo::current().report());
}
