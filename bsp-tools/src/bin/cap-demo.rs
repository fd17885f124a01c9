//! Report the capability sets of this process

use bsp_caps::{CLASSIC, NET_PROBES, Probe, ProcessCaps, ProcessInfo, TIME_PROBES, usage};
use bsp_core::{BspError, Result};
use bsp_tools::{fail, logging, program_name};
use clap::Parser;

const RULE: &str = "===========================================";

#[derive(Parser)]
#[command(name = "cap-demo", version, disable_help_flag = true)]
#[command(about = "Linux Capabilities Demo", long_about = None)]
struct Cli {
    /// show, list, test-net, test-time, info or help
    #[arg(value_name = "COMMAND", allow_hyphen_values = true)]
    command: Option<String>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn print_probes(probes: &[Probe]) -> Result<()> {
    let caps = ProcessCaps::current()?;
    for probe in probes {
        println!("\n{}", probe.heading());
        println!("{}", probe.report(&caps));
    }
    Ok(())
}

fn run(command: &str) -> Result<()> {
    match command {
        "show" => {
            let caps = ProcessCaps::current()?;
            println!("\n=== Capabilities at startup ===");
            println!("{}", caps.to_text());
        }
        "list" => {
            let caps = ProcessCaps::current()?;
            println!("\n=== Effective Capabilities Status ===");
            for cap in caps.effective_list(CLASSIC) {
                println!("\u{2713} {}", cap);
            }
        }
        "test-net" => print_probes(&NET_PROBES)?,
        "test-time" => print_probes(&TIME_PROBES)?,
        "info" => println!("\n{}", ProcessInfo::current().report()),
        other => {
            return Err(BspError::InvalidArgument(format!(
                "Unknown command: {}",
                other
            )));
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let prog = program_name("cap-demo");
    let command = cli.command.as_deref().unwrap_or("show");
    if matches!(command, "help" | "-h" | "--help") {
        println!("{}", usage(&prog));
        return;
    }

    println!("{}", RULE);
    println!("  Linux Capabilities Demo - BeagleBone Black");
    println!("{}", RULE);
    println!("\n{}", ProcessInfo::current().report());

    match run(command) {
        Ok(()) => println!("\n{}", RULE),
        Err(BspError::InvalidArgument(msg)) => {
            println!("\n{}", msg);
            println!("{}", usage(&prog));
            std::process::exit(1);
        }
        Err(e) => fail(e),
    }
}
