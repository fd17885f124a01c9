use bsp_eeprom::{BoardEeprom, DEFAULT_EEPROM_PATH};
use bsp_tools::{OrExit, logging};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bbb-eeprom")]
#[command(version, about = "Read the BeagleBone Black board ID EEPROM", long_about = None)]
struct Cli {
    /// EEPROM sysfs file exposed by the at24 driver
    #[arg(long, env = "BBB_EEPROM_PATH", default_value = DEFAULT_EEPROM_PATH, value_name = "PATH")]
    eeprom: PathBuf,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    println!("BBB EEPROM Reader");
    println!("=================\n");

    let eeprom = BoardEeprom::read_from(&cli.eeprom).or_exit();
    println!("{}", eeprom.report());
}
