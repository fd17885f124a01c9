use bsp_core::{BspError, Result};
use bsp_rtc::{DEFAULT_RTC_DEVICE, RtcDevice, parse_time, usage};
use bsp_tools::{OrExit, logging, program_name};
use clap::error::{ContextKind, ErrorKind};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bbb-rtc")]
#[command(version, about = "BBB RTC Read/Write Utility", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// RTC character device
    #[arg(long, env = "BBB_RTC_DEVICE", default_value = DEFAULT_RTC_DEVICE, value_name = "PATH", global = true)]
    device: PathBuf,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Read current RTC time
    Read,
    /// Write time to RTC (format: YYYY-MM-DD HH:MM:SS)
    Write {
        /// Date and time; may be quoted or given as two words
        #[arg(value_name = "TIME")]
        time: Vec<String>,
    },
    /// Set system time from RTC
    SetSystem,
    /// Set RTC time from system time
    SetRtc,
    /// Show RTC device information
    Info,
}

fn run(device: &Path, command: Command) -> Result<()> {
    if matches!(&command, Command::Write { time } if time.is_empty()) {
        return Err(BspError::InvalidArgument(format!(
            "write command requires time argument\n{}",
            usage(&program_name("bbb-rtc"))
        )));
    }

    let rtc = RtcDevice::open(device)?;
    match command {
        Command::Read => println!("RTC Time: {}", rtc.read_time()?),
        Command::Write { time } => {
            let time = parse_time(&time.join(" "))?;
            rtc.set_time(&time)?;
            println!("RTC time set to: {}", time);
        }
        Command::SetSystem => {
            let time = rtc.set_system_from_rtc()?;
            println!("System time set from RTC: {}", time);
        }
        Command::SetRtc => {
            let time = rtc.set_rtc_from_system()?;
            println!("RTC time set from system: {}", time);
        }
        Command::Info => println!("{}", rtc.info()),
    }
    Ok(())
}

/// Print usage and exit 1 for any command line error; help and version
/// keep clap's handling
fn parse_or_usage() -> Cli {
    let err = match Cli::try_parse() {
        Ok(cli) => return cli,
        Err(err) => err,
    };
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        ErrorKind::InvalidSubcommand => {
            if let Some(name) = err.get(ContextKind::InvalidSubcommand) {
                eprintln!("Unknown command: {}", name);
            }
        }
        _ => {
            let _ = err.print();
        }
    }
    println!("{}", usage(&program_name("bbb-rtc")));
    std::process::exit(1);
}

fn main() {
    let cli = parse_or_usage();
    logging::init_logger(cli.verbose);

    let Some(command) = cli.command else {
        println!("{}", usage(&program_name("bbb-rtc")));
        std::process::exit(1);
    };

    run(&cli.device, command).or_exit();
}
