//! PRU firmware generator and remoteproc control

use bsp_core::Result;
use bsp_pru::{
    DEFAULT_REMOTEPROC_ROOT, PruBlinkTarget, PruFirmware, Remoteproc, hexdump, write_firmware,
};
use bsp_tools::{OrExit, logging};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

const DUMP_BYTES: usize = 128;

#[derive(Parser)]
#[command(name = "pru-fw")]
#[command(version, about = "Generate PRU firmware images and drive the PRU cores", long_about = None)]
#[command(after_help = "EXAMPLES:
    pru-fw generate --out-dir /lib/firmware
    pru-fw status
    pru-fw load 1 am335x-pru0-fw
    pru-fw start 1")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// remoteproc class directory
    #[arg(long, env = "BBB_REMOTEPROC_ROOT", default_value = DEFAULT_REMOTEPROC_ROOT, value_name = "PATH", global = true)]
    remoteproc_root: PathBuf,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Write am335x-pru0-fw and am335x-pru1-fw (default)
    Generate {
        /// Output directory (default: current directory)
        #[arg(short, long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
    /// Show every remoteproc core
    Status,
    /// Select the firmware file a core boots
    Load {
        /// remoteproc index
        index: u32,
        /// File name under /lib/firmware
        firmware: String,
    },
    /// Boot a core
    Start { index: u32 },
    /// Halt a core
    Stop { index: u32 },
    /// Show the GPIO registers the blink firmware drives
    Target,
}

fn generate(out_dir: &Path) -> Result<()> {
    println!("=== PRU ELF Firmware Generator ===");
    let firmware = PruFirmware::nop_halt();
    for pru in 0..=1 {
        let generated = write_firmware(out_dir, pru, &firmware)?;
        println!("{}", generated.summary());
        println!("\nFirst {} bytes of {}:", DUMP_BYTES, generated.path.display());
        println!("{}", hexdump(&generated.image, DUMP_BYTES));
        println!();
    }
    println!("\nELF firmware files generated successfully!");
    Ok(())
}

fn status(root: &Path) -> Result<()> {
    let cores = Remoteproc::list(root)?;
    if cores.is_empty() {
        println!("No remoteproc cores under {}", root.display());
    }
    for core in cores {
        println!("{}", core.status_line()?);
    }
    Ok(())
}

fn run(root: &Path, command: Command) -> Result<()> {
    match command {
        Command::Generate { out_dir } => generate(&out_dir.unwrap_or_default())?,
        Command::Status => status(root)?,
        Command::Load { index, firmware } => {
            let core = Remoteproc::new(root, index);
            core.set_firmware(&firmware)?;
            println!("{}", core.status_line()?);
        }
        Command::Start { index } => {
            let core = Remoteproc::new(root, index);
            core.start()?;
            println!("{}", core.status_line()?);
        }
        Command::Stop { index } => {
            let core = Remoteproc::new(root, index);
            core.stop()?;
            println!("{}", core.status_line()?);
        }
        Command::Target => println!("USR3: {}", PruBlinkTarget::USR3),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let command = cli
        .command
        .unwrap_or(Command::Generate { out_dir: None });
    run(&cli.remoteproc_root, command).or_exit();
}
