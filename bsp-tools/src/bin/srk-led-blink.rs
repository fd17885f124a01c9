//! Init-style LED flasher: mounts sysfs itself and busy-waits by default

use bsp_core::features::DEFAULT_LED_ROOT;
use bsp_core::sysfs::mount_sysfs;
use bsp_leds::{BlinkEvent, Delay, FlashPattern, LED_COUNT};
use bsp_tools::{OrExit, logging};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "srk-led-blink")]
#[command(version, about = "Flash all user LEDs; suitable as PID 1", long_about = None)]
struct Cli {
    /// LED class directory
    #[arg(long, env = "BBB_LED_ROOT", default_value = DEFAULT_LED_ROOT, value_name = "PATH")]
    led_root: PathBuf,

    /// Where to mount sysfs before starting
    #[arg(long, default_value = "/sys", value_name = "PATH")]
    sysfs: PathBuf,

    /// Do not try to mount sysfs
    #[arg(long)]
    no_mount: bool,

    /// Sleep in the kernel instead of busy-waiting
    #[arg(long)]
    sleep: bool,

    /// Stop after N cycles (default: run forever)
    #[arg(long, value_name = "N")]
    cycles: Option<u64>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    println!("LED Blink Init Starting...");

    if !cli.no_mount {
        let report = mount_sysfs(&cli.sysfs);
        let dir = cli.sysfs.display();
        if report.created {
            println!("Created {} directory", dir);
        } else {
            println!("mkdir {} failed or already exists", dir);
        }
        if report.mounted {
            println!("Sysfs mounted successfully");
        } else {
            println!("Sysfs mount failed");
        }
    }

    let delay = if cli.sleep {
        Delay::Sleep
    } else {
        Delay::busy_wait()
    };

    println!("Starting LED blink loop...");
    FlashPattern::default()
        .run(&cli.led_root, LED_COUNT, delay, cli.cycles, |event| match event {
            BlinkEvent::Phase(phase) => println!("{}", phase),
            BlinkEvent::Opened(id) => println!("LED {} opened", id),
            BlinkEvent::OpenFailed(id) => println!("Failed to open LED {}", id),
            _ => {}
        })
        .or_exit();
}
