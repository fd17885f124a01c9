//! Blink the user LEDs one after another

use bsp_core::features::DEFAULT_LED_ROOT;
use bsp_leds::{BlinkEvent, Delay, LED_COUNT, LedBank, SequencePattern};
use bsp_tools::{OrExit, logging};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "bbb-led-blink")]
#[command(version, about = "Blink the BeagleBone Black user LEDs in sequence", long_about = None)]
struct Cli {
    /// LED class directory
    #[arg(long, env = "BBB_LED_ROOT", default_value = DEFAULT_LED_ROOT, value_name = "PATH")]
    led_root: PathBuf,

    /// Stop after N passes (default: run forever)
    #[arg(long, value_name = "N")]
    cycles: Option<u64>,

    /// How long each LED stays on
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    on_ms: u64,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    println!("BBB LED Blink Program");
    println!("Checking available LEDs...");

    let bank = LedBank::probe(&cli.led_root, LED_COUNT).or_exit();
    for entry in bank.probe_results() {
        if entry.found {
            println!("Found LED {} at {}", entry.id, entry.path.display());
        } else {
            println!("LED {} not found at {}", entry.id, entry.path.display());
        }
    }
    println!(
        "Found {} out of {} LEDs",
        bank.available().len(),
        bank.probed_count()
    );
    println!("Blinking available LEDs in sequence...");
    println!("Press Ctrl+C to stop\n");

    bank.take_manual_control().or_exit();

    let pattern = SequencePattern {
        on_time: Duration::from_millis(cli.on_ms),
        ..SequencePattern::default()
    };
    pattern
        .run(&bank, Delay::Sleep, cli.cycles, |event| match event {
            BlinkEvent::LedOn(id) => println!("Turning on LED {}", id),
            BlinkEvent::CycleComplete(_) => println!("Completed one cycle, starting again..."),
            _ => {}
        })
        .or_exit();
}
