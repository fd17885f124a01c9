//! Seccomp demo: greet, lock down to a handful of syscalls, then get
//! killed trying to fork

use bsp_seccomp::{DemoConfig, SeccompFilter, SeccompProfile, run_demo, supervise};
use bsp_tools::{OrExit, fail, logging};
use clap::{Parser, ValueEnum};
use log::info;
use std::time::Duration;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ProfileArg {
    /// write and the exit path only
    WriteOnly,
    /// write-only plus the nanosleep family
    WriteSleep,
}

impl From<ProfileArg> for SeccompProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::WriteOnly => SeccompProfile::WriteOnly,
            ProfileArg::WriteSleep => SeccompProfile::WriteSleep,
        }
    }
}

#[derive(Parser)]
#[command(name = "srk-seccomp")]
#[command(version, about = "Seccomp filter demo", long_about = None)]
#[command(after_help = "EXAMPLES:
    srk-seccomp
    srk-seccomp --profile write-only
    srk-seccomp --greetings 2 --interval-ms 100
    srk-seccomp --list")]
struct Cli {
    /// Syscall allow-list to install
    #[arg(short = 'P', long, value_enum, default_value_t = ProfileArg::WriteSleep)]
    profile: ProfileArg,

    /// Number of greetings printed under the filter
    #[arg(long, value_name = "N")]
    greetings: Option<u32>,

    /// Pause between greetings
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Run the demo in this process instead of a supervised child
    #[arg(long)]
    in_process: bool,

    /// List the available profiles and their syscalls
    #[arg(long)]
    list: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn list_profiles() {
    println!("Available seccomp profiles:\n");
    for arg in ProfileArg::value_variants() {
        let profile = SeccompProfile::from(*arg);
        let name = arg
            .to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default();
        let filter = SeccompFilter::from_profile(profile);
        println!("  {:12} - {}", name, profile.description());
        println!("               {}", filter.effective_syscalls().join(", "));
        println!();
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    if cli.list {
        list_profiles();
        return;
    }

    let mut config = DemoConfig::for_profile(cli.profile.into());
    if let Some(n) = cli.greetings {
        config.greetings = n;
    }
    if let Some(ms) = cli.interval_ms {
        config.interval = Duration::from_millis(ms);
    }

    if cli.in_process {
        // Only returns when the filter failed to stop fork()
        run_demo(&config).or_exit();
        return;
    }

    let outcome = supervise(&config).or_exit();
    info!("demo finished: {:?}", outcome);
    if outcome.is_expected() {
        println!("{}", outcome);
    } else {
        fail(outcome);
    }
}
