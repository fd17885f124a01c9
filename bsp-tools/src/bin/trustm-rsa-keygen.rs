use bsp_rsa::{DEFAULT_BITS, keygen};
use bsp_tools::{OrExit, logging, program_name};
use clap::Parser;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trustm-rsa-keygen")]
#[command(version, about = "Generate an RSA key pair as PKCS#1 PEM files", long_about = None)]
struct Cli {
    #[arg(value_name = "PRIVATE_KEY_FILE")]
    private_key: Option<PathBuf>,

    #[arg(value_name = "PUBLIC_KEY_FILE")]
    public_key: Option<PathBuf>,

    /// Modulus size
    #[arg(long, default_value_t = DEFAULT_BITS, value_name = "BITS")]
    bits: usize,

    /// Surplus positionals; any present means a usage error
    #[arg(hide = true)]
    extra: Vec<String>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let (Some(private_key), Some(public_key), true) =
        (cli.private_key, cli.public_key, cli.extra.is_empty())
    else {
        println!("{}", bsp_rsa::keygen::usage(&program_name("trustm-rsa-keygen")));
        std::process::exit(1);
    };

    keygen(&private_key, &public_key, cli.bits, &mut io::stdout().lock()).or_exit();
}
