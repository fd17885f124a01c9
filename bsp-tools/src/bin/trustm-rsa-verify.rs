use bsp_rsa::verify_file;
use bsp_tools::{OrExit, logging, program_name};
use clap::Parser;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trustm-rsa-verify")]
#[command(version, about = "Verify an RSA PKCS#1 v1.5 SHA-256 signature", long_about = None)]
struct Cli {
    #[arg(value_name = "PUBLIC_KEY_FILE")]
    public_key: Option<PathBuf>,

    #[arg(value_name = "DATA_FILE")]
    data: Option<PathBuf>,

    #[arg(value_name = "SIGNATURE_FILE")]
    signature: Option<PathBuf>,

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

    let (Some(public_key), Some(data), Some(signature), true) =
        (cli.public_key, cli.data, cli.signature, cli.extra.is_empty())
    else {
        println!("{}", bsp_rsa::verify::usage(&program_name("trustm-rsa-verify")));
        std::process::exit(1);
    };

    let verdict = verify_file(&public_key, &data, &signature, &mut io::stdout().lock()).or_exit();
    std::process::exit(verdict.exit_code());
}
