use bsp_rsa::sign_file;
use bsp_tools::{OrExit, logging, program_name};
use clap::Parser;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trustm-rsa-sign")]
#[command(version, about = "Sign a file with RSA PKCS#1 v1.5 over SHA-256", long_about = None)]
struct Cli {
    #[arg(value_name = "PRIVATE_KEY_FILE")]
    private_key: Option<PathBuf>,

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

    let (Some(private_key), Some(data), Some(signature), true) =
        (cli.private_key, cli.data, cli.signature, cli.extra.is_empty())
    else {
        println!("{}", bsp_rsa::sign::usage(&program_name("trustm-rsa-sign")));
        std::process::exit(1);
    };

    sign_file(&private_key, &data, &signature, &mut io::stdout().lock()).or_exit();
}
