//! Shared plumbing for the board tool binaries

pub mod logging;

use console::style;
use std::fmt::Display;
use std::path::Path;

/// Print `error: <message>` on stderr and exit with status 1
pub fn fail(err: impl Display) -> ! {
    eprintln!("{} {}", style("error:").red().bold(), err);
    std::process::exit(1);
}

/// Unwrap a result or report the error and exit
pub trait OrExit<T> {
    fn or_exit(self) -> T;
}

impl<T, E: Display> OrExit<T> for Result<T, E> {
    fn or_exit(self) -> T {
        match self {
            Ok(value) => value,
            Err(e) => fail(e),
        }
    }
}

/// Name the program was invoked as, for usage texts
pub fn program_name(fallback: &str) -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| fallback.to_string())
}
