use console::style;
use env_logger::{Builder, Env};
use log::{Level, LevelFilter};
use std::io::Write;

/// Set up `env_logger` with coloured level tags.
///
/// `--verbose` lowers the default level from `warn` to `debug`; `RUST_LOG`
/// still wins when set. Calling this twice is harmless.
pub fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env = Env::default().filter_or("RUST_LOG", default);

    let _ = Builder::new()
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_env(env)
        .format(|buf, record| {
            writeln!(buf, "{} {}", level_tag(record.level()), record.args())
        })
        .try_init();
}

fn level_tag(level: Level) -> String {
    match level {
        Level::Error => style("ERROR").red().bold().to_string(),
        Level::Warn => style("WARN ").yellow().bold().to_string(),
        Level::Info => style("INFO ").green().to_string(),
        Level::Debug => style("DEBUG").cyan().to_string(),
        Level::Trace => style("TRACE").dim().to_string(),
    }
}
