use colored::Colorize;
use log::{Level, LevelFilter};

/// Environment variable holding the log verbosity (`off`, `error`, `warn`, `info`, `debug`, `trace`).
pub const LOG_ENV: &str = "LOX_LOG";

pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Reads the verbosity from [`LOG_ENV`]. Unset or unparsable values fall back to [`DEFAULT_LEVEL`].
pub fn level_from_env() -> LevelFilter {
    parse_level(std::env::var(LOG_ENV).ok().as_deref())
}

fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Routes `log` records to stderr so they never interleave with program output on stdout.
pub fn init(level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let level = match record.level() {
                Level::Error => "ERROR".red().bold(),
                Level::Warn => "WARN ".yellow().bold(),
                Level::Info => "INFO ".green().bold(),
                Level::Debug => "DEBUG".blue().bold(),
                Level::Trace => "TRACE".magenta().bold(),
            };
            out.finish(format_args!("{} [{}] {}", level, record.target(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
