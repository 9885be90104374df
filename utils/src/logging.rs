use std::env;

use chrono::Local;
use log::LevelFilter;

/// Level used when `LOG_LEVEL` is unset or unrecognized.
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

pub fn parse_log_level(value: Option<&str>) -> LevelFilter {
    match value {
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("warn") => LevelFilter::Warn,
        Some("error") => LevelFilter::Error,
        _ => DEFAULT_LOG_LEVEL,
    }
}

pub fn setup_logging() -> Result<(), fern::InitError> {
    let level = parse_log_level(env::var("LOG_LEVEL").ok().as_deref());
    setup_logging_with_level(level)
}

pub fn setup_logging_with_level(level: LevelFilter) -> Result<(), fern::InitError> {
    // Plans and endpoints go to stdout, so logs stay on stderr.
    let stderr_config = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}] {}: {}",
                Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    fern::Dispatch::new().chain(stderr_config).apply()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(parse_log_level(Some("error")), LevelFilter::Error);
        assert_eq!(parse_log_level(Some("verbose")), LevelFilter::Warn);
        assert_eq!(parse_log_level(None), LevelFilter::Warn);
    }
}
