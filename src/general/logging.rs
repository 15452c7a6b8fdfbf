use std::fs::File;

use fern::colors::{Color, ColoredLevelConfig};

use crate::general::config::LoggingConfig;

const TIMESTAMP_FORMAT: &str = "[%Y-%m-%d][%H:%M:%S]";

/// Log to stdout with colored levels and to a log file truncated on start.
pub fn setup_logger(config: &LoggingConfig) -> Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    let console = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format(TIMESTAMP_FORMAT),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(std::io::stdout());

    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format(TIMESTAMP_FORMAT),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(File::create(&config.file)?);

    fern::Dispatch::new()
        .level(config.level_filter())
        .chain(console)
        .chain(file)
        .apply()?;
    Ok(())
}
