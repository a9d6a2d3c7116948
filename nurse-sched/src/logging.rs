use anyhow::{Context, Result};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::config::Config;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l:<5} {t} - {m}{n}";

/// Sends all log records to the configured file. The console is kept for
/// replies to the user.
pub fn init(config: &Config) -> Result<()> {
    let level = config.level_filter()?;

    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;

    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .build(Root::builder().appender("logfile").build(level))
        .context("Failed to build logger configuration")?;

    log4rs::init_config(log_config).context("Logger already initialised")?;
    Ok(())
}
