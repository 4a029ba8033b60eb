use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::threshold::ThresholdFilter;
use serde::{Deserialize, Serialize};

use crate::error::OutputError;

const FILE_PATTERN: &str = "{d(%Y.%m.%d %H:%M:%S)} | {({l}):5.5} | {({f}:{L}):>40.40} | {m}{n}";
const CONSOLE_PATTERN: &str = "{d(%H:%M:%S)} {h({l}):5.5} {m}{n}";

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogSettings {
    pub log_path: String,
    pub log_level: String,
    pub log_file_name: String,
    pub log_overwrite: bool,
}

/// File appender at the configured level and a console appender for warnings and errors.
pub fn setup_logging(log_level: &str, log_file_path: PathBuf) -> Result<Config, OutputError> {
    let log_level = get_logging_level(log_level);
    let log_file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .build(&log_file_path)
        .map_err(|e| OutputError::io(&log_file_path, e))?;
    let console = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();

    Config::builder()
        .appender(Appender::builder().build("file", Box::new(log_file)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Warn)))
                .build("console", Box::new(console)),
        )
        .build(
            Root::builder()
                .appender("file")
                .appender("console")
                .build(log_level),
        )
        .map_err(|e| OutputError::Logger(e.to_string()))
}

pub fn get_logging_level(log_level: &str) -> LevelFilter {
    match log_level {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// Resolves the log file inside `<config_path>/<log_path>/logs`. An existing file is either
/// removed or, if it must be kept, the new file gets a timestamp suffix.
pub fn log_file_path(config_path: &Path, log_settings: &LogSettings) -> Result<PathBuf, OutputError> {
    let log_path = config_path.join(&log_settings.log_path).join("logs");
    if !log_path.exists() {
        fs::create_dir_all(&log_path).map_err(|e| OutputError::io(&log_path, e))?;
    }

    let log_file_path = log_path.join(&log_settings.log_file_name);
    if !log_file_path.exists() {
        return Ok(log_file_path);
    }
    if log_settings.log_overwrite {
        fs::remove_file(&log_file_path).map_err(|e| OutputError::io(&log_file_path, e))?;
        return Ok(log_file_path);
    }

    let stamp = Utc::now().format("_%d%m%Y_%H%M%S").to_string();
    let stem = log_settings
        .log_file_name
        .split('.')
        .next()
        .unwrap_or("fogtwin");
    Ok(log_path.join(format!("{}{}.log", stem, stamp)))
}

pub fn initiate_logger(config_path: &Path, log_settings: &LogSettings) -> Result<PathBuf, OutputError> {
    let log_file_path = log_file_path(config_path, log_settings)?;
    let logger_config = setup_logging(&log_settings.log_level, log_file_path.clone())?;
    log4rs::init_config(logger_config).map_err(|e| OutputError::Logger(e.to_string()))?;
    Ok(log_file_path)
}
