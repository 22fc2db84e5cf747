use super::error::UtilError;
use crate::structs::toml::Output;
use log::{error, LevelFilter};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::{create_dir_all, File};

/// Determine the logging level based on TOML `Output` configuration
pub(crate) fn log_level(output: &Output) -> LevelFilter {
    if let Some(log_level) = &output.logging {
        match log_level.to_lowercase().as_str() {
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            _ => LevelFilter::Warn,
        }
    } else {
        LevelFilter::Warn
    }
}

/// Create log output file next to the collection output
pub(crate) fn create_log_file(directory: &str, output: &Output) -> Result<File, UtilError> {
    let result = create_dir_all(directory);
    match result {
        Ok(_) => {}
        Err(err) => {
            error!("[core] Failed to create logging output directory for {directory}. Error: {err:?}");
            return Err(UtilError::CreateDirectory);
        }
    }

    let path = format!("{directory}/{}.log", output.name);
    let output_result = File::create(&path);
    match output_result {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[core] Failed to create log file at {path}. Error: {err:?}");
            Err(UtilError::LogFile)
        }
    }
}

/**
 * Send log messages to stderr and, when an output directory is configured, to a log file
 * Decoded entries go to stdout or the output file, so diagnostics never mix with them
 */
pub(crate) fn setup_logging(output: &Output) -> Result<(), UtilError> {
    let level = log_level(output);
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(directory) = &output.directory {
        let log_file = create_log_file(directory, output)?;
        loggers.push(WriteLogger::new(level, Config::default(), log_file));
    }

    // A logger may already be registered (ex: multiple collections in one process)
    let _ = CombinedLogger::init(loggers);
    Ok(())
}
