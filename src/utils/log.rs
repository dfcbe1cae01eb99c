use colored::Colorize;

#[derive(PartialEq, PartialOrd, Debug)]
/// This enum is used to represent the different log levels
pub enum LogLevel {
    Debug,
    Info,
    Log,
    Warn,
    Error,
}

fn level_from_env() -> LogLevel {
    match std::env::var("QS_LOG_LEVEL") {
        Ok(val) => match val.as_str() {
            "Debug" => LogLevel::Debug,
            "Info" => LogLevel::Info,
            "Log" => LogLevel::Log,
            "Warn" => LogLevel::Warn,
            "Error" => LogLevel::Error,
            _ => LogLevel::Log,
        },
        Err(_) => LogLevel::Log,
    }
}

/// This function is used to log messages to the console
/// # Arguments
/// * `level` - The log level of the message
/// * `message` - The message to log
/// # Example
/// ```
/// use qs_cmake::utils::log::{log, LogLevel};
/// log(LogLevel::Info, "Hello World!");
/// log(LogLevel::Warn, "Something looks off");
/// ```
///
/// # Level setting
/// The log level can be set by setting the environment variable `QS_LOG_LEVEL`
/// to one of the following values:
/// * `Debug`
/// * `Info`
/// * `Log`
/// * `Warn`
/// * `Error`
/// If the environment variable is not set, the default log level is `Log`
pub fn log(level: LogLevel, message: &str) {
    let level_str = match level {
        LogLevel::Debug => "[DEBUG]".purple(),
        LogLevel::Info => "[INFO]".blue(),
        LogLevel::Log => "[LOG]".green(),
        LogLevel::Warn => "[WARN]".yellow(),
        LogLevel::Error => "[ERROR]".red(),
    };
    if level >= level_from_env() {
        println!("{} {}", level_str, message);
    }
}
