use chrono::{DateTime, Local};
use colored::*;
use std::fmt::Display;

pub use crate::{emergency_entry, logging_console};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Information,
    Warning,
    Error,
    Critical,
    Emergency,
}

impl LogLevel {
    pub fn to_plain_string(&self) -> String {
        match self {
            LogLevel::Debug => "Debug      ".to_string(),
            LogLevel::Information => "Information".to_string(),
            LogLevel::Warning => "Warning    ".to_string(),
            LogLevel::Error => "Error      ".to_string(),
            LogLevel::Critical => "Critical   ".to_string(),
            LogLevel::Emergency => "Emergency  ".to_string(),
        }
    }

    pub fn to_colored_string(&self) -> ColoredString {
        let plain = self.to_plain_string();
        match self {
            LogLevel::Debug => plain.bright_black(),
            LogLevel::Information => plain.bright_blue(),
            LogLevel::Warning => plain.yellow(),
            LogLevel::Error => plain.bright_red(),
            LogLevel::Critical => plain.bright_yellow(),
            LogLevel::Emergency => plain.magenta(),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<Local>,
    pub position: String,
    pub message: String,
    pub debug_info: String,
}

impl LogEntry {
    pub fn new<T: Into<String>, U: Into<String>, V: Into<String>>(level: LogLevel, position: T, message: U, debug_info: V) -> Self {
        Self {
            level,
            timestamp: Local::now(),
            position: position.into(),
            message: message.into(),
            debug_info: debug_info.into(),
        }
    }

    pub fn to_plain_string(&self) -> String {
        let timestamp = self.timestamp.format("%Y/%m/%d %H:%M:%S");
        if self.debug_info.is_empty() {
            format!("[{}] {} {}: {}", self.level, timestamp, self.position, self.message)
        } else {
            format!("[{}] {} {}: {}\n{}", self.level, timestamp, self.position, self.message, self.debug_info)
        }
    }

    pub fn to_colored_string(&self) -> String {
        let level = self.level.to_colored_string();
        let timestamp = self.timestamp.format("%Y/%m/%d %H:%M:%S");
        let position = self.position.cyan();
        let message = self.message.white();
        if self.debug_info.is_empty() {
            format!("[{}] {} {}: {}", level, timestamp, position, message)
        } else {
            format!("[{}] {} {}: {}\n{}", level, timestamp, position, message, self.debug_info.bright_black())
        }
    }
}

impl Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}

pub fn logging_console(log_entry: LogEntry) {
    println!("{}", log_entry.to_colored_string());
}

// Only used before the runtime exists, everything else goes through the logger.
#[macro_export]
macro_rules! emergency_entry {
    ($message:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Emergency, format!("{}:{}", file!(), line!()), $message, "")
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Emergency, format!("{}:{}", file!(), line!()), $message, $debug_info)
    };
}

#[macro_export]
macro_rules! logging_console {
    ($log_entry:expr) => {
        $crate::utils::logging::logging_console($log_entry)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_string_omits_empty_debug_info() {
        let entry = LogEntry::new(LogLevel::Information, "worker.rs:10", "Online now", "");
        let text = entry.to_plain_string();
        assert!(text.starts_with("[Information] "));
        assert!(text.ends_with("worker.rs:10: Online now"));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn plain_string_appends_debug_info_on_new_line() {
        let entry = LogEntry::new(LogLevel::Error, "worker.rs:10", "Failed", "Err: boom");
        let text = entry.to_string();
        assert!(text.ends_with("Failed\nErr: boom"));
    }

    #[test]
    fn emergency_entry_records_call_site() {
        let entry = emergency_entry!("Configuration file not found");
        assert_eq!(entry.level, LogLevel::Emergency);
        assert!(entry.position.starts_with(file!()));
    }
}
