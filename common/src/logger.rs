use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    /// Keeps log lines out of a console UI drawn on stdout.
    Stderr,
}

pub struct Logger {
    prefix: Option<String>,
    target: LogTarget,
}

impl Logger {
    fn new(prefix: Option<String>, target: LogTarget) -> Self {
        Self { prefix, target }
    }

    fn format_line(&self, file: &str, line: u32, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        if let Some(ref prefix) = self.prefix {
            format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message)
        } else {
            format!("[{}][{}:{}] {}", timestamp, file_name, line, message)
        }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let formatted = self.format_line(file, line, message);
        match self.target {
            LogTarget::Stdout => println!("{}", formatted),
            LogTarget::Stderr => eprintln!("{}", formatted),
        }
    }
}

pub fn init_logger(prefix: Option<String>, target: LogTarget) {
    LOGGER.get_or_init(|| Logger::new(prefix, target));
}

/// Messages logged before `init_logger` are dropped, so library code stays quiet under test.
pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}
