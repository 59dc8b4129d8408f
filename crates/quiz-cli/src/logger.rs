use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Metadata, Record};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub message: String,
}

/// Logger that writes to stderr and remembers recent records
#[derive(Clone)]
pub struct CliLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    warnings: Arc<AtomicUsize>,
    max_entries: usize,
    level: LevelFilter,
}

impl CliLogger {
    pub fn new(max_entries: usize, level: LevelFilter) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            warnings: Arc::new(AtomicUsize::new(0)),
            max_entries,
            level,
        }
    }

    /// Install a handle to this logger as the global logger
    pub fn init(&self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self.clone()))?;
        log::set_max_level(self.level);
        Ok(())
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Warnings and errors seen so far
    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    pub fn latest_warning(&self) -> Option<String> {
        self.entries().into_iter().rev().find_map(|entry| {
            (entry.level <= Level::Warn).then_some(entry.message)
        })
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogEntry {
            timestamp: Local::now(),
            level: record.level(),
            message: format!("{}", record.args()),
        };

        eprintln!(
            "{} {:<5} {}",
            entry.timestamp.format("%H:%M:%S%.3f"),
            entry.level,
            entry.message
        );

        if entry.level <= Level::Warn {
            self.warnings.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);

            // Keep only the most recent entries
            if entries.len() > self.max_entries {
                let excess = entries.len() - self.max_entries;
                entries.drain(0..excess);
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    fn emit(logger: &CliLogger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn test_keeps_only_recent_entries() {
        let logger = CliLogger::new(2, LevelFilter::Info);
        emit(&logger, Level::Info, "one");
        emit(&logger, Level::Info, "two");
        emit(&logger, Level::Info, "three");

        let messages: Vec<String> = logger.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_counts_warnings_and_filters_level() {
        let logger = CliLogger::new(10, LevelFilter::Info);
        emit(&logger, Level::Debug, "hidden");
        emit(&logger, Level::Warn, "fallback used");
        emit(&logger, Level::Error, "all images failed");
        emit(&logger, Level::Info, "done");

        assert_eq!(logger.entries().len(), 3);
        assert_eq!(logger.warning_count(), 2);
        assert_eq!(logger.latest_warning().as_deref(), Some("all images failed"));
    }
}
