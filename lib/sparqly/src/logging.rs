use chrono::Local;
use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Error opening log file `{path}`: {source}")]
    OpenLogFile { path: PathBuf, source: io::Error },
    #[error("Logger already initialized")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Appended to when set.
    pub log_file: Option<PathBuf>,
    pub log_level: String,
    /// Keeps log lines off stderr. A log file still receives them.
    pub quiet: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            log_file: None,
            log_level: "info".to_string(),
            quiet: false,
        }
    }
}

/// Maps a level name to a filter, falling back to `info` for unknown names.
pub fn level_filter(name: &str) -> LevelFilter {
    match name.trim().to_ascii_lowercase().as_str() {
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" | "warning" => LevelFilter::Warn,
        "error" | "critical" | "fatal" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

struct LogSink {
    file: Option<File>,
    stderr: bool,
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        if self.stderr {
            io::stderr().write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        if self.stderr {
            io::stderr().flush()?;
        }
        Ok(())
    }
}

pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let file = match &config.log_file {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::OpenLogFile {
                    path: path.clone(),
                    source,
                })?,
        ),
        None => None,
    };
    let level = if file.is_none() && config.quiet {
        LevelFilter::Off
    } else {
        level_filter(&config.log_level)
    };
    let sink = LogSink {
        file,
        stderr: !config.quiet,
    };

    Builder::new()
        .filter_level(level)
        .write_style(WriteStyle::Never)
        .format(|buf, record| {
            let now = Local::now();
            writeln!(
                buf,
                "{},{:03} {} {} {}",
                now.format("%Y-%m-%d %H:%M:%S"),
                now.timestamp_subsec_millis(),
                record.target(),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(sink)))
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(level_filter("debug"), LevelFilter::Debug);
        assert_eq!(level_filter("WARNING"), LevelFilter::Warn);
        assert_eq!(level_filter("warn"), LevelFilter::Warn);
        assert_eq!(level_filter("critical"), LevelFilter::Error);
        assert_eq!(level_filter("verbose"), LevelFilter::Info);
        assert_eq!(level_filter(""), LevelFilter::Info);
    }
}
