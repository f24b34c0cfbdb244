//! Process-wide file logging.
//!
//! # Responsibility
//! - Start one rotating `flexi_logger` file backend per process.
//! - Route panics into the log before the default hook runs.
//!
//! # Invariants
//! - Core events are `key=value` metadata lines. Names, emails, passwords and
//!   birthdates never reach the log.
//! - A second `init_logging` call with the same target is a no-op; a call with
//!   a different target is an error.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "birthdaybook";
const ROTATE_AT_BYTES: u64 = 5 * 1024 * 1024;
const KEEP_FILES: usize = 3;
const PANIC_SUMMARY_CHARS: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Where and how verbosely the process logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    pub level: LevelFilter,
    pub dir: PathBuf,
}

impl LogTarget {
    /// Parses `level` and checks that `dir` is an absolute path.
    pub fn parse(level: &str, dir: impl AsRef<Path>) -> Result<Self, LogInitError> {
        let level = parse_level(level)?;
        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() || !dir.is_absolute() {
            return Err(LogInitError::RelativeDir(dir.to_path_buf()));
        }
        Ok(Self {
            level,
            dir: dir.to_path_buf(),
        })
    }
}

struct ActiveLogger {
    target: LogTarget,
    _handle: LoggerHandle,
}

#[derive(Debug)]
pub enum LogInitError {
    UnknownLevel(String),
    RelativeDir(PathBuf),
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    Backend(flexi_logger::FlexiLoggerError),
    /// Logging already runs with another target.
    Conflict {
        active: LogTarget,
        requested: LogTarget,
    },
}

impl Display for LogInitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(level) => write!(
                f,
                "unknown log level `{level}`; expected off|error|warn|info|debug|trace"
            ),
            Self::RelativeDir(dir) => {
                write!(f, "log directory must be absolute, got `{}`", dir.display())
            }
            Self::CreateDir { dir, source } => {
                write!(f, "cannot create log directory `{}`: {source}", dir.display())
            }
            Self::Backend(err) => write!(f, "logger backend failed to start: {err}"),
            Self::Conflict { active, requested } => write!(
                f,
                "logging already active ({} at `{}`); refusing {} at `{}`",
                active.level,
                active.dir.display(),
                requested.level,
                requested.dir.display()
            ),
        }
    }
}

impl Error for LogInitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

/// Starts rotating file logs under `log_dir`.
///
/// # Errors
/// See [`LogInitError`]; initialization never panics.
pub fn init_logging(level: &str, log_dir: impl AsRef<Path>) -> Result<(), LogInitError> {
    let requested = LogTarget::parse(level, log_dir)?;
    let active = ACTIVE.get_or_try_init(|| start(requested.clone()))?;
    if active.target != requested {
        return Err(LogInitError::Conflict {
            active: active.target.clone(),
            requested,
        });
    }
    Ok(())
}

/// Target of the running logger, if any.
pub fn logging_status() -> Option<LogTarget> {
    ACTIVE.get().map(|active| active.target.clone())
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(target: LogTarget) -> Result<ActiveLogger, LogInitError> {
    std::fs::create_dir_all(&target.dir).map_err(|source| LogInitError::CreateDir {
        dir: target.dir.clone(),
        source,
    })?;

    let handle = Logger::try_with_str(target.level.to_string().to_ascii_lowercase())
        .map_err(LogInitError::Backend)?
        .log_to_file(
            FileSpec::default()
                .directory(target.dir.clone())
                .basename(LOG_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(LogInitError::Backend)?;

    if PANIC_HOOK.set(()).is_ok() {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let location = info.location().map_or_else(
                || "unknown".to_string(),
                |loc| format!("{}:{}", loc.file(), loc.line()),
            );
            error!(
                "event=panic module=core status=error location={} payload={}",
                location,
                panic_summary(info.payload())
            );
            previous(info);
        }));
    }

    info!(
        "event=app_start module=core status=ok os={} version={} level={} log_dir={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        target.level,
        target.dir.display()
    );

    Ok(ActiveLogger {
        target,
        _handle: handle,
    })
}

fn parse_level(level: &str) -> Result<LevelFilter, LogInitError> {
    let trimmed = level.trim();
    let normalized = if trimmed.eq_ignore_ascii_case("warning") {
        "warn"
    } else {
        trimmed
    };
    normalized
        .parse::<LevelFilter>()
        .map_err(|_| LogInitError::UnknownLevel(trimmed.to_string()))
}

/// One-line, length-capped panic payload; payloads may echo user input.
fn panic_summary(payload: &(dyn std::any::Any + Send)) -> String {
    let text = payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "<non-string payload>".to_string());
    flatten_and_cap(&text, PANIC_SUMMARY_CHARS)
}

fn flatten_and_cap(text: &str, max_chars: usize) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut capped = flat.chars().take(max_chars).collect::<String>();
    capped.push_str("...");
    capped
}

#[cfg(test)]
mod tests {
    use super::{
        default_log_level, flatten_and_cap, init_logging, logging_status, parse_level,
        LogInitError, LogTarget,
    };
    use log::LevelFilter;

    #[test]
    fn level_parsing_is_case_insensitive_and_accepts_warning() {
        assert_eq!(parse_level(" WARNING ").expect("warning"), LevelFilter::Warn);
        assert_eq!(parse_level("Error").expect("error"), LevelFilter::Error);
        assert!(matches!(
            parse_level("verbose"),
            Err(LogInitError::UnknownLevel(level)) if level == "verbose"
        ));
        assert!(parse_level(default_log_level()).is_ok());
    }

    #[test]
    fn target_requires_absolute_dir() {
        assert!(matches!(
            LogTarget::parse("info", ""),
            Err(LogInitError::RelativeDir(_))
        ));
        assert!(matches!(
            LogTarget::parse("info", "logs/dev"),
            Err(LogInitError::RelativeDir(_))
        ));
    }

    #[test]
    fn panic_text_is_flattened_and_capped() {
        assert_eq!(flatten_and_cap("a\nb\rc-long-tail", 5), "a b c...");
        assert_eq!(flatten_and_cap("short", 5), "short");
    }

    #[test]
    fn second_init_must_match_first() {
        let dir = tempfile::tempdir().expect("temp dir");
        let other = tempfile::tempdir().expect("temp dir");

        init_logging("info", dir.path()).expect("first init");
        init_logging("INFO", dir.path()).expect("same target");

        let err = init_logging("debug", dir.path()).expect_err("level conflict");
        assert!(matches!(err, LogInitError::Conflict { .. }));
        let err = init_logging("info", other.path()).expect_err("dir conflict");
        assert!(err.to_string().contains("refusing"));

        let active = logging_status().expect("logging active");
        assert_eq!(active.level, LevelFilter::Info);
        assert_eq!(active.dir, dir.path());
    }
}
