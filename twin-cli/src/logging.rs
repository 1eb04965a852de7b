//! Tracing setup for the `twin` binary.
//!
//! Two sinks hang off one filtered registry: stderr, so stdout carries only
//! the report, and an optional log file named in the configuration. The
//! configuration is read after logging starts, so the level, the stderr
//! gate and the file are all adjustable once the subscriber is installed.

use std::fmt;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, reload};

/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LEVEL: &str = "info";

const DIM: &str = "2";
const CYAN: &str = "36";

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "1;31",
        Level::WARN => "1;33",
        Level::INFO => "1;32",
        Level::DEBUG => "1;34",
        Level::TRACE => "1;35",
    }
}

/// Writes `text` wrapped in an SGR color when `ansi` is set.
fn paint(
    writer: &mut Writer<'_>,
    ansi: bool,
    color: &str,
    text: impl fmt::Display,
) -> fmt::Result {
    if ansi {
        write!(writer, "\x1b[{color}m{text}\x1b[0m")
    } else {
        write!(writer, "{text}")
    }
}

/// One line per event: local time, level, source location, fields.
struct ForecastLine;

impl<S, N> FormatEvent<S, N> for ForecastLine
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        let stamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
        paint(&mut writer, ansi, DIM, stamp)?;
        write!(writer, " ")?;
        let level = *meta.level();
        paint(&mut writer, ansi, level_color(level), format_args!("{level:>5}"))?;
        write!(writer, " ")?;

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            paint(&mut writer, ansi, CYAN, format_args!("{file}:{line}"))?;
            write!(writer, " ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

type LogFile = Arc<Mutex<Option<File>>>;

fn lock_file(file: &LogFile) -> MutexGuard<'_, Option<File>> {
    // A panic while logging must not silence the file for the rest of the run.
    file.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sink for the file layer. Bytes are dropped while no file is attached.
#[derive(Clone)]
struct LogFileSink(LogFile);

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogFileSink {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(lock_file(&self.0))
    }
}

type Reload<T> = Box<dyn Fn(T) -> Result<()> + Send + Sync>;

/// What stays adjustable after [`init_logging`].
struct LogControls {
    level: Reload<EnvFilter>,
    stderr: Reload<bool>,
    file: LogFile,
}

static CONTROLS: OnceLock<LogControls> = OnceLock::new();

fn controls() -> Result<&'static LogControls> {
    CONTROLS
        .get()
        .ok_or_else(|| anyhow!("logging has not been initialized"))
}

fn reloader<S>(
    handle: reload::Handle<EnvFilter, S>,
    what: &'static str,
) -> impl Fn(EnvFilter) -> Result<()> + Send + Sync
where
    S: Subscriber + Send + Sync + 'static,
{
    move |filter| {
        handle
            .reload(filter)
            .with_context(|| format!("could not reload the {what} filter"))
    }
}

/// Replaces the global filter with `directive`, either a bare level such as
/// `"debug"` or a full `EnvFilter` directive like `"warn,twin_engine=trace"`.
pub fn set_log_level(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log level '{directive}'"))?;
    (controls()?.level)(filter)
}

/// Turns stderr output on or off. The log file is unaffected.
pub fn set_terminal_enabled(enabled: bool) -> Result<()> {
    (controls()?.stderr)(enabled)
}

/// Starts appending log lines to `path`, replacing any earlier file.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;
    *lock_file(&controls()?.file) = Some(file);
    Ok(())
}

/// Installs the global subscriber. Later calls leave the first one in place.
///
/// The starting level comes from `RUST_LOG`, falling back to `info`. Stderr
/// is colored only when it is a terminal.
pub fn init_logging() {
    let file: LogFile = Arc::new(Mutex::new(None));

    let initial =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));
    let (level_layer, level_handle) = reload::Layer::new(initial);
    let (stderr_gate, stderr_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(ForecastLine)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_filter(stderr_gate);
    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(ForecastLine)
        .with_ansi(false)
        .with_writer(LogFileSink(file.clone()));

    let installed = tracing_subscriber::registry()
        .with(level_layer)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
    if installed.is_err() {
        return;
    }

    let set_stderr = reloader(stderr_handle, "stderr");
    let _ = CONTROLS.set(LogControls {
        level: Box::new(reloader(level_handle, "level")),
        // "trace" only opens the gate; the global level still applies.
        stderr: Box::new(move |enabled| {
            set_stderr(EnvFilter::new(if enabled { "trace" } else { "off" }))
        }),
        file,
    });
}
