use chrono::Local;
use nu_ansi_term::Color;
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    prelude::*,
    registry::LookupSpan,
    Layer,
};

/// Target for INFO events that should be labelled SUCCESS.
pub const SUCCESS_TARGET: &str = "success";
/// Target for ERROR events that should be labelled FATAL.
pub const FATAL_TARGET: &str = "fatal";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn setup_logger() -> Option<WorkerGuard> {
    // Create logs directory
    std::fs::create_dir_all("logs").ok();

    let file_appender = tracing_appender::rolling::hourly("logs", "pengu");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .event_format(LineFormatter { ansi: false })
        .with_filter(app_targets());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .event_format(LineFormatter { ansi: true })
        .with_filter(app_targets());

    let installed = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .is_ok();

    // Guard - MUST be kept alive by caller
    installed.then_some(guard)
}

/// Logs a FATAL line, flushes the file writer and terminates the process.
pub fn exit_fatal(message: impl fmt::Display, guard: Option<WorkerGuard>) -> ! {
    tracing::error!(target: FATAL_TARGET, "{}", message);
    drop(guard);
    std::process::exit(1)
}

fn app_targets() -> tracing_subscriber::filter::Targets {
    // HTTP stack internals stay quiet unless something is wrong
    tracing_subscriber::filter::Targets::new()
        .with_target("hyper", Level::WARN)
        .with_target("hyper_util", Level::WARN)
        .with_target("rquest", Level::WARN)
        .with_target("rustls", Level::WARN)
        .with_default(Level::INFO)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Success,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    pub fn classify(level: &Level, target: &str) -> Self {
        match *level {
            Level::ERROR if target == FATAL_TARGET => Severity::Fatal,
            Level::ERROR => Severity::Error,
            Level::WARN => Severity::Warn,
            Level::INFO if target == SUCCESS_TARGET => Severity::Success,
            Level::INFO => Severity::Info,
            _ => Severity::Debug,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Success => "SUCCESS",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    fn color(&self) -> Color {
        match self {
            Severity::Debug => Color::DarkGray,
            Severity::Info => Color::Blue,
            Severity::Success => Color::Green,
            Severity::Warn => Color::Yellow,
            Severity::Error => Color::Red,
            Severity::Fatal => Color::Purple,
        }
    }
}

/// Renders `[timestamp] [SEVERITY] message`.
pub fn format_line(timestamp: &str, severity: Severity, message: &str) -> String {
    format!("[{}] [{}] {}", timestamp, severity.label(), message)
}

// --- Formatters ---

struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

pub struct LineFormatter {
    ansi: bool,
}

impl<S, N> FormatEvent<S, N> for LineFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let severity = Severity::classify(metadata.level(), metadata.target());
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

        let mut msg_visitor = MessageVisitor {
            message: String::new(),
        };
        event.record(&mut msg_visitor);

        let line = format_line(&timestamp, severity, &msg_visitor.message);
        if self.ansi {
            writeln!(writer, "{}", severity.color().paint(line))
        } else {
            writeln!(writer, "{}", line)
        }
    }
}
