//! Logging backend for the `log` facade.
//!
//! The library only emits records through `log`; installing a logger is up to
//! the application. [`PaletteLogger`] is a small formatter that writes one
//! line per record and, with color enabled, paints a truecolor swatch next to
//! every `#rrggbb` value in a message.
//!
//! Optional tracing integration is available via `PaletteTracingLayer` when
//! the `tracing` feature is enabled.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::{Arc, LazyLock, Mutex};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use regex::Regex;
use time::{OffsetDateTime, format_description::OwnedFormatItem};

use crate::color::Color;
use crate::sync::lock_recover;

/// Destination shared by a logger and its clones.
pub type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9a-fA-F]{6}\b").expect("valid regex"));

/// Line-oriented logger for the `log` crate.
///
/// # Thread Safety
///
/// All mutable state sits behind mutexes with poison recovery, so records
/// from several threads interleave by whole lines.
pub struct PaletteLogger {
    writer: SharedWriter,
    level: LevelFilter,
    show_time: bool,
    omit_repeated_times: bool,
    show_level: bool,
    show_target: bool,
    color: bool,
    time_format: OwnedFormatItem,
    last_time: Mutex<Option<String>>,
}

impl PaletteLogger {
    /// Logger writing to standard error.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }

    /// Logger writing to any `Write` sink.
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self::with_shared_writer(Arc::new(Mutex::new(Box::new(writer))))
    }

    #[must_use]
    pub fn with_shared_writer(writer: SharedWriter) -> Self {
        let time_format = time::format_description::parse_owned::<2>("[hour]:[minute]:[second]")
            .unwrap_or_else(|_| OwnedFormatItem::Literal(Vec::<u8>::new().into_boxed_slice()));
        Self {
            writer,
            level: LevelFilter::Info,
            show_time: true,
            omit_repeated_times: true,
            show_level: true,
            show_target: false,
            color: false,
            time_format,
            last_time: Mutex::new(None),
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    /// Blank out a timestamp equal to the previous one.
    #[must_use]
    pub fn omit_repeated_times(mut self, omit: bool) -> Self {
        self.omit_repeated_times = omit;
        self
    }

    #[must_use]
    pub fn show_level(mut self, show: bool) -> Self {
        self.show_level = show;
        self
    }

    /// Prefix messages with the record target, e.g. `hueforge::adjust`.
    #[must_use]
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// ANSI level colors and hex swatches.
    #[must_use]
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Override the time format; invalid descriptions are ignored.
    #[must_use]
    pub fn time_format(mut self, format: &str) -> Self {
        if let Ok(parsed) = time::format_description::parse_owned::<2>(format) {
            self.time_format = parsed;
        }
        self
    }

    /// Install as the global logger.
    ///
    /// # Errors
    ///
    /// Fails if another logger is already installed.
    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(self))
    }

    fn format_time(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        now.format(&self.time_format)
            .unwrap_or_else(|_| now.to_string())
    }

    const fn level_color(level: Level) -> &'static str {
        match level {
            Level::Trace => "\x1b[2m",
            Level::Debug => "\x1b[2;34m",
            Level::Info => "\x1b[32m",
            Level::Warn => "\x1b[33m",
            Level::Error => "\x1b[1;31m",
        }
    }

    fn paint_swatches(message: &str) -> String {
        HEX_COLOR
            .replace_all(message, |caps: &regex::Captures<'_>| match Color::parse(&caps[0]) {
                Ok(c) => format!(
                    "\x1b[48;2;{};{};{}m  \x1b[0m {}",
                    c.red, c.green, c.blue, &caps[0]
                ),
                Err(_) => caps[0].to_string(),
            })
            .into_owned()
    }

    fn format_record(&self, record: &Record<'_>) -> String {
        let mut line = String::new();

        if self.show_time {
            let time_str = self.format_time();
            let display = if self.omit_repeated_times {
                let mut last = lock_recover(&self.last_time);
                if last.as_ref() == Some(&time_str) {
                    " ".repeat(time_str.len())
                } else {
                    *last = Some(time_str.clone());
                    time_str
                }
            } else {
                time_str
            };
            line.push_str(&display);
            line.push(' ');
        }

        if self.show_level {
            let level = record.level();
            if self.color {
                let _ = write!(line, "{}{level:<5}\x1b[0m ", Self::level_color(level));
            } else {
                let _ = write!(line, "{level:<5} ");
            }
        }

        if self.show_target {
            line.push_str(record.target());
            line.push_str(": ");
        }

        let message = record.args().to_string();
        if self.color {
            line.push_str(&Self::paint_swatches(&message));
        } else {
            line.push_str(&message);
        }

        line
    }

    fn write_line(&self, line: &str) {
        let mut writer = lock_recover(&self.writer);
        // A logger has nowhere to report its own write failures.
        let _ = writeln!(writer, "{line}");
    }
}

impl Default for PaletteLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for PaletteLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format_record(record);
        self.write_line(&line);
    }

    fn flush(&self) {
        let _ = lock_recover(&self.writer).flush();
    }
}

#[cfg(feature = "tracing")]
mod tracing_integration {
    use std::fmt::{self, Write as _};
    use std::time::Instant;

    use log::Level;
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Metadata, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::Context;
    use tracing_subscriber::registry::LookupSpan;

    use super::PaletteLogger;

    /// Forwards tracing spans and events to a [`PaletteLogger`].
    ///
    /// Events are prefixed with their enclosing spans, so a nudge logged
    /// inside an adjustment reads `adjust_with_report{len=5}: ...`. Each span
    /// also reports its wall time when it closes, which is how the generator
    /// and adjuster spans show up in the demo's verbose output.
    pub struct PaletteTracingLayer {
        logger: PaletteLogger,
    }

    impl PaletteTracingLayer {
        /// Layer writing to standard error with default settings.
        #[must_use]
        pub fn new() -> Self {
            Self {
                logger: PaletteLogger::new(),
            }
        }

        #[must_use]
        pub fn with_logger(logger: PaletteLogger) -> Self {
            Self { logger }
        }

        /// Install as the global tracing subscriber.
        ///
        /// # Errors
        ///
        /// Fails if a global subscriber is already set.
        pub fn init(self) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
            use tracing_subscriber::prelude::*;

            tracing::subscriber::set_global_default(tracing_subscriber::registry().with(self))
        }

        fn emit(&self, metadata: &Metadata<'_>, message: &str) {
            let level = level_of(metadata);
            if level > self.logger.level {
                return;
            }
            let line = self.logger.format_record(
                &log::Record::builder()
                    .args(format_args!("{message}"))
                    .level(level)
                    .target(metadata.target())
                    .module_path(metadata.module_path())
                    .file(metadata.file())
                    .line(metadata.line())
                    .build(),
            );
            self.logger.write_line(&line);
        }
    }

    impl Default for PaletteTracingLayer {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Stored in span extensions between open and close.
    struct SpanState {
        fields: String,
        opened: Instant,
    }

    /// Message text plus `key=value` pairs, unquoted.
    #[derive(Default)]
    struct Fields {
        message: String,
        pairs: String,
    }

    impl Fields {
        fn push(&mut self, field: &Field, value: fmt::Arguments<'_>) {
            if field.name() == "message" {
                let _ = self.message.write_fmt(value);
                return;
            }
            if !self.pairs.is_empty() {
                self.pairs.push(' ');
            }
            let _ = write!(self.pairs, "{}={value}", field.name());
        }
    }

    impl Visit for Fields {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.push(field, format_args!("{value}"));
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.push(field, format_args!("{value:?}"));
        }
    }

    fn level_of(metadata: &Metadata<'_>) -> Level {
        match *metadata.level() {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::INFO => Level::Info,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::TRACE => Level::Trace,
        }
    }

    /// `name` or `name{k=v ...}`.
    fn push_span(out: &mut String, name: &str, state: Option<&SpanState>) {
        out.push_str(name);
        if let Some(state) = state.filter(|s| !s.fields.is_empty()) {
            let _ = write!(out, "{{{}}}", state.fields);
        }
    }

    impl<S> Layer<S> for PaletteTracingLayer
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut fields = Fields::default();
            attrs.record(&mut fields);
            span.extensions_mut().insert(SpanState {
                fields: fields.pairs,
                opened: Instant::now(),
            });
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut extensions = span.extensions_mut();
            if let Some(state) = extensions.get_mut::<SpanState>() {
                let mut fields = Fields {
                    message: String::new(),
                    pairs: std::mem::take(&mut state.fields),
                };
                values.record(&mut fields);
                state.fields = fields.pairs;
            }
        }

        fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
            let metadata = event.metadata();
            if level_of(metadata) > self.logger.level {
                return;
            }

            let mut fields = Fields::default();
            event.record(&mut fields);

            let mut message = String::new();
            if let Some(scope) = ctx.event_scope(event) {
                for span in scope.from_root() {
                    push_span(&mut message, span.name(), span.extensions().get::<SpanState>());
                    message.push_str(": ");
                }
            }
            message.push_str(&fields.message);
            if !fields.pairs.is_empty() {
                if !fields.message.is_empty() {
                    message.push(' ');
                }
                message.push_str(&fields.pairs);
            }
            self.emit(metadata, &message);
        }

        fn on_close(&self, id: Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let extensions = span.extensions();
            let Some(state) = extensions.get::<SpanState>() else {
                return;
            };
            let mut message = String::new();
            push_span(&mut message, span.name(), Some(state));
            let _ = write!(message, ": done in {:.2?}", state.opened.elapsed());
            self.emit(span.metadata(), &message);
        }
    }

}

#[cfg(feature = "tracing")]
pub use tracing_integration::PaletteTracingLayer;
