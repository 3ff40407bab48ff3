//! Tracing subscriber setup: the colorized console formatter.
use std::fmt::Write as _;

use tracing::Level;
use tracing::field::{Field, Visit};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Collects the formatted `message` field of an event.
#[derive(Default)]
struct Message(String);

impl Visit for Message {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.0, "{value:?}");
        }
    }
}

/// Colored prefix for an event, keyed on level and the logger's targets.
/// `None` renders the whole line dimmed (debug output).
fn prefix(level: Level, target: &str) -> Option<&'static str> {
    Some(match (level, target) {
        (Level::ERROR, _) => "\x1b[0;31m[ERROR]\x1b[0m",
        (Level::WARN, _) => "\x1b[1;33m[WARNING]\x1b[0m",
        (Level::INFO, "macsetup::stage") => "\x1b[1;34m==>\x1b[0m",
        (Level::INFO, "macsetup::success") => "\x1b[0;32m[SUCCESS]\x1b[0m",
        (Level::INFO, "macsetup::dry_run") => "\x1b[33m[DRY RUN]\x1b[0m",
        (Level::INFO, _) => "\x1b[0;34m[INFO]\x1b[0m",
        _ => return None,
    })
}

/// Renders `[INFO]`, `[SUCCESS]`, `[WARNING]` and `[ERROR]` lines in color,
/// bold `==>` stage headers, `[DRY RUN]` lines and dimmed debug output.
pub(super) struct SetupFormatter;

impl<S, N> FormatEvent<S, N> for SetupFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let mut message = Message::default();
        event.record(&mut message);
        let msg = message.0;

        let meta = event.metadata();
        match prefix(*meta.level(), meta.target()) {
            Some(p) if meta.target() == "macsetup::stage" => {
                writeln!(writer, "{p} \x1b[1m{msg}\x1b[0m")
            }
            Some(p) => writeln!(writer, "{p} {msg}"),
            None => writeln!(writer, "\x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Warnings and errors go to stderr, everything else to stdout. Debug
/// events are shown only when `verbose` is set. Must be called once at
/// program startup, before any logging.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(SetupFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    tracing_subscriber::registry().with(console_layer).init();
}
