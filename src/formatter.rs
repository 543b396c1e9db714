//! Log line formatting with the engine's frame counter.
//!
//! Every line carries a wall-clock timestamp and the number of frames simulated so far, so log
//! output can be lined up against level stages and collisions.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:3]");

/// Formats events as `HH:MM:SS.mmm #frame LEVEL target: fields`.
pub struct FrameFormatter;

impl<S, N> FormatEvent<S, N> for FrameFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
        let frame = format!("#{:06}", frame_count());
        for part in [timestamp.as_str(), frame.as_str()] {
            if ansi {
                write!(writer, "\x1b[2m{part}\x1b[0m ")?;
            } else {
                write!(writer, "{part} ")?;
            }
        }

        write_level(&mut writer, meta.level(), ansi)?;

        if ansi {
            write!(writer, " \x1b[2m{}:\x1b[0m ", meta.target())?;
        } else {
            write!(writer, " {}: ", meta.target())?;
        }

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn write_level(writer: &mut Writer<'_>, level: &Level, ansi: bool) -> fmt::Result {
    let color = match *level {
        Level::TRACE => "\x1b[35m",
        Level::DEBUG => "\x1b[34m",
        Level::INFO => "\x1b[32m",
        Level::WARN => "\x1b[33m",
        Level::ERROR => "\x1b[31m",
    };
    if ansi {
        write!(writer, "{color}{:>5}\x1b[0m", level.as_str())
    } else {
        write!(writer, "{:>5}", level.as_str())
    }
}

/// Counts one simulated frame. Called by [`Game::tick`](crate::game::Game::tick).
pub fn increment_frame() {
    FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);
}

pub fn frame_count() -> u64 {
    FRAME_COUNTER.load(Ordering::Relaxed)
}
