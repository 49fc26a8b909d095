//! Output rendering.
//!
//! The reconstructor produces [`RenderedSession`]s with every field already
//! formatted. Two independent serializers consume them:
//!
//! - `text` - one fixed-width row per session, `last` style
//! - `json` - one object per session inside an `entries` array
//!
//! [`Renderer`] owns the output sink and whatever state the chosen format
//! needs between rows.

mod json;
mod text;

pub use json::strip_parentheses;
pub use text::format_row;

use std::io::{self, Write};

use crate::record::SessionEnd;

/// One output row, every field pre-formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSession {
    pub user: String,
    pub tty: String,
    pub host: String,
    pub service: String,
    pub login: String,
    pub logout: String,
    pub length: String,
    /// Synthetic `shutdown` row injected in front of a boot record.
    pub shutdown: bool,
    /// Effective end the texts were derived from.
    pub end: SessionEnd,
}

/// Where the host column goes, if anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HostDisplay {
    /// Third column, after the tty.
    #[default]
    Column,
    /// Last column, after the length.
    Last,
    /// Not shown.
    Hidden,
}

/// Column layout shared by both output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Print user and host names at their natural width.
    pub full_names: bool,
    pub host: HostDisplay,
    pub service: bool,
    /// Omit logout times and the ` - ` separator.
    pub compact: bool,
    pub login_width: usize,
    pub logout_width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            full_names: false,
            host: HostDisplay::Column,
            service: false,
            compact: false,
            login_width: 16,
            logout_width: 5,
        }
    }
}

/// How the end of the output reports where the history begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryStart {
    /// The source delivered no records at all.
    NoEntries,
    /// Formatted instant of the earliest login in the whole source.
    Begins(String),
    /// Records exist but the time style prints no instants.
    Hidden,
}

/// Streams rendered sessions into a sink in one of the output formats.
pub enum Renderer<W: Write> {
    Text(text::TextWriter<W>),
    Json(json::JsonWriter<W>),
}

impl<W: Write> Renderer<W> {
    pub fn text(out: W, layout: Layout) -> Self {
        Renderer::Text(text::TextWriter::new(out, layout))
    }

    /// Start a JSON document; the opening of the `entries` array is written immediately.
    pub fn json(out: W, layout: Layout) -> io::Result<Self> {
        Ok(Renderer::Json(json::JsonWriter::new(out, layout)?))
    }

    pub fn write_session(&mut self, session: &RenderedSession) -> io::Result<()> {
        match self {
            Renderer::Text(w) => w.write_session(session),
            Renderer::Json(w) => w.write_session(session),
        }
    }

    /// Write the trailer naming `source` and hand back the sink.
    pub fn finish(self, source: &str, start: &HistoryStart) -> io::Result<W> {
        match self {
            Renderer::Text(w) => w.finish(source, start),
            Renderer::Json(w) => w.finish(start),
        }
    }
}
