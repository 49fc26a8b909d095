//! JSON document output.
//!
//! ```text
//! {
//!    "entries": [
//!      {"user":"alice","tty":"pts/0","hostname":"10.0.0.7","login":"...","logout":"...","length":"01:00:00"},
//!      {...}
//!    ],
//!    "start": "Fri Mar 15 13:45:30 2024"
//! }
//! ```

use std::io::{self, Write};

use serde::Serialize;

use super::{HistoryStart, HostDisplay, Layout, RenderedSession};

#[derive(Serialize)]
struct JsonEntry<'a> {
    user: &'a str,
    tty: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    hostname: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    service: Option<&'a str>,
    login: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    logout: Option<&'a str>,
    length: &'a str,
}

impl<'a> JsonEntry<'a> {
    fn new(session: &'a RenderedSession, layout: &Layout) -> Self {
        Self {
            user: &session.user,
            tty: &session.tty,
            hostname: (layout.host != HostDisplay::Hidden).then_some(session.host.as_str()),
            service: (layout.service && !session.service.is_empty())
                .then_some(session.service.as_str()),
            login: &session.login,
            logout: (!layout.compact).then_some(session.logout.as_str()),
            length: strip_parentheses(&session.length),
        }
    }
}

/// Remove the `(...)` around a formatted length.
///
/// Only lengths starting with a blank or `(` are touched; open and crashed
/// markers (`.` / `?`) and plain words pass through unchanged.
pub fn strip_parentheses(length: &str) -> &str {
    if !(length.starts_with(' ') || length.starts_with('(')) {
        return length;
    }
    match length.split_once('(') {
        Some((_, inner)) => inner.split_once(')').map_or(inner, |(inner, _)| inner),
        None => length,
    }
}

pub struct JsonWriter<W: Write> {
    out: W,
    layout: Layout,
    first: bool,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(mut out: W, layout: Layout) -> io::Result<Self> {
        out.write_all(b"{\n   \"entries\": [\n")?;
        Ok(Self {
            out,
            layout,
            first: true,
        })
    }

    pub fn write_session(&mut self, session: &RenderedSession) -> io::Result<()> {
        if self.first {
            self.first = false;
        } else {
            self.out.write_all(b",\n")?;
        }
        self.out.write_all(b"     ")?;
        serde_json::to_writer(&mut self.out, &JsonEntry::new(session, &self.layout))?;
        Ok(())
    }

    pub fn finish(mut self, start: &HistoryStart) -> io::Result<W> {
        match start {
            HistoryStart::Begins(at) => {
                let at = serde_json::to_string(at)?;
                write!(self.out, "\n   ],\n   \"start\": {at}\n}}\n")?;
            }
            HistoryStart::NoEntries | HistoryStart::Hidden => {
                self.out.write_all(b"\n   ]\n}\n")?;
            }
        }
        self.out.flush()?;
        Ok(self.out)
    }
}
