//! The single pass that turns a descending stream of records into sessions.
//!
//! Records arrive newest first. While walking backwards through history the
//! reconstructor remembers the oldest boot seen so far (the *boundary*):
//! every session that started before that boot cannot have outlived it.
//! Sessions with an explicit logout later than the boundary are clamped to
//! it; sessions without a logout are reported as crashed when a boundary is
//! known and as still open otherwise.
//!
//! All state lives in one [`Reconstructor`] value, so independent queries
//! never share a boundary or a counter.

use std::fmt::Display;
use std::io::Write;

use chrono::TimeZone;
use tracing::{debug, warn};

use crate::error::{LastError, StoreError};
use crate::format::{format_length, LengthStatus, TimeFormat, TimeFormatter};
use crate::record::{LoginRecord, RawRecord, RecordKind, SessionEnd};
use crate::render::{RenderedSession, Renderer};
use crate::resolve::HostTranslator;
use crate::window::Filter;

/// Knobs of a pass that do not decide *whether* a record is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOptions {
    pub login_format: TimeFormat,
    pub logout_format: TimeFormat,
    /// Measure open and crashed sessions instead of labelling them.
    pub compact: bool,
    /// Lengths without seconds.
    pub legacy: bool,
    /// Emit a `shutdown` row in front of boot records that have one.
    pub inject_shutdown: bool,
    /// Stop emitting after this many records.
    pub limit: Option<usize>,
    /// Reference instant for sessions measured up to "now".
    pub now: u64,
}

impl Default for PassOptions {
    fn default() -> Self {
        Self {
            login_format: TimeFormat::Short,
            logout_format: TimeFormat::HourMinute,
            compact: false,
            legacy: false,
            inject_shutdown: false,
            limit: None,
            now: 0,
        }
    }
}

/// What a finished pass reports back to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Records emitted, not counting injected shutdown rows.
    pub emitted: usize,
    /// Records skipped because a time field did not parse.
    pub malformed: usize,
    /// Earliest login over the whole unfiltered stream.
    pub earliest_login: Option<u64>,
}

pub struct Reconstructor<Tz: TimeZone> {
    options: PassOptions,
    filter: Filter,
    formatter: TimeFormatter<Tz>,
    hosts: HostTranslator,
    boundary: Option<u64>,
    summary: PassSummary,
}

impl<Tz> Reconstructor<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(options: PassOptions, filter: Filter, tz: Tz) -> Self {
        Self {
            options,
            filter,
            formatter: TimeFormatter::new(tz),
            hosts: HostTranslator::disabled(),
            boundary: None,
            summary: PassSummary::default(),
        }
    }

    pub fn with_host_translator(mut self, hosts: HostTranslator) -> Self {
        self.hosts = hosts;
        self
    }

    /// Oldest boot seen so far, `None` while no boot has been visited.
    pub fn boundary(&self) -> Option<u64> {
        self.boundary
    }

    pub fn summary(&self) -> PassSummary {
        self.summary
    }

    /// Drive a whole stream into `out`.
    ///
    /// `records` must yield records in non-increasing login order. A source
    /// error ends the pass; rows already written stay written.
    pub fn run<I, W>(mut self, records: I, out: &mut Renderer<W>) -> Result<PassSummary, LastError>
    where
        I: IntoIterator<Item = Result<RawRecord, StoreError>>,
        W: Write,
    {
        for item in records {
            for session in self.process(item?) {
                out.write_session(&session)?;
            }
        }
        debug!(
            emitted = self.summary.emitted,
            malformed = self.summary.malformed,
            "pass finished"
        );
        Ok(self.summary)
    }

    /// Visit one record; returns the rows it produces (zero, one or two).
    pub fn process(&mut self, raw: RawRecord) -> Vec<RenderedSession> {
        let record = match LoginRecord::try_from(raw) {
            Ok(record) => record,
            Err(err) => {
                warn!("{err}");
                self.summary.malformed += 1;
                return Vec::new();
            }
        };

        self.summary.earliest_login = Some(
            self.summary
                .earliest_login
                .map_or(record.login, |earliest| earliest.min(record.login)),
        );

        // The source keeps delivering; excess records are drained.
        if self
            .options
            .limit
            .is_some_and(|limit| self.summary.emitted >= limit)
        {
            return Vec::new();
        }

        let end = self.effective_end(&record);
        if !self.filter.accepts(&record, end) {
            self.fold(&record);
            return Vec::new();
        }

        let host = self.hosts.translate(&record.host);
        let mut rows = Vec::with_capacity(2);
        if let Some(shutdown) = self.shutdown_row(&record, end, &host) {
            rows.push(shutdown);
        }
        rows.push(self.render(&record, end, host));

        self.fold(&record);
        self.summary.emitted += 1;
        rows
    }

    fn effective_end(&self, record: &LoginRecord) -> SessionEnd {
        match (record.logout, self.boundary) {
            (Some(logout), Some(boundary)) => SessionEnd::Closed(logout.min(boundary)),
            (Some(logout), None) => SessionEnd::Closed(logout),
            (None, Some(boundary)) => SessionEnd::Crashed(boundary),
            (None, None) => SessionEnd::StillOpen,
        }
    }

    /// A boot only becomes the boundary after its own row is decided.
    fn fold(&mut self, record: &LoginRecord) {
        if record.kind == RecordKind::BootMarker {
            self.boundary = Some(
                self.boundary
                    .map_or(record.login, |boundary| boundary.min(record.login)),
            );
        }
    }

    fn render(&self, record: &LoginRecord, end: SessionEnd, host: String) -> RenderedSession {
        let opts = &self.options;
        let login = self.formatter.format(opts.login_format, record.login);

        let (logout, length) = match end {
            SessionEnd::Closed(at) => {
                let logout = if opts.compact {
                    String::new()
                } else {
                    self.formatter.format(opts.logout_format, at)
                };
                (
                    logout,
                    format_length(record.login, at, LengthStatus::Closed, opts.legacy),
                )
            }
            SessionEnd::StillOpen if opts.compact => (
                String::new(),
                format_length(record.login, opts.now, LengthStatus::Open, opts.legacy),
            ),
            SessionEnd::Crashed(at) if opts.compact => (
                String::new(),
                format_length(record.login, at, LengthStatus::Crashed, opts.legacy),
            ),
            SessionEnd::Crashed(_) => ("crash".to_string(), String::new()),
            SessionEnd::StillOpen => {
                let state = match record.kind {
                    RecordKind::UserSession => "logged in",
                    RecordKind::BootMarker => "running",
                };
                if opts.logout_format == TimeFormat::HourMinute {
                    ("still".to_string(), state.to_string())
                } else {
                    (format!("still {state}"), String::new())
                }
            }
        };

        let tty = match record.kind {
            RecordKind::BootMarker => "system boot".to_string(),
            RecordKind::UserSession => record.tty.clone(),
        };

        RenderedSession {
            user: record.user.clone(),
            tty,
            host,
            service: record.service.clone(),
            login,
            logout,
            length,
            shutdown: false,
            end,
        }
    }

    /// The system went down at the boot's own logout and stayed down until
    /// the next boot (the current boundary).
    fn shutdown_row(
        &self,
        record: &LoginRecord,
        end: SessionEnd,
        host: &str,
    ) -> Option<RenderedSession> {
        if !self.options.inject_shutdown
            || record.kind != RecordKind::BootMarker
            || record.logout.is_none()
        {
            return None;
        }
        let next_boot = self.boundary?;
        let down_at = end.instant()?;
        let opts = &self.options;

        Some(RenderedSession {
            user: "shutdown".to_string(),
            tty: "system down".to_string(),
            host: host.to_string(),
            service: record.service.clone(),
            login: self.formatter.format(opts.login_format, down_at),
            logout: self.formatter.format(opts.logout_format, next_boot),
            length: format_length(down_at, next_boot, LengthStatus::Closed, opts.legacy),
            shutdown: true,
            end: SessionEnd::Closed(next_boot),
        })
    }
}
