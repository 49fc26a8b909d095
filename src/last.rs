//! One `last` query from options to trailer.

use std::fmt::Display;
use std::io::Write;

use chrono::TimeZone;
use tracing::debug;

use crate::error::LastError;
use crate::format::{TimeFormat, TimeFormatter, TimeStyle};
use crate::reconstruct::{PassOptions, PassSummary, Reconstructor};
use crate::render::{HistoryStart, HostDisplay, Layout, Renderer};
use crate::resolve::HostTranslator;
use crate::store::RecordSource;
use crate::window::Filter;

/// Everything a `last` invocation can ask for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastQuery {
    pub filter: Filter,
    /// Explicit `--time-format`; `None` means the default short style.
    pub time_style: Option<TimeStyle>,
    /// `-F`: full times everywhere, cancels compact mode.
    pub full_times: bool,
    pub compact: bool,
    pub legacy: bool,
    /// Inject `shutdown` rows in front of boot records.
    pub system: bool,
    pub limit: Option<usize>,
    /// One record per user.
    pub unique: bool,
    pub json: bool,
    pub full_names: bool,
    pub host: HostDisplay,
    pub service: bool,
}

/// Time formats after `--time-format`, `-c` and `-F` have been combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFormats {
    pub login: TimeFormat,
    pub logout: TimeFormat,
    /// Format of the `begins` instant.
    pub trailer: TimeFormat,
    pub compact: bool,
}

impl LastQuery {
    pub fn formats(&self) -> ResolvedFormats {
        if self.full_times {
            return ResolvedFormats {
                login: TimeFormat::Full,
                logout: TimeFormat::Full,
                trailer: TimeFormat::Full,
                compact: false,
            };
        }
        let (style, trailer) = match (self.time_style, self.compact) {
            (Some(style), _) => (style, style.formats().0),
            (None, true) => (TimeStyle::Compact, TimeFormat::Compact),
            (None, false) => (TimeStyle::Short, TimeFormat::Full),
        };
        let (login, logout) = style.formats();
        ResolvedFormats {
            login,
            logout,
            trailer,
            compact: self.compact,
        }
    }

    pub fn layout(&self) -> Layout {
        let formats = self.formats();
        Layout {
            full_names: self.full_names,
            host: self.host,
            service: self.service,
            compact: formats.compact,
            login_width: formats.login.width(),
            logout_width: if formats.compact {
                0
            } else {
                formats.logout.width()
            },
        }
    }

    pub fn pass_options(&self, now: u64) -> PassOptions {
        let formats = self.formats();
        PassOptions {
            login_format: formats.login,
            logout_format: formats.logout,
            compact: formats.compact,
            legacy: self.legacy,
            inject_shutdown: self.system,
            limit: self.limit,
            now,
        }
    }

    /// Run the query against `source`, writing rows and trailer to `out`.
    ///
    /// Returns `Ok(None)` without writing anything when the time window
    /// cannot match any session.
    pub fn execute<Tz, W>(
        &self,
        source: &dyn RecordSource,
        tz: Tz,
        now: u64,
        hosts: HostTranslator,
        out: W,
    ) -> Result<Option<PassSummary>, LastError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
        W: Write,
    {
        let Some(window) = self.filter.window.normalize() else {
            debug!(window = ?self.filter.window, "empty time window, nothing to do");
            return Ok(None);
        };
        let filter = Filter {
            window,
            ..self.filter.clone()
        };

        let records = source.records(self.unique)?;
        let layout = self.layout();
        let mut renderer = if self.json {
            Renderer::json(out, layout)?
        } else {
            Renderer::text(out, layout)
        };

        let trailer = self.formats().trailer;
        let formatter = TimeFormatter::new(tz.clone());
        let summary = Reconstructor::new(self.pass_options(now), filter, tz)
            .with_host_translator(hosts)
            .run(records, &mut renderer)?;

        let start = match summary.earliest_login {
            None => HistoryStart::NoEntries,
            Some(_) if trailer == TimeFormat::NoTime => HistoryStart::Hidden,
            Some(earliest) => HistoryStart::Begins(formatter.format(trailer, earliest)),
        };
        renderer.finish(&source.name(), &start)?;
        Ok(Some(summary))
    }
}
