//! The filter pipeline: time window, open-only switch and match list.
//!
//! All checks are independent; a record must pass every one of them.

use crate::record::{LoginRecord, SessionEnd};

/// The temporal window of a query, in microseconds since the epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    /// Drop sessions that started before this instant.
    pub since: Option<u64>,
    /// Drop sessions that started after this instant.
    pub until: Option<u64>,
    /// Keep only sessions that were open at this instant.
    pub present: Option<u64>,
}

impl TimeWindow {
    /// Fold `present` into `until` and detect windows nothing can match.
    ///
    /// Returns `None` when `present` lies outside `since..=until` or when
    /// `since` is after `until`.
    pub fn normalize(self) -> Option<Self> {
        let mut window = self;
        if let Some(present) = window.present {
            if window.since.is_some_and(|since| present < since) {
                return None;
            }
            if let Some(until) = window.until {
                if present > until {
                    return None;
                }
                window.until = Some(present);
            }
        }
        if let (Some(since), Some(until)) = (window.since, window.until) {
            if since > until {
                return None;
            }
        }
        Some(window)
    }

    /// Check a session's login instant and effective end against the window.
    pub fn admits(&self, login: u64, end: SessionEnd) -> bool {
        if self.since.is_some_and(|since| login < since) {
            return false;
        }
        if self.until.is_some_and(|until| login > until) {
            return false;
        }
        if let Some(present) = self.present {
            if present < login {
                return false;
            }
            if end.instant().is_some_and(|ended| ended < present) {
                return false;
            }
        }
        true
    }
}

/// Everything that decides whether a record is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub window: TimeWindow,
    /// Show only sessions the store has not closed.
    pub open_only: bool,
    /// User names and/or tty names; empty means "everything".
    pub matches: Vec<String>,
}

impl Filter {
    pub fn accepts(&self, record: &LoginRecord, end: SessionEnd) -> bool {
        if !self.window.admits(record.login, end) {
            return false;
        }
        if self.open_only && matches!(end, SessionEnd::Closed(_)) {
            return false;
        }
        self.matches.is_empty()
            || self
                .matches
                .iter()
                .any(|m| *m == record.user || *m == record.tty)
    }
}
