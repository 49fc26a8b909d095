//! Login record types.
//!
//! A record source delivers [`RawRecord`]s exactly as stored: the numeric
//! login/logout fields may arrive as JSON numbers or as strings. They are
//! validated into [`LoginRecord`]s before the reconstructor looks at them.
//!
//! # Stored form
//!
//! ```text
//! {"id":1,"type":"boot","user":"reboot","login":1700000000000000,"tty":"~","host":"6.8.0"}
//! {"id":2,"type":"user","user":"alice","login":"1700000100000000","logout":1700003700000000,"tty":"pts/0","host":"10.0.0.7","service":"sshd"}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Microseconds per second; all instants are microseconds since the epoch.
pub const USEC_PER_SEC: u64 = 1_000_000;

/// What a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// A user login on some tty.
    #[serde(rename = "user")]
    UserSession,
    /// A system boot; doubles as the boundary closing older sessions.
    #[serde(rename = "boot")]
    BootMarker,
}

/// A numeric time field as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeField {
    Number(serde_json::Number),
    Text(String),
}

impl TimeField {
    /// Parse as an unsigned microsecond count.
    pub fn as_usec(&self) -> Option<u64> {
        match self {
            TimeField::Number(n) => n.as_u64(),
            TimeField::Text(s) => s.parse().ok(),
        }
    }

    fn raw(&self) -> String {
        match self {
            TimeField::Number(n) => n.to_string(),
            TimeField::Text(s) => s.clone(),
        }
    }
}

impl From<u64> for TimeField {
    fn from(usec: u64) -> Self {
        TimeField::Number(usec.into())
    }
}

/// A record as delivered by a [`RecordSource`](crate::store::RecordSource).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub user: String,
    pub login: TimeField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logout: Option<TimeField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl RawRecord {
    /// A user session row.
    pub fn user(id: i64, user: &str, login: u64, logout: Option<u64>) -> Self {
        Self {
            id,
            kind: RecordKind::UserSession,
            user: user.to_string(),
            login: login.into(),
            logout: logout.map(TimeField::from),
            tty: None,
            host: None,
            service: None,
        }
    }

    /// A boot marker row, stored the way boot events are written (`reboot` on tty `~`).
    pub fn boot(id: i64, login: u64, logout: Option<u64>) -> Self {
        Self {
            kind: RecordKind::BootMarker,
            tty: Some("~".to_string()),
            ..Self::user(id, "reboot", login, logout)
        }
    }

    pub fn with_tty(mut self, tty: &str) -> Self {
        self.tty = Some(tty.to_string());
        self
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }
}

/// A validated, immutable login record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRecord {
    pub id: i64,
    pub kind: RecordKind,
    pub user: String,
    pub login: u64,
    /// `None` while the store has not seen the session close.
    pub logout: Option<u64>,
    pub tty: String,
    pub host: String,
    pub service: String,
}

impl TryFrom<RawRecord> for LoginRecord {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let login = raw.login.as_usec().ok_or_else(|| RecordError::InvalidLogin {
            id: raw.id,
            value: raw.login.raw(),
        })?;

        let logout = match &raw.logout {
            Some(field) => Some(field.as_usec().ok_or_else(|| RecordError::InvalidLogout {
                id: raw.id,
                value: field.raw(),
            })?),
            None => None,
        };

        Ok(LoginRecord {
            id: raw.id,
            kind: raw.kind,
            user: raw.user,
            login,
            logout,
            tty: raw.tty.unwrap_or_else(|| "?".to_string()),
            host: raw.host.unwrap_or_default(),
            service: raw.service.unwrap_or_default(),
        })
    }
}

/// How a session ended, as far as the reconstructor can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Closed at this instant: the record's own logout, capped at the
    /// nearest later boot.
    Closed(u64),
    /// Never closed in the store, but a later boot at this instant ended it.
    Crashed(u64),
    /// Never closed and no later boot: still logged in / still running.
    StillOpen,
}

impl SessionEnd {
    /// The concrete end instant, if there is one.
    pub fn instant(self) -> Option<u64> {
        match self {
            SessionEnd::Closed(at) | SessionEnd::Crashed(at) => Some(at),
            SessionEnd::StillOpen => None,
        }
    }
}
