//! Fixed-width text rows.

use std::io::{self, Write};

use unicode_width::UnicodeWidthChar;

use super::{HistoryStart, HostDisplay, Layout, RenderedSession};

const USER_WIDTH: usize = 8;
const TTY_WIDTH: usize = 12;
const HOST_WIDTH: usize = 16;
const SERVICE_WIDTH: usize = 12;
const LENGTH_WIDTH: usize = 12;

/// Format one session as a text row, without the trailing newline.
///
/// Layouts, by host placement:
///
/// ```text
/// Column: user tty host[ service] login - logout length
/// Last:   user tty[ service] login - logout length host
/// Hidden: user tty[ service] login - logout length
/// ```
pub fn format_row(session: &RenderedSession, layout: &Layout) -> String {
    let name_limit = (!layout.full_names).then_some(USER_WIDTH);
    let user = fit(
        display_user(&session.user, layout.full_names),
        USER_WIDTH,
        name_limit,
    );
    let tty = fit(&session.tty, TTY_WIDTH, Some(TTY_WIDTH));
    let service = if layout.service {
        format!(" {}", fit(&session.service, SERVICE_WIDTH, Some(SERVICE_WIDTH)))
    } else {
        String::new()
    };
    let login = fit(&session.login, layout.login_width, Some(layout.login_width));
    let (sep, logout_width) = if layout.compact {
        ("", 0)
    } else {
        (" - ", layout.logout_width)
    };
    let logout = fit(&session.logout, logout_width, Some(logout_width));
    let length = &session.length;

    match layout.host {
        HostDisplay::Hidden => format!("{user} {tty}{service} {login}{sep}{logout} {length}"),
        HostDisplay::Last => format!(
            "{user} {tty}{service} {login}{sep}{logout} {} {}",
            fit(length, LENGTH_WIDTH, Some(LENGTH_WIDTH)),
            session.host
        ),
        HostDisplay::Column => {
            let host_limit = (!layout.full_names).then_some(HOST_WIDTH);
            let host = fit(&session.host, HOST_WIDTH, host_limit);
            format!("{user} {tty} {host}{service} {login}{sep}{logout} {length}")
        }
    }
}

/// `soft-reboot` does not fit the eight-column user field.
fn display_user(user: &str, full_names: bool) -> &str {
    if !full_names && user == "soft-reboot" {
        "s-reboot"
    } else {
        user
    }
}

/// Truncate `value` to `max` display columns, then pad it to `min`.
fn fit(value: &str, min: usize, max: Option<usize>) -> String {
    let mut out = String::with_capacity(value.len().max(min));
    let mut width = 0;
    for ch in value.chars() {
        let w = ch.width().unwrap_or(0);
        if max.is_some_and(|max| width + w > max) {
            break;
        }
        out.push(ch);
        width += w;
    }
    if width < min {
        out.extend(std::iter::repeat(' ').take(min - width));
    }
    out
}

pub struct TextWriter<W: Write> {
    out: W,
    layout: Layout,
}

impl<W: Write> TextWriter<W> {
    pub fn new(out: W, layout: Layout) -> Self {
        Self { out, layout }
    }

    pub fn write_session(&mut self, session: &RenderedSession) -> io::Result<()> {
        writeln!(self.out, "{}", format_row(session, &self.layout))
    }

    pub fn finish(mut self, source: &str, start: &HistoryStart) -> io::Result<W> {
        match start {
            HistoryStart::NoEntries => writeln!(self.out, "{source} has no entries")?,
            HistoryStart::Begins(at) => write!(self.out, "\n{source} begins {at}\n")?,
            HistoryStart::Hidden => {}
        }
        self.out.flush()?;
        Ok(self.out)
    }
}
