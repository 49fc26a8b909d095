//! Boottime command handler

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use std::fmt::Display;
use std::path::PathBuf;

use wlast::format::{TimeFormat, TimeFormatter};
use wlast::store::{boot_time, JsonlStore, RecordSource};
use wlast::Config;

#[cfg(not(tarpaulin_include))]
pub fn handle(file: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let store = JsonlStore::new(super::store_path(file, &config));
    println!("{}", boot_line(&store, Local)?);
    Ok(())
}

pub(crate) fn boot_line<Tz>(source: &dyn RecordSource, tz: Tz) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let booted = boot_time(source).context("Couldn't read boot entry")?;
    let formatted = TimeFormatter::new(tz).format(TimeFormat::Full, booted);
    Ok(format!("system boot {formatted}"))
}
