//! Last command handler

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use std::io;

use wlast::cli::LastArgs;
use wlast::config::DisplayConfig;
use wlast::format::TimeStyle;
use wlast::render::HostDisplay;
use wlast::resolve::{HostMapping, HostTranslator, SystemResolver};
use wlast::store::JsonlStore;
use wlast::timespec::parse_time_spec;
use wlast::window::{Filter, TimeWindow};
use wlast::{Config, LastQuery};

/// Setting this in the environment turns on compact mode.
pub const COMPACT_ENV: &str = "LAST_COMPACT";

#[cfg(not(tarpaulin_include))]
pub fn handle(args: LastArgs) -> Result<()> {
    let config = Config::load()?;
    let now = Local::now();
    let compact_env = std::env::var_os(COMPACT_ENV).is_some();
    let query = build_query(&args, &config.display, &now, compact_env)?;

    let store = JsonlStore::new(super::store_path(args.file.clone(), &config));
    let hosts = HostTranslator::new(host_mapping(&args), Box::new(SystemResolver));
    let now_usec = u64::try_from(now.timestamp_micros()).unwrap_or(0);

    let summary = query.execute(&store, Local, now_usec, hosts, io::stdout().lock())?;
    if let Some(summary) = summary {
        if summary.malformed > 0 {
            tracing::info!(skipped = summary.malformed, "malformed records were skipped");
        }
    }
    Ok(())
}

fn host_mapping(args: &LastArgs) -> HostMapping {
    if args.dns {
        HostMapping::Dns
    } else if args.ip {
        HostMapping::Ip
    } else {
        HostMapping::None
    }
}

/// Combine flags, config defaults and environment into one query.
pub(crate) fn build_query<Tz: TimeZone>(
    args: &LastArgs,
    display: &DisplayConfig,
    now: &DateTime<Tz>,
    compact_env: bool,
) -> Result<LastQuery> {
    let parse = |spec: &Option<String>| -> Result<Option<u64>> {
        Ok(spec.as_deref().map(|s| parse_time_spec(s, now)).transpose()?)
    };
    let window = TimeWindow {
        since: parse(&args.since)?,
        until: parse(&args.until)?,
        present: parse(&args.present)?,
    };

    let time_style = match &args.time_format {
        Some(name) => Some(name.parse::<TimeStyle>()?),
        None => display.time_format,
    };

    let translating = args.dns || args.ip;
    let host = if args.nohostname {
        HostDisplay::Hidden
    } else if args.hostlast {
        HostDisplay::Last
    } else if display.nohostname && !translating {
        HostDisplay::Hidden
    } else if display.hostlast {
        HostDisplay::Last
    } else {
        HostDisplay::Column
    };

    Ok(LastQuery {
        filter: Filter {
            window,
            open_only: args.open,
            matches: args.matches.clone(),
        },
        time_style,
        full_times: args.fulltimes,
        compact: args.compact || compact_env,
        legacy: args.legacy || display.legacy,
        system: args.system,
        limit: args.limit.filter(|&n| n > 0),
        unique: args.unique,
        json: args.json,
        full_names: args.fullnames || display.fullnames,
        host,
        service: args.service || display.service,
    })
}
