//! CLI definitions for wlast
//!
//! The clap structures live in the library so integration tests and the
//! completions generator see the same command tree as the binary.

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// Build clap styles.
///
/// - Green: headers, usage, command names
/// - White: descriptions, placeholders
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

/// Version string; dev builds carry the short git commit.
pub fn version() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| {
        let pkg = env!("CARGO_PKG_VERSION");
        match option_env!("VERGEN_GIT_SHA") {
            Some(sha) if !cfg!(feature = "release") => {
                format!("{pkg} ({})", sha.get(..7).unwrap_or(sha))
            }
            _ => pkg.to_string(),
        }
    })
}

#[derive(Parser)]
#[command(name = "wlast")]
#[command(about = "Show a listing of last logged in users and system boots")]
#[command(
    long_about = "wlast reconstructs login sessions from a JSON-lines login history.

Sessions without a logout are reported as still logged in, or as crashed
when a later system boot shows they cannot still be running.

QUICK START:
    wlast last                     All sessions, newest first
    wlast last -n 10 alice         The last ten sessions of alice
    wlast last -x -F               Include shutdowns, full times
    wlast boottime                 When the system last booted"
)]
#[command(version = version())]
#[command(styles = build_cli_styles())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a listing of last logged in users
    #[command(long_about = "Show a listing of last logged in users.

Records are listed newest first. MATCH entries select sessions whose user
name or tty equals one of them.

TIME values accept YYYYMMDDHHMMSS, YYYY-MM-DD HH:MM:SS, YYYY-MM-DD HH:MM,
YYYY-MM-DD, HH:MM:SS, HH:MM, now, today, yesterday and tomorrow.

EXAMPLES:
    wlast last -s yesterday -t today     Sessions started yesterday
    wlast last -p 2024-03-15 12:00       Sessions open at noon
    wlast last -j -n 5                   Five newest sessions as JSON
    LAST_COMPACT=1 wlast last            Compact layout")]
    Last(LastArgs),

    /// Print the time of the last system boot
    #[command(long_about = "Print the time of the most recent system boot.

EXAMPLE:
    wlast boottime
    wlast boottime -f ./wtmp.jsonl

OUTPUT:
    system boot Fri Mar 15 13:45:30 2024")]
    Boottime {
        /// Login history file
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct LastArgs {
    /// Login history file
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Display hostnames as the last column
    #[arg(short = 'a', long, conflicts_with = "nohostname")]
    pub hostlast: bool,

    /// Display only login time and session length
    #[arg(short, long)]
    pub compact: bool,

    /// Translate IP addresses into hostnames
    #[arg(short, long, conflicts_with_all = ["nohostname", "ip"])]
    pub dns: bool,

    /// Display full login and logout times
    #[arg(short = 'F', long)]
    pub fulltimes: bool,

    /// Translate hostnames into IP addresses
    #[arg(short, long, conflicts_with = "nohostname")]
    pub ip: bool,

    /// Generate JSON output
    #[arg(short, long)]
    pub json: bool,

    /// Display session length without seconds
    #[arg(short = 'L', long)]
    pub legacy: bool,

    /// Display only the first N entries
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,

    /// Display only sessions that are still open
    #[arg(short, long)]
    pub open: bool,

    /// Display who was present at TIME
    #[arg(short, long, value_name = "TIME")]
    pub present: Option<String>,

    /// Don't display the hostname field
    #[arg(short = 'R', long)]
    pub nohostname: bool,

    /// Display the PAM service used for the login
    #[arg(short = 'S', long)]
    pub service: bool,

    /// Display who was logged in after TIME
    #[arg(short, long, value_name = "TIME")]
    pub since: Option<String>,

    /// Display who was logged in until TIME
    #[arg(short = 't', long, value_name = "TIME")]
    pub until: Option<String>,

    /// Display only the most recent entry of each user
    #[arg(short, long)]
    pub unique: bool,

    /// Display full user and domain names
    #[arg(short = 'w', long)]
    pub fullnames: bool,

    /// Display system shutdown entries
    #[arg(short = 'x', long)]
    pub system: bool,

    /// Display timestamps in the given format: notime|short|full|iso|compact|raw
    #[arg(long, value_name = "FORMAT")]
    pub time_format: Option<String>,

    /// User names and/or ttys to show
    #[arg(value_name = "MATCH")]
    pub matches: Vec<String>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    #[command(long_about = "Display the effective configuration in TOML format.

Config file location: ~/.config/wlast/config.toml (or $WLAST_CONFIG)

EXAMPLE:
    wlast config show")]
    Show,
}
