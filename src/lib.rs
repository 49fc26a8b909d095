//! wlast library
//!
//! Reconstructs login sessions from a newest-first stream of login and boot
//! records and renders them as `last`-style text or JSON.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod last;
pub mod logging;
pub mod reconstruct;
pub mod record;
pub mod render;
pub mod resolve;
pub mod store;
pub mod timespec;
pub mod window;

pub use config::Config;
pub use error::{LastError, StoreError};
pub use last::LastQuery;
pub use reconstruct::{PassOptions, PassSummary, Reconstructor};
pub use record::{LoginRecord, RawRecord, RecordKind, SessionEnd};
pub use store::{JsonlStore, MemoryStore, RecordSource};
