//! patchdump: rebuild failed patch operations from an agent metrics log.
//!
//! The agent CLI appends one JSON record per tool invocation to a
//! `metrics.jsonl` file. When a `patch` invocation fails it also logs the
//! diff it tried to apply and the original content of every file it
//! targeted. This crate turns each of those records into a numbered
//! `debug_session_<N>` directory on disk.
//!
//! # Module Structure
//!
//! - [`reader`] - Numbered line reader over the log
//! - [`record`] - Record decoding and the failed-patch filter
//! - [`session`] - Writing debug sessions to disk
//! - [`extractor`] - The per-line driving loop
//! - [`config`] - Output layout settings

pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod extractor;
pub mod logging;
pub mod reader;
pub mod record;
pub mod session;

pub use config::Config;
pub use error::{ConfigError, ExtractError};
pub use event::{ExtractEvent, ExtractionSummary};
pub use extractor::Extractor;
pub use record::{FailedPatch, Record};
pub use session::{Materializer, Session, SessionLayout};
