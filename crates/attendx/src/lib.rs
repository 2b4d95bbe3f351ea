//! `attendx` - class attendance on a simulated ledger
//!
//! A local, storage-backed ledger of events, attendance records, badges, and
//! user settings, seeded with demonstration data on first use. Proofs and
//! transaction ids in the ledger are simulated; [`onchain`] holds the
//! separate path that submits a real attendance digest through a contract
//! client.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod onchain;
pub mod records;
pub mod storage;
pub mod summary;

pub use config::Config;
pub use error::{Error, Result};
pub use ledger::{block_height, block_height_at, Ledger, Submission};
pub use logging::init_logging;
pub use records::{
    AttendanceRecord, Badge, Event, EventStatus, NewEvent, Role, SettingsUpdate, UserSettings,
    VerificationStatus,
};
pub use storage::{Storage, StorageStats};
