//! FILENAME: core/salary-engine/src/error.rs

use thiserror::Error;

use crate::entry::EntryId;
use crate::vote::VoteDirection;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("Unknown salary entry: {0}")]
    UnknownEntry(EntryId),

    #[error("Vote counter underflow on entry {entry_id} ({direction} counter already 0)")]
    CounterUnderflow {
        entry_id: EntryId,
        direction: VoteDirection,
    },

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
