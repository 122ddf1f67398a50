//! FILENAME: core/salary-engine/src/lib.rs
//! PURPOSE: Shared salary types, currency formatting and vote scoring.
//! CONTEXT: `stats-engine` builds its filter/sort/statistics pipeline on the
//! types re-exported here.

pub mod logging;

pub mod config;
pub mod currency;
pub mod entry;
pub mod error;
pub mod submission;
pub mod vote;

// Re-export commonly used types at the crate root
pub use config::{EngineConfig, ReferenceTables, DEFAULT_APPROVAL_THRESHOLD, DEFAULT_TOP_ROLES_LIMIT};
pub use currency::{format_currency, Currency, CurrencyTable, DEFAULT_CURRENCY};
pub use entry::{EmploymentType, EntryId, ExperienceLevel, RemotePolicy, SalaryEntry, TechStack};
pub use error::{EngineError, Result};
pub use submission::SalarySubmission;
pub use vote::{
    cast_vote, format_net_score, transition, ApprovalPolicy, CounterDelta, VoteBook, VoteCounts,
    VoteDirection, VoteOutcome, VoteRequest, VoteState, ViewerId,
};
