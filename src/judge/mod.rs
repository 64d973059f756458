//! Remote judge service integration
//!
//! The execution sandbox is an external service: source code is submitted in
//! batches, one entry per test case, and each entry is tracked by an opaque
//! token until the service reports a terminal status for it.

pub mod client;
pub mod language;
pub mod status;

pub use client::{
    BatchItem, Clock, HttpJudgeBackend, JudgeBackend, JudgeClient, PollPolicy, SystemClock,
};
pub use language::Language;
pub use status::{JudgeResult, JudgeStatus};
