//! Worker tasks that back the runtime orchestration.
//!
//! The session worker is the only owner of the history; every request is
//! handled to completion before the next one is read.

mod session;

pub(crate) use session::{Request, SessionWorker};
