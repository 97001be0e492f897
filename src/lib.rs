//! Flight offer filtering, ranking and comparison for a fare-watching front end.

pub mod offer;
pub mod query;
pub mod scenario;
pub mod session;
pub mod time;
