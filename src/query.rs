//! Pure transformations over in-memory offer lists: filtering, ranking,
//! compare-set selection and watchlist aggregation.
//!
//! Nothing here keeps state between calls. Callers own their
//! [`FilterCriteria`], [`SortKey`] and [`CompareSet`] and pass them in on
//! every interaction; each function borrows its inputs and returns a fresh
//! value.

pub mod compare;
pub mod filter;
pub mod sort;
pub mod sparkline;
pub mod summary;
pub mod validate;


pub use compare::{toggle_compare, CompareSet};
pub use filter::{filter, FilterCriteria, HourWindow, MaxStops};
pub use sort::{sort, sort_with, RankingWeights, SortKey};
pub use sparkline::{sparkline, Sparkline};
pub use summary::{summarize, WatchSummary};
pub use validate::ValidationError;
