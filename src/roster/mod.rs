//! Monthly roster pipeline: projection, filtering, rowspan computation,
//! and the optimistic-write ledger.

pub mod filter;
pub mod optimistic;
pub mod projection;
pub mod rowspan;

pub use filter::RosterFilter;
pub use projection::{RosterRow, build_projection};
pub use rowspan::RowSpans;
