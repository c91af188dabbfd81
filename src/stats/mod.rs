//! Statistics reducer
//!
//! Turns the values gathered from a selection into scalars.

mod kind;
mod reducer;

pub use self::kind::StatKind;
pub use self::reducer::{reduce, StatSummary};
