//! Shot-by-shot golf round statistics and strokes-gained analysis.
//!
//! - [`stats::compute_stats`]: fairways, greens in regulation, scrambling,
//!   putts, penalties and driving distance
//! - [`sg::compute_sg_totals`]: strokes gained off the tee, approach, around
//!   the green and putting, against the [`Baselines`] tables
//!
//! Both are pure functions of a [`Round`] snapshot. Bad input is caught where
//! it enters ([`lie`] parsing, [`Round::validate`], [`Baselines::new`]); the
//! engines themselves never fail.

pub mod baseline;
pub mod error;
pub mod export;
pub mod lie;
pub mod round;
pub mod sg;
pub mod stats;

pub use baseline::{BaselineEntry, BaselineTable, Baselines};
pub use error::DataError;
pub use export::RoundReport;
pub use lie::{LieAfter, LieBefore};
pub use round::{Hole, HoleStatus, Round, Shot};
pub use sg::{Category, SgTotals, compute_sg_totals, compute_sg_totals_with};
pub use stats::{Stats, compute_stats};
