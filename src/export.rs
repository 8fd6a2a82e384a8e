//! Writers for already-computed data: shot CSV, JSON rounds and reports.
//!
//! Everything here writes to a caller-supplied sink or returns a string.
//! Choosing files and paths is up to the caller.

use crate::baseline::Baselines;
use crate::round::Round;
use crate::sg::{self, SgTotals};
use crate::stats::{self, Stats};

/// Statistics and strokes-gained for one round, as handed to presentation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RoundReport {
    pub round_id: String,
    pub stats: Stats,
    pub sg: SgTotals,
}

impl RoundReport {
    pub fn new(round: &Round, baselines: &Baselines) -> Self {
        Self {
            round_id: round.round_id.clone(),
            stats: stats::compute_stats(round),
            sg: sg::compute_sg_totals_with(round, baselines),
        }
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

#[cfg(feature = "csv")]
pub use self::csv_export::{CSV_HEADER, csv_file_name, to_csv_string, write_csv};

#[cfg(feature = "csv")]
mod csv_export {
    use std::io;

    use crate::error::{DataError, Result};
    use crate::lie::{LieAfter, format_opt};
    use crate::round::{Hole, Round};
    use crate::stats::{green_in_regulation, known_par};

    pub const CSV_HEADER: [&str; 12] = [
        "Date",
        "Course",
        "RoundId",
        "Hole",
        "Par",
        "Shot",
        "LieBefore",
        "DistBeforeYd",
        "LieAfter",
        "DistAfterYd",
        "ScrambleTry",
        "ScrambleMade",
    ];

    /// Suggested file name: `shots_<roundId>.csv`.
    pub fn csv_file_name(round: &Round) -> String {
        format!("shots_{}.csv", round.round_id)
    }

    /// Scramble flags for the CSV, marked on the shot that first reached the
    /// green.
    ///
    /// Unlike the round statistics, a scramble attempt here needs the green
    /// to have been reached, not the hole finished.
    struct ScrambleMarks {
        /// 1-based position of the first shot finishing on the green
        first_green: Option<usize>,
        attempted: bool,
        made: bool,
    }

    impl ScrambleMarks {
        fn for_hole(hole: &Hole) -> Self {
            let first_green = hole
                .shots
                .iter()
                .position(|s| s.lie_after == Some(LieAfter::Green))
                .map(|i| i + 1);
            let (attempted, made) = match (known_par(hole), first_green) {
                (Some(par), Some(_)) if !green_in_regulation(par, &hole.shots) => {
                    let made = hole.is_finished() && hole.shots.len() == usize::from(par);
                    (true, made)
                }
                _ => (false, false),
            };
            Self { first_green, attempted, made }
        }

        fn flags(&self, shot_number: u32) -> (&'static str, &'static str) {
            let here = self.first_green.is_some_and(|n| n == shot_number as usize);
            let mark = |set: bool| if set && here { "1" } else { "" };
            (mark(self.attempted), mark(self.made))
        }
    }

    /// Write one row per recorded shot, header first. Every row, the last
    /// included, ends in `\n`.
    pub fn write_csv<W: io::Write>(round: &Round, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        wtr.write_record(CSV_HEADER)?;

        let date = round.date.to_string();
        let mut rows = 0usize;
        for hole in &round.holes {
            let marks = ScrambleMarks::for_hole(hole);
            let par = hole.par.map(|p| p.to_string()).unwrap_or_default();
            for shot in &hole.shots {
                let (attempted, made) = marks.flags(shot.number);
                let record: [&str; 12] = [
                    &date,
                    &round.course,
                    &round.round_id,
                    &hole.number.to_string(),
                    &par,
                    &shot.number.to_string(),
                    &format_opt(shot.lie_before),
                    &shot.dist_before.to_string(),
                    &format_opt(shot.lie_after),
                    &shot.dist_after.to_string(),
                    attempted,
                    made,
                ];
                wtr.write_record(record)?;
                rows += 1;
            }
        }
        wtr.flush()?;
        tracing::debug!(round = %round.round_id, rows, "wrote shot csv");
        Ok(())
    }

    pub fn to_csv_string(round: &Round) -> Result<String> {
        let mut buf = Vec::new();
        write_csv(round, &mut buf)?;
        String::from_utf8(buf).map_err(|e| DataError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[cfg(feature = "json")]
impl Round {
    /// Parse a round. Lie strings are checked here; structure is not (see
    /// [`Round::validate`]).
    pub fn from_json(s: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(feature = "json")]
impl RoundReport {
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
