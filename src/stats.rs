//! Round statistics: fairways, greens in regulation, scrambling, putts,
//! penalties, driving distance and where shots finished.
//!
//! Hole-level heuristics only. Nothing here depends on the strokes-gained
//! categories in [`crate::sg`].

use std::collections::BTreeMap;

use crate::lie::{LieAfter, LieBefore};
use crate::round::{Hole, Round, Shot};

/// Descriptive statistics for a round. Percentages are whole numbers 0-100
/// and are 0 when there was no opportunity.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Stats {
    pub holes_total: u32,
    pub holes_started: u32,
    pub holes_finished: u32,

    pub total_shots: u32,
    pub putts: u32,
    pub penalties: u32,
    pub layups: u32,

    pub fw_opportunities: u32,
    pub fw_hits: u32,
    pub fw_hit_pct: u32,

    pub gir_opportunities: u32,
    pub gir_hits: u32,
    pub gir_pct: u32,

    /// Finished holes where the green was missed in regulation
    pub scramble_opportunities: u32,
    /// ... of which were holed in exactly par
    pub scramble_hits: u32,
    pub scramble_pct: u32,

    pub lie_after_counts: BTreeMap<LieAfter, u32>,

    pub driving_count: u32,
    /// Yards, 1 decimal
    pub driving_avg: f64,
    pub driving_max: u32,
}

/// Whole-number percentage, 0 with no opportunities.
pub fn percent(hits: u32, opportunities: u32) -> u32 {
    if opportunities == 0 {
        return 0;
    }
    (f64::from(hits) / f64::from(opportunities) * 100.0).round() as u32
}

/// Par of the hole if it is one we can reason about (3, 4 or 5).
pub(crate) fn known_par(hole: &Hole) -> Option<u8> {
    hole.par.filter(|p| (3..=5).contains(p))
}

/// The first shot to finish on the green did so within `par - 2` strokes
/// (at least 1), with no penalty on the way.
pub fn green_in_regulation(par: u8, shots: &[Shot]) -> bool {
    let target = u32::from(par.saturating_sub(2)).max(1);
    let mut penalty = false;
    for shot in shots {
        penalty |= shot.is_penalty();
        if shot.lie_after == Some(LieAfter::Green) {
            return shot.number <= target && !penalty;
        }
    }
    false
}

/// Tee shot length on a par 4 or 5: distance before minus distance after.
/// `None` unless the hole is a par 4/5 starting from the tee and the ball
/// moved forward.
pub fn drive_distance(hole: &Hole) -> Option<u32> {
    let par = known_par(hole)?;
    let first = hole.first_shot()?;
    if par < 4 || first.lie_before != Some(LieBefore::Tee) {
        return None;
    }
    first.dist_before.checked_sub(first.dist_after).filter(|&d| d > 0)
}

pub fn compute_stats(round: &Round) -> Stats {
    let mut stats = Stats::default();
    let mut driving_sum = 0u64;

    for hole in &round.holes {
        stats.holes_total += 1;
        if hole.is_started() {
            stats.holes_started += 1;
        }
        let finished = hole.is_finished();
        if finished {
            stats.holes_finished += 1;
        }
        stats.total_shots += hole.shots.len() as u32;

        for shot in &hole.shots {
            if shot.lie_before == Some(LieBefore::Green) {
                stats.putts += 1;
            }
            if let Some(lie) = shot.lie_after {
                *stats.lie_after_counts.entry(lie).or_default() += 1;
            }
            if shot.is_penalty() {
                stats.penalties += 1;
            }
            if shot.lie_before == Some(LieBefore::Layup) {
                stats.layups += 1;
            }
        }

        let Some(par) = known_par(hole) else {
            continue;
        };

        if par >= 4
            && let Some(first) = hole.first_shot()
        {
            stats.fw_opportunities += 1;
            if first.lie_after == Some(LieAfter::Fairway) {
                stats.fw_hits += 1;
            }
        }

        stats.gir_opportunities += 1;
        let gir = green_in_regulation(par, &hole.shots);
        if gir {
            stats.gir_hits += 1;
        }

        if finished && !gir {
            stats.scramble_opportunities += 1;
            if hole.shots.len() == usize::from(par) {
                stats.scramble_hits += 1;
            }
        }

        if let Some(drive) = drive_distance(hole) {
            stats.driving_count += 1;
            driving_sum += u64::from(drive);
            stats.driving_max = stats.driving_max.max(drive);
        }
    }

    stats.fw_hit_pct = percent(stats.fw_hits, stats.fw_opportunities);
    stats.gir_pct = percent(stats.gir_hits, stats.gir_opportunities);
    stats.scramble_pct = percent(stats.scramble_hits, stats.scramble_opportunities);
    if stats.driving_count > 0 {
        let avg = driving_sum as f64 / f64::from(stats.driving_count);
        stats.driving_avg = (avg * 10.0).round() / 10.0;
    }

    tracing::debug!(
        round = %round.round_id,
        holes_finished = stats.holes_finished,
        total_shots = stats.total_shots,
        fw_hits = stats.fw_hits,
        gir_hits = stats.gir_hits,
        gir_opportunities = stats.gir_opportunities,
        scramble_hits = stats.scramble_hits,
        "round stats"
    );
    stats
}
