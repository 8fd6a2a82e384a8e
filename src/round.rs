//! Round, hole and shot records.
//!
//! A [`Round`] is a plain value: the engines in [`crate::sg`] and
//! [`crate::stats`] take it by shared reference and never mutate it. The
//! editing helpers here are for the data-entry side, which owns the draft
//! and hands out snapshots.

use chrono::{Datelike, NaiveDate};

use crate::error::{DataError, Result};
use crate::lie::{LieAfter, LieBefore};

/// Holes in a round.
pub const HOLES: usize = 18;

/// Course name used when none is given.
pub const DEFAULT_COURSE: &str = "MyCourse";

// ---------------------------------------------------------------------------
// Shot
// ---------------------------------------------------------------------------

/// One recorded stroke. Distances are yards to the hole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Shot {
    /// 1-based stroke number on the hole
    #[cfg_attr(feature = "serde", serde(rename = "shot"))]
    pub number: u32,
    #[cfg_attr(feature = "serde", serde(with = "crate::lie::opt_serde", default))]
    pub lie_before: Option<LieBefore>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dist_before: u32,
    #[cfg_attr(feature = "serde", serde(with = "crate::lie::opt_serde", default))]
    pub lie_after: Option<LieAfter>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dist_after: u32,
}

impl Shot {
    pub fn new(
        number: u32,
        lie_before: LieBefore,
        dist_before: u32,
        lie_after: LieAfter,
        dist_after: u32,
    ) -> Self {
        Self {
            number,
            lie_before: Some(lie_before),
            dist_before,
            lie_after: Some(lie_after),
            dist_after,
        }
    }

    pub fn is_holed(&self) -> bool {
        self.lie_after == Some(LieAfter::Holed)
    }

    /// Either side of the shot involved a penalty.
    pub fn is_penalty(&self) -> bool {
        self.lie_before == Some(LieBefore::Penalty) || self.lie_after == Some(LieAfter::Penalty)
    }

    /// Layup drops and penalties are left out of strokes-gained.
    pub fn is_ignored(&self) -> bool {
        self.lie_before.is_some_and(LieBefore::is_ignored)
            || self.lie_after.is_some_and(LieAfter::is_ignored)
    }
}

// ---------------------------------------------------------------------------
// Hole
// ---------------------------------------------------------------------------

/// Progress on a hole, as shown in the hole picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleStatus {
    NotStarted,
    InProgress,
    Finished,
}

impl HoleStatus {
    pub fn marker(self) -> &'static str {
        match self {
            Self::NotStarted => "",
            Self::InProgress => "●",
            Self::Finished => "✓",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hole {
    /// Hole number (1-18)
    #[cfg_attr(feature = "serde", serde(rename = "hole"))]
    pub number: u8,
    /// 3, 4 or 5. `None` until the player sets it.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub par: Option<u8>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shots: Vec<Shot>,
}

impl Hole {
    pub fn new(number: u8) -> Self {
        Self { number, par: None, shots: Vec::new() }
    }

    pub fn is_started(&self) -> bool {
        !self.shots.is_empty()
    }

    /// Some shot on the hole went in.
    pub fn is_finished(&self) -> bool {
        self.holed_shot().is_some()
    }

    /// The shot that holed out, first one wins.
    pub fn holed_shot(&self) -> Option<&Shot> {
        self.shots.iter().find(|s| s.is_holed())
    }

    pub fn first_shot(&self) -> Option<&Shot> {
        self.shots.first()
    }

    pub fn status(&self) -> HoleStatus {
        if self.is_finished() {
            HoleStatus::Finished
        } else if self.is_started() {
            HoleStatus::InProgress
        } else {
            HoleStatus::NotStarted
        }
    }

    pub fn par_missing(&self) -> bool {
        self.par.is_none()
    }

    pub fn set_par(&mut self, par: Option<u8>) -> Result<()> {
        if let Some(p) = par {
            check_par(self.number, p)?;
        }
        self.par = par;
        Ok(())
    }

    /// Append the next shot, starting where the previous one finished.
    pub fn add_shot(&mut self) -> &mut Shot {
        let number = self.shots.len() as u32 + 1;
        let (lie_before, dist_before) = match self.shots.last() {
            Some(prev) => (
                prev.lie_after.and_then(LieAfter::next_lie_before),
                prev.dist_after,
            ),
            None => (None, 0),
        };
        self.shots.push(Shot {
            number,
            lie_before,
            dist_before,
            lie_after: None,
            dist_after: 0,
        });
        let last = self.shots.len() - 1;
        &mut self.shots[last]
    }

    /// Edit the shot at `index`, then carry its result into the next shot.
    ///
    /// A holed shot always has 0 yd remaining. Shot numbers are not editable.
    pub fn update_shot(&mut self, index: usize, edit: impl FnOnce(&mut Shot)) -> Result<()> {
        let len = self.shots.len();
        let shot = self
            .shots
            .get_mut(index)
            .ok_or(DataError::ShotIndex { hole: self.number, index, len })?;

        let number = shot.number;
        edit(shot);
        shot.number = number;
        if shot.is_holed() {
            shot.dist_after = 0;
        }

        let (lie_after, dist_after) = (shot.lie_after, shot.dist_after);
        if let Some(next) = self.shots.get_mut(index + 1) {
            if let Some(lie) = lie_after {
                next.lie_before = lie.next_lie_before().or(next.lie_before);
            }
            next.dist_before = dist_after;
        }
        Ok(())
    }

    /// Drop the most recent shot. Returns it, or `None` if the hole is empty.
    pub fn delete_last_shot(&mut self) -> Option<Shot> {
        self.shots.pop()
    }

    fn validate(&self) -> Result<()> {
        if let Some(par) = self.par {
            check_par(self.number, par)?;
        }

        let mut holed_on = None;
        for (index, shot) in self.shots.iter().enumerate() {
            if shot.number as usize != index + 1 {
                return Err(DataError::ShotNumberGap {
                    hole: self.number,
                    index,
                    number: shot.number,
                });
            }
            if let Some(holed_on) = holed_on {
                return Err(DataError::ShotAfterHoled {
                    hole: self.number,
                    shot: shot.number,
                    holed_on,
                });
            }
            if shot.is_holed() {
                if shot.dist_after != 0 {
                    return Err(DataError::HoledWithDistance {
                        hole: self.number,
                        shot: shot.number,
                        dist_after: shot.dist_after,
                    });
                }
                holed_on = Some(shot.number);
            }
        }
        Ok(())
    }
}

fn check_par(hole: u8, par: u8) -> Result<()> {
    match par {
        3..=5 => Ok(()),
        _ => Err(DataError::InvalidPar { hole, par }),
    }
}

// ---------------------------------------------------------------------------
// Round
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Round {
    pub date: NaiveDate,
    pub course: String,
    /// `YYYYDDDD-<course>`, DDDD being the day of the year
    pub round_id: String,
    /// Positional: `holes[i]` is hole `i + 1`.
    pub holes: Vec<Hole>,
}

impl Round {
    /// Start an empty 18-hole round on `date`.
    pub fn new(course: &str, date: NaiveDate) -> Self {
        let course = sanitize_course_name(if course.is_empty() { DEFAULT_COURSE } else { course });
        let round_id = format!("{}{:04}-{}", date.year(), date.ordinal(), course);
        Self {
            date,
            course,
            round_id,
            holes: (1..=HOLES as u8).map(Hole::new).collect(),
        }
    }

    /// Hole by its 1-based number.
    pub fn hole(&self, number: u8) -> Option<&Hole> {
        self.holes.get(usize::from(number).checked_sub(1)?)
    }

    pub fn hole_mut(&mut self, number: u8) -> Option<&mut Hole> {
        self.holes.get_mut(usize::from(number).checked_sub(1)?)
    }

    /// Check the structural rules the editing surface is expected to keep:
    /// 18 positional holes, par 3-5 when set, shot numbers 1..=n with no
    /// gaps, nothing recorded after the ball is holed, and 0 yd left on a
    /// holed shot.
    pub fn validate(&self) -> Result<()> {
        if self.holes.len() != HOLES {
            return Err(DataError::HoleCount { got: self.holes.len() });
        }
        for (index, hole) in self.holes.iter().enumerate() {
            if usize::from(hole.number) != index + 1 {
                return Err(DataError::HoleOutOfPosition { index, number: hole.number });
            }
            hole.validate().inspect_err(|err| {
                tracing::warn!(round = %self.round_id, hole = hole.number, %err, "invalid hole");
            })?;
        }
        Ok(())
    }
}

/// Trim, turn whitespace runs into `-`, and keep only ASCII alphanumerics,
/// `-` and Thai letters.
pub fn sanitize_course_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_alphanumeric() || c == '-' || ('\u{0E01}'..='\u{0E59}').contains(&c) {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 3).unwrap()
    }

    #[test]
    fn new_round_has_eighteen_empty_holes() {
        let round = Round::new("Pine Valley", date());
        assert_eq!(round.holes.len(), HOLES);
        assert_eq!(round.round_id, "20250034-Pine-Valley");
        assert_eq!(round.course, "Pine-Valley");
        for (i, hole) in round.holes.iter().enumerate() {
            assert_eq!(usize::from(hole.number), i + 1);
            assert!(hole.par.is_none());
            assert_eq!(hole.status(), HoleStatus::NotStarted);
        }
        round.validate().unwrap();
    }

    #[test]
    fn course_name_sanitized() {
        assert_eq!(sanitize_course_name("  St. Andrews  Old "), "St-Andrews-Old");
        assert_eq!(sanitize_course_name("สนาม กอล์ฟ"), "สนาม-กอล์ฟ");
        assert_eq!(Round::new("", date()).course, DEFAULT_COURSE);
    }

    #[test]
    fn added_shot_starts_where_previous_finished() {
        let mut hole = Hole::new(1);
        let first = hole.add_shot();
        assert_eq!(first.number, 1);
        assert_eq!(first.lie_before, None);
        first.lie_before = Some(LieBefore::Tee);
        first.dist_before = 400;
        first.lie_after = Some(LieAfter::Rough);
        first.dist_after = 150;

        let second = hole.add_shot();
        assert_eq!(second.number, 2);
        assert_eq!(second.lie_before, Some(LieBefore::Rough));
        assert_eq!(second.dist_before, 150);
        assert_eq!(second.lie_after, None);
        assert_eq!(hole.status(), HoleStatus::InProgress);
    }

    #[test]
    fn update_shot_propagates_and_zeroes_holed() {
        let mut hole = Hole::new(4);
        hole.add_shot();
        hole.add_shot();

        hole.update_shot(0, |s| {
            s.lie_after = Some(LieAfter::Green);
            s.dist_after = 8;
            s.number = 99;
        })
        .unwrap();
        assert_eq!(hole.shots[0].number, 1);
        assert_eq!(hole.shots[1].lie_before, Some(LieBefore::Green));
        assert_eq!(hole.shots[1].dist_before, 8);

        hole.update_shot(1, |s| {
            s.lie_after = Some(LieAfter::Holed);
            s.dist_after = 3;
        })
        .unwrap();
        assert_eq!(hole.shots[1].dist_after, 0);
        assert_eq!(hole.holed_shot().map(|s| s.number), Some(2));
        assert_eq!(hole.status(), HoleStatus::Finished);
        assert_eq!(hole.status().marker(), "✓");
    }

    #[test]
    fn update_missing_shot_fails() {
        let mut hole = Hole::new(2);
        let err = hole.update_shot(0, |_| {}).unwrap_err();
        assert!(matches!(err, DataError::ShotIndex { hole: 2, index: 0, len: 0 }));
    }

    #[test]
    fn delete_last_shot() {
        let mut hole = Hole::new(1);
        assert!(hole.delete_last_shot().is_none());
        hole.add_shot();
        hole.add_shot();
        assert_eq!(hole.delete_last_shot().map(|s| s.number), Some(2));
        assert_eq!(hole.shots.len(), 1);
    }

    #[test]
    fn par_limited_to_three_through_five() {
        let mut hole = Hole::new(9);
        assert!(hole.par_missing());
        hole.set_par(Some(5)).unwrap();
        assert_eq!(hole.par, Some(5));
        assert!(matches!(
            hole.set_par(Some(6)),
            Err(DataError::InvalidPar { hole: 9, par: 6 })
        ));
        assert_eq!(hole.par, Some(5));
        hole.set_par(None).unwrap();
        assert!(hole.par_missing());
    }

    #[test]
    fn validate_rejects_gap() {
        let mut round = Round::new("x", date());
        round.holes[2].shots = vec![
            Shot::new(1, LieBefore::Tee, 150, LieAfter::Green, 10),
            Shot::new(3, LieBefore::Green, 10, LieAfter::Holed, 0),
        ];
        let err = round.validate().unwrap_err();
        assert!(matches!(err, DataError::ShotNumberGap { hole: 3, index: 1, number: 3 }));
    }

    #[test]
    fn validate_rejects_shot_after_holed() {
        let mut round = Round::new("x", date());
        round.holes[0].shots = vec![
            Shot::new(1, LieBefore::Tee, 150, LieAfter::Holed, 0),
            Shot::new(2, LieBefore::Green, 3, LieAfter::Holed, 0),
        ];
        assert_eq!(round.holes[0].holed_shot().map(|s| s.number), Some(1));
        assert!(matches!(
            round.validate(),
            Err(DataError::ShotAfterHoled { hole: 1, shot: 2, holed_on: 1 })
        ));
    }

    #[test]
    fn validate_rejects_holed_with_distance() {
        let mut round = Round::new("x", date());
        round.holes[5].shots = vec![Shot::new(1, LieBefore::Tee, 150, LieAfter::Holed, 4)];
        assert!(matches!(
            round.validate(),
            Err(DataError::HoledWithDistance { hole: 6, shot: 1, dist_after: 4 })
        ));
    }

    #[test]
    fn validate_rejects_misplaced_hole() {
        let mut round = Round::new("x", date());
        round.holes.swap(0, 1);
        assert!(matches!(
            round.validate(),
            Err(DataError::HoleOutOfPosition { index: 0, number: 2 })
        ));
        round.holes.pop();
        assert!(matches!(round.validate(), Err(DataError::HoleCount { got: 17 })));
    }

    #[test]
    fn hole_lookup_is_one_based() {
        let round = Round::new("x", date());
        assert_eq!(round.hole(1).map(|h| h.number), Some(1));
        assert_eq!(round.hole(18).map(|h| h.number), Some(18));
        assert!(round.hole(0).is_none());
        assert!(round.hole(19).is_none());
    }
}
