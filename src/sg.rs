//! Shot classification and strokes-gained.
//!
//! Every shot is put in one category by an ordered rule list (first match
//! wins), then valued as
//!
//! ```text
//! sg = expected_before - expected_after - 1
//! ```
//!
//! against the [`Baselines`]. Layup drops and penalty shots are left out
//! entirely.

use std::fmt;

use crate::baseline::Baselines;
use crate::lie::{LieAfter, LieBefore};
use crate::round::{Round, Shot};

/// Minimum hole length (yd) for a tee shot to count as off-the-tee.
pub const OTT_MIN_DISTANCE: u32 = 300;

/// Shots from this close (yd) or closer are around-the-green.
pub const ARG_MAX_DISTANCE: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Category {
    /// Off the tee
    Ott,
    /// Approach
    App,
    /// Around the green
    Arg,
    Putt,
}

impl Category {
    pub const ALL: [Category; 4] = [Self::Ott, Self::App, Self::Arg, Self::Putt];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ott => "OTT",
            Self::App => "APP",
            Self::Arg => "ARG",
            Self::Putt => "PUTT",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Classification and expectations
// ---------------------------------------------------------------------------

/// Category of `shot` on a hole of `par`, or `None` for an ignored shot.
pub fn classify(par: Option<u8>, shot: &Shot) -> Option<Category> {
    if shot.is_ignored() {
        return None;
    }
    let category = match shot.lie_before {
        Some(LieBefore::Green) => Category::Putt,
        Some(LieBefore::Tee)
            if shot.number == 1
                && par.is_some_and(|p| p >= 4)
                && shot.dist_before >= OTT_MIN_DISTANCE =>
        {
            Category::Ott
        }
        _ if shot.dist_before <= ARG_MAX_DISTANCE => Category::Arg,
        _ => Category::App,
    };
    Some(category)
}

/// Expected strokes to hole out before the shot.
///
/// Tee shots are keyed by par; everything else by yards remaining.
pub fn expected_before(
    baselines: &Baselines,
    category: Category,
    par: Option<u8>,
    dist_before: u32,
) -> f64 {
    let key = match category {
        Category::Ott => par.map_or(0, i64::from),
        Category::App | Category::Arg | Category::Putt => i64::from(dist_before),
    };
    baselines.table(category).lookup(key)
}

/// Expected strokes to hole out after the shot. The table follows where the
/// ball ended up, not the category of the shot that put it there.
pub fn expected_after(baselines: &Baselines, lie_after: Option<LieAfter>, dist_after: u32) -> f64 {
    let key = i64::from(dist_after);
    match lie_after {
        Some(LieAfter::Holed) => 0.0,
        Some(LieAfter::Green) => baselines.putt.lookup(key),
        _ if dist_after <= ARG_MAX_DISTANCE => baselines.arg.lookup(key),
        _ => baselines.app.lookup(key),
    }
}

/// Category and strokes gained for one shot; `None` if the shot is ignored.
pub fn shot_strokes_gained(
    baselines: &Baselines,
    par: Option<u8>,
    shot: &Shot,
) -> Option<(Category, f64)> {
    let category = classify(par, shot)?;
    let before = expected_before(baselines, category, par, shot.dist_before);
    let after = expected_after(baselines, shot.lie_after, shot.dist_after);
    Some((category, before - after - 1.0))
}

// ---------------------------------------------------------------------------
// Per-shot breakdown
// ---------------------------------------------------------------------------

/// Strokes-gained detail for one recorded shot. Unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShotSg {
    pub hole: u8,
    pub shot: u32,
    /// `None` for layup drops and penalties.
    pub category: Option<Category>,
    pub sg: Option<f64>,
}

/// Every shot of the round in order, valued against `baselines`.
pub fn strokes_gained_by_shot<'a>(
    round: &'a Round,
    baselines: &'a Baselines,
) -> impl Iterator<Item = ShotSg> + 'a {
    round.holes.iter().flat_map(move |hole| {
        hole.shots.iter().map(move |shot| {
            let valued = shot_strokes_gained(baselines, hole.par, shot);
            if let Some((category, sg)) = valued {
                tracing::trace!(hole = hole.number, shot = shot.number, %category, sg, "shot valued");
            } else {
                tracing::trace!(hole = hole.number, shot = shot.number, "shot ignored");
            }
            ShotSg {
                hole: hole.number,
                shot: shot.number,
                category: valued.map(|(c, _)| c),
                sg: valued.map(|(_, sg)| sg),
            }
        })
    })
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

/// Strokes gained for a round, rounded to 2 decimals. Positive is better
/// than the baseline.
///
/// `t2g` and `total` are summed from the rounded components, so
/// `t2g == ott + app + arg` and `total == t2g + putt` hold to the hundredth.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SgTotals {
    pub ott: f64,
    pub app: f64,
    pub arg: f64,
    pub putt: f64,
    /// Tee to green: `ott + app + arg`
    pub t2g: f64,
    pub total: f64,
}

impl SgTotals {
    fn from_sums(ott: f64, app: f64, arg: f64, putt: f64) -> Self {
        let [ott, app, arg, putt] = [ott, app, arg, putt].map(to_hundredths);
        let t2g = ott + app + arg;
        let total = t2g + putt;
        Self {
            ott: from_hundredths(ott),
            app: from_hundredths(app),
            arg: from_hundredths(arg),
            putt: from_hundredths(putt),
            t2g: from_hundredths(t2g),
            total: from_hundredths(total),
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Ott => self.ott,
            Category::App => self.app,
            Category::Arg => self.arg,
            Category::Putt => self.putt,
        }
    }
}

/// Round half away from zero.
fn to_hundredths(x: f64) -> i64 {
    (x * 100.0).round() as i64
}

fn from_hundredths(h: i64) -> f64 {
    h as f64 / 100.0
}

/// Strokes-gained totals against the built-in baselines.
pub fn compute_sg_totals(round: &Round) -> SgTotals {
    compute_sg_totals_with(round, &Baselines::default())
}

pub fn compute_sg_totals_with(round: &Round, baselines: &Baselines) -> SgTotals {
    let (mut ott, mut app, mut arg, mut putt) = (0.0, 0.0, 0.0, 0.0);
    for s in strokes_gained_by_shot(round, baselines) {
        let (Some(category), Some(sg)) = (s.category, s.sg) else {
            continue;
        };
        match category {
            Category::Ott => ott += sg,
            Category::App => app += sg,
            Category::Arg => arg += sg,
            Category::Putt => putt += sg,
        }
    }

    let totals = SgTotals::from_sums(ott, app, arg, putt);
    tracing::debug!(
        round = %round.round_id,
        ott = totals.ott,
        app = totals.app,
        arg = totals.arg,
        putt = totals.putt,
        total = totals.total,
        "strokes gained"
    );
    totals
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::baseline::BaselineEntry;

    fn round() -> Round {
        Round::new("Test", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    fn shot(
        number: u32,
        lie_before: LieBefore,
        dist_before: u32,
        lie_after: LieAfter,
        dist_after: u32,
    ) -> Shot {
        Shot::new(number, lie_before, dist_before, lie_after, dist_after)
    }

    /// Par 4: drive, approach to 5 yd, two putts.
    fn par_four() -> Vec<Shot> {
        vec![
            shot(1, LieBefore::Tee, 400, LieAfter::Fairway, 150),
            shot(2, LieBefore::Fairway, 150, LieAfter::Green, 5),
            shot(3, LieBefore::Green, 5, LieAfter::Green, 1),
            shot(4, LieBefore::Green, 1, LieAfter::Holed, 0),
        ]
    }

    fn hundredths(t: &SgTotals) -> [i64; 6] {
        [t.ott, t.app, t.arg, t.putt, t.t2g, t.total].map(to_hundredths)
    }

    #[test]
    fn empty_round_is_zero() {
        assert_eq!(compute_sg_totals(&round()), SgTotals::default());
    }

    #[test]
    fn ignored_shots() {
        let b = [
            shot(2, LieBefore::Penalty, 150, LieAfter::Green, 5),
            shot(2, LieBefore::Fairway, 150, LieAfter::Penalty, 150),
            shot(3, LieBefore::Layup, 90, LieAfter::Green, 4),
        ];
        for s in &b {
            assert_eq!(classify(Some(4), s), None);
        }
    }

    #[test]
    fn rule_order() {
        // Green wins over the short-distance rule.
        assert_eq!(
            classify(Some(4), &shot(3, LieBefore::Green, 10, LieAfter::Holed, 0)),
            Some(Category::Putt)
        );
        assert_eq!(
            classify(Some(4), &shot(1, LieBefore::Tee, 380, LieAfter::Fairway, 140)),
            Some(Category::Ott)
        );
        assert_eq!(
            classify(Some(5), &shot(1, LieBefore::Tee, 300, LieAfter::Rough, 60)),
            Some(Category::Ott)
        );
        // Par 3, short par 4, unknown par, or not the first shot: approach.
        assert_eq!(
            classify(Some(3), &shot(1, LieBefore::Tee, 320, LieAfter::Green, 10)),
            Some(Category::App)
        );
        assert_eq!(
            classify(Some(4), &shot(1, LieBefore::Tee, 299, LieAfter::Fairway, 40)),
            Some(Category::App)
        );
        assert_eq!(
            classify(None, &shot(1, LieBefore::Tee, 400, LieAfter::Fairway, 150)),
            Some(Category::App)
        );
        assert_eq!(
            classify(Some(5), &shot(2, LieBefore::Tee, 400, LieAfter::Fairway, 150)),
            Some(Category::App)
        );
        assert_eq!(
            classify(Some(4), &shot(3, LieBefore::Bunker, 30, LieAfter::Green, 3)),
            Some(Category::Arg)
        );
        assert_eq!(
            classify(Some(4), &shot(3, LieBefore::Rough, 31, LieAfter::Green, 3)),
            Some(Category::App)
        );
    }

    #[test]
    fn unset_lies_fall_through() {
        let s = Shot { number: 2, dist_before: 120, ..Shot::default() };
        assert_eq!(classify(Some(4), &s), Some(Category::App));
        let s = Shot { number: 2, dist_before: 12, ..Shot::default() };
        assert_eq!(classify(Some(4), &s), Some(Category::Arg));
    }

    #[test]
    fn expected_after_follows_resting_lie() {
        let b = Baselines::default();
        assert_eq!(expected_after(&b, Some(LieAfter::Holed), 0), 0.0);
        assert_eq!(expected_after(&b, Some(LieAfter::Green), 5), 1.78);
        assert_eq!(expected_after(&b, Some(LieAfter::Fringe), 5), 2.25);
        assert_eq!(expected_after(&b, Some(LieAfter::Rough), 150), 2.95);
        assert_eq!(expected_after(&b, None, 0), 2.05);
    }

    #[test]
    fn tee_expectation_keyed_by_par() {
        let b = Baselines::default();
        assert_eq!(expected_before(&b, Category::Ott, Some(4), 420), 4.05);
        assert_eq!(expected_before(&b, Category::Ott, Some(5), 540), 4.70);
        assert_eq!(expected_before(&b, Category::App, Some(5), 155), 2.95);
    }

    #[test]
    fn par_four_hole() {
        let mut r = round();
        r.holes[0].par = Some(4);
        r.holes[0].shots = par_four();

        let t = compute_sg_totals(&r);
        assert_eq!(t.ott, 0.10);
        assert_eq!(t.app, 0.17);
        assert_eq!(t.arg, 0.0);
        assert_eq!(t.putt, -0.22);
        assert_eq!(t.t2g, 0.27);
        assert_eq!(t.total, 0.05);
    }

    #[test]
    fn penalty_shot_left_out() {
        let mut clean = round();
        clean.holes[0].par = Some(4);
        clean.holes[0].shots = par_four();

        let mut with_penalty = clean.clone();
        with_penalty.holes[1].par = Some(4);
        with_penalty.holes[1].shots = vec![shot(1, LieBefore::Penalty, 200, LieAfter::Penalty, 200)];

        assert_eq!(compute_sg_totals(&clean), compute_sg_totals(&with_penalty));

        let b = Baselines::default();
        let detail: Vec<_> = strokes_gained_by_shot(&with_penalty, &b).collect();
        assert_eq!(detail.len(), 5);
        assert_eq!(detail[4], ShotSg { hole: 2, shot: 1, category: None, sg: None });
    }

    #[test]
    fn decomposition_holds_after_rounding() {
        let mut r = round();
        for (i, hole) in r.holes.iter_mut().enumerate() {
            hole.par = Some(if i % 3 == 0 { 5 } else { 4 });
            hole.shots = vec![
                shot(1, LieBefore::Tee, 333 + i as u32 * 7, LieAfter::Rough, 171 - i as u32),
                shot(2, LieBefore::Rough, 171 - i as u32, LieAfter::Fringe, 13 + i as u32),
                shot(3, LieBefore::Fringe, 13 + i as u32, LieAfter::Green, 3),
                shot(4, LieBefore::Green, 3, LieAfter::Holed, 0),
            ];
        }
        let [ott, app, arg, putt, t2g, total] = hundredths(&compute_sg_totals(&r));
        assert_eq!(t2g, ott + app + arg);
        assert_eq!(total, t2g + putt);
    }

    #[test]
    fn custom_baselines() {
        let flat = |ev: f64| vec![BaselineEntry { key: 0, expected: ev }];
        let b = Baselines::new(flat(4.0), flat(3.0), flat(2.0), flat(1.5)).unwrap();
        let mut r = round();
        r.holes[0].par = Some(4);
        r.holes[0].shots = par_four();

        // OTT 4 - 3 - 1, APP 3 - 1.5 - 1, PUTT (1.5 - 1.5 - 1) + (1.5 - 0 - 1)
        let t = compute_sg_totals_with(&r, &b);
        assert_eq!(t.ott, 0.0);
        assert_eq!(t.app, 0.5);
        assert_eq!(t.putt, -0.5);
        assert_eq!(t.total, 0.0);
        assert_eq!(t.get(Category::App), 0.5);
    }

    #[test]
    fn totals_round_half_away_from_zero() {
        let flat = |ev: f64| vec![BaselineEntry { key: 0, expected: ev }];
        let b = Baselines::new(flat(3.0), flat(2.875), flat(3.125), flat(2.0)).unwrap();
        let mut r = round();
        // APP 2.875 - 2 - 1 = -0.125
        r.holes[0].par = Some(3);
        r.holes[0].shots = vec![
            shot(1, LieBefore::Tee, 160, LieAfter::Green, 5),
            shot(2, LieBefore::Green, 5, LieAfter::Holed, 0),
        ];
        // ARG 3.125 - 2 - 1 = +0.125
        r.holes[1].par = Some(4);
        r.holes[1].shots = vec![
            shot(1, LieBefore::Fringe, 10, LieAfter::Green, 1),
            shot(2, LieBefore::Green, 1, LieAfter::Holed, 0),
        ];

        let t = compute_sg_totals_with(&r, &b);
        assert_eq!(t.app, -0.13);
        assert_eq!(t.arg, 0.13);
        assert_eq!(t.ott, 0.0);
        assert_eq!(t.putt, 2.0);
        assert_eq!(t.t2g, 0.0);
        assert_eq!(t.total, 2.0);
    }

    #[test]
    fn idempotent() {
        let mut r = round();
        r.holes[3].par = Some(4);
        r.holes[3].shots = par_four();
        let a = compute_sg_totals(&r);
        let b = compute_sg_totals(&r);
        assert_eq!(a, b);
        assert_eq!(a.total.to_bits(), b.total.to_bits());
    }
}
