//! Baseline expectation tables and the floor-match lookup.
//!
//! Each table maps a situation key (yards to the hole, or par for tee shots)
//! to the expected number of strokes left to finish the hole. Lookups pick
//! the entry with the greatest key not above the requested value; requests
//! below the first key get the first entry. Nothing is ever extrapolated.

use std::borrow::Cow;

use crate::error::{DataError, Result};
use crate::sg::Category;

/// One `(key, expected strokes)` row.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaselineEntry {
    pub key: i64,
    #[cfg_attr(feature = "serde", serde(rename = "ev"))]
    pub expected: f64,
}

const fn e(key: i64, expected: f64) -> BaselineEntry {
    BaselineEntry { key, expected }
}

/// Non-empty table, strictly ascending by key.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineTable {
    name: &'static str,
    entries: Cow<'static, [BaselineEntry]>,
}

impl BaselineTable {
    pub fn new(name: &'static str, entries: Vec<BaselineEntry>) -> Result<Self> {
        check_entries(name, &entries)?;
        Ok(Self { name, entries: Cow::Owned(entries) })
    }

    /// Wrap built-in data. Invalid data fails at compile time when used in a
    /// `const`.
    const fn from_static(name: &'static str, entries: &'static [BaselineEntry]) -> Self {
        assert!(!entries.is_empty());
        let mut i = 1;
        while i < entries.len() {
            assert!(entries[i - 1].key < entries[i].key);
            i += 1;
        }
        Self { name, entries: Cow::Borrowed(entries) }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn entries(&self) -> &[BaselineEntry] {
        &self.entries
    }

    /// Expected strokes at `value`, floor-matched.
    pub fn lookup(&self, value: i64) -> f64 {
        let above = self.entries.partition_point(|row| row.key <= value);
        self.entries[above.saturating_sub(1)].expected
    }
}

fn check_entries(table: &'static str, entries: &[BaselineEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(DataError::EmptyBaseline { table });
    }
    for (index, pair) in entries.windows(2).enumerate() {
        if pair[0].key >= pair[1].key {
            return Err(DataError::UnsortedBaseline {
                table,
                index: index + 1,
                prev: pair[0].key,
                key: pair[1].key,
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Built-in reference data
// ---------------------------------------------------------------------------

/// Tee shots, keyed by hole par.
pub const OTT: BaselineTable = BaselineTable::from_static("OTT", &[
    e(3, 3.05),
    e(4, 4.05),
    e(5, 4.70),
]);

/// Full shots from the fairway, keyed by yards.
pub const APP: BaselineTable = BaselineTable::from_static("APP", &[
    e(30, 2.59),
    e(40, 2.62),
    e(50, 2.66),
    e(60, 2.70),
    e(70, 2.72),
    e(80, 2.75),
    e(90, 2.77),
    e(100, 2.80),
    e(110, 2.83),
    e(120, 2.85),
    e(130, 2.88),
    e(140, 2.91),
    e(150, 2.95),
    e(160, 2.98),
    e(170, 3.03),
    e(180, 3.08),
    e(190, 3.13),
    e(200, 3.19),
    e(220, 3.32),
    e(240, 3.45),
    e(260, 3.58),
    e(280, 3.69),
    e(300, 3.78),
    e(350, 3.95),
    e(400, 3.99),
    e(450, 4.17),
    e(500, 4.41),
    e(550, 4.69),
    e(600, 4.82),
]);

/// Short game inside 30 yd, keyed by yards.
pub const ARG: BaselineTable = BaselineTable::from_static("ARG", &[
    e(0, 2.05),
    e(5, 2.25),
    e(10, 2.40),
    e(15, 2.47),
    e(20, 2.53),
    e(25, 2.56),
    e(30, 2.59),
]);

/// Putts, keyed by yards.
pub const PUTT: BaselineTable = BaselineTable::from_static("PUTT", &[
    e(0, 1.00),
    e(1, 1.04),
    e(2, 1.34),
    e(3, 1.56),
    e(4, 1.70),
    e(5, 1.78),
    e(7, 1.87),
    e(10, 1.98),
    e(13, 2.06),
    e(20, 2.21),
    e(30, 2.40),
]);

// ---------------------------------------------------------------------------
// Baselines
// ---------------------------------------------------------------------------

/// The four tables a strokes-gained computation reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Baselines {
    pub ott: BaselineTable,
    pub app: BaselineTable,
    pub arg: BaselineTable,
    pub putt: BaselineTable,
}

impl Default for Baselines {
    fn default() -> Self {
        Self { ott: OTT, app: APP, arg: ARG, putt: PUTT }
    }
}

impl Baselines {
    pub fn new(
        ott: Vec<BaselineEntry>,
        app: Vec<BaselineEntry>,
        arg: Vec<BaselineEntry>,
        putt: Vec<BaselineEntry>,
    ) -> Result<Self> {
        Ok(Self {
            ott: BaselineTable::new("OTT", ott)?,
            app: BaselineTable::new("APP", app)?,
            arg: BaselineTable::new("ARG", arg)?,
            putt: BaselineTable::new("PUTT", putt)?,
        })
    }

    pub fn table(&self, category: Category) -> &BaselineTable {
        match category {
            Category::Ott => &self.ott,
            Category::App => &self.app,
            Category::Arg => &self.arg,
            Category::Putt => &self.putt,
        }
    }
}

#[cfg(feature = "json")]
#[derive(serde::Serialize, serde::Deserialize)]
struct BaselinesDoc {
    ott: Vec<BaselineEntry>,
    app: Vec<BaselineEntry>,
    arg: Vec<BaselineEntry>,
    putt: Vec<BaselineEntry>,
}

#[cfg(feature = "json")]
impl Baselines {
    /// Load and check tables from `{"ott": [{"key": 4, "ev": 4.05}, ...], ...}`.
    pub fn from_json(s: &str) -> Result<Self> {
        let doc: BaselinesDoc = serde_json::from_str(s)?;
        Self::new(doc.ott, doc.app, doc.arg, doc.putt)
    }

    pub fn to_json(&self) -> Result<String> {
        let doc = BaselinesDoc {
            ott: self.ott.entries().to_vec(),
            app: self.app.entries().to_vec(),
            arg: self.arg.entries().to_vec(),
            putt: self.putt.entries().to_vec(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }
}
