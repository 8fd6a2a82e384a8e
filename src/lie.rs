//! Closed lie vocabularies for the before and after state of a shot.
//!
//! Lie values arrive as strings from the data-entry surface. They are parsed
//! once here, so the engines only ever match on the enums. An unset lie is
//! `None` in the data model and the empty string on the wire.

use std::fmt;
use std::str::FromStr;

use crate::error::{DataError, Result};

/// Where the ball lay when the shot was struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LieBefore {
    Tee,
    Fairway,
    Rough,
    Fringe,
    Green,
    Bunker,
    /// Dropped after a layup.
    Layup,
    /// Played from a penalty situation.
    Penalty,
}

/// Where the ball came to rest after the shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LieAfter {
    Fairway,
    Rough,
    Fringe,
    Green,
    Bunker,
    Penalty,
    /// In the cup. Remaining distance is always 0.
    Holed,
}

impl LieBefore {
    pub const ALL: [LieBefore; 8] = [
        Self::Tee,
        Self::Fairway,
        Self::Rough,
        Self::Fringe,
        Self::Green,
        Self::Bunker,
        Self::Layup,
        Self::Penalty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tee => "Tee",
            Self::Fairway => "Fairway",
            Self::Rough => "Rough",
            Self::Fringe => "Fringe",
            Self::Green => "Green",
            Self::Bunker => "Bunker",
            Self::Layup => "Layup",
            Self::Penalty => "Penalty",
        }
    }

    /// Layup drops and penalty situations carry no strokes-gained value.
    pub fn is_ignored(self) -> bool {
        matches!(self, Self::Layup | Self::Penalty)
    }
}

impl LieAfter {
    pub const ALL: [LieAfter; 7] = [
        Self::Fairway,
        Self::Rough,
        Self::Fringe,
        Self::Green,
        Self::Bunker,
        Self::Penalty,
        Self::Holed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fairway => "Fairway",
            Self::Rough => "Rough",
            Self::Fringe => "Fringe",
            Self::Green => "Green",
            Self::Bunker => "Bunker",
            Self::Penalty => "Penalty",
            Self::Holed => "Holed",
        }
    }

    pub fn is_ignored(self) -> bool {
        matches!(self, Self::Penalty)
    }

    /// Starting lie of the following shot. A holed ball has none.
    pub fn next_lie_before(self) -> Option<LieBefore> {
        match self {
            Self::Fairway => Some(LieBefore::Fairway),
            Self::Rough => Some(LieBefore::Rough),
            Self::Fringe => Some(LieBefore::Fringe),
            Self::Green => Some(LieBefore::Green),
            Self::Bunker => Some(LieBefore::Bunker),
            Self::Penalty => Some(LieBefore::Penalty),
            Self::Holed => None,
        }
    }
}

impl FromStr for LieBefore {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|lie| lie.as_str() == s)
            .ok_or_else(|| DataError::unknown_lie("lieBefore", s))
    }
}

impl FromStr for LieAfter {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|lie| lie.as_str() == s)
            .ok_or_else(|| DataError::unknown_lie("lieAfter", s))
    }
}

impl fmt::Display for LieBefore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LieAfter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an optional lie: the empty string means "not set".
pub fn parse_opt<L: FromStr<Err = DataError>>(s: &str) -> Result<Option<L>> {
    if s.is_empty() {
        return Ok(None);
    }
    s.parse().map(Some)
}

/// Format an optional lie, writing "" when unset.
pub fn format_opt<L: fmt::Display>(lie: Option<L>) -> String {
    lie.map(|l| l.to_string()).unwrap_or_default()
}

/// Serde adapter for `Option<LieBefore>` / `Option<LieAfter>` fields using
/// the empty-string convention.
#[cfg(feature = "serde")]
pub(crate) mod opt_serde {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer};

    use crate::error::DataError;

    pub fn serialize<S, L>(lie: &Option<L>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        L: Display,
    {
        serializer.serialize_str(&super::format_opt(lie.as_ref()))
    }

    pub fn deserialize<'de, D, L>(deserializer: D) -> Result<Option<L>, D::Error>
    where
        D: Deserializer<'de>,
        L: FromStr<Err = DataError>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_opt(&s).map_err(serde::de::Error::custom)
    }
}
