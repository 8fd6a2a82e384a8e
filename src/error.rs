use thiserror::Error;

/// Errors arising where round data and reference tables enter the crate.
///
/// The statistics and strokes-gained engines never produce these; they are
/// total over whatever round they are handed.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unknown {field} value {value:?}")]
    UnknownLie { field: &'static str, value: String },

    #[error("invalid par {par} on hole {hole} (expected 3, 4 or 5)")]
    InvalidPar { hole: u8, par: u8 },

    #[error("expected 18 holes, got {got}")]
    HoleCount { got: usize },

    #[error("hole at position {index} is numbered {number}")]
    HoleOutOfPosition { index: usize, number: u8 },

    #[error("hole {hole}: shot at position {index} is numbered {number}, expected {}", index + 1)]
    ShotNumberGap { hole: u8, index: usize, number: u32 },

    #[error("hole {hole}: shot {shot} recorded after the ball was holed on shot {holed_on}")]
    ShotAfterHoled { hole: u8, shot: u32, holed_on: u32 },

    #[error("hole {hole}: shot {shot} is holed but has {dist_after} yd remaining")]
    HoledWithDistance { hole: u8, shot: u32, dist_after: u32 },

    #[error("hole {hole}: no shot at index {index} ({len} recorded)")]
    ShotIndex { hole: u8, index: usize, len: usize },

    #[error("baseline table {table} is empty")]
    EmptyBaseline { table: &'static str },

    #[error("baseline table {table} keys not strictly ascending at entry {index} ({prev} then {key})")]
    UnsortedBaseline {
        table: &'static str,
        index: usize,
        prev: i64,
        key: i64,
    },

    #[cfg(feature = "json")]
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "csv")]
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Create an `UnknownLie` error for the named field.
    pub(crate) fn unknown_lie(field: &'static str, value: &str) -> Self {
        Self::UnknownLie { field, value: value.to_owned() }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_message_names_expected_number() {
        let err = DataError::ShotNumberGap { hole: 7, index: 2, number: 5 };
        assert_eq!(
            err.to_string(),
            "hole 7: shot at position 2 is numbered 5, expected 3"
        );
    }

    #[test]
    fn unknown_lie_message_quotes_value() {
        let err = DataError::unknown_lie("lieBefore", "Cart path");
        assert_eq!(err.to_string(), "unknown lieBefore value \"Cart path\"");
    }
}
